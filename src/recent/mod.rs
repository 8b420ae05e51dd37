use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use log::warn;

use crate::error::KeeperError;
use crate::formatter::Formatter;
use crate::host::FileSystem;

pub struct Recent {}

#[derive(Debug, PartialEq)]
pub struct RecentReport {
    pub directory: PathBuf,
    pub listed: usize,
}

impl Recent {
    /// Prints every file below `directory` (the current directory when
    /// `None`) modified strictly after `now - window`.
    pub fn start(
        file_system: &dyn FileSystem,
        directory: Option<&str>,
        window: Duration,
        now: SystemTime,
        out: &mut dyn Write,
    ) -> Result<RecentReport, KeeperError> {
        let directory = match directory {
            Some(directory) => PathBuf::from(directory),
            None => file_system.current_dir().map_err(KeeperError::Recent)?,
        };
        if !file_system.exists(&directory) {
            return Err(KeeperError::DirectoryNotFound(
                directory.display().to_string(),
            ));
        }

        let cutoff = now.checked_sub(window).unwrap_or(SystemTime::UNIX_EPOCH);
        let listed = Self::list(file_system, &directory, cutoff, out).map_err(|why| {
            warn!("walking '{}' failed: {}", directory.display(), why);
            KeeperError::Recent(why)
        })?;

        Ok(RecentReport { directory, listed })
    }

    fn list(
        file_system: &dyn FileSystem,
        directory: &Path,
        cutoff: SystemTime,
        out: &mut dyn Write,
    ) -> io::Result<usize> {
        let mut listed = 0;
        for stamp in file_system.walk_files(directory) {
            let stamp = stamp?;
            if stamp.modified > cutoff {
                writeln!(
                    out,
                    "{} - Last modified: {}",
                    stamp.path.display(),
                    Formatter::format_timestamp(stamp.modified)
                )?;
                listed += 1;
            }
        }
        Ok(listed)
    }
}
