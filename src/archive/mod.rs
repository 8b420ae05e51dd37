use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Datelike, Utc};
use log::{info, warn};
use regex::Regex;

use crate::configuration::archive_format::ArchiveFormat;
use crate::error::KeeperError;
use crate::host::{Archiver, FileSystem};

pub struct Archive {}

#[derive(Debug, PartialEq)]
pub struct ArchiveReport {
    pub path: PathBuf,
}

impl fmt::Display for ArchiveReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Archive created successfully at '{}'.",
            self.path.display()
        )
    }
}

impl Archive {
    /// Replaces `{date:year}`, `{date:month}`, `{date:day}` and `{date:weekday}`.
    pub fn build_real_archive_name(name: &str, now: DateTime<Utc>) -> String {
        lazy_static! {
            static ref REGEX_DATE_YEAR: Regex = Regex::new(r"\{date:year\}").unwrap();
            static ref REGEX_DATE_MONTH: Regex = Regex::new(r"\{date:month\}").unwrap();
            static ref REGEX_DATE_DAY: Regex = Regex::new(r"\{date:day\}").unwrap();
            static ref REGEX_DATE_WEEKDAY: Regex = Regex::new(r"\{date:weekday\}").unwrap();
        }
        let mut name = REGEX_DATE_YEAR
            .replace_all(name, format!("{:04}", now.year()).as_str())
            .into_owned();
        name = REGEX_DATE_MONTH
            .replace_all(name.as_str(), format!("{:02}", now.month()).as_str())
            .into_owned();
        name = REGEX_DATE_DAY
            .replace_all(name.as_str(), format!("{:02}", now.day()).as_str())
            .into_owned();
        name = REGEX_DATE_WEEKDAY
            .replace_all(name.as_str(), format!("{:?}", now.weekday()).as_str())
            .into_owned();

        name
    }

    fn output_path(directory: &Path, base_name: &str, format: ArchiveFormat) -> PathBuf {
        let mut path: OsString = directory.join(base_name).into_os_string();
        path.push(format.suffix());
        PathBuf::from(path)
    }

    /// Packs `directory` into `<archive directory>/<base name><suffix>`.
    ///
    /// `archive_directory` overrides the home directory as target. The base
    /// name is taken literally unless `expand_placeholders` is set.
    pub fn start(
        file_system: &dyn FileSystem,
        archiver: &dyn Archiver,
        archive_directory: Option<&Path>,
        expand_placeholders: bool,
        directory: &str,
        archive_type: &str,
        base_name: &str,
    ) -> Result<ArchiveReport, KeeperError> {
        if !file_system.exists(Path::new(directory)) {
            return Err(KeeperError::DirectoryNotFound(directory.to_string()));
        }
        let format = match ArchiveFormat::from_name(archive_type) {
            Some(format) => format,
            None => return Err(KeeperError::InvalidArchiveType(archive_type.to_string())),
        };
        let target = match archive_directory {
            Some(target) => target.to_path_buf(),
            None => file_system.home_dir().ok_or(KeeperError::HomeNotFound)?,
        };

        let path = if expand_placeholders {
            let real_archive_name = Self::build_real_archive_name(base_name, Utc::now());
            Self::output_path(&target, &real_archive_name, format)
        } else {
            Self::output_path(&target, base_name, format)
        };

        info!("creating archive: {}", path.display());
        archiver
            .create(Path::new(directory), &path, format)
            .map_err(|why| {
                warn!("unable to create archive '{}': {}", path.display(), why);
                KeeperError::Archive(why)
            })?;

        Ok(ArchiveReport { path })
    }
}
