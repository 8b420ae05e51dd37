use std::io::Write;
use std::path::Path;

use log::{debug, warn};

use crate::error::KeeperError;
use crate::formatter::Formatter;
use crate::host::{Archiver, FileSystem};

pub struct Inspect {}

#[derive(Debug, PartialEq)]
pub struct InspectReport {
    pub entries: usize,
    pub listed: usize,
}

impl Inspect {
    pub const UNKNOWN_OS: &'static str = "Unknown OS";

    /// Prints the archive comment and every entry bigger than `threshold_kb`
    /// kilobytes. Lines already printed stay printed when reading fails.
    pub fn start(
        file_system: &dyn FileSystem,
        archiver: &dyn Archiver,
        zip_path: &str,
        threshold_kb: u64,
        out: &mut dyn Write,
    ) -> Result<InspectReport, KeeperError> {
        if !file_system.is_file(Path::new(zip_path)) {
            return Err(KeeperError::FileNotFound(zip_path.to_string()));
        }

        Self::list(archiver, zip_path, threshold_kb.saturating_mul(1024), out).map_err(|why| {
            warn!("unable to read zip file '{}': {}", zip_path, why);
            KeeperError::Inspect(why)
        })
    }

    fn list(
        archiver: &dyn Archiver,
        zip_path: &str,
        threshold: u64,
        out: &mut dyn Write,
    ) -> std::io::Result<InspectReport> {
        let mut zip = archiver.open_zip(Path::new(zip_path))?;

        let comment = String::from_utf8_lossy(zip.comment()).into_owned();
        let creator = if comment.is_empty() {
            Self::UNKNOWN_OS
        } else {
            comment.as_str()
        };
        writeln!(out, "Archive created by: {}", creator)?;
        if zip.is_empty() {
            debug!("'{}' has no entries", zip_path);
        }

        let mut listed = 0;
        for index in 0..zip.len() {
            let entry = zip.entry(index)?;
            if entry.size > threshold {
                writeln!(
                    out,
                    "{}: {}",
                    entry.name,
                    Formatter::format_kilobytes(entry.size)
                )?;
                listed += 1;
            }
        }

        Ok(InspectReport {
            entries: zip.len(),
            listed,
        })
    }
}
