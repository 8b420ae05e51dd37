use std::fmt;
use std::path::Path;

use log::{info, warn};

use crate::error::KeeperError;
use crate::host::FileSystem;

pub struct Backup {}

#[derive(Debug, PartialEq)]
pub struct BackupReport {
    pub source: String,
    pub destination: String,
    pub bytes_copied: u64,
}

impl fmt::Display for BackupReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Backup completed successfully from '{}' to '{}'.",
            self.source, self.destination
        )
    }
}

impl Backup {
    /// Copies the tree below `source` into `destination`.
    ///
    /// Both directories must already exist. Files present on both sides are
    /// overwritten, nothing is ever deleted from `destination`, and a failed
    /// copy leaves whatever was already copied in place.
    pub fn start(
        file_system: &dyn FileSystem,
        source: &str,
        destination: &str,
    ) -> Result<BackupReport, KeeperError> {
        if !file_system.exists(Path::new(source)) {
            return Err(KeeperError::SourceNotFound(source.to_string()));
        }
        if !file_system.exists(Path::new(destination)) {
            return Err(KeeperError::DestinationNotFound(destination.to_string()));
        }

        info!("backing up '{}' to '{}'", source, destination);
        let bytes_copied = file_system
            .copy_tree(Path::new(source), Path::new(destination))
            .map_err(|why| {
                warn!("copy from '{}' to '{}' failed: {}", source, destination, why);
                KeeperError::Backup(why)
            })?;

        Ok(BackupReport {
            source: source.to_string(),
            destination: destination.to_string(),
            bytes_copied,
        })
    }
}
