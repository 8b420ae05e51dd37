use std::io;

use thiserror::Error;

use crate::configuration::archive_format::ArchiveFormat;

/// Broad class of a failed operation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Kind {
    /// Detected before any side effect took place.
    Precondition,
    /// Raised by the filesystem or archive library while working.
    Operational,
    /// The user typed something that could not be parsed.
    Input,
}

#[derive(Error, Debug)]
pub enum KeeperError {
    #[error("Source directory '{0}' does not exist.")]
    SourceNotFound(String),
    #[error("Destination directory '{0}' does not exist.")]
    DestinationNotFound(String),
    #[error("Directory '{0}' does not exist.")]
    DirectoryNotFound(String),
    #[error("File '{0}' does not exist.")]
    FileNotFound(String),
    #[error(
        "Invalid archive type '{0}'. Valid types are: {names}.",
        names = ArchiveFormat::NAMES.join(", ")
    )]
    InvalidArchiveType(String),
    #[error("Home directory could not be determined.")]
    HomeNotFound,
    #[error("Invalid size threshold '{0}': expected a whole number of kilobytes.")]
    InvalidThreshold(String),
    #[error("Backup failed: {0}")]
    Backup(#[source] io::Error),
    #[error("Archiving failed: {0}")]
    Archive(#[source] io::Error),
    #[error("Processing zip file failed: {0}")]
    Inspect(#[source] io::Error),
    #[error("Displaying recent files failed: {0}")]
    Recent(#[source] io::Error),
    #[error("{0}")]
    Configuration(String),
}

impl KeeperError {
    pub fn kind(&self) -> Kind {
        match self {
            Self::SourceNotFound(_)
            | Self::DestinationNotFound(_)
            | Self::DirectoryNotFound(_)
            | Self::FileNotFound(_)
            | Self::InvalidArchiveType(_)
            | Self::HomeNotFound
            | Self::Configuration(_) => Kind::Precondition,
            Self::Backup(_) | Self::Archive(_) | Self::Inspect(_) | Self::Recent(_) => {
                Kind::Operational
            }
            Self::InvalidThreshold(_) => Kind::Input,
        }
    }
}
