use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::configuration::archive_format::ArchiveFormat;

pub mod archiver;
#[cfg(test)]
pub mod fake;
pub mod file_system;

pub use archiver::NativeArchiver;
pub use file_system::HostFileSystem;

/// A regular file found while walking a directory tree.
#[derive(Clone, Debug, PartialEq)]
pub struct FileStamp {
    pub path: PathBuf,
    pub modified: SystemTime,
}

/// One file record inside a zip archive.
#[derive(Clone, Debug, PartialEq)]
pub struct ZipEntry {
    pub name: String,
    /// Uncompressed size in bytes.
    pub size: u64,
}

pub trait FileSystem {
    fn exists(&self, path: &Path) -> bool;

    fn is_file(&self, path: &Path) -> bool;

    /// Copies the contents of `source` into `destination`, overwriting files
    /// that exist on both sides and leaving everything else in place.
    /// Returns the number of bytes copied.
    fn copy_tree(&self, source: &Path, destination: &Path) -> io::Result<u64>;

    /// Every regular file below `root`, not including `root` itself.
    fn walk_files<'a>(
        &'a self,
        root: &Path,
    ) -> Box<dyn Iterator<Item = io::Result<FileStamp>> + 'a>;

    fn current_dir(&self) -> io::Result<PathBuf>;

    fn home_dir(&self) -> Option<PathBuf>;
}

pub trait ZipView {
    /// The archive level comment as stored.
    fn comment(&self) -> &[u8];

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn entry(&mut self, index: usize) -> io::Result<ZipEntry>;
}

pub trait Archiver {
    /// Writes the contents of `source` into a new archive at `output`.
    fn create(&self, source: &Path, output: &Path, format: ArchiveFormat) -> io::Result<()>;

    fn open_zip(&self, path: &Path) -> io::Result<Box<dyn ZipView>>;
}
