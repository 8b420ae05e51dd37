//! In-memory stand-ins for the host capabilities, used by unit tests.

use std::cell::RefCell;
use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

use super::{Archiver, FileStamp, FileSystem, ZipEntry, ZipView};
use crate::configuration::archive_format::ArchiveFormat;

#[derive(Default)]
pub struct FakeFileSystem {
    pub directories: HashSet<PathBuf>,
    pub files: HashSet<PathBuf>,
    pub stamps: Vec<FileStamp>,
    pub home: Option<PathBuf>,
    pub cwd: PathBuf,
    pub copy_failure: Option<io::ErrorKind>,
    pub walk_failure_after: Option<usize>,
    pub copies: RefCell<Vec<(PathBuf, PathBuf)>>,
    pub walked: RefCell<Vec<PathBuf>>,
}

impl FakeFileSystem {
    pub fn with_directories(directories: &[&str]) -> FakeFileSystem {
        FakeFileSystem {
            directories: directories.iter().map(PathBuf::from).collect(),
            ..Default::default()
        }
    }
}

impl FileSystem for FakeFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.directories.contains(path) || self.files.contains(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.files.contains(path)
    }

    fn copy_tree(&self, source: &Path, destination: &Path) -> io::Result<u64> {
        self.copies
            .borrow_mut()
            .push((source.to_path_buf(), destination.to_path_buf()));
        match self.copy_failure {
            Some(kind) => Err(io::Error::new(kind, "copy refused")),
            None => Ok(0),
        }
    }

    fn walk_files<'a>(
        &'a self,
        root: &Path,
    ) -> Box<dyn Iterator<Item = io::Result<FileStamp>> + 'a> {
        self.walked.borrow_mut().push(root.to_path_buf());
        let mut results: Vec<io::Result<FileStamp>> = self
            .stamps
            .iter()
            .filter(|stamp| stamp.path.starts_with(root))
            .cloned()
            .map(Ok)
            .collect();
        if let Some(after) = self.walk_failure_after {
            results.truncate(after);
            results.push(Err(io::Error::other("walk interrupted")));
        }
        Box::new(results.into_iter())
    }

    fn current_dir(&self) -> io::Result<PathBuf> {
        Ok(self.cwd.clone())
    }

    fn home_dir(&self) -> Option<PathBuf> {
        self.home.clone()
    }
}

#[derive(Clone, Default)]
pub struct FakeZip {
    pub comment: Vec<u8>,
    pub entries: Vec<ZipEntry>,
    /// Index at which reading an entry fails.
    pub broken_at: Option<usize>,
}

impl ZipView for FakeZip {
    fn comment(&self) -> &[u8] {
        &self.comment
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn entry(&mut self, index: usize) -> io::Result<ZipEntry> {
        if self.broken_at == Some(index) {
            return Err(io::Error::new(io::ErrorKind::InvalidData, "bad entry header"));
        }
        self.entries
            .get(index)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such entry"))
    }
}

#[derive(Default)]
pub struct FakeArchiver {
    pub zip: Option<FakeZip>,
    pub create_failure: Option<io::ErrorKind>,
    pub created: RefCell<Vec<(PathBuf, PathBuf, ArchiveFormat)>>,
}

impl Archiver for FakeArchiver {
    fn create(&self, source: &Path, output: &Path, format: ArchiveFormat) -> io::Result<()> {
        self.created
            .borrow_mut()
            .push((source.to_path_buf(), output.to_path_buf(), format));
        match self.create_failure {
            Some(kind) => Err(io::Error::new(kind, "disk full")),
            None => Ok(()),
        }
    }

    fn open_zip(&self, _path: &Path) -> io::Result<Box<dyn ZipView>> {
        match &self.zip {
            Some(zip) => Ok(Box::new(zip.clone())),
            None => Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "invalid Zip archive",
            )),
        }
    }
}
