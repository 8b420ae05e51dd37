use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use fs_extra::dir::{copy as dir_copy, CopyOptions};
use log::{debug, warn};
use walkdir::WalkDir;

use super::{FileStamp, FileSystem};

/// The real filesystem of the machine we run on.
pub struct HostFileSystem {}

impl HostFileSystem {
    pub const BUFFER_SIZE: usize = 32576;

    pub fn new() -> HostFileSystem {
        HostFileSystem {}
    }
}

impl Default for HostFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for HostFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn copy_tree(&self, source: &Path, destination: &Path) -> io::Result<u64> {
        let mut options = CopyOptions::new();
        // merge into `destination` instead of creating `destination/<source name>`
        options.content_only = true;
        options.overwrite = true;
        options.buffer_size = Self::BUFFER_SIZE;

        debug!(
            "copying tree '{}' into '{}'",
            source.display(),
            destination.display()
        );
        dir_copy(source, destination, &options).map_err(io::Error::other)
    }

    fn walk_files<'a>(
        &'a self,
        root: &Path,
    ) -> Box<dyn Iterator<Item = io::Result<FileStamp>> + 'a> {
        let walker = WalkDir::new(root).min_depth(1).into_iter();
        Box::new(walker.filter_map(|entry| {
            let entry = match entry {
                Ok(entry) => entry,
                // an unreadable directory below the root is skipped
                Err(why) if why.depth() > 0 => {
                    warn!("skipping during walk: {}", why);
                    return None;
                }
                Err(why) => return Some(Err(io::Error::from(why))),
            };
            if entry.file_type().is_dir() {
                return None;
            }

            // follows symlinks, so links to regular files are listed too
            match fs::metadata(entry.path()) {
                Ok(metadata) if metadata.is_file() => {
                    Some(metadata.modified().map(|modified| FileStamp {
                        path: entry.into_path(),
                        modified,
                    }))
                }
                Ok(_) => None,
                Err(why) => Some(Err(why)),
            }
        }))
    }

    fn current_dir(&self) -> io::Result<PathBuf> {
        std::env::current_dir()
    }

    fn home_dir(&self) -> Option<PathBuf> {
        dirs::home_dir()
    }
}
