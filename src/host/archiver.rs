use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use bzip2::write::BzEncoder;
use flate2::write::GzEncoder;
use log::{debug, info};
use tar::Builder;
use walkdir::WalkDir;
use xz2::write::XzEncoder;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use super::{Archiver, ZipEntry, ZipView};
use crate::configuration::archive_format::ArchiveFormat;
use crate::formatter::Formatter;

/// Archive support backed by the `zip`, `tar`, `flate2`, `bzip2` and `xz2` crates.
pub struct NativeArchiver {}

impl NativeArchiver {
    const XZ_PRESET: u32 = 6;

    pub fn new() -> NativeArchiver {
        NativeArchiver {}
    }

    /// Path of every entry below `source` in name order, relative to it,
    /// leaving out `own`, the archive being written.
    fn members(source: &Path, own: &Path) -> io::Result<Vec<(PathBuf, PathBuf)>> {
        let mut members = Vec::new();
        let walker = WalkDir::new(source)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter();
        for entry in walker {
            let entry = entry?;
            if entry.path() == own {
                debug!("leaving out the archive itself");
                continue;
            }
            let relative = match entry.path().strip_prefix(source) {
                Ok(relative) => relative.to_path_buf(),
                Err(_) => continue,
            };
            members.push((entry.into_path(), relative));
        }
        Ok(members)
    }

    fn tar_archive<W: Write>(writer: W, source: &Path, own: &Path) -> io::Result<W> {
        let mut tar = Builder::new(writer);
        // links are stored as links, not as the files they point to
        tar.follow_symlinks(false);
        tar.append_dir("./", source)?;
        for (path, relative) in Self::members(source, own)? {
            tar.append_path_with_name(&path, relative)?;
        }
        tar.into_inner()
    }

    fn zip_archive(file: File, source: &Path, own: &Path) -> io::Result<()> {
        let mut zip = ZipWriter::new(BufWriter::new(file));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for (path, relative) in Self::members(source, own)? {
            let components: Vec<String> = relative
                .components()
                .map(|component| component.as_os_str().to_string_lossy().into_owned())
                .collect();
            let name = components.join("/");

            // resolves links; a dangling one is neither file nor directory
            match fs::metadata(&path) {
                Ok(metadata) if metadata.is_dir() => {
                    zip.add_directory(name, options).map_err(io::Error::other)?;
                }
                Ok(metadata) if metadata.is_file() => {
                    zip.start_file(name, options).map_err(io::Error::other)?;
                    let mut input = File::open(&path)?;
                    io::copy(&mut input, &mut zip)?;
                }
                _ => debug!("skipping '{}'", path.display()),
            }
        }

        let mut writer = zip.finish().map_err(io::Error::other)?;
        writer.flush()
    }
}

impl Default for NativeArchiver {
    fn default() -> Self {
        Self::new()
    }
}

impl Archiver for NativeArchiver {
    fn create(&self, source: &Path, output: &Path, format: ArchiveFormat) -> io::Result<()> {
        info!(
            "creating {} archive '{}' from '{}'",
            format,
            output.display(),
            source.display()
        );
        // both sides resolved so the output is recognised inside `source`
        let source = fs::canonicalize(source)?;
        let file = File::create(output)?;
        let own = fs::canonicalize(output)?;
        let source = source.as_path();
        let own = own.as_path();

        match format {
            ArchiveFormat::Zip => Self::zip_archive(file, source, own)?,
            ArchiveFormat::Tar => {
                Self::tar_archive(BufWriter::new(file), source, own)?.flush()?;
            }
            ArchiveFormat::GzTar => {
                let gz = GzEncoder::new(BufWriter::new(file), flate2::Compression::default());
                Self::tar_archive(gz, source, own)?.finish()?.flush()?;
            }
            ArchiveFormat::BzTar => {
                let bz2 = BzEncoder::new(BufWriter::new(file), bzip2::Compression::best());
                Self::tar_archive(bz2, source, own)?.finish()?.flush()?;
            }
            ArchiveFormat::XzTar => {
                let xz = XzEncoder::new(BufWriter::new(file), Self::XZ_PRESET);
                Self::tar_archive(xz, source, own)?.finish()?.flush()?;
            }
        }

        if let Ok(metadata) = fs::metadata(output) {
            info!(
                "archive '{}' completed: {}",
                output.display(),
                Formatter::format_size(metadata.len(), 2)
            );
        }
        Ok(())
    }

    fn open_zip(&self, path: &Path) -> io::Result<Box<dyn ZipView>> {
        let file = File::open(path)?;
        let archive = ZipArchive::new(file).map_err(io::Error::other)?;
        Ok(Box::new(NativeZip { archive }))
    }
}

struct NativeZip {
    archive: ZipArchive<File>,
}

impl ZipView for NativeZip {
    fn comment(&self) -> &[u8] {
        self.archive.comment()
    }

    fn len(&self) -> usize {
        self.archive.len()
    }

    fn entry(&mut self, index: usize) -> io::Result<ZipEntry> {
        // raw access reads the header only, so encrypted entries are listed too
        let file = self
            .archive
            .by_index_raw(index)
            .map_err(io::Error::other)?;
        Ok(ZipEntry {
            name: file.name().to_string(),
            size: file.size(),
        })
    }
}
