use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ArchiveFormat {
    Zip,
    GzTar,
    Tar,
    BzTar,
    XzTar,
}

impl ArchiveFormat {
    pub const ALL: [ArchiveFormat; 5] = [
        ArchiveFormat::Zip,
        ArchiveFormat::GzTar,
        ArchiveFormat::Tar,
        ArchiveFormat::BzTar,
        ArchiveFormat::XzTar,
    ];

    pub const NAMES: [&'static str; 5] = ["zip", "gztar", "tar", "bztar", "xztar"];

    /// Looks up a format by its exact name (`zip`, `gztar`, ...).
    pub fn from_name(name: &str) -> Option<ArchiveFormat> {
        Self::ALL.into_iter().find(|format| format.name() == name)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Zip => "zip",
            Self::GzTar => "gztar",
            Self::Tar => "tar",
            Self::BzTar => "bztar",
            Self::XzTar => "xztar",
        }
    }

    /// File suffix appended to the archive base name.
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Zip => ".zip",
            Self::GzTar => ".tar.gz",
            Self::Tar => ".tar",
            Self::BzTar => ".tar.bz2",
            Self::XzTar => ".tar.xz",
        }
    }
}

impl fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_match_lookup_table() {
        for (format, name) in ArchiveFormat::ALL.iter().zip(ArchiveFormat::NAMES) {
            assert_eq!(format.name(), name);
            assert_eq!(ArchiveFormat::from_name(name), Some(*format));
        }
    }

    #[test]
    fn lookup_is_exact() {
        assert_eq!(ArchiveFormat::from_name("ZIP"), None);
        assert_eq!(ArchiveFormat::from_name(" tar"), None);
        assert_eq!(ArchiveFormat::from_name("tar.gz"), None);
        assert_eq!(ArchiveFormat::from_name(""), None);
    }

    #[test]
    fn suffixes() {
        assert_eq!(ArchiveFormat::Zip.suffix(), ".zip");
        assert_eq!(ArchiveFormat::GzTar.suffix(), ".tar.gz");
        assert_eq!(ArchiveFormat::BzTar.suffix(), ".tar.bz2");
        assert_eq!(ArchiveFormat::XzTar.suffix(), ".tar.xz");
    }
}
