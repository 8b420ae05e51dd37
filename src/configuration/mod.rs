use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
    str::FromStr,
    time::Duration,
};

use log::LevelFilter;

use crate::error::KeeperError;

pub mod archive_format;

pub struct Configuration {
    /// Where archives are written; the home directory when unset.
    pub archive_directory: Option<PathBuf>,
    pub recent_window: Duration,
    pub log_level: LevelFilter,
    /// Expand `{date:*}` placeholders in archive base names.
    pub archive_name_placeholders: bool,
}

impl Configuration {
    pub const FILE_NAME: &'static str = "rusty-keeper.conf";
    pub const DEFAULT_RECENT_WINDOW: Duration = Duration::from_secs(30 * 24 * 60 * 60);

    pub fn new() -> Configuration {
        Configuration {
            archive_directory: None,
            recent_window: Self::DEFAULT_RECENT_WINDOW,
            log_level: LevelFilter::Error,
            archive_name_placeholders: false,
        }
    }

    /// Finds the configuration file to read, if any.
    ///
    /// An explicitly given file must exist. Otherwise the current directory,
    /// the home directory and `/etc` are searched in that order.
    pub fn locate(explicit: Option<&str>) -> Result<Option<PathBuf>, KeeperError> {
        if let Some(file) = explicit {
            let path = Self::expand_home(file);
            if !path.exists() {
                return Err(KeeperError::Configuration(format!(
                    "Config file '{}' doesn't exist.",
                    file
                )));
            }
            return Ok(Some(path));
        }

        let mut candidates = vec![PathBuf::from(Self::FILE_NAME)];
        if let Some(home_dir) = dirs::home_dir() {
            candidates.push(home_dir.join(Self::FILE_NAME));
        }
        candidates.push(Path::new("/etc").join(Self::FILE_NAME));

        Ok(candidates.into_iter().find(|candidate| candidate.exists()))
    }

    pub fn load(path: &Path) -> Result<Configuration, KeeperError> {
        let file = File::open(path).map_err(|why| {
            KeeperError::Configuration(format!(
                "unable to open config file '{}': {}",
                path.display(),
                why
            ))
        })?;

        let mut content = String::new();
        for line in BufReader::new(file).lines() {
            match line {
                Ok(line) => {
                    content.push_str(&line);
                    content.push('\n');
                }
                Err(_) => continue,
            }
        }

        Self::parse(&content)
    }

    /// Parses `key = value` lines. Unknown keys and lines without `=` are skipped.
    pub fn parse(content: &str) -> Result<Configuration, KeeperError> {
        let mut configuration = Configuration::new();

        for line in content.lines() {
            let line = line.trim();
            if line.starts_with('#') {
                continue;
            }
            let (key, value) = match line.split_once('=') {
                Some((key, value)) => (key.trim(), value.trim()),
                None => continue,
            };

            match key {
                "archive_directory" => {
                    configuration.archive_directory = if value.is_empty() {
                        None
                    } else {
                        Some(Self::expand_home(value))
                    };
                }
                "recent_window" => match parse_duration0::parse(value) {
                    Ok(duration) => {
                        configuration.recent_window = duration;
                    }
                    Err(why) => {
                        return Err(KeeperError::Configuration(format!(
                            "invalid recent_window value '{}': {}",
                            value, why
                        )));
                    }
                },
                "log_level" => match LevelFilter::from_str(value) {
                    Ok(level) => {
                        configuration.log_level = level;
                    }
                    Err(_) => {
                        return Err(KeeperError::Configuration(format!(
                            "invalid log_level value '{}'.",
                            value
                        )));
                    }
                },
                "archive_name_placeholders" => match bool::from_str(value) {
                    Ok(enabled) => {
                        configuration.archive_name_placeholders = enabled;
                    }
                    Err(_) => {
                        return Err(KeeperError::Configuration(format!(
                            "invalid archive_name_placeholders value '{}'.",
                            value
                        )));
                    }
                },
                _ => (),
            }
        }

        Ok(configuration)
    }

    fn expand_home(value: &str) -> PathBuf {
        match (value.strip_prefix('~'), dirs::home_dir()) {
            (Some(rest), Some(home_dir)) => {
                let rest = rest.trim_start_matches('/');
                if rest.is_empty() {
                    home_dir
                } else {
                    home_dir.join(rest)
                }
            }
            _ => PathBuf::from(value),
        }
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new()
    }
}
