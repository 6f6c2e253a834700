use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{fs, io};

use serde::Deserialize;

pub const DEFAULT_ROOT_DIR: &str = "data/blog";
pub const DEFAULT_EXTENSION: &str = "mdx";
pub const DEFAULT_PLACEHOLDER: &str = "Start writing your post here...";

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Blog {
    pub root_dir: PathBuf,
    pub extension: String,
    pub placeholder: String,
}

impl Default for Blog {
    fn default() -> Self {
        Blog {
            root_dir: PathBuf::from(DEFAULT_ROOT_DIR),
            extension: DEFAULT_EXTENSION.to_string(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Opener {
    /// Replaces the platform opener when set
    pub command: Option<String>,
    pub enabled: bool,
}

impl Default for Opener {
    fn default() -> Self {
        Opener {
            command: None,
            enabled: true,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Log {
    pub level: LogLevel,
    #[serde(default)]
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Copy, Clone, PartialEq)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub blog: Blog,
    pub opener: Opener,
    pub log: Option<Log>,
}

pub fn parse_config(cfg_content: &str) -> io::Result<Config> {
    match toml::from_str::<Config>(cfg_content) {
        Ok(cfg) => Ok(cfg),
        Err(e) => Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    }
}

pub fn read_config(cfg_path: &Path) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    let mut cfg = parse_config(&cfg_content)?;

    if let Some(mut log) = cfg.log {
        let location = log.location.or_else(|| {
            dirs::cache_dir().map(|dir| dir.join("newblog").join("log").join("newblog.log"))
        });
        log.location = location;
        cfg.log = Some(log);
    }

    Ok(cfg)
}
