use std::path::PathBuf;

use newblog::config::{read_config, Config};

/// Reads the configuration only when a path was given explicitly.
pub(crate) fn open_config(cfg_path: Option<PathBuf>) -> Result<Config, String> {
    let Some(config_path) = cfg_path else {
        return Ok(Config::default());
    };

    match read_config(&config_path) {
        Ok(config) => Ok(config),
        Err(e) => Err(e.to_string()),
    }
}
