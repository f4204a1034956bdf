//! Configuration loading for the Lodestar CLI.

use std::fs;

use log::debug;

use lodestar::AppConfig;

use crate::error::CliError;

/// Loads engine configuration from an optional TOML file.
///
/// Without a path the defaults apply; a given path must exist and parse.
pub fn load_config(path: Option<&String>) -> Result<AppConfig, CliError> {
    let Some(path) = path else {
        debug!("No config file given, using defaults");
        return Ok(AppConfig::default());
    };

    let content = fs::read_to_string(path)?;
    let config = toml::from_str(&content).map_err(|source| CliError::Parse {
        path: path.clone(),
        source,
    })?;
    debug!(config_path = path; "Loaded configuration");
    Ok(config)
}
