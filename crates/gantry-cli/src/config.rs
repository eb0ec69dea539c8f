//! Configuration discovery for the CLI.
//!
//! An explicit `--config` path always wins. Without one, the loader probes
//! `gantry/config.toml` in the working directory and then the platform
//! configuration directory, and falls back to built-in defaults when neither
//! exists.

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use gantry::{GantryError, config::AppConfig};

/// Why a configuration file could not be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file not found: {0}")]
    Missing(PathBuf),

    #[error("invalid configuration: {0}")]
    Parse(String),
}

impl From<ConfigError> for GantryError {
    fn from(err: ConfigError) -> Self {
        GantryError::Io(std::io::Error::other(err.to_string()))
    }
}

/// Loads the application configuration.
///
/// With `explicit_path` set, that file must exist and parse; anything else
/// is an error. Otherwise the first probe location that exists is used, and
/// finding none only means the defaults apply.
///
/// # Errors
///
/// Returns an error when an explicitly named file is absent, unreadable,
/// or not valid TOML for [`AppConfig`].
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, GantryError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::Missing(path.to_path_buf()).into());
        }
        info!(path:% = path.display(); "Loading configuration");
        return read_config(path);
    }

    for candidate in probe_locations() {
        if candidate.exists() {
            info!(path:% = candidate.display(); "Loading discovered configuration");
            return read_config(&candidate);
        }
        debug!(path:% = candidate.display(); "No configuration file here");
    }

    debug!("Using default configuration");
    Ok(AppConfig::default())
}

/// Probe order when no explicit path is given.
fn probe_locations() -> Vec<PathBuf> {
    let mut locations = vec![PathBuf::from("gantry/config.toml")];
    if let Some(dirs) = ProjectDirs::from("com", "gantry", "gantry") {
        locations.push(dirs.config_dir().join("config.toml"));
    }
    locations
}

fn read_config(path: &Path) -> Result<AppConfig, GantryError> {
    let content = fs::read_to_string(path)?;
    let config = toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;
    Ok(config)
}
