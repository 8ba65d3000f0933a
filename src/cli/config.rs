//! Configuration file loading for the CLI
//!
//! Finds the template configuration in the usual places and parses it
//! from TOML.

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use crate::config::TemplateConfig;
use crate::error::ItineraError;

/// Name of the configuration file looked for in the working directory.
pub const LOCAL_CONFIG: &str = "itinera.toml";

/// Configuration-related errors for the CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),
}

impl From<ConfigError> for ItineraError {
    fn from(err: ConfigError) -> Self {
        ItineraError::Config(err.to_string())
    }
}

/// Find and load configuration.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. `itinera.toml` in the working directory
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns an error if an explicit path doesn't exist, or if a config file
/// is found but can't be read or parsed.
pub fn load_config(explicit_path: Option<&Path>) -> Result<TemplateConfig, ItineraError> {
    if let Some(path) = explicit_path {
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new(LOCAL_CONFIG);
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "itinera", "itinera") {
        let system_config = proj_dirs.config_dir().join("config.toml");
        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(&system_config);
        }
        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(TemplateConfig::default())
}

/// Load configuration from one TOML file.
pub fn load_config_file(path: &Path) -> Result<TemplateConfig, ItineraError> {
    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }
    let content = fs::read_to_string(path)?;
    let config =
        TemplateConfig::from_toml(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn explicit_file_is_loaded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "currency_symbol = \"INR\"\nrepeat_table_headers = true").unwrap();
        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.currency_symbol, "INR");
        assert!(config.repeat_table_headers);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, ItineraError::Config(ref m) if m.contains("Missing configuration file")));
    }

    #[test]
    fn bad_toml_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "top_margin = \"twenty\"").unwrap();
        let err = load_config_file(file.path()).unwrap_err();
        assert!(matches!(err, ItineraError::Config(ref m) if m.starts_with("Failed to parse TOML")));
    }
}
