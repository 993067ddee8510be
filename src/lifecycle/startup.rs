//! Startup orchestration.
//!
//! # Responsibilities
//! - Locate and load configuration
//! - Fall back to built-in defaults when no file is given
//!
//! # Design Decisions
//! - Fail fast: an invalid config file is fatal at startup
//! - Explicit path beats the environment variable

use std::path::{Path, PathBuf};

use crate::config::{load_config, ConfigError, TenancyConfig};

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "FLOWCLIK_TENANCY_CONFIG";

/// Pick the config path: explicit argument first, then `CONFIG_ENV`.
pub fn config_path(explicit: Option<PathBuf>) -> Option<PathBuf> {
    explicit.or_else(|| {
        std::env::var_os(CONFIG_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    })
}

/// Load the startup configuration, or defaults when no path is given.
pub fn load_startup_config(path: Option<&Path>) -> Result<TenancyConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => Ok(TenancyConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_path_wins() {
        let path = config_path(Some(PathBuf::from("/etc/flowclik/tenancy.toml")));
        assert_eq!(path, Some(PathBuf::from("/etc/flowclik/tenancy.toml")));
    }

    #[test]
    fn test_no_path_uses_defaults() {
        let config = load_startup_config(None).unwrap();
        assert_eq!(config.routing.dev_prefix, "/site");
    }

    #[test]
    fn test_invalid_file_is_fatal() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "[routing]\ndev_prefix = \"\"\n").unwrap();
        assert!(matches!(
            load_startup_config(Some(file.path())),
            Err(ConfigError::Validation(_))
        ));
    }
}
