//! # Configuration Loader
//!
//! Figment-based configuration loading with layered support:
//! 1. Compiled defaults
//! 2. Configuration file (TOML)
//! 3. Environment variable overrides
//!
//! Nested fields map to environment variables with a double underscore,
//! e.g. `NETSCOPE_SERVER__BIND_ADDRESS`.

use crate::error::ConfigurationError;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "netscope.toml";

/// Environment variable prefix for netscope
pub const DEFAULT_ENV_PREFIX: &str = "NETSCOPE";

/// Configuration loading options
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Optional path to configuration file
    pub config_path: Option<PathBuf>,
    /// Environment variable prefix
    pub env_prefix: String,
    /// Whether configuration file is required
    pub require_file: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            config_path: None,
            env_prefix: DEFAULT_ENV_PREFIX.to_string(),
            require_file: false,
        }
    }
}

impl LoadOptions {
    /// Options for an explicitly requested file, which must exist
    pub fn from_file(path: &Path) -> Self {
        Self {
            config_path: Some(path.to_path_buf()),
            require_file: true,
            ..Self::default()
        }
    }
}

/// Load configuration from a specific file, which must exist
pub fn load_from_file<T>(path: &Path) -> Result<T, ConfigurationError>
where
    T: Default + DeserializeOwned + serde::Serialize,
{
    load_config_with_options::<T>(LoadOptions::from_file(path))
}

/// Load configuration with custom options
///
/// Layer priority, highest first: `<PREFIX>_*` environment variables, the
/// configuration file (if found), compiled defaults.
pub fn load_config_with_options<T>(options: LoadOptions) -> Result<T, ConfigurationError>
where
    T: Default + DeserializeOwned + serde::Serialize,
{
    debug!("Loading configuration with options: {:?}", options);

    let mut figment = Figment::new().merge(Serialized::defaults(T::default()));

    let config_path = determine_config_path(options.config_path, &options.env_prefix);

    if let Some(path) = &config_path {
        if path.exists() {
            info!("Loading configuration from file: {}", path.display());
            figment = add_file_provider(figment, path)?;
        } else if options.require_file {
            return Err(ConfigurationError::FileNotFound {
                path: path.display().to_string(),
            });
        } else {
            warn!(
                "Configuration file not found: {} (using defaults)",
                path.display()
            );
        }
    }

    figment = figment.merge(
        Env::prefixed(&format!("{}_", options.env_prefix))
            .split("__")
            .ignore(&["CONFIG_PATH"]),
    );

    let config: T = figment
        .extract()
        .map_err(|err| ConfigurationError::ParseError {
            details: err.to_string(),
        })?;

    debug!(
        "Configuration loaded from {} sources",
        figment.metadata().count()
    );

    Ok(config)
}

/// Determine configuration file path with fallback logic
///
/// An explicit path wins, then `<PREFIX>_CONFIG_PATH`, then
/// `./netscope.toml`, then `/etc/netscope/netscope.toml`.
fn determine_config_path(override_path: Option<PathBuf>, env_prefix: &str) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path);
    }

    if let Ok(env_path) = std::env::var(format!("{env_prefix}_CONFIG_PATH")) {
        let path = PathBuf::from(env_path);
        debug!("Using config path from environment: {}", path.display());
        return Some(path);
    }

    let candidates = [
        PathBuf::from(DEFAULT_CONFIG_FILE),
        PathBuf::from("/etc/netscope").join(DEFAULT_CONFIG_FILE),
    ];

    let found = candidates.into_iter().find(|path| path.exists());
    if found.is_none() {
        debug!("No configuration file found, using defaults");
    }
    found
}

/// Add file provider to figment based on file extension
fn add_file_provider(figment: Figment, path: &Path) -> Result<Figment, ConfigurationError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("toml");

    match extension.to_lowercase().as_str() {
        "toml" => Ok(figment.merge(Toml::file(path))),
        _ => Err(ConfigurationError::ParseError {
            details: format!(
                "Unsupported configuration file format: {extension} (supported: toml)"
            ),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use serial_test::serial;
    use std::env;
    use tempfile::NamedTempFile;

    #[derive(Debug, Default, Deserialize, Serialize, PartialEq)]
    struct TestConfig {
        pub name: String,
        pub port: u16,
        pub nested: NestedConfig,
    }

    #[derive(Debug, Default, Deserialize, Serialize, PartialEq)]
    struct NestedConfig {
        pub enabled: bool,
        pub timeout: u64,
    }

    fn options_with_prefix(prefix: &str) -> LoadOptions {
        LoadOptions {
            config_path: None,
            env_prefix: prefix.to_string(),
            require_file: false,
        }
    }

    #[test]
    #[serial]
    fn test_load_default_config() {
        let config: TestConfig =
            load_config_with_options(options_with_prefix("NETSCOPE_TEST_DEFAULTS")).unwrap();
        assert_eq!(config, TestConfig::default());
    }

    #[test]
    #[serial]
    fn test_load_from_toml_file() {
        let toml_content = r#"
            name = "test"
            port = 8080

            [nested]
            enabled = true
            timeout = 30
        "#;

        let mut temp_file = NamedTempFile::with_suffix(".toml").unwrap();
        std::io::Write::write_all(&mut temp_file, toml_content.as_bytes()).unwrap();

        let options = LoadOptions {
            env_prefix: "NETSCOPE_TEST_FILE".to_string(),
            ..LoadOptions::from_file(temp_file.path())
        };
        let config: TestConfig = load_config_with_options(options).unwrap();
        assert_eq!(config.name, "test");
        assert_eq!(config.port, 8080);
        assert!(config.nested.enabled);
        assert_eq!(config.nested.timeout, 30);
    }

    #[test]
    #[serial]
    fn test_env_var_overrides() {
        let prefix = "NETSCOPE_TEST_ENV";
        env::set_var(format!("{prefix}_NAME"), "env_test");
        env::set_var(format!("{prefix}_PORT"), "9090");
        env::set_var(format!("{prefix}_NESTED__ENABLED"), "true");
        env::set_var(format!("{prefix}_NESTED__TIMEOUT"), "60");

        let config: TestConfig = load_config_with_options(options_with_prefix(prefix)).unwrap();
        assert_eq!(config.name, "env_test");
        assert_eq!(config.port, 9090);
        assert!(config.nested.enabled);
        assert_eq!(config.nested.timeout, 60);

        env::remove_var(format!("{prefix}_NAME"));
        env::remove_var(format!("{prefix}_PORT"));
        env::remove_var(format!("{prefix}_NESTED__ENABLED"));
        env::remove_var(format!("{prefix}_NESTED__TIMEOUT"));
    }

    #[test]
    fn test_file_not_found_when_required() {
        let non_existent_path = PathBuf::from("/non/existent/netscope.toml");
        let result: Result<TestConfig, _> = load_from_file(&non_existent_path);

        match result.unwrap_err() {
            ConfigurationError::FileNotFound { path } => {
                assert_eq!(path, "/non/existent/netscope.toml");
            }
            other => panic!("Expected FileNotFound error, got {other:?}"),
        }
    }

    #[test]
    fn test_unsupported_extension_rejected() {
        let temp_file = NamedTempFile::with_suffix(".yaml").unwrap();
        let result: Result<TestConfig, _> = load_from_file(temp_file.path());
        assert!(matches!(result, Err(ConfigurationError::ParseError { .. })));
    }
}
