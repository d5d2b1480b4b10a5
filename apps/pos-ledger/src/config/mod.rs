//! Configuration module for the point-of-sale ledger.
//!
//! Loads a YAML file with environment variable interpolation, fills every
//! omitted section with its defaults and validates the result.
//!
//! # Usage
//!
//! ```rust,ignore
//! use pos_ledger::config::load_config;
//!
//! // Load config.yaml if present, defaults otherwise
//! let config = load_config(None)?;
//!
//! // Load from custom path (must exist)
//! let config = load_config(Some("deploy/pos.yaml"))?;
//!
//! println!("menu db: {}", config.persistence.menu_db_path);
//! ```

mod assets;
mod display;
mod observability;
mod persistence;

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use assets::AssetsConfig;
pub use display::DisplayConfig;
pub use observability::{LoggingConfig, ObservabilityConfig};
pub use persistence::PersistenceConfig;

use crate::application::ports::is_supported_image;

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "POS_CONFIG";

/// Config file read when no path is given.
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: [&str; 3] = ["json", "pretty", "compact"];

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Database files and pool sizing.
    #[serde(default)]
    pub persistence: PersistenceConfig,
    /// Menu picture directory.
    #[serde(default)]
    pub assets: AssetsConfig,
    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
    /// Presentation settings.
    #[serde(default)]
    pub display: DisplayConfig,
}

// ============================================
// Configuration Loading
// ============================================

/// Load configuration from a YAML file with environment variable interpolation.
///
/// # Arguments
///
/// * `path` - Optional path to the config file. Without one, `config.yaml`
///   is read if it exists and the built-in defaults are used otherwise.
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let path = match path {
        Some(path) => path,
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => DEFAULT_CONFIG_PATH,
        None => {
            let config = Config::default();
            validate_config(&config)?;
            return Ok(config);
        }
    };

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_string(),
        source: e,
    })?;

    load_config_from_string(&contents)
}

/// Load configuration from a YAML string (useful for testing).
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let config: Config = if interpolated.trim().is_empty() {
        Config::default()
    } else {
        serde_yaml_bw::from_str(&interpolated)?
    };
    validate_config(&config)?;
    Ok(config)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax.
#[allow(clippy::expect_used)] // static pattern
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |cap: &regex::Captures<'_>| {
        let default_value = cap.get(2).map_or("", |m| m.as_str());
        match std::env::var(&cap[1]) {
            Ok(v) if !v.is_empty() => v,
            _ => default_value.to_string(),
        }
    })
    .into_owned()
}

/// Validate configuration values.
fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let persistence = &config.persistence;

    if persistence.menu_db_path.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "persistence.menu_db_path must not be empty".to_string(),
        ));
    }

    if persistence.orders_db_path.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "persistence.orders_db_path must not be empty".to_string(),
        ));
    }

    if persistence.max_connections == 0 {
        return Err(ConfigError::ValidationError(
            "persistence.max_connections must be at least 1".to_string(),
        ));
    }

    if config.assets.dir.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "assets.dir must not be empty".to_string(),
        ));
    }

    let default_image = Path::new(&config.assets.default_image);
    if default_image.components().count() != 1 || !is_supported_image(default_image) {
        return Err(ConfigError::ValidationError(
            "assets.default_image must be a picture file name inside assets.dir".to_string(),
        ));
    }

    let logging = &config.observability.logging;
    if !LOG_LEVELS.contains(&logging.level.to_lowercase().as_str()) {
        return Err(ConfigError::ValidationError(format!(
            "observability.logging.level must be one of: {LOG_LEVELS:?}"
        )));
    }

    if !LOG_FORMATS.contains(&logging.format.as_str()) {
        return Err(ConfigError::ValidationError(format!(
            "observability.logging.format must be one of: {LOG_FORMATS:?}"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.persistence.menu_db_path, "./data/menu.db");
        assert_eq!(config.persistence.orders_db_path, "./data/inventory.db");
        assert_eq!(config.persistence.max_connections, 4);
        assert_eq!(config.assets.dir, "./res");
        assert_eq!(config.assets.default_image, "no-image.png");
        assert_eq!(config.display.currency_symbol, "\u{20b1}");
        assert_eq!(config.observability.logging.level, "info");
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_empty_document_is_defaults() {
        let config = match load_config_from_string("") {
            Ok(c) => c,
            Err(e) => panic!("should load empty config: {e}"),
        };
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_partial_config() {
        let yaml = r"
persistence:
  menu_db_path: /var/lib/pos/menu.db
";

        let config = match load_config_from_string(yaml) {
            Ok(c) => c,
            Err(e) => panic!("should load partial config: {e}"),
        };
        assert_eq!(config.persistence.menu_db_path, "/var/lib/pos/menu.db");
        assert_eq!(config.persistence.orders_db_path, "./data/inventory.db"); // Default value
    }

    #[test]
    fn test_env_var_with_default_when_missing() {
        // Use a variable name unlikely to exist
        let input = "dir: ${POS_CONFIG_TEST_NONEXISTENT_VAR:-./res}";
        let result = interpolate_env_vars(input);

        assert_eq!(result, "dir: ./res");
    }

    #[test]
    #[expect(clippy::literal_string_with_formatting_args)] // ${...} is env var syntax, not format args
    fn test_env_var_with_default_uses_existing() {
        // PATH should always exist
        let input = "path: ${PATH:-default}";
        let result = interpolate_env_vars(input);

        assert_ne!(result, "path: default");
        assert!(result.starts_with("path: "));
    }

    #[test]
    fn test_env_var_without_default_becomes_empty() {
        let input = "symbol: ${POS_CONFIG_TEST_UNLIKELY_TO_EXIST}";
        let result = interpolate_env_vars(input);

        assert_eq!(result, "symbol: ");
    }

    #[test]
    fn test_validation_zero_connections() {
        let yaml = r"
persistence:
  max_connections: 0
";

        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for zero connections");
        };
        assert!(err.to_string().contains("max_connections"));
    }

    #[test]
    fn test_validation_default_image_must_be_a_picture_name() {
        for image in ["../no-image.png", "no-image.txt", ""] {
            let yaml = format!("assets:\n  default_image: \"{image}\"\n");
            let Err(err) = load_config_from_string(&yaml) else {
                panic!("expected error for default_image {image:?}");
            };
            assert!(err.to_string().contains("default_image"));
        }
    }

    #[test]
    fn test_validation_invalid_log_format() {
        let yaml = r"
observability:
  logging:
    format: xml
";

        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for invalid format");
        };
        assert!(err.to_string().contains("format"));
    }

    #[test]
    fn test_missing_explicit_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.yaml");

        let Err(err) = load_config(path.to_str()) else {
            panic!("expected read error");
        };
        assert!(matches!(err, ConfigError::ReadError { .. }));
    }

    #[test]
    fn test_load_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pos.yaml");
        std::fs::write(
            &path,
            r#"
persistence:
  menu_db_path: "menu.db"
  orders_db_path: "inventory.db"
  busy_timeout_ms: 250

assets:
  dir: "pictures"

observability:
  logging:
    level: "debug"
    format: "json"

display:
  currency_symbol: "$"
"#,
        )
        .unwrap();

        let config = match load_config(path.to_str()) {
            Ok(c) => c,
            Err(e) => panic!("should load full config: {e}"),
        };

        assert_eq!(config.persistence.menu_db_path, "menu.db");
        assert_eq!(config.persistence.busy_timeout_ms, 250);
        assert_eq!(config.assets.dir, "pictures");
        assert_eq!(config.assets.default_image, "no-image.png");
        assert_eq!(config.observability.logging.level, "debug");
        assert_eq!(config.observability.logging.format, "json");
        assert_eq!(config.display.currency_symbol, "$");
    }
}
