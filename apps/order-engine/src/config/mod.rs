//! Configuration loading for the order engine.
//!
//! Configuration is a YAML file with environment variable interpolation,
//! supporting both `${VAR}` and `${VAR:-default}` syntax.
//!
//! # Usage
//!
//! ```rust,ignore
//! use order_engine::config::load_config;
//!
//! // Load from default path (config.yaml)
//! let config = load_config(None)?;
//!
//! // Load from custom path
//! let config = load_config(Some("custom/config.yaml"))?;
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

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
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Bot transport configuration.
    #[serde(default)]
    pub bot: BotConfig,
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port the HTTP API listens on.
    #[serde(default = "default_http_port")]
    pub http_port: u16,
    /// Address to bind to.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: default_http_port(),
            bind_address: default_bind_address(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format: "pretty" or "json".
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// Bot transport settings.
///
/// The bot core is transport-agnostic; the token is consumed by whatever
/// messenger adapter fronts it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BotConfig {
    /// Whether the bot transport is enabled.
    #[serde(default)]
    pub enabled: bool,
    /// Messenger API token, typically `${BOT_TOKEN}`.
    #[serde(default)]
    pub token: String,
}

fn default_http_port() -> u16 {
    8080
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

/// Load configuration from a YAML file with environment variable interpolation.
///
/// # Arguments
///
/// * `path` - Optional path to the config file. Defaults to "config.yaml".
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or("config.yaml");

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
    let config: Config = serde_yaml_bw::from_str(&interpolated)?;
    validate_config(&config)?;
    Ok(config)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax. A missing variable
/// without a default becomes the empty string.
#[allow(clippy::expect_used)] // Regex is compile-time constant; expect() is safe here
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let mut result = input.to_string();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    for cap in re.captures_iter(input) {
        let Some(full_match) = cap.get(0) else {
            continue;
        };
        let Some(var_match) = cap.get(1) else {
            continue;
        };
        let full_match = full_match.as_str();
        let var_name = var_match.as_str();
        let default_value = cap.get(2).map(|m| m.as_str());

        let value = match std::env::var(var_name) {
            Ok(v) if !v.is_empty() => v,
            _ => default_value.map_or_else(String::new, str::to_string),
        };

        result = result.replace(full_match, &value);
    }

    result
}

/// Validate configuration values.
fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.http_port == 0 {
        return Err(ConfigError::ValidationError(
            "server.http_port must be non-zero".to_string(),
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.logging.level.as_str()) {
        return Err(ConfigError::ValidationError(format!(
            "logging.level must be one of: {valid_levels:?}"
        )));
    }

    let valid_formats = ["pretty", "json"];
    if !valid_formats.contains(&config.logging.format.as_str()) {
        return Err(ConfigError::ValidationError(format!(
            "logging.format must be one of: {valid_formats:?}"
        )));
    }

    if config.bot.enabled && config.bot.token.is_empty() {
        return Err(ConfigError::ValidationError(
            "bot.token is required when bot.enabled is true".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = Config {
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            bot: BotConfig::default(),
        };

        assert_eq!(config.server.http_port, 8080);
        assert_eq!(config.server.bind_address, "0.0.0.0");
        assert_eq!(config.logging.level, "info");
        assert!(!config.bot.enabled);
    }

    #[test]
    fn load_minimal_config() {
        let yaml = r"
server:
  http_port: 9090
";

        let config = match load_config_from_string(yaml) {
            Ok(c) => c,
            Err(e) => panic!("should load minimal config: {e}"),
        };
        assert_eq!(config.server.http_port, 9090);
        assert_eq!(config.logging.level, "info"); // Default value
    }

    #[test]
    fn env_var_with_default_when_missing() {
        // Use a variable name unlikely to exist
        let input = "level: ${MEATLINE_CONFIG_TEST_NONEXISTENT_VAR:-debug}";
        let result = interpolate_env_vars(input);

        assert_eq!(result, "level: debug");
    }

    #[test]
    #[expect(clippy::literal_string_with_formatting_args)] // ${...} is env var syntax, not format args
    fn env_var_with_default_uses_existing() {
        // PATH should always exist
        let input = "path: ${PATH:-default}";
        let result = interpolate_env_vars(input);

        assert_ne!(result, "path: default");
        assert!(result.starts_with("path: "));
    }

    #[test]
    fn env_var_without_default_becomes_empty() {
        let input = "token: ${MEATLINE_CONFIG_TEST_UNLIKELY_TO_EXIST}";
        let result = interpolate_env_vars(input);

        assert_eq!(result, "token: ");
    }

    #[test]
    fn validation_rejects_zero_port() {
        let yaml = r"
server:
  http_port: 0
";

        let result = load_config_from_string(yaml);
        let Err(err) = result else {
            panic!("expected error for zero port");
        };
        assert!(err.to_string().contains("http_port"));
    }

    #[test]
    fn validation_rejects_unknown_log_level() {
        let yaml = r"
logging:
  level: loud
";

        let result = load_config_from_string(yaml);
        let Err(err) = result else {
            panic!("expected error for unknown level");
        };
        assert!(err.to_string().contains("logging.level"));
    }

    #[test]
    fn validation_requires_token_when_bot_enabled() {
        let yaml = r"
bot:
  enabled: true
";

        let result = load_config_from_string(yaml);
        let Err(err) = result else {
            panic!("expected error for missing token");
        };
        assert!(err.to_string().contains("bot.token"));
    }

    #[test]
    fn full_config_parse() {
        let yaml = r#"
server:
  http_port: 8088
  bind_address: "127.0.0.1"

logging:
  level: "debug"
  format: "json"

bot:
  enabled: true
  token: "123:abc"
"#;

        let config = match load_config_from_string(yaml) {
            Ok(c) => c,
            Err(e) => panic!("should load full config: {e}"),
        };

        assert_eq!(config.server.http_port, 8088);
        assert_eq!(config.server.bind_address, "127.0.0.1");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "json");
        assert!(config.bot.enabled);
        assert_eq!(config.bot.token, "123:abc");
    }
}
