//! Configuration loading utilities

use crate::schema::Config;
use crate::validator::ValidationIssue;
use airpulse_common::DashboardError;
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_ENV: &str = "AIRPULSE_CONFIG_PATH";

/// File names tried, in order, when no explicit path is given.
pub const DEFAULT_CONFIG_FILES: [&str; 3] = ["airpulse.yaml", "airpulse.yml", "airpulse.toml"];

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("Failed to parse TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration validation failed: {}", join_issues(.0))]
    Invalid(Vec<ValidationIssue>),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {message}")]
    EnvParse { var: String, message: String },
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<ConfigError> for DashboardError {
    fn from(err: ConfigError) -> Self {
        Self::config_with_source("failed to load configuration", err)
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML or TOML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::parse(path, &content)?;

        Self::apply_env_overrides(&mut config)?;
        config.validate().map_err(ConfigError::Invalid)?;

        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load configuration from the environment-named file, the first default
    /// file present, or built-in defaults, in that order.
    pub fn load() -> Result<(Config, Option<PathBuf>), ConfigError> {
        match Self::locate() {
            Some(path) => Ok((Self::load_config(&path)?, Some(path))),
            None => {
                debug!("No configuration file found, using defaults");
                let mut config = Config::default();
                Self::apply_env_overrides(&mut config)?;
                config.validate().map_err(ConfigError::Invalid)?;
                Ok((config, None))
            }
        }
    }

    /// The configuration file `load` would read, if any.
    pub fn locate() -> Option<PathBuf> {
        if let Ok(path) = env::var(CONFIG_PATH_ENV) {
            return Some(PathBuf::from(path));
        }
        DEFAULT_CONFIG_FILES
            .iter()
            .map(PathBuf::from)
            .find(|candidate| candidate.exists())
    }

    /// Parses file contents, choosing the format from the file extension.
    pub fn parse(path: &Path, content: &str) -> Result<Config, ConfigError> {
        let is_toml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
        if is_toml {
            Ok(toml::from_str(content)?)
        } else {
            Ok(serde_yaml::from_str(content)?)
        }
    }

    /// Apply environment variable overrides to configuration
    pub fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        Self::apply_overrides_from(config, |key| env::var(key).ok())
    }

    /// Apply overrides read through `lookup`, which maps a variable name to its value.
    pub fn apply_overrides_from<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("AIRPULSE_CSV_PATH") {
            config.data.csv_path = PathBuf::from(path);
        }

        if let Some(language) = lookup("AIRPULSE_LANGUAGE") {
            config.data.language = language;
        }

        if let Some(dir) = lookup("AIRPULSE_OUTPUT_DIR") {
            config.dashboard.output_dir = PathBuf::from(dir);
        }

        if let Some(url) = lookup("AIRPULSE_AVATAR_URL") {
            config.dashboard.avatar.url = url;
        }

        if let Some(level) = lookup("AIRPULSE_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Some(watch) = lookup("AIRPULSE_WATCH") {
            config.dashboard.watch = parse_bool(&watch).ok_or_else(|| ConfigError::EnvParse {
                var: "AIRPULSE_WATCH".to_string(),
                message: format!("expected a boolean, got `{watch}`"),
            })?;
        }

        Ok(())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
