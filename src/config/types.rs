//! Core configuration types and loading.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use super::defaults::{
    default_command_prefixes, default_private_channel_name, default_show_commands_aliases,
    default_streaming_toggle_aliases, default_true,
};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl ConfigError {
    /// Get a static error code string for metrics labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Io(_) => "config_io",
            Self::Parse(_) => "config_parse",
            Self::Serialize(_) => "config_serialize",
        }
    }
}

/// Console configuration.
///
/// Key names follow the historical config file layout, so some are
/// camelCase and some snake_case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Display name of the virtual private channel.
    #[serde(default = "default_private_channel_name")]
    pub private_channel_name: String,
    /// Show a banner line after joining the channel.
    #[serde(default = "default_true")]
    pub login_message: bool,
    /// Scan public chat for prefixed commands.
    #[serde(default = "default_true")]
    pub public_enable: bool,
    /// Command prefixes, tried in order; the first match wins.
    #[serde(rename = "commandPrefixes", default = "default_command_prefixes")]
    pub command_prefixes: Vec<String>,
    /// Author name shown on console output.
    #[serde(rename = "authorName", default)]
    pub author_name: String,
    /// Aliases of the built-in command listing.
    #[serde(rename = "showCommandsCommands", default = "default_show_commands_aliases")]
    pub show_commands_aliases: Vec<String>,
    /// Persisted streaming mode flag.
    #[serde(default)]
    pub streaming_mode: bool,
    /// Aliases of the built-in streaming mode toggle.
    #[serde(
        rename = "enable_streaming_mode_commands",
        default = "default_streaming_toggle_aliases"
    )]
    pub streaming_toggle_aliases: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            private_channel_name: default_private_channel_name(),
            login_message: true,
            public_enable: true,
            command_prefixes: default_command_prefixes(),
            author_name: String::new(),
            show_commands_aliases: default_show_commands_aliases(),
            streaming_mode: false,
            streaming_toggle_aliases: default_streaming_toggle_aliases(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file, filling missing keys with defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Like [`Config::load`], but a missing file yields the defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml_str(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Render the full configuration, defaults included, as TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write the full configuration back to `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_yields_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.private_channel_name, "Proxy");
        assert_eq!(config.command_prefixes, vec!["!", ".", "$"]);
        assert!(!config.streaming_mode);
    }

    #[test]
    fn test_partial_file_merges_with_defaults() {
        let config = Config::from_toml_str(
            r#"
            authorName = "Console"
            commandPrefixes = ["/"]
            public_enable = false
            "#,
        )
        .unwrap();
        assert_eq!(config.author_name, "Console");
        assert_eq!(config.command_prefixes, vec!["/"]);
        assert!(!config.public_enable);
        assert!(config.login_message);
        assert_eq!(config.show_commands_aliases.len(), 4);
    }

    #[test]
    fn test_toml_roundtrip_uses_historical_keys() {
        let config = Config {
            streaming_mode: true,
            ..Config::default()
        };
        let text = config.to_toml_string().unwrap();
        assert!(text.contains("commandPrefixes"));
        assert!(text.contains("enable_streaming_mode_commands"));
        assert_eq!(Config::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_bad_toml_is_parse_error() {
        let err = Config::from_toml_str("login_message = \"yes\"").unwrap_err();
        assert_eq!(err.error_code(), "config_parse");
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let config = Config {
            private_channel_name: "Console".into(),
            ..Config::default()
        };
        config.save(&path).unwrap();
        assert_eq!(Config::load(&path).unwrap(), config);
    }
}
