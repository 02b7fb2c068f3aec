//! Configuration validation.
//!
//! Catches settings that would leave the console unreachable. None of
//! these are fatal; the binary logs them at startup.

use super::Config;
use thiserror::Error;

/// Validation findings for configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("commandPrefixes is empty; prefixed chat commands are disabled")]
    NoCommandPrefixes,
    #[error("commandPrefixes contains an empty prefix")]
    EmptyPrefix,
    #[error("{0} contains an empty alias")]
    EmptyAlias(&'static str),
    #[error("{0} is empty; the built-in command is unreachable")]
    NoAliases(&'static str),
    #[error("private_channel_name is empty")]
    EmptyChannelName,
}

/// Validate a configuration, returning all findings.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.command_prefixes.is_empty() {
        errors.push(ValidationError::NoCommandPrefixes);
    } else if config.command_prefixes.iter().any(String::is_empty) {
        errors.push(ValidationError::EmptyPrefix);
    }

    for (field, aliases) in [
        ("showCommandsCommands", &config.show_commands_aliases),
        ("enable_streaming_mode_commands", &config.streaming_toggle_aliases),
    ] {
        if aliases.is_empty() {
            errors.push(ValidationError::NoAliases(field));
        } else if aliases.iter().any(|a| a.trim().is_empty()) {
            errors.push(ValidationError::EmptyAlias(field));
        }
    }

    if config.private_channel_name.is_empty() {
        errors.push(ValidationError::EmptyChannelName);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
