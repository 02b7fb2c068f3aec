//! Unified error handling for proxycmd.
//!
//! Lexer errors live in `proxycmd_proto::ArgsError` and never leave the
//! dispatcher. Everything here is either logged (registration misuse),
//! reported to the operator (hook failures), or returned from setup
//! (subscription, config).

use crate::config::ConfigError;
use crate::host::SubscribeError;
use thiserror::Error;

// ============================================================================
// Registry Errors (hook table misuse)
// ============================================================================

/// Errors from adding or removing hooks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("failed to add command {0:?}: missing command name")]
    InvalidRegistration(String),

    #[error("invalid removal on command {0:?}: missing command name")]
    InvalidRemoval(String),
}

impl RegistryError {
    /// Get a static error code string for metrics labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidRegistration(_) => "invalid_registration",
            Self::InvalidRemoval(_) => "invalid_removal",
        }
    }
}

// ============================================================================
// Hook Errors (handler failures)
// ============================================================================

/// A registered hook failed while running a command.
#[derive(Debug, Error)]
pub enum HookError {
    #[error("command {command} failed: {source:#}")]
    Failed {
        command: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("command {command} panicked: {message}")]
    Panicked { command: String, message: String },
}

impl HookError {
    /// Get a static error code string for metrics labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Failed { .. } => "hook_failed",
            Self::Panicked { .. } => "hook_panicked",
        }
    }

    /// Command the failing hook was bound to.
    pub fn command(&self) -> &str {
        match self {
            Self::Failed { command, .. } | Self::Panicked { command, .. } => command,
        }
    }

    /// Operator-facing line for the console output channel.
    pub fn to_console_line(&self) -> String {
        match self {
            Self::Failed { command, source } => format!("Error on command {command}: {source:#}"),
            Self::Panicked { command, message } => {
                format!("Error on command {command}: panicked: {message}")
            }
        }
    }
}

// ============================================================================
// Console Errors (setup)
// ============================================================================

/// Errors from wiring a console into its host.
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("failed to subscribe: {0}")]
    Subscribe(#[from] SubscribeError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ConsoleError {
    /// Get a static error code string for metrics labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Subscribe(_) => "subscribe",
            Self::Config(e) => e.error_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proxycmd_proto::PacketKind;

    #[test]
    fn test_registry_error_codes() {
        assert_eq!(
            RegistryError::InvalidRegistration(String::new()).error_code(),
            "invalid_registration"
        );
        assert_eq!(
            RegistryError::InvalidRemoval("x".into()).error_code(),
            "invalid_removal"
        );
    }

    #[test]
    fn test_hook_error_console_line() {
        let err = HookError::Failed {
            command: "roll".into(),
            source: anyhow::anyhow!("no dice"),
        };
        assert_eq!(err.to_console_line(), "Error on command roll: no dice");
        assert_eq!(err.command(), "roll");
        assert_eq!(err.error_code(), "hook_failed");

        let err = HookError::Panicked {
            command: "roll".into(),
            message: "boom".into(),
        };
        assert_eq!(err.to_console_line(), "Error on command roll: panicked: boom");
    }

    #[test]
    fn test_hook_error_keeps_context_chain() {
        let source = anyhow::anyhow!("file missing").context("loading table");
        let err = HookError::Failed {
            command: "load".into(),
            source,
        };
        assert_eq!(
            err.to_console_line(),
            "Error on command load: loading table: file missing"
        );
    }

    #[test]
    fn test_console_error_codes() {
        let err = ConsoleError::from(SubscribeError::Rejected {
            kind: PacketKind::CChat,
            reason: "hook table full".into(),
        });
        assert_eq!(err.error_code(), "subscribe");
    }
}
