//! Command name case folding.
//!
//! Command names are matched case-insensitively using full Unicode
//! lowercasing, so `HELP`, `Help` and `help` all name the same command.

/// Fold a command name to its registry key.
pub fn command_to_lower(name: &str) -> String {
    name.to_lowercase()
}
