//! Default value functions for configuration.
//!
//! A config file only needs the keys it overrides; everything else is
//! filled from here when loading.

/// Returns `true` (for serde defaults).
pub fn default_true() -> bool {
    true
}

pub fn default_private_channel_name() -> String {
    "Proxy".to_string()
}

pub fn default_command_prefixes() -> Vec<String> {
    ["!", ".", "$"].map(String::from).to_vec()
}

pub fn default_show_commands_aliases() -> Vec<String> {
    ["commands", "cmds", "command", "cmd"].map(String::from).to_vec()
}

pub fn default_streaming_toggle_aliases() -> Vec<String> {
    ["streaming", "stream"].map(String::from).to_vec()
}
