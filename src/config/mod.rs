//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: The `Config` struct, TOML loading and saving
//! - [`defaults`]: Default values merged into partial config files
//! - [`validation`]: Startup sanity checks
//! - [`store`]: Persistence collaborator used by runtime toggles

mod defaults;
mod store;
mod types;
mod validation;

pub use store::{ConfigStore, NullStore, TomlFileStore};
pub use types::{Config, ConfigError};
pub use validation::{ValidationError, validate};
