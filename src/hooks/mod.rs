//! Command hook infrastructure.
//!
//! - [`registry`]: the case-insensitive, multi-handler hook table
//! - [`context`]: the [`Hook`] trait and the [`Invocation`] passed to hooks

pub mod context;
pub mod registry;

pub use context::{Hook, HookOptions, HookResult, Invocation, hook_fn};
pub use registry::{Aliases, HookEntry, HookId, Registry};
