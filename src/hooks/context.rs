//! Hook trait and the context passed to running hooks.

use crate::console::Console;
use std::fmt::Display;
use std::sync::Arc;

/// Result type for hooks. Any error is reported to the operator.
pub type HookResult = anyhow::Result<()>;

/// A command callback.
///
/// Implemented for every `Fn(&mut Invocation<'_>, &[String]) -> HookResult`
/// closure, so most callers never name this trait.
pub trait Hook: Send + Sync {
    /// Run the command with its positional arguments.
    fn call(&self, ctx: &mut Invocation<'_>, args: &[String]) -> HookResult;
}

impl<F> Hook for F
where
    F: Fn(&mut Invocation<'_>, &[String]) -> HookResult + Send + Sync,
{
    fn call(&self, ctx: &mut Invocation<'_>, args: &[String]) -> HookResult {
        self(ctx, args)
    }
}

/// Box a closure as a shareable hook.
pub fn hook_fn<F>(f: F) -> Arc<dyn Hook>
where
    F: Fn(&mut Invocation<'_>, &[String]) -> HookResult + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Registration options for [`Console::add_with`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HookOptions {
    /// Caller-chosen id; auto-assigned when `None`.
    pub id: Option<super::HookId>,
    /// Owner label shown by the command listing.
    pub owner: Option<String>,
}

impl HookOptions {
    pub fn owner(owner: impl Into<String>) -> Self {
        Self {
            id: None,
            owner: Some(owner.into()),
        }
    }

    pub fn with_id(mut self, id: super::HookId) -> Self {
        self.id = Some(id);
        self
    }
}

/// Context handed to a running hook.
///
/// Gives the hook the console it runs in, so it can write output, inspect
/// or change the registry, and flip session state.
pub struct Invocation<'a> {
    /// The lowercased command name being run.
    pub command: &'a str,
    console: &'a mut Console,
}

impl<'a> Invocation<'a> {
    pub(crate) fn new(command: &'a str, console: &'a mut Console) -> Self {
        Self { command, console }
    }

    /// Write space-joined parts to the console output channel.
    pub fn message<I, T>(&mut self, parts: I)
    where
        I: IntoIterator<Item = T>,
        T: Display,
    {
        self.console.message(parts);
    }

    /// Write one line to the console output channel.
    pub fn reply(&mut self, text: impl Display) {
        self.console.message([text]);
    }

    pub fn console(&mut self) -> &mut Console {
        &mut *self.console
    }
}
