//! Line dispatch: lex, resolve the prefix, run every hook for the command.

use super::{Console, prefix};
use crate::error::HookError;
use crate::hooks::Invocation;
use crate::metrics;
use crate::telemetry::{CommandTimer, spans};
use proxycmd_proto::{command_to_lower, strip_font, tokenize};
use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use tracing::{debug, warn};

/// Outcome of [`Console::exec`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// Empty, malformed, or missing a required prefix.
    NotCommand,
    /// Looked like a command but nothing is registered for it.
    Unhandled { command: String },
    /// At least one hook ran.
    Handled {
        command: String,
        invoked: usize,
        failed: usize,
    },
}

impl Dispatch {
    /// Whether the line was taken by the console.
    pub fn consumed(&self) -> bool {
        matches!(self, Self::Handled { .. })
    }

    pub fn command(&self) -> Option<&str> {
        match self {
            Self::NotCommand => None,
            Self::Unhandled { command } | Self::Handled { command, .. } => Some(command),
        }
    }
}

impl Console {
    /// Run a chat line as a command.
    ///
    /// Hooks run in registration order over a snapshot of the entries, so a
    /// hook may change the registry or re-enter `exec`. A failing or
    /// panicking hook is reported on the console and the rest still run.
    pub fn exec(&mut self, line: &str, requires_prefix: bool) -> Dispatch {
        let line = strip_font(line);
        let tokens = match tokenize(&line) {
            Ok(tokens) => tokens,
            Err(e) => {
                debug!(error = %e, code = e.error_code(), "Ignoring malformed line");
                metrics::record_lexer_reject(e.error_code());
                return Dispatch::NotCommand;
            }
        };

        let tokens = prefix::resolve(tokens, &self.config.command_prefixes, requires_prefix);
        let Some((name, args)) = tokens.split_first() else {
            return Dispatch::NotCommand;
        };
        if name.is_empty() {
            return Dispatch::NotCommand;
        }
        let command = command_to_lower(name);

        let entries = self.registry.lookup(&command).to_vec();
        if entries.is_empty() {
            return Dispatch::Unhandled { command };
        }

        let span = spans::command(&command, entries.len(), requires_prefix);
        let _enter = span.enter();
        let _timer = CommandTimer::new(command.as_str());

        let mut failed = 0;
        for entry in &entries {
            let outcome = {
                let mut ctx = Invocation::new(&command, self);
                catch_unwind(AssertUnwindSafe(|| entry.hook.call(&mut ctx, args)))
            };
            let err = match outcome {
                Ok(Ok(())) => continue,
                Ok(Err(source)) => HookError::Failed {
                    command: command.clone(),
                    source,
                },
                Err(payload) => HookError::Panicked {
                    command: command.clone(),
                    message: panic_message(&*payload),
                },
            };
            failed += 1;
            warn!(error = %err, hook = %entry.id, code = err.error_code(), "Command hook failed");
            metrics::record_command_error(err.command(), err.error_code());
            self.message([err.to_console_line()]);
        }

        Dispatch::Handled {
            command,
            invoked: entries.len(),
            failed,
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
