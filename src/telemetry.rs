//! Telemetry utilities for command timing and tracing spans.

use std::time::Instant;

/// Guard for timing command dispatch and recording metrics.
///
/// Records command latency when dropped.
pub struct CommandTimer {
    command: String,
    start: Instant,
}

impl CommandTimer {
    /// Start timing a command.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            start: Instant::now(),
        }
    }
}

impl Drop for CommandTimer {
    fn drop(&mut self) {
        let duration = self.start.elapsed().as_secs_f64();
        crate::metrics::record_command(&self.command, duration);
    }
}

/// Standardized span constructors for console observability.
pub mod spans {
    use tracing::{Span, debug_span};

    /// Create a span for one command dispatch.
    pub fn command(name: &str, hooks: usize, requires_prefix: bool) -> Span {
        debug_span!("console.command", command = %name, hooks, requires_prefix)
    }
}
