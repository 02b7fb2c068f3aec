//! Prometheus metrics collection for proxycmd.
//!
//! Metrics live in `OnceLock` statics and are registered by [`init`].
//! Recording before `init` is a silent no-op, so library users that do not
//! care about metrics never have to call it.
//!
//! - `console_command_total{command}` - Commands dispatched to hooks
//! - `console_command_duration_seconds{command}` - Dispatch latency histogram
//! - `console_command_errors_total{command,error}` - Hook failures
//! - `console_lexer_rejects_total{error}` - Lines dropped as malformed
//! - `console_messages_sent_total` / `console_messages_muted_total`

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};
use std::sync::OnceLock;

/// Global Prometheus registry for all metrics.
pub static REGISTRY: OnceLock<Registry> = OnceLock::new();

pub fn registry() -> &'static Registry {
    REGISTRY.get_or_init(Registry::new)
}

// ========================================================================
// Counters
// ========================================================================

/// Console lines written to the private channel.
pub static MESSAGES_SENT: OnceLock<IntCounter> = OnceLock::new();

/// Console lines dropped because streaming mode was on.
pub static MESSAGES_MUTED: OnceLock<IntCounter> = OnceLock::new();

/// Commands dispatched, by command name.
pub static COMMAND_COUNTER: OnceLock<IntCounterVec> = OnceLock::new();

/// Hook failures by command and error kind.
pub static COMMAND_ERRORS: OnceLock<IntCounterVec> = OnceLock::new();

/// Lines the lexer rejected, by error kind.
pub static LEXER_REJECTS: OnceLock<IntCounterVec> = OnceLock::new();

// ========================================================================
// Histograms
// ========================================================================

/// Dispatch latency by command name.
pub static COMMAND_LATENCY: OnceLock<HistogramVec> = OnceLock::new();

/// Initialize the Prometheus metrics registry.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init() {
    let r = registry();

    macro_rules! register {
        ($metric:ident, $init:expr) => {
            if $metric.get().is_none() {
                match $init {
                    Ok(m) => {
                        if let Err(e) = r.register(Box::new(m.clone())) {
                            tracing::warn!(error = %e, concat!("Failed to register metric ", stringify!($metric)));
                        }
                        let _ = $metric.set(m);
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, concat!("Failed to create metric ", stringify!($metric)));
                    }
                }
            }
        };
    }

    register!(MESSAGES_SENT, IntCounter::new("console_messages_sent_total", "Console lines written"));
    register!(MESSAGES_MUTED, IntCounter::new("console_messages_muted_total", "Console lines muted by streaming mode"));
    register!(COMMAND_COUNTER, IntCounterVec::new(Opts::new("console_command_total", "Commands dispatched by name"), &["command"]));
    register!(COMMAND_ERRORS, IntCounterVec::new(Opts::new("console_command_errors_total", "Hook failures by command"), &["command", "error"]));
    register!(LEXER_REJECTS, IntCounterVec::new(Opts::new("console_lexer_rejects_total", "Lines rejected by the lexer"), &["error"]));
    register!(COMMAND_LATENCY, HistogramVec::new(
        HistogramOpts::new("console_command_duration_seconds", "Command dispatch latency by name")
            .buckets(vec![0.00001, 0.00005, 0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1]),
        &["command"]));
}

/// Gather all metrics and encode them in Prometheus text format.
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = registry().gather();
    let mut buffer = vec![];
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode Prometheus metrics");
        return String::new();
    }
    match String::from_utf8(buffer) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Prometheus metrics were not valid UTF-8");
            String::new()
        }
    }
}

// ============================================================================
// Helper functions for metric updates
// ============================================================================

/// Record a dispatched command and its latency.
pub fn record_command(command: &str, duration_secs: f64) {
    if let Some(counter) = COMMAND_COUNTER.get() {
        counter.with_label_values(&[command]).inc();
    }
    if let Some(histogram) = COMMAND_LATENCY.get() {
        histogram.with_label_values(&[command]).observe(duration_secs);
    }
}

/// Record a hook failure.
pub fn record_command_error(command: &str, error_kind: &str) {
    if let Some(counter) = COMMAND_ERRORS.get() {
        counter.with_label_values(&[command, error_kind]).inc();
    }
}

/// Record a line dropped by the lexer.
pub fn record_lexer_reject(error_kind: &str) {
    if let Some(counter) = LEXER_REJECTS.get() {
        counter.with_label_values(&[error_kind]).inc();
    }
}

pub fn record_message_sent() {
    if let Some(counter) = MESSAGES_SENT.get() {
        counter.inc();
    }
}

pub fn record_message_muted() {
    if let Some(counter) = MESSAGES_MUTED.get() {
        counter.inc();
    }
}
