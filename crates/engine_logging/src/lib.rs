#![deny(missing_docs)]
//! Shared logging utilities for the word counter workspace.
//!
//! This crate provides the `engine_*` logging macros used across the codebase
//! and a minimal test initializer for the global logger. Every message is
//! prefixed with the number of the query currently being processed, so the
//! lines belonging to one prompt/response cycle can be grouped in the log.

use std::cell::Cell;

thread_local! {
    /// Thread-local storage for the current query number.
    static QUERY_SEQ: Cell<u64> = const { Cell::new(0) };
}

/// Sets the query number for the current thread.
/// The console driver calls this once before running each query.
pub fn set_query_seq(seq: u64) {
    QUERY_SEQ.with(|v| v.set(seq));
}

/// Retrieves the query number for the current thread.
/// Returns 0 outside of a query (startup, shutdown, tests).
pub fn query_seq() -> u64 {
    QUERY_SEQ.with(|v| v.get())
}

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! engine_trace {
    ($($arg:tt)*) => {{
        log::trace!("[q{}] {}", $crate::query_seq(), format_args!($($arg)*));
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! engine_info {
    ($($arg:tt)*) => {{
        log::info!("[q{}] {}", $crate::query_seq(), format_args!($($arg)*));
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! engine_debug {
    ($($arg:tt)*) => {{
        log::debug!("[q{}] {}", $crate::query_seq(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! engine_warn {
    ($($arg:tt)*) => {{
        log::warn!("[q{}] {}", $crate::query_seq(), format_args!($($arg)*));
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! engine_error {
    ($($arg:tt)*) => {{
        log::error!("[q{}] {}", $crate::query_seq(), format_args!($($arg)*));
    }};
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )]);
}
