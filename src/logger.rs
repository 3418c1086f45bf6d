//! Logging utilities with colored output for refresh reporting.
//!
//! This module provides:
//! - `log!` macro for formatted terminal output with colored prefixes
//! - `debug!` macro gated on the global verbose flag
//! - `RefreshStatus` for per-module refresh outcome messages
//!
//! # Example
//!
//! ```ignore
//! // Simple logging
//! log!("refresh"; "reloading {} modules", count);
//!
//! // Refresh outcome reporting
//! logger::status_success("reloaded: geometry.Shape");
//! logger::status_error("reload failed: geometry.Shape", detail);
//! ```

use owo_colors::OwoColorize;
use parking_lot::Mutex;
use std::{
    io::{Write, stdout},
    sync::LazyLock,
    sync::atomic::{AtomicBool, Ordering},
};

/// Global verbose flag (set by the embedding host)
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set verbose mode globally
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

/// Check if verbose mode is enabled
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a colored module prefix
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a debug message (only shown when verbose mode is enabled)
///
/// # Usage
/// ```ignore
/// debug!("module"; "debug info: {}", value);
/// ```
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Log a message with a colored module prefix
#[inline]
pub fn log(module: &str, message: &str) {
    let module_lower = module.to_ascii_lowercase();
    let prefix = colorize_prefix(module, &module_lower);

    let mut stdout = stdout().lock();
    writeln!(stdout, "{prefix} {message}").ok();
    stdout.flush().ok();
}

/// Apply color to a module prefix based on module type
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> String {
    let prefix = format!("[{module}]");
    match module_lower {
        "refresh" => prefix.bright_blue().bold().to_string(),
        "scan" => prefix.bright_green().bold().to_string(),
        "error" => prefix.bright_red().bold().to_string(),
        _ => prefix.bright_yellow().bold().to_string(),
    }
}

// ============================================================================
// Refresh Status (timestamped outcome messages)
// ============================================================================

/// Get current time formatted as HH:MM:SS (UTC, good enough for display)
fn now() -> String {
    use std::time::SystemTime;
    let secs = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let hours = (secs / 3600) % 24;
    let minutes = (secs / 60) % 60;
    let seconds = secs % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Timestamped status display for refresh outcomes
///
/// Emits one line per outcome with a symbol matching the status type
/// (success, unchanged, error)
///
/// # Example
///
/// ```ignore
/// let mut status = RefreshStatus::new();
/// status.success("reloaded: geometry.Shape");
/// status.unchanged("geometry.Circle");
/// status.error("reload failed", "syntax error on line 5");
/// ```
pub struct RefreshStatus;

/// Global refresh status display shared across refresh cycles.
static REFRESH_STATUS: LazyLock<Mutex<RefreshStatus>> =
    LazyLock::new(|| Mutex::new(RefreshStatus::new()));

impl RefreshStatus {
    /// Create a new refresh status display.
    pub const fn new() -> Self {
        Self
    }

    /// Display success message (✓ prefix, green).
    pub fn success(&mut self, message: &str) {
        self.display(format!("{}", "✓".green()), message);
    }

    /// Display unchanged message (dimmed, no symbol).
    pub fn unchanged(&mut self, message: &str) {
        self.display(String::new(), &format!("{}", message.dimmed()));
    }

    /// Display error message (✗ prefix, red) with optional detail.
    pub fn error(&mut self, summary: &str, detail: &str) {
        let message = if detail.is_empty() {
            summary.to_string()
        } else {
            format!("{summary}\n{detail}")
        };
        self.display(format!("{}", "✗".red()), &message);
    }

    /// Internal display logic with timestamp prefix.
    fn display(&mut self, symbol: String, message: &str) {
        let timestamp = format!("[{}]", now()).dimmed().to_string();
        let line = if symbol.is_empty() {
            format!("{timestamp} {message}")
        } else {
            format!("{timestamp} {symbol} {message}")
        };

        let mut stdout = stdout().lock();
        writeln!(stdout, "{line}").ok();
        stdout.flush().ok();
    }
}

impl Default for RefreshStatus {
    fn default() -> Self {
        Self::new()
    }
}

/// Global refresh status: success
pub fn status_success(message: &str) {
    REFRESH_STATUS.lock().success(message);
}

/// Global refresh status: unchanged
pub fn status_unchanged(message: &str) {
    REFRESH_STATUS.lock().unchanged(message);
}

/// Global refresh status: error
pub fn status_error(summary: &str, detail: &str) {
    REFRESH_STATUS.lock().error(summary, detail);
}

// ============================================================================
// Tests
// ============================================================================
