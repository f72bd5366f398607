//! Internal logging system for Nebula GFX
//!
//! This module provides a flexible logging system with:
//! - Customizable logger via Logger trait
//! - Severity levels (Trace, Debug, Info, Warn, Error)
//! - Colored console output by default
//! - Thread-safe logging with RwLock
//! - File and line information for detailed ERROR logs
//!
//! The backend contract reports device-level failures and caller contract
//! violations through this channel when the operation has no return value
//! to carry them (e.g. screenshot requests).

use colored::*;
use std::sync::{OnceLock, RwLock};
use std::time::SystemTime;
use chrono::{DateTime, Local};

/// Logger trait for custom logging implementations
///
/// Implement this trait to create custom loggers (file logging, capture
/// loggers for tests, etc.)
pub trait Logger: Send + Sync {
    /// Log an entry
    fn log(&self, entry: &LogEntry);
}

/// Log entry containing all information about a log message
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Severity level (Trace, Debug, Info, Warn, Error)
    pub severity: LogSeverity,

    /// Timestamp when the log was created
    pub timestamp: SystemTime,

    /// Source module (e.g., "nebula::Context", "nebula::vulkan::Backend")
    pub source: String,

    /// Log message
    pub message: String,

    /// Source file (only for detailed ERROR logs)
    pub file: Option<&'static str>,

    /// Source line (only for detailed ERROR logs)
    pub line: Option<u32>,
}

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogSeverity {
    /// Very verbose debug information (typically disabled in release)
    Trace,

    /// Development/debugging information
    Debug,

    /// Important informational messages
    Info,

    /// Warning messages (potential issues)
    Warn,

    /// Error messages (critical issues with file:line details)
    Error,
}

/// Default logger implementation using colored console output
///
/// Format:
/// - Normal: `[timestamp] [SEVERITY] [source] message`
/// - Error: `[timestamp] [ERROR] [source] message (file:line)`
pub struct DefaultLogger;

impl Logger for DefaultLogger {
    fn log(&self, entry: &LogEntry) {
        // Format timestamp as YYYY-MM-DD HH:MM:SS.mmm
        let datetime: DateTime<Local> = entry.timestamp.into();
        let timestamp = datetime.format("%Y-%m-%d %H:%M:%S%.3f").to_string();

        let severity_str = match entry.severity {
            LogSeverity::Trace => "TRACE".bright_black(),
            LogSeverity::Debug => "DEBUG".cyan(),
            LogSeverity::Info => "INFO ".green(),
            LogSeverity::Warn => "WARN ".yellow(),
            LogSeverity::Error => "ERROR".red().bold(),
        };

        let source = entry.source.bright_blue();

        if let (Some(file), Some(line)) = (entry.file, entry.line) {
            println!(
                "[{}] [{}] [{}] {} ({}:{})",
                timestamp, severity_str, source, entry.message, file, line
            );
        } else {
            println!("[{}] [{}] [{}] {}", timestamp, severity_str, source, entry.message);
        }
    }
}

// ===== GLOBAL LOGGER =====

/// Global logger (initialized with DefaultLogger on first use)
static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

fn logger() -> &'static RwLock<Box<dyn Logger>> {
    LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)))
}

/// Set a custom logger
///
/// Replace the default logger with a custom implementation.
pub fn set_logger<L: Logger + 'static>(new_logger: L) {
    if let Ok(mut lock) = logger().write() {
        *lock = Box::new(new_logger);
    }
}

/// Reset logger to default (DefaultLogger)
pub fn reset_logger() {
    if let Ok(mut lock) = logger().write() {
        *lock = Box::new(DefaultLogger);
    }
}

/// Internal logging entry point (for simple logs without file:line)
///
/// Used by macros like gfx_info!, gfx_warn!, etc.
pub fn log(severity: LogSeverity, source: &str, message: String) {
    if let Ok(lock) = logger().read() {
        lock.log(&LogEntry {
            severity,
            timestamp: SystemTime::now(),
            source: source.to_string(),
            message,
            file: None,
            line: None,
        });
    }
}

/// Internal logging entry point with file:line information (for ERROR logs)
pub fn log_detailed(
    severity: LogSeverity,
    source: &str,
    message: String,
    file: &'static str,
    line: u32,
) {
    if let Ok(lock) = logger().read() {
        lock.log(&LogEntry {
            severity,
            timestamp: SystemTime::now(),
            source: source.to_string(),
            message,
            file: Some(file),
            line: Some(line),
        });
    }
}

// ===== LOGGING MACROS =====

/// Log a TRACE message (very verbose, typically disabled)
#[macro_export]
macro_rules! gfx_trace {
    ($source:expr, $($arg:tt)*) => {
        $crate::log::log(
            $crate::log::LogSeverity::Trace,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log a DEBUG message (development information)
#[macro_export]
macro_rules! gfx_debug {
    ($source:expr, $($arg:tt)*) => {
        $crate::log::log(
            $crate::log::LogSeverity::Debug,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log an INFO message (important events)
#[macro_export]
macro_rules! gfx_info {
    ($source:expr, $($arg:tt)*) => {
        $crate::log::log(
            $crate::log::LogSeverity::Info,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log a WARN message (potential issues)
#[macro_export]
macro_rules! gfx_warn {
    ($source:expr, $($arg:tt)*) => {
        $crate::log::log(
            $crate::log::LogSeverity::Warn,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log an ERROR message with file:line information
#[macro_export]
macro_rules! gfx_error {
    ($source:expr, $($arg:tt)*) => {
        $crate::log::log_detailed(
            $crate::log::LogSeverity::Error,
            $source,
            format!($($arg)*),
            file!(),
            line!()
        )
    };
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
