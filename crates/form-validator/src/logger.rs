//! Diagnostic logging for validators.
//!
//! Validators never write to a global sink. Each one holds the [`Logger`]
//! injected into the [`FormValidator`](crate::FormValidator) that built it,
//! and that logger owns its verbosity threshold.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::str::FromStr;

/// Verbosity levels, most verbose first
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Per-option and per-message tracing
    #[default]
    Debug,
    /// Validation failures
    Alpha,
    /// Summaries
    Beta,
    /// Configuration diagnostics that should always surface
    Publish,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Alpha => write!(f, "alpha"),
            LogLevel::Beta => write!(f, "beta"),
            LogLevel::Publish => write!(f, "publish"),
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "alpha" => Ok(LogLevel::Alpha),
            "beta" => Ok(LogLevel::Beta),
            "publish" => Ok(LogLevel::Publish),
            other => Err(format!("unknown log level '{}'", other)),
        }
    }
}

/// Sink for validator diagnostics
pub trait Logger {
    /// Lowest level this logger emits
    fn threshold(&self) -> LogLevel;

    /// Emit a line that already passed the threshold check
    fn emit(&self, message: &str, level: LogLevel);

    /// Log a message if `level` is at or above the threshold
    fn log(&self, message: &str, level: LogLevel) {
        if self.threshold() <= level {
            self.emit(message, level);
        }
    }
}

/// Forwards validator diagnostics to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger {
    threshold: LogLevel,
}

impl TracingLogger {
    pub fn new(threshold: LogLevel) -> Self {
        Self { threshold }
    }
}

impl Logger for TracingLogger {
    fn threshold(&self) -> LogLevel {
        self.threshold
    }

    fn emit(&self, message: &str, level: LogLevel) {
        match level {
            LogLevel::Debug => tracing::trace!(target: "form_validator", "{}", message),
            LogLevel::Alpha => tracing::debug!(target: "form_validator", "{}", message),
            LogLevel::Beta => tracing::info!(target: "form_validator", "{}", message),
            LogLevel::Publish => tracing::warn!(target: "form_validator", "{}", message),
        }
    }
}

/// Keeps every emitted line in memory
#[derive(Debug, Default)]
pub struct RecordingLogger {
    threshold: LogLevel,
    lines: RefCell<Vec<(LogLevel, String)>>,
}

impl RecordingLogger {
    pub fn new(threshold: LogLevel) -> Self {
        Self {
            threshold,
            lines: RefCell::new(Vec::new()),
        }
    }

    /// Emitted lines, oldest first
    pub fn lines(&self) -> Vec<(LogLevel, String)> {
        self.lines.borrow().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.lines.borrow().iter().map(|(_, m)| m.clone()).collect()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines.borrow().iter().any(|(_, m)| m.contains(needle))
    }
}

impl Logger for RecordingLogger {
    fn threshold(&self) -> LogLevel {
        self.threshold
    }

    fn emit(&self, message: &str, level: LogLevel) {
        self.lines.borrow_mut().push((level, message.to_string()));
    }
}
