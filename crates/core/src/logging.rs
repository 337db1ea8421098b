//! Structured logging for the runtime core.
//!
//! The core never logs directly to `tracing`: it only constructs
//! [`LogRecord`]s and hands them to whatever [`Logger`] the host installed.
//! That lets a host route records through `tracing` (the default, via
//! [`TracingLogger`]), capture them for assertions in a test, or drop them
//! entirely with [`NullLogger`]. Core behaviour is identical whether a
//! logger is attached or not; keeping the core decoupled from any one
//! logging backend mirrors the boundary the teacher draws around its own
//! `tracing` usage: library code emits through a trait, only the binary
//! entry point wires up a subscriber.

use std::collections::HashMap;
use std::fmt;

/// Severity of a [`LogRecord`]. `Function` marks call-entry/exit tracing,
/// distinct from general-purpose `Trace` chatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Trace,
    Function,
    Debug,
    Info,
    Warning,
    Error,
    Fatal,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Level::Trace => "TRACE",
            Level::Function => "FUNCTION",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Fatal => "FATAL",
        };
        f.write_str(s)
    }
}

/// A scalar attribute value attachable to a [`LogRecord`].
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Bool(v) => write!(f, "{v}"),
            AttributeValue::Int(v) => write!(f, "{v}"),
            AttributeValue::Float(v) => write!(f, "{v}"),
            AttributeValue::Str(v) => write!(f, "{v}"),
        }
    }
}

impl From<bool> for AttributeValue {
    fn from(v: bool) -> Self {
        AttributeValue::Bool(v)
    }
}

impl From<i64> for AttributeValue {
    fn from(v: i64) -> Self {
        AttributeValue::Int(v)
    }
}

impl From<f64> for AttributeValue {
    fn from(v: f64) -> Self {
        AttributeValue::Float(v)
    }
}

impl From<&str> for AttributeValue {
    fn from(v: &str) -> Self {
        AttributeValue::Str(v.to_owned())
    }
}

impl From<String> for AttributeValue {
    fn from(v: String) -> Self {
        AttributeValue::Str(v)
    }
}

/// One emitted log line: a level, a message, and zero or more open,
/// string-keyed attributes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LogRecord {
    pub level_value: Option<Level>,
    pub message: String,
    pub attributes: HashMap<String, AttributeValue>,
}

impl LogRecord {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        LogRecord {
            level_value: Some(level),
            message: message.into(),
            attributes: HashMap::new(),
        }
    }

    pub fn level(&self) -> Level {
        self.level_value.expect("LogRecord::new always sets a level")
    }

    /// Attaches an attribute, builder-style.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

/// A sink for [`LogRecord`]s. The core is written entirely against this
/// trait; no module depends on `tracing` directly.
pub trait Logger {
    fn log(&self, record: LogRecord);

    /// Convenience for the common case of no attributes.
    fn log_simple(&self, level: Level, message: impl Into<String>) {
        self.log(LogRecord::new(level, message));
    }
}

/// Discards every record. Proves that core behaviour does not depend on a
/// logger being attached; the default for tests and examples that don't
/// care about log output.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullLogger;

impl Logger for NullLogger {
    fn log(&self, _record: LogRecord) {}
}

/// Forwards every record to `tracing`, preserving level and attributes as
/// structured fields. This is the logger a host process installs in
/// production; tests prefer [`NullLogger`] or a capturing logger so
/// assertions don't depend on a subscriber being installed.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, record: LogRecord) {
        let mut fields: Vec<String> = record
            .attributes
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect();
        fields.sort();
        let fields = fields.join(" ");
        match record.level() {
            Level::Trace | Level::Function => {
                tracing::trace!(target: "simnet", %fields, "{}", record.message)
            }
            Level::Debug => tracing::debug!(target: "simnet", %fields, "{}", record.message),
            Level::Info => tracing::info!(target: "simnet", %fields, "{}", record.message),
            Level::Warning => tracing::warn!(target: "simnet", %fields, "{}", record.message),
            Level::Error | Level::Fatal => {
                tracing::error!(target: "simnet", %fields, "{}", record.message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct CapturingLogger {
        records: RefCell<Vec<LogRecord>>,
    }

    impl Logger for CapturingLogger {
        fn log(&self, record: LogRecord) {
            self.records.borrow_mut().push(record);
        }
    }

    #[test]
    fn null_logger_drops_everything() {
        let logger = NullLogger;
        logger.log_simple(Level::Error, "should vanish");
    }

    #[test]
    fn capturing_logger_preserves_attributes() {
        let logger = CapturingLogger::default();
        logger.log(
            LogRecord::new(Level::Warning, "clock skew")
                .with("delta_ticks", 42i64)
                .with("severe", false),
        );
        let records = logger.records.borrow();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].level(), Level::Warning);
        assert_eq!(
            records[0].attributes.get("delta_ticks"),
            Some(&AttributeValue::Int(42))
        );
        assert_eq!(
            records[0].attributes.get("severe"),
            Some(&AttributeValue::Bool(false))
        );
    }

    #[test]
    fn tracing_logger_forwards_without_panicking() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        let logger = TracingLogger;
        logger.log(LogRecord::new(Level::Info, "scheduler started").with("entries", 3i64));
    }

    #[test]
    fn levels_order_from_trace_to_fatal() {
        assert!(Level::Trace < Level::Function);
        assert!(Level::Function < Level::Debug);
        assert!(Level::Debug < Level::Info);
        assert!(Level::Info < Level::Warning);
        assert!(Level::Warning < Level::Error);
        assert!(Level::Error < Level::Fatal);
    }
}
