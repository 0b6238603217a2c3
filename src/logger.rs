use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Mutex;

/// Log level enum for type-safe logging
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }
}

/// Log entry with optional structured context
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<HashMap<String, serde_json::Value>>,
}

/// Simple circular buffer for fixed-size log storage
struct CircularBuffer {
    buffer: Vec<LogEntry>,
    head: usize,
    capacity: usize,
}

impl CircularBuffer {
    fn new(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
            head: 0,
            capacity,
        }
    }

    fn push(&mut self, item: LogEntry) {
        if self.buffer.len() < self.capacity {
            self.buffer.push(item);
        } else {
            self.buffer[self.head] = item;
            self.head = (self.head + 1) % self.capacity;
        }
    }

    fn to_vec(&self) -> Vec<LogEntry> {
        // Oldest entry first
        let mut result = Vec::with_capacity(self.buffer.len());
        result.extend_from_slice(&self.buffer[self.head..]);
        result.extend_from_slice(&self.buffer[..self.head]);
        result
    }

}

/// In-memory log of pipeline activity, kept alongside the `tracing` output
/// so a run can be inspected after it completes.
pub struct Logger {
    buffer: Mutex<CircularBuffer>,
    min_level: AtomicU8,
}

impl Logger {
    pub fn new() -> Self {
        Self::with_capacity(1000)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Mutex::new(CircularBuffer::new(capacity.max(1))),
            min_level: AtomicU8::new(LogLevel::Debug as u8),
        }
    }

    pub fn log(&self, level: LogLevel, message: &str, source: &str) {
        self.push(level, message, source, None);
    }

    /// Log with context (structured logging)
    pub fn log_with_context(
        &self,
        level: LogLevel,
        message: &str,
        source: &str,
        context: HashMap<String, serde_json::Value>,
    ) {
        self.push(level, message, source, Some(context));
    }

    fn push(
        &self,
        level: LogLevel,
        message: &str,
        source: &str,
        context: Option<HashMap<String, serde_json::Value>>,
    ) {
        if (level as u8) < self.min_level.load(Ordering::Relaxed) {
            return;
        }

        match level {
            LogLevel::Error => tracing::error!(target: "folio", source = source, "{}", message),
            LogLevel::Warn => tracing::warn!(target: "folio", source = source, "{}", message),
            LogLevel::Info => tracing::info!(target: "folio", source = source, "{}", message),
            LogLevel::Debug => tracing::debug!(target: "folio", source = source, "{}", message),
        }

        let entry = LogEntry {
            timestamp: Utc::now(),
            level,
            message: message.to_string(),
            source: source.to_string(),
            context,
        };

        // Poisoned buffer: drop the entry
        if let Ok(mut buffer) = self.buffer.lock() {
            buffer.push(entry);
        }
    }

    /// Set minimum log level (runtime filtering)
    pub fn set_min_level(&self, level: LogLevel) {
        self.min_level.store(level as u8, Ordering::Relaxed);
    }

    pub fn get_min_level(&self) -> LogLevel {
        match self.min_level.load(Ordering::Relaxed) {
            0 => LogLevel::Debug,
            1 => LogLevel::Info,
            2 => LogLevel::Warn,
            3 => LogLevel::Error,
            _ => LogLevel::Info,
        }
    }

    pub fn get_logs(&self) -> Vec<LogEntry> {
        self.buffer
            .lock()
            .map(|buffer| buffer.to_vec())
            .unwrap_or_default()
    }

    /// Entries recorded at or after `since`, oldest first
    pub fn logs_since(&self, since: DateTime<Utc>) -> Vec<LogEntry> {
        self.get_logs()
            .into_iter()
            .filter(|entry| entry.timestamp >= since)
            .collect()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

// Global logger instance
lazy_static::lazy_static! {
    pub static ref LOGGER: Logger = Logger::new();
}

/// Format and record a message on the global logger.
///
/// ```ignore
/// app_log!(LogLevel::Info, "pipeline", "Starting {} stages", count);
/// ```
#[macro_export]
macro_rules! app_log {
    ($level:expr, $source:expr, $($arg:tt)*) => {
        $crate::logger::LOGGER.log($level, &format!($($arg)*), $source)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_parse() {
        assert_eq!(LogLevel::parse("warn"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::parse("INFO"), Some(LogLevel::Info));
        assert_eq!(LogLevel::parse("verbose"), None);
        assert_eq!(LogLevel::Error.as_str(), "error");
    }

    #[test]
    fn test_min_level_filters_entries() {
        let logger = Logger::with_capacity(10);
        logger.set_min_level(LogLevel::Warn);
        logger.log(LogLevel::Info, "dropped", "test");
        logger.log(LogLevel::Error, "kept", "test");

        let logs = logger.get_logs();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].message, "kept");
        assert_eq!(logger.get_min_level(), LogLevel::Warn);
    }

    #[test]
    fn test_buffer_wraps_in_order() {
        let logger = Logger::with_capacity(3);
        for i in 0..5 {
            logger.log(LogLevel::Info, &format!("entry {}", i), "test");
        }

        let messages: Vec<String> = logger.get_logs().into_iter().map(|e| e.message).collect();
        assert_eq!(messages, vec!["entry 2", "entry 3", "entry 4"]);
    }

    #[test]
    fn test_log_with_context() {
        let logger = Logger::with_capacity(4);
        let mut context = HashMap::new();
        context.insert("stage".to_string(), serde_json::json!("edit"));
        logger.log_with_context(LogLevel::Debug, "with context", "test", context);

        let logs = logger.get_logs();
        assert_eq!(logs[0].context.as_ref().unwrap()["stage"], "edit");
    }

    #[test]
    fn test_logs_since_skips_earlier_entries() {
        let logger = Logger::with_capacity(4);
        logger.log(LogLevel::Info, "before", "test");
        std::thread::sleep(std::time::Duration::from_millis(5));
        let since = Utc::now();
        logger.log(LogLevel::Info, "after", "test");

        let messages: Vec<String> = logger.logs_since(since).into_iter().map(|e| e.message).collect();
        assert_eq!(messages, vec!["after"]);
    }
}
