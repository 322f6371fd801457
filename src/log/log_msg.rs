use std::time::{SystemTime, UNIX_EPOCH};

use crate::log::log_level::LogLevel;

/// Represents a single log message event.
///
/// This struct encapsulates the metadata associated with a log entry,
/// including its severity, timestamp, origin (target), and the message content itself.
#[derive(Debug, Clone)]
pub struct LogMsg {
    /// The severity level of the log (e.g., Info, Warning, Error).
    pub level: LogLevel,
    /// The timestamp of the log event in milliseconds since the Unix epoch.
    pub ts_ms: u128,
    /// The actual content or payload of the log message.
    pub text: String,
    /// The target source of the log, typically the static module path.
    pub target: &'static str, // module path
}

impl LogMsg {
    /// Creates a new `LogMsg` stamped with the current wall-clock time.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rtcp_feedback::log::{log_level::LogLevel, log_msg::LogMsg};
    ///
    /// let msg = LogMsg::new(LogLevel::Info, "decoded PLI", module_path!());
    /// assert_eq!(msg.text, "decoded PLI");
    /// ```
    pub fn new(level: LogLevel, text: impl Into<String>, target: &'static str) -> Self {
        Self {
            level,
            ts_ms: now_millis(),
            text: text.into(),
            target,
        }
    }
}

fn now_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}
