use crate::log::log_level::LogLevel;

/// Destination for log lines emitted by the codec front end.
pub trait LogSink: Send + Sync {
    fn log(&self, level: LogLevel, msg: &str, target: &'static str);
}
