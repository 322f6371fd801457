use std::sync::mpsc;

use crate::log::{log_level::LogLevel, log_msg::LogMsg, log_sink::LogSink};

/// Lightweight, cloneable log sink backed by a bounded channel.
///
/// The codec never blocks on logging: [`try_log`](Self::try_log) drops the
/// message when the queue is full. Whoever owns the receiver decides where
/// the lines end up (file, UI, stderr).
///
/// # Examples
/// ```
/// use rtcp_feedback::log::{LoggerHandle, log_level::LogLevel};
///
/// let (handle, rx) = LoggerHandle::channel(16, LogLevel::Debug);
/// handle.try_log(LogLevel::Info, "started", module_path!()).unwrap();
/// assert_eq!(rx.recv().unwrap().text, "started");
/// ```
#[derive(Clone)]
pub struct LoggerHandle {
    tx: mpsc::SyncSender<LogMsg>,
    min_level: LogLevel,
}

impl LogSink for LoggerHandle {
    #[inline]
    fn log(&self, level: LogLevel, msg: &str, target: &'static str) {
        let _ = self.try_log(level, msg, target);
    }
}

impl LoggerHandle {
    /// Creates a handle and the receiving end of its queue.
    pub fn channel(cap: usize, min_level: LogLevel) -> (Self, mpsc::Receiver<LogMsg>) {
        let (tx, rx) = mpsc::sync_channel(cap);
        (Self { tx, min_level }, rx)
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    /// Attempts to enqueue a log message without blocking.
    ///
    /// Messages below the handle's minimum level are discarded and count as sent.
    ///
    /// # Errors
    /// Returns:
    /// - `Err(TrySendError::Full(_))` when the bounded queue is at capacity (message is not sent).
    /// - `Err(TrySendError::Disconnected(_))` when the receiver has been dropped.
    pub fn try_log<S: Into<String>>(
        &self,
        level: LogLevel,
        text: S,
        target: &'static str,
    ) -> Result<(), mpsc::TrySendError<LogMsg>> {
        if level < self.min_level {
            return Ok(());
        }
        self.tx.try_send(LogMsg::new(level, text, target))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;
    use std::sync::mpsc::TrySendError;

    #[test]
    fn try_log_ok_when_capacity_available() {
        let (h, rx) = LoggerHandle::channel(2, LogLevel::Trace);

        let res = h.try_log(LogLevel::Info, "hello", "test::target");
        assert!(res.is_ok(), "expected Ok from try_log");

        let msg = rx.recv().expect("a message should arrive");
        assert_eq!(msg.level, LogLevel::Info);
        assert_eq!(msg.text, "hello");
        assert_eq!(msg.target, "test::target");
        assert!(msg.ts_ms > 0, "timestamp should be non-zero");
    }

    #[test]
    fn messages_below_min_level_are_dropped() {
        let (h, rx) = LoggerHandle::channel(2, LogLevel::Warn);

        h.try_log(LogLevel::Debug, "quiet", "test::target").unwrap();
        h.log(LogLevel::Error, "loud", "test::target");

        let msg = rx.try_recv().expect("error line should be queued");
        assert_eq!(msg.text, "loud");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn try_log_err_full_when_queue_full() {
        // Capacity = 1, send once and do not recv -> next send should be Full.
        let (h, _rx) = LoggerHandle::channel(1, LogLevel::Trace);

        h.try_log(LogLevel::Info, "first", "test::target")
            .expect("first send should succeed");

        match h.try_log(LogLevel::Info, "second", "test::target") {
            Err(TrySendError::Full(_)) => {} // expected
            other => panic!("expected Full, got: {:?}", other),
        }
    }

    #[test]
    fn try_log_err_disconnected_when_receiver_closed() {
        let (h, rx) = LoggerHandle::channel(1, LogLevel::Trace);
        drop(rx);

        match h.try_log(LogLevel::Error, "won't send", "test::target") {
            Err(TrySendError::Disconnected(_)) => {} // expected
            other => panic!("expected Disconnected, got: {:?}", other),
        }
    }
}
