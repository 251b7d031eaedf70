//! Logger trait and convenience macros.

use std::fmt::Arguments;

/// Severity of a diagnostic event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

/// Sink for diagnostic events emitted by library components.
///
/// Implementations must be `Send + Sync` so a single logger can be shared by
/// every resolver in a process.
pub trait Logger: Send + Sync {
    /// Record one event. The level helpers below all funnel through here.
    fn log(&self, level: LogLevel, args: Arguments<'_>);

    fn trace(&self, args: Arguments<'_>) {
        self.log(LogLevel::Trace, args);
    }

    fn debug(&self, args: Arguments<'_>) {
        self.log(LogLevel::Debug, args);
    }

    fn info(&self, args: Arguments<'_>) {
        self.log(LogLevel::Info, args);
    }

    fn warn(&self, args: Arguments<'_>) {
        self.log(LogLevel::Warn, args);
    }

    fn error(&self, args: Arguments<'_>) {
        self.log(LogLevel::Error, args);
    }
}

#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)*) => {
        $logger.debug(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)*) => {
        $logger.info(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $($arg:tt)*) => {
        $logger.warn(format_args!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct Collect(Mutex<Vec<(LogLevel, String)>>);

    impl Logger for Collect {
        fn log(&self, level: LogLevel, args: Arguments<'_>) {
            self.0.lock().unwrap().push((level, args.to_string()));
        }
    }

    #[test]
    fn test_level_ordering() {
        assert!(LogLevel::Trace < LogLevel::Debug);
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Error);
    }

    #[test]
    fn test_helpers_route_to_log() {
        let logger = Collect(Mutex::new(Vec::new()));
        crate::log_debug!(logger, "lat={}", 10.5);
        crate::log_warn!(logger, "bad row {}", 7);

        let events = logger.0.lock().unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], (LogLevel::Debug, "lat=10.5".to_string()));
        assert_eq!(events[1], (LogLevel::Warn, "bad row 7".to_string()));
    }
}
