use super::{LogLevel, Logger};
use std::fmt::Arguments;

/// Logger that forwards events to the `tracing` crate.
///
/// Output depends on whichever subscriber the host process installed; the
/// `query` and `ingest` binaries install a `FmtSubscriber`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, level: LogLevel, args: Arguments<'_>) {
        match level {
            LogLevel::Trace => tracing::trace!(target: "revgeo", "{}", args),
            LogLevel::Debug => tracing::debug!(target: "revgeo", "{}", args),
            LogLevel::Info => tracing::info!(target: "revgeo", "{}", args),
            LogLevel::Warn => tracing::warn!(target: "revgeo", "{}", args),
            LogLevel::Error => tracing::error!(target: "revgeo", "{}", args),
        }
    }
}
