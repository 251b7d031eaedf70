//! Diagnostic logging capability.
//!
//! The resolver never talks to a global logger directly. It is handed an
//! `Arc<dyn Logger>` at construction, so tests can run silently (or record
//! events) and embedders can route diagnostics wherever they like.
//!
//! - [`Logger`]: the capability the resolver depends on
//! - [`TracingLogger`]: forwards to the `tracing` crate (used by the binaries)
//! - [`NoOpLogger`]: discards everything
//!
//! ```
//! use std::sync::Arc;
//! use revgeo::log::{Logger, NoOpLogger};
//! use revgeo::log_debug;
//!
//! let logger: Arc<dyn Logger> = Arc::new(NoOpLogger);
//! log_debug!(logger, "resolved {} candidates", 1);
//! ```

mod logger;
mod noop;
mod tracing_adapter;

pub use logger::{LogLevel, Logger};
pub use noop::NoOpLogger;
pub use tracing_adapter::TracingLogger;
