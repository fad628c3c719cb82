//! # Rotolog
//!
//! A leveled, thread-safe logging library with size-based log file rotation.
//!
//! ## Features
//!
//! - Five severity levels with a lock-free threshold check
//! - printf-style templates and concatenating `…ln` variants
//! - Logging to any `Write` stream or to a file that rotates past a size limit
//! - A process-wide default logger plus any number of standalone loggers
//! - Configuration through serde (YAML, TOML, ...) or a builder
//! - Integration with the `tracing` ecosystem
//!
//! ## Example
//!
//! ```rust,no_run
//! use rotolog::Level;
//!
//! rotolog::set_log_file("logs/app.log")?;
//! rotolog::set_level(Level::Info);
//! rotolog::set_max_size(10 * 1024 * 1024);
//!
//! rotolog::info!("listening on port %d", 8080);
//! rotolog::warnln!("cache miss for ", "user:42");
//! # Ok::<(), rotolog::Error>(())
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod flags;
pub mod format;
pub mod level;
pub mod logger;
pub mod writer;

mod global;
mod macros;
mod record;

#[cfg(feature = "tracing-subscriber")]
pub mod tracing_init;

pub use builder::LogBuilder;
pub use config::{ConsoleStream, FileLogConfig, LogConfig};
pub use error::{Error, Result};
pub use flags::Flags;
pub use format::{ToValue, Value};
pub use global::{
    debug, debugln, error, errorln, info, infoln, init, logger, panic, panicln, set_flags,
    set_level, set_log_file, set_max_size, set_output, warn, warnln,
};
pub use level::{Level, LevelFilter};
pub use logger::Logger;
pub use writer::RotatingWriter;

#[cfg(feature = "tracing-subscriber")]
pub use tracing_init::init_tracing;

/// Start building a logger configuration.
pub fn builder() -> LogBuilder {
    LogBuilder::new()
}
