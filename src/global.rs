//! The process-wide default logger.
//!
//! The default logger writes to standard output and is constructed on first
//! use, so it always exists before any of the setters below can run. Every
//! setter mutates that one instance; the change is seen by all later calls
//! from every thread.

use std::io::Write;
use std::path::Path;

use once_cell::sync::Lazy;

use crate::{Flags, Level, LogConfig, Logger, Result, Value};

static DEFAULT: Lazy<Logger> = Lazy::new(|| Logger::new(std::io::stdout()));

/// The default logger instance.
#[inline]
pub fn logger() -> &'static Logger {
    &DEFAULT
}

/// Apply `config` to the default logger.
pub fn init(config: &LogConfig) -> Result<()> {
    logger().apply_config(config)?;
    tracing::debug!(level = config.level.as_str(), "default logger configured");
    Ok(())
}

/// Send the default logger's records to `writer`.
pub fn set_output<W: Write + Send + 'static>(writer: W) {
    logger().set_output(writer);
}

/// Send the default logger's records to the file at `path`.
///
/// Parent directories are created and existing content is kept. On failure
/// the previous target stays active.
pub fn set_log_file(path: impl AsRef<Path>) -> Result<()> {
    logger().set_target(path)
}

pub fn set_level(level: Level) {
    logger().set_level(level);
}

pub fn set_flags(flags: Flags) {
    logger().set_flags(flags);
}

/// Rotation threshold of the default logger, in bytes.
pub fn set_max_size(bytes: u64) {
    logger().set_max_size(bytes);
}

#[track_caller]
pub fn debug(template: &str, args: &[Value<'_>]) {
    logger().debug(template, args);
}

#[track_caller]
pub fn debugln(args: &[Value<'_>]) {
    logger().debugln(args);
}

#[track_caller]
pub fn info(template: &str, args: &[Value<'_>]) {
    logger().info(template, args);
}

#[track_caller]
pub fn infoln(args: &[Value<'_>]) {
    logger().infoln(args);
}

#[track_caller]
pub fn warn(template: &str, args: &[Value<'_>]) {
    logger().warn(template, args);
}

#[track_caller]
pub fn warnln(args: &[Value<'_>]) {
    logger().warnln(args);
}

#[track_caller]
pub fn error(template: &str, args: &[Value<'_>]) {
    logger().error(template, args);
}

#[track_caller]
pub fn errorln(args: &[Value<'_>]) {
    logger().errorln(args);
}

/// Write a `[PANIC]` record through the default logger and exit with status 1.
#[track_caller]
pub fn panic(template: &str, args: &[Value<'_>]) -> ! {
    logger().panic(template, args)
}

#[track_caller]
pub fn panicln(args: &[Value<'_>]) -> ! {
    logger().panicln(args)
}
