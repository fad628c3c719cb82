//! Builder pattern for configuring loggers.
//!
//! This module provides a convenient builder API for configuring either the
//! process-wide default logger or a standalone [`Logger`] in a single chain of
//! method calls.
//!
//! # Example
//!
//! ```rust,no_run
//! use rotolog::{Flags, Level};
//!
//! // Reconfigure the default logger
//! rotolog::builder()
//!     .with_level(Level::Info)
//!     .with_file("/var/log/app.log")
//!     .with_max_size(10 * 1024 * 1024)
//!     .init()
//!     .expect("Failed to initialize logging");
//!
//! // A standalone logger
//! let audit = rotolog::builder()
//!     .with_flags(Flags::STD | Flags::SHORT_FILE)
//!     .with_file("/var/log/audit.log")
//!     .open()
//!     .expect("Failed to open audit log");
//! audit.info("user %s logged in", &[rotolog::Value::Str("alice")]);
//! ```

use crate::config::ConsoleStream;
use crate::{FileLogConfig, Flags, Level, LogConfig, Logger, Result};
use std::path::PathBuf;

/// A builder for logger configuration.
#[derive(Debug, Clone)]
pub struct LogBuilder {
    config: LogConfig,
}

impl LogBuilder {
    /// Create a new LogBuilder with default configuration.
    pub fn new() -> Self {
        Self {
            config: LogConfig::new(),
        }
    }

    /// Create a LogBuilder from an existing configuration.
    pub fn from_config(config: LogConfig) -> Self {
        Self { config }
    }

    /// Set the minimum level that produces output.
    pub fn with_level(mut self, level: Level) -> Self {
        self.config = self.config.with_level(level);
        self
    }

    /// Set the stamp flags.
    pub fn with_flags(mut self, flags: Flags) -> Self {
        self.config = self.config.with_flags(flags);
        self
    }

    /// Log to standard error instead of standard output when no file is set.
    pub fn with_stderr(mut self) -> Self {
        self.config = self.config.with_console(ConsoleStream::Stderr);
        self
    }

    /// Configure file logging with a path.
    ///
    /// This creates a FileLogConfig with the default size limit (100 MiB).
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config = self.config.with_file(FileLogConfig::new(path));
        self
    }

    /// Configure file logging with a custom FileLogConfig.
    pub fn with_file_config(mut self, file_config: FileLogConfig) -> Self {
        self.config = self.config.with_file(file_config);
        self
    }

    /// Set the rotation threshold for file logging.
    ///
    /// If no file is configured, this will create a default file at "app.log".
    pub fn with_max_size(mut self, max_size: u64) -> Self {
        self.file_mut().max_size = max_size;
        self
    }

    /// Set the name prefix of rotated files.
    ///
    /// If no file is configured, this will create a default file at "app.log".
    pub fn with_file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.file_mut().prefix = Some(prefix.into());
        self
    }

    fn file_mut(&mut self) -> &mut FileLogConfig {
        self.config
            .file
            .get_or_insert_with(|| FileLogConfig::new("app.log"))
    }

    /// Get the current configuration without applying it.
    pub fn build(self) -> LogConfig {
        self.config
    }

    /// Create a standalone logger with the configured settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the log file cannot be opened.
    pub fn open(self) -> Result<Logger> {
        Logger::from_config(&self.config)
    }

    /// Apply the configured settings to the default logger.
    ///
    /// # Errors
    ///
    /// Returns an error if the log file cannot be opened; the default logger
    /// is left unchanged in that case.
    pub fn init(self) -> Result<()> {
        crate::init(&self.config)
    }
}

impl Default for LogBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_new() {
        let config = LogBuilder::new().build();
        assert_eq!(config.level, Level::Debug);
        assert_eq!(config.console, ConsoleStream::Stdout);
        assert!(config.file.is_none());
    }

    #[test]
    fn test_builder_with_level() {
        let config = LogBuilder::new().with_level(Level::Error).build();
        assert_eq!(config.level, Level::Error);
    }

    #[test]
    fn test_builder_with_file() {
        let config = LogBuilder::new().with_file("test.log").build();
        assert_eq!(config.file.unwrap().path, PathBuf::from("test.log"));
    }

    #[test]
    fn test_builder_chaining() {
        let config = LogBuilder::new()
            .with_level(Level::Info)
            .with_flags(Flags::TIME)
            .with_stderr()
            .with_file("app.log")
            .with_max_size(2048)
            .with_file_prefix("svc")
            .build();

        assert_eq!(config.level, Level::Info);
        assert_eq!(config.flags, Flags::TIME);
        assert_eq!(config.console, ConsoleStream::Stderr);
        let file = config.file.unwrap();
        assert_eq!(file.max_size, 2048);
        assert_eq!(file.prefix.as_deref(), Some("svc"));
    }

    #[test]
    fn test_builder_with_max_size_defaults_file() {
        let config = LogBuilder::new().with_max_size(1024).build();
        let file = config.file.unwrap();
        assert_eq!(file.path, PathBuf::from("app.log"));
        assert_eq!(file.max_size, 1024);
    }

    #[test]
    fn test_builder_from_config() {
        let original = LogConfig::new().with_level(Level::Warn);
        let config = LogBuilder::from_config(original.clone()).build();
        assert_eq!(config.level, original.level);
    }

    #[test]
    fn test_builder_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("built.log");
        let logger = LogBuilder::new()
            .with_level(Level::Warn)
            .with_flags(Flags::NONE)
            .with_file(&path)
            .open()
            .unwrap();

        logger.info("no", &[]);
        logger.warn("yes", &[]);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[WARN ] yes\n");
    }
}
