use std::io::{self, Write};
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};

use crate::config::{ConsoleStream, LogConfig};
use crate::flags::DEFAULT_FLAGS;
use crate::format::{self, Value};
use crate::{Flags, Level, LevelFilter, Result, RotatingWriter, record};

/// A leveled logger writing timestamped records to a stream or a rotating file.
///
/// The threshold and stamp flags are plain atomics, so a record below the
/// threshold costs one atomic load: it is never formatted and never touches
/// the writer lock. Everything else goes through the [`RotatingWriter`].
///
/// ```rust
/// use rotolog::{Level, Logger, Value};
///
/// let logger = Logger::new(std::io::sink());
/// logger.set_level(Level::Warn);
/// logger.info("dropped", &[]);
/// logger.warn("disk %d%% full", &[Value::Int(93)]);
/// ```
#[derive(Debug)]
pub struct Logger {
    filter: LevelFilter,
    flags: AtomicU32,
    writer: RotatingWriter,
}

impl Logger {
    /// Log to an arbitrary stream.
    pub fn new<W: Write + Send + 'static>(writer: W) -> Self {
        Self::with_writer(RotatingWriter::from_writer(writer))
    }

    /// Log to the file at `path`, appending and creating parent directories.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::with_writer(RotatingWriter::open(path)?))
    }

    /// Build a logger from a configuration.
    pub fn from_config(config: &LogConfig) -> Result<Self> {
        let logger = match &config.file {
            Some(file) => Self::open(&file.path)?,
            None => match config.console {
                ConsoleStream::Stdout => Self::new(io::stdout()),
                ConsoleStream::Stderr => Self::new(io::stderr()),
            },
        };
        logger.apply_settings(config);
        Ok(logger)
    }

    fn with_writer(writer: RotatingWriter) -> Self {
        record::init_local_offset();
        Self {
            filter: LevelFilter::default(),
            flags: AtomicU32::new(DEFAULT_FLAGS.bits()),
            writer,
        }
    }

    /// Reconfigure this logger in place: target, threshold, flags and sizes.
    ///
    /// On a target-open failure nothing is changed.
    pub fn apply_config(&self, config: &LogConfig) -> Result<()> {
        match &config.file {
            Some(file) => self.set_target(&file.path)?,
            None => match config.console {
                ConsoleStream::Stdout => self.set_output(io::stdout()),
                ConsoleStream::Stderr => self.set_output(io::stderr()),
            },
        }
        self.apply_settings(config);
        Ok(())
    }

    fn apply_settings(&self, config: &LogConfig) {
        self.set_level(config.level);
        self.set_flags(config.flags);
        if let Some(file) = &config.file {
            self.writer.set_max_size(file.max_size);
            self.writer.set_size_overhead(file.size_overhead);
            if let Some(prefix) = &file.prefix {
                self.writer.set_file_prefix(prefix.clone());
            }
        }
    }

    pub fn level(&self) -> Level {
        self.filter.threshold()
    }

    /// Set the minimum level that produces output.
    pub fn set_level(&self, level: Level) {
        self.filter.set_threshold(level);
    }

    /// Whether a record at `level` would currently be written.
    pub fn enabled(&self, level: Level) -> bool {
        self.filter.should_emit(level)
    }

    pub fn flags(&self) -> Flags {
        Flags::from_bits(self.flags.load(Ordering::Relaxed))
    }

    pub fn set_flags(&self, flags: Flags) {
        self.flags.store(flags.bits(), Ordering::Relaxed);
    }

    pub fn max_size(&self) -> u64 {
        self.writer.max_size()
    }

    /// Rotate once the current file would grow past `bytes`.
    pub fn set_max_size(&self, bytes: u64) {
        self.writer.set_max_size(bytes);
    }

    pub fn size_overhead(&self) -> u64 {
        self.writer.size_overhead()
    }

    /// Extra bytes accounted per record on top of its rendered length.
    pub fn set_size_overhead(&self, bytes: u64) {
        self.writer.set_size_overhead(bytes);
    }

    /// Name prefix of rotated files; defaults to the program name.
    pub fn set_file_prefix(&self, prefix: impl Into<String>) {
        self.writer.set_file_prefix(prefix);
    }

    /// Switch to the file at `path` (append mode, parents created).
    pub fn set_target(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.writer.set_target(path)?;
        tracing::debug!(path = %path.display(), "log target switched to file");
        Ok(())
    }

    /// Switch to an arbitrary stream.
    pub fn set_output<W: Write + Send + 'static>(&self, writer: W) {
        self.writer.set_output(writer);
        tracing::debug!("log target switched to stream");
    }

    /// Bytes accounted against the active file since it was opened.
    pub fn current_size(&self) -> u64 {
        self.writer.current_size()
    }

    /// Active file, or `None` when logging to a stream.
    pub fn path(&self) -> Option<PathBuf> {
        self.writer.path()
    }

    /// Number of successful rotations so far.
    pub fn rotations(&self) -> u64 {
        self.writer.rotations()
    }

    pub fn flush(&self) -> io::Result<()> {
        self.writer.flush()
    }

    pub fn writer(&self) -> &RotatingWriter {
        &self.writer
    }

    /// Emit a record. An empty template concatenates `args` instead.
    #[track_caller]
    pub fn log(&self, level: Level, template: &str, args: &[Value<'_>]) {
        if !self.filter.should_emit(level) {
            return;
        }
        let message = if template.is_empty() {
            format::sprint(args)
        } else {
            format::sprintf(template, args)
        };
        self.emit(level, &message, Location::caller());
    }

    /// Emit a record made of `args` concatenated without separators.
    #[track_caller]
    pub fn logln(&self, level: Level, args: &[Value<'_>]) {
        self.log(level, "", args);
    }

    fn emit(&self, level: Level, message: &str, location: &Location<'_>) {
        let line = record::render(self.flags(), level, message, location, record::now());
        // Logging is best effort; a failed write must not reach the caller.
        let _ = self.writer.write_record(line.as_bytes());
    }

    #[track_caller]
    pub fn debug(&self, template: &str, args: &[Value<'_>]) {
        self.log(Level::Debug, template, args);
    }

    #[track_caller]
    pub fn debugln(&self, args: &[Value<'_>]) {
        self.logln(Level::Debug, args);
    }

    #[track_caller]
    pub fn info(&self, template: &str, args: &[Value<'_>]) {
        self.log(Level::Info, template, args);
    }

    #[track_caller]
    pub fn infoln(&self, args: &[Value<'_>]) {
        self.logln(Level::Info, args);
    }

    #[track_caller]
    pub fn warn(&self, template: &str, args: &[Value<'_>]) {
        self.log(Level::Warn, template, args);
    }

    #[track_caller]
    pub fn warnln(&self, args: &[Value<'_>]) {
        self.logln(Level::Warn, args);
    }

    #[track_caller]
    pub fn error(&self, template: &str, args: &[Value<'_>]) {
        self.log(Level::Error, template, args);
    }

    #[track_caller]
    pub fn errorln(&self, args: &[Value<'_>]) {
        self.logln(Level::Error, args);
    }

    /// Write a `[PANIC]` record, then exit the process with status 1.
    #[track_caller]
    pub fn panic(&self, template: &str, args: &[Value<'_>]) -> ! {
        self.log(Level::Panic, template, args);
        self.exit()
    }

    /// Concatenating form of [`Logger::panic`].
    #[track_caller]
    pub fn panicln(&self, args: &[Value<'_>]) -> ! {
        self.logln(Level::Panic, args);
        self.exit()
    }

    fn exit(&self) -> ! {
        let _ = self.writer.flush();
        std::process::exit(1)
    }
}

/// Raw bytes bypass levels and stamps but share the lock, size accounting and
/// rotation with regular records. Each `write` call is treated as one record.
impl Write for &Logger {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.write_record(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
