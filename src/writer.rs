use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use time::macros::format_description;

use crate::record;

/// Default rotation threshold: 100 MiB.
pub const DEFAULT_MAX_SIZE: u64 = 100 * 1024 * 1024;

/// Extension of rotated log files.
pub const LOG_EXTENSION: &str = "log";

/// Where records currently go.
enum Sink {
    File(File),
    Stream(Box<dyn Write + Send>),
}

impl Write for Sink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Sink::File(file) => file.write(buf),
            Sink::Stream(stream) => stream.write(buf),
        }
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        match self {
            Sink::File(file) => file.write_all(buf),
            Sink::Stream(stream) => stream.write_all(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Sink::File(file) => file.flush(),
            Sink::Stream(stream) => stream.flush(),
        }
    }
}

/// State guarded by the writer lock.
struct WriterState {
    sink: Sink,
    /// Path of the active file; `None` for arbitrary streams.
    path: Option<PathBuf>,
    /// Bytes accounted since the sink was opened or rotated.
    size: u64,
    /// Name prefix of rotated files.
    prefix: String,
    /// Successful rotations over the writer's lifetime.
    rotations: u64,
}

impl WriterState {
    fn needs_rotation(&self, pending: u64, max_size: u64) -> bool {
        self.path.is_some() && self.size.saturating_add(pending) > max_size
    }

    /// Swap to a freshly named file next to the current one.
    fn rotate(&mut self) -> crate::Result<PathBuf> {
        let dir = self
            .path
            .as_deref()
            .and_then(Path::parent)
            .unwrap_or_else(|| Path::new(""));
        let next = rotated_file_path(dir, &self.prefix, record::now())?;
        let file = open_append(&next)?;

        let _ = self.sink.flush();
        self.sink = Sink::File(file);
        self.path = Some(next.clone());
        self.size = 0;
        self.rotations += 1;
        Ok(next)
    }
}

/// A writer that serializes whole records onto a file or stream and rotates
/// the file once it would grow past the configured size.
///
/// Every [`write_record`](Self::write_record) holds one lock across the size
/// check, the optional rotation and the underlying write, so records from
/// concurrent callers never interleave. The rotation threshold and the
/// per-record overhead allowance are atomics and can change at any time.
pub struct RotatingWriter {
    state: Mutex<WriterState>,
    max_size: AtomicU64,
    overhead: AtomicU64,
}

impl RotatingWriter {
    /// Wrap an arbitrary stream. Streams are never rotated.
    pub fn from_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self::with_sink(Sink::Stream(Box::new(writer)), None)
    }

    /// Open (or create) `path` for appending, creating parent directories.
    pub fn open(path: impl AsRef<Path>) -> crate::Result<Self> {
        let path = path.as_ref();
        let file = open_append(path)?;
        Ok(Self::with_sink(Sink::File(file), Some(path.to_path_buf())))
    }

    fn with_sink(sink: Sink, path: Option<PathBuf>) -> Self {
        Self {
            state: Mutex::new(WriterState {
                sink,
                path,
                size: 0,
                prefix: program_name(),
                rotations: 0,
            }),
            max_size: AtomicU64::new(DEFAULT_MAX_SIZE),
            overhead: AtomicU64::new(0),
        }
    }

    fn lock(&self) -> MutexGuard<'_, WriterState> {
        // A panic while holding the lock leaves the state consistent enough to
        // keep logging.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append one complete record, rotating first if it would not fit.
    ///
    /// A failed rotation is reported on standard error and the record goes to
    /// the current file instead; only the final write's outcome is returned.
    pub fn write_record(&self, record: &[u8]) -> io::Result<()> {
        let pending = record.len() as u64 + self.overhead.load(Ordering::Relaxed);

        let mut state = self.lock();
        let mut failed = None;
        if state.needs_rotation(pending, self.max_size.load(Ordering::Relaxed))
            && let Err(err) = state.rotate()
        {
            failed = Some((state.path.clone(), err));
        }

        let result = state.sink.write_all(record);
        if result.is_ok() {
            state.size = state.size.saturating_add(pending);
        }
        drop(state);

        if let Some((path, err)) = failed {
            report_rotation_failure(path.as_deref(), &err);
        }
        result
    }

    /// Switch to the file at `path`, appending to any existing content.
    ///
    /// The file is opened before the lock is taken; on failure the current
    /// target stays in place.
    pub fn set_target(&self, path: impl AsRef<Path>) -> crate::Result<()> {
        let path = path.as_ref();
        let file = open_append(path)?;

        let mut state = self.lock();
        let _ = state.sink.flush();
        state.sink = Sink::File(file);
        state.path = Some(path.to_path_buf());
        state.size = 0;
        Ok(())
    }

    /// Switch to an arbitrary stream; rotation stops until a file target is set.
    pub fn set_output<W: Write + Send + 'static>(&self, writer: W) {
        let mut state = self.lock();
        let _ = state.sink.flush();
        state.sink = Sink::Stream(Box::new(writer));
        state.path = None;
        state.size = 0;
    }

    /// Set the rotation threshold in bytes; applies from the next record.
    pub fn set_max_size(&self, bytes: u64) {
        self.max_size.store(bytes, Ordering::Relaxed);
    }

    pub fn max_size(&self) -> u64 {
        self.max_size.load(Ordering::Relaxed)
    }

    /// Extra bytes accounted per record on top of its length.
    pub fn set_size_overhead(&self, bytes: u64) {
        self.overhead.store(bytes, Ordering::Relaxed);
    }

    pub fn size_overhead(&self) -> u64 {
        self.overhead.load(Ordering::Relaxed)
    }

    /// Name prefix for rotated files (defaults to the program name).
    pub fn set_file_prefix(&self, prefix: impl Into<String>) {
        self.lock().prefix = prefix.into();
    }

    pub fn file_prefix(&self) -> String {
        self.lock().prefix.clone()
    }

    /// Bytes accounted since the current target was opened.
    pub fn current_size(&self) -> u64 {
        self.lock().size
    }

    /// Path of the active file, if writing to a file.
    pub fn path(&self) -> Option<PathBuf> {
        self.lock().path.clone()
    }

    pub fn rotations(&self) -> u64 {
        self.lock().rotations
    }

    pub fn flush(&self) -> io::Result<()> {
        self.lock().sink.flush()
    }
}

impl fmt::Debug for RotatingWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("RotatingWriter")
            .field("path", &state.path)
            .field("size", &state.size)
            .field("max_size", &self.max_size())
            .field("rotations", &state.rotations)
            .finish_non_exhaustive()
    }
}

/// Open `path` for appending, creating it and any missing parent directories.
pub(crate) fn open_append(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// `<dir>/<prefix>_<YYYY_MM_DDTHH_MM_SS>.log`
fn rotated_file_path(
    dir: &Path,
    prefix: &str,
    at: time::OffsetDateTime,
) -> crate::Result<PathBuf> {
    let stamp = at.format(format_description!(
        "[year]_[month]_[day]T[hour]_[minute]_[second]"
    ))?;
    Ok(dir.join(format!("{}_{}.{}", prefix, stamp, LOG_EXTENSION)))
}

/// File name of the running executable, without directories or extension.
fn program_name() -> String {
    std::env::args_os()
        .next()
        .as_deref()
        .map(Path::new)
        .and_then(Path::file_stem)
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| "rotolog".to_string())
}

fn report_rotation_failure(current: Option<&Path>, err: &crate::Error) {
    let current = current
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    eprintln!(
        "rotolog: create new log file failed, still writing to {}: {}",
        current, err
    );
}
