use std::path::PathBuf;

use serde::{Deserialize, Deserializer, Serialize, de};

use crate::writer::DEFAULT_MAX_SIZE;
use crate::{Flags, Level};

/// Parse a size with an optional unit suffix (K/M/G, case-insensitive, with an
/// optional trailing `B`). A bare number is a byte count.
fn parse_size(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty size string".to_string());
    }

    let upper = s.to_ascii_uppercase();
    let trimmed = upper.strip_suffix('B').unwrap_or(&upper);
    let (num_str, multiplier) = match trimmed.chars().last() {
        Some('K') => (&trimmed[..trimmed.len() - 1], 1024),
        Some('M') => (&trimmed[..trimmed.len() - 1], 1024 * 1024),
        Some('G') => (&trimmed[..trimmed.len() - 1], 1024 * 1024 * 1024),
        Some(c) if c.is_ascii_digit() => (trimmed, 1),
        Some(c) => return Err(format!("invalid unit: {}, supported: K/M/G", c)),
        None => return Err(format!("invalid size: {}", s)),
    };

    let num: u64 = num_str
        .trim()
        .parse()
        .map_err(|_| format!("invalid number: {}", num_str))?;

    num.checked_mul(multiplier)
        .ok_or_else(|| "size too large".to_string())
}

/// Size value that can be a number or string with units.
#[derive(Deserialize)]
#[serde(untagged)]
enum SizeValue {
    Number(u64),
    String(String),
}

fn deserialize_size<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match SizeValue::deserialize(deserializer)? {
        SizeValue::Number(n) => Ok(n),
        SizeValue::String(s) => parse_size(&s).map_err(de::Error::custom),
    }
}

/// Console stream used when no log file is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsoleStream {
    #[default]
    Stdout,
    Stderr,
}

/// Configuration for logging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Minimum level that produces output (e.g., "info", "warn")
    #[serde(default)]
    pub level: Level,
    /// Stamp flags, as a bitmask or a list of names
    #[serde(default = "default_flags")]
    pub flags: Flags,
    /// Console stream used when `file` is not set
    #[serde(default)]
    pub console: ConsoleStream,
    /// File logging configuration
    #[serde(default)]
    pub file: Option<FileLogConfig>,
}

impl LogConfig {
    /// Create a new LogConfig with defaults
    pub fn new() -> Self {
        Self {
            level: Level::default(),
            flags: default_flags(),
            console: ConsoleStream::default(),
            file: None,
        }
    }

    /// Set log level
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Set stamp flags
    pub fn with_flags(mut self, flags: Flags) -> Self {
        self.flags = flags;
        self
    }

    /// Set console stream
    pub fn with_console(mut self, console: ConsoleStream) -> Self {
        self.console = console;
        self
    }

    /// Set file logging configuration
    pub fn with_file(mut self, file: FileLogConfig) -> Self {
        self.file = Some(file);
        self
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn default_flags() -> Flags {
    crate::flags::DEFAULT_FLAGS
}

fn default_max_size() -> u64 {
    DEFAULT_MAX_SIZE
}

/// Configuration for file logging
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileLogConfig {
    /// Path to the log file
    pub path: PathBuf,
    /// Rotation threshold in bytes.
    /// Can be specified as a number of bytes or string with units (K/M/G, case-insensitive).
    /// Examples: 1048576, "512K", "100M", "1G"
    #[serde(
        default = "default_max_size",
        deserialize_with = "deserialize_size"
    )]
    pub max_size: u64,
    /// Name prefix of rotated files; the program name when unset
    #[serde(default)]
    pub prefix: Option<String>,
    /// Extra bytes accounted per record on top of its length
    #[serde(default)]
    pub size_overhead: u64,
}

impl FileLogConfig {
    /// Create a new FileLogConfig
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            max_size: DEFAULT_MAX_SIZE,
            prefix: None,
            size_overhead: 0,
        }
    }

    /// Set rotation threshold
    pub fn with_max_size(mut self, max_size: u64) -> Self {
        self.max_size = max_size;
        self
    }

    /// Set rotated file name prefix
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Set per-record size overhead
    pub fn with_size_overhead(mut self, bytes: u64) -> Self {
        self.size_overhead = bytes;
        self
    }
}
