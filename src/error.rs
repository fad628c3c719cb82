use thiserror::Error as ThisError;

/// Errors that can occur while configuring a logger
#[derive(ThisError, Debug)]
pub enum Error {
    /// I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),
    /// Initialization failed.
    #[error("Initialization error: {0}")]
    Init(String),
    /// Rendering a timestamp failed.
    #[error("Time error: {0}")]
    Time(#[from] time::error::Error),
}

impl From<time::error::Format> for Error {
    fn from(err: time::error::Format) -> Self {
        Error::Time(err.into())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
