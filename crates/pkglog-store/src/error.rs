use std::fmt;

/// Result type for pkglog-store internals.
///
/// Only internal helpers return this; the journal's public operations
/// absorb every error into a logged diagnostic plus a benign value.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur inside the store layer
#[derive(Debug)]
pub enum Error {
    /// Filesystem operation failed
    Io(std::io::Error),

    /// Structured store content could not be parsed
    Parse(serde_json::Error),

    /// Mirror serialization failed for a record
    Mirror(toml::ser::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Parse(err) => write!(f, "Store parse error: {}", err),
            Error::Mirror(err) => write!(f, "Mirror serialization error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Parse(err) => Some(err),
            Error::Mirror(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Parse(err)
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Mirror(err)
    }
}
