//! Error types for WebStore.

use std::fmt;

/// The main error type for WebStore operations.
///
/// Empty results are never errors: a lookup with no matching rows yields an
/// empty sequence and a missing maximum yields `None`.
#[derive(Debug)]
pub enum Error {
    /// A lock was poisoned (internal error)
    LockPoisoned,

    /// I/O error
    Io(std::io::Error),

    /// Serialization/deserialization error
    Serialization(String),

    /// Referential integrity or a row constraint was violated while loading
    Load(String),

    /// A lookup guaranteed by the load invariants failed at query time
    Referential(String),

    /// The data source could not be reached or read
    SourceUnavailable(String),

    /// The data source produced data in an unexpected shape
    SchemaMismatch(String),

    /// Invalid configuration
    InvalidConfig(String),
}

impl Error {
    pub(crate) fn missing(entity: &str, id: impl fmt::Display, referenced_by: &str) -> Self {
        Error::Referential(format!(
            "{} {} referenced by {} does not exist",
            entity, id, referenced_by
        ))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::LockPoisoned => write!(f, "Lock poisoned"),
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::Serialization(msg) => write!(f, "Serialization error: {}", msg),
            Error::Load(msg) => write!(f, "Load error: {}", msg),
            Error::Referential(msg) => write!(f, "Referential error: {}", msg),
            Error::SourceUnavailable(msg) => write!(f, "Source unavailable: {}", msg),
            Error::SchemaMismatch(msg) => write!(f, "Schema mismatch: {}", msg),
            Error::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

/// A specialized `Result` type for WebStore operations.
pub type Result<T> = std::result::Result<T, Error>;
