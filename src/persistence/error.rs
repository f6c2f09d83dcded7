//! Persistence error types.

use std::fmt;

/// Failure reading or writing persisted data
#[derive(Debug)]
pub enum PersistenceError {
    /// Filesystem access failed.
    Io {
        /// Key (or path) being accessed.
        key: String,
        source: std::io::Error,
    },

    /// Stored data could not be encoded or decoded.
    Serialize {
        key: String,
        source: serde_json::Error,
    },

    /// The backing store does not exist in this environment
    /// (no `window`, LocalStorage disabled, quota exceeded).
    Unavailable {
        /// Human-readable description of what was missing.
        context: &'static str,
    },
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::Io { key, source } => {
                write!(f, "storage I/O failed for '{}': {}", key, source)
            }
            PersistenceError::Serialize { key, source } => {
                write!(f, "invalid stored data for '{}': {}", key, source)
            }
            PersistenceError::Unavailable { context } => {
                write!(f, "storage unavailable: {}", context)
            }
        }
    }
}

impl std::error::Error for PersistenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PersistenceError::Io { source, .. } => Some(source),
            PersistenceError::Serialize { source, .. } => Some(source),
            PersistenceError::Unavailable { .. } => None,
        }
    }
}

/// Convenience alias: a `Result` using `PersistenceError` as the error type.
pub type PersistenceResult<T> = Result<T, PersistenceError>;
