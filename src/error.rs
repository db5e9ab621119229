use std::path::PathBuf;
use thiserror::Error;

use crate::size::SizeUnit;

#[derive(Error, Debug)]
pub enum SieveError {
    // Preconditions
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("directory not found: {}", .0.display())]
    NotFound(PathBuf),

    // Traversal
    #[error("permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Matching
    #[error("invalid pattern `{pattern}`")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("size {magnitude} {unit:?} is out of range")]
    OutOfRange { magnitude: f64, unit: SizeUnit },

    // Third-party extensibility
    #[error("matcher error: {0}")]
    Matcher(String),

    // Runtime
    #[error("background task failed: {0}")]
    Task(String),
}

impl SieveError {
    /// Wrap an I/O failure at `path`, promoting permission failures to
    /// [`SieveError::PermissionDenied`].
    pub(crate) fn io(path: PathBuf, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::PermissionDenied {
            Self::PermissionDenied(path)
        } else {
            Self::Io { path, source }
        }
    }

    /// The path this error occurred at, if applicable.
    /// Callers use this to present "Skipped: <path>" without pattern matching on variants.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::NotFound(p) | Self::PermissionDenied(p) | Self::Io { path: p, .. } => Some(p),
            _ => None,
        }
    }

    /// Whether the traversal can continue after this error.
    ///
    /// Recoverable errors (permission denied, I/O, failing predicates) are
    /// absorbed by the walker and handed to its error sink.
    ///
    /// Precondition errors (empty root, missing root) are returned before
    /// any traversal starts.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            Self::InvalidArgument(_) | Self::NotFound(_) | Self::Task(_)
        )
    }
}
