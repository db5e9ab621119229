use std::fmt;
use std::path::PathBuf;

use crate::error::SieveError;

/// One failure absorbed during a logging-mode traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRecord {
    /// The directory or file being touched, if the failure names one.
    pub path: Option<PathBuf>,

    /// Human-readable description of what went wrong.
    pub message: String,
}

impl From<&SieveError> for ErrorRecord {
    fn from(error: &SieveError) -> Self {
        Self {
            path: error.path().cloned(),
            message: error.to_string(),
        }
    }
}

impl From<SieveError> for ErrorRecord {
    fn from(error: SieveError) -> Self {
        Self::from(&error)
    }
}

impl fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// What a walk does with the failures it absorbs.
///
/// A failure never stops the walk: the directory or entry it concerns
/// contributes nothing, and the sink decides whether anyone hears about it.
pub trait ErrorSink {
    fn record(&mut self, error: SieveError);

    /// Everything collected so far, in order.
    fn records(&self) -> &[ErrorRecord] {
        &[]
    }

    /// Hand over whatever was collected so far. Sinks that keep nothing
    /// return an empty list.
    fn take(&mut self) -> Vec<ErrorRecord> {
        Vec::new()
    }
}

/// Silent mode: failures are dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl ErrorSink for Silent {
    fn record(&mut self, error: SieveError) {
        tracing::debug!(error = %error, "discarding traversal error");
    }
}

/// Logging mode with an owned log.
impl ErrorSink for Vec<ErrorRecord> {
    fn record(&mut self, error: SieveError) {
        tracing::warn!(error = %error, "traversal error recorded");
        self.push(ErrorRecord::from(error));
    }

    fn records(&self) -> &[ErrorRecord] {
        self
    }

    fn take(&mut self) -> Vec<ErrorRecord> {
        std::mem::take(self)
    }
}

/// Logging mode with a caller-owned log that outlives the walk.
///
/// The log stays with its owner: `take` hands out a copy and leaves the
/// borrowed sink untouched.
impl<S: ErrorSink + ?Sized> ErrorSink for &mut S {
    fn record(&mut self, error: SieveError) {
        (**self).record(error);
    }

    fn records(&self) -> &[ErrorRecord] {
        (**self).records()
    }

    fn take(&mut self) -> Vec<ErrorRecord> {
        (**self).records().to_vec()
    }
}
