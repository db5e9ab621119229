use std::time::Duration;

use crate::entry::Entry;
use crate::sink::ErrorRecord;

/// The output of a traversal that was driven to completion.
///
/// Produced by [`Walk::into_results`](crate::Walk::into_results) and the
/// async entry points.
#[derive(Debug, Default)]
pub struct Results {
    /// Matched entries, in the order they were found.
    pub entries: Vec<Entry>,

    /// Failures absorbed during the walk. Empty in silent mode.
    pub errors: Vec<ErrorRecord>,

    /// Scan statistics.
    pub stats: ScanStats,
}

/// Statistics for a traversal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Non-directory entries seen (matched or not).
    pub files: usize,

    /// Directories successfully listed, the root included.
    pub dirs: usize,

    /// Wall-clock time spent driving the walk.
    pub duration: Duration,

    /// Total entries scanned per second. Equals
    /// `(files + dirs) / duration.as_secs_f64()`, clamped to 0 on
    /// zero-duration runs.
    pub entries_per_sec: usize,
}

impl ScanStats {
    /// Compute `entries_per_sec` from raw counts and duration.
    pub(crate) fn compute(files: usize, dirs: usize, duration: Duration) -> Self {
        let total = files + dirs;
        let eps = if duration.as_secs_f64() > 0.0 {
            (total as f64 / duration.as_secs_f64()) as usize
        } else {
            0
        };
        Self {
            files,
            dirs,
            duration,
            entries_per_sec: eps,
        }
    }
}
