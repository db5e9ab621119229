//! # dirsieve
//!
//! Lazy breadth-first directory traversal with composable filters.
//!
//! dirsieve lists the files or directories under a root, either the top level
//! only or the whole subtree, and filters them by name, extension, size, size
//! range, size bucket, timestamp, timestamp range, regular expression or
//! attribute flags. One unreadable directory never aborts a walk: it simply
//! contributes nothing, and in logging mode the failure is recorded.
//!
//! # Quick Start
//!
//! ```rust
//! use dirsieve::{Filter, Recursion};
//!
//! let temp = tempfile::tempdir()?;
//! std::fs::write(temp.path().join("invoice_jan.txt"), "january")?;
//! std::fs::write(temp.path().join("report.md"), "quarterly")?;
//!
//! let txt: Vec<_> = dirsieve::list_files(
//!     temp.path(),
//!     Recursion::AllLevels,
//!     Some(Filter::Extension(dirsieve::ExtensionCriterion::new("txt"))),
//! )?
//! .collect();
//!
//! assert_eq!(txt.len(), 1);
//! assert_eq!(txt[0].name, "invoice_jan.txt");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Silent and logging mode
//!
//! ```rust
//! use dirsieve::{ErrorRecord, Recursion};
//!
//! let temp = tempfile::tempdir()?;
//! let mut log: Vec<ErrorRecord> = Vec::new();
//!
//! let count = dirsieve::list_directories_logged(
//!     temp.path(),
//!     Recursion::AllLevels,
//!     None,
//!     &mut log,
//! )?
//! .count();
//!
//! assert_eq!(count, 0);
//! assert!(log.is_empty());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Combining criteria
//!
//! [`CompositeOptions`] ANDs any number of criteria. An empty bag matches
//! nothing.
//!
//! ```rust
//! use dirsieve::{CompositeOptions, CommonSize, PatternCriterion, Recursion};
//!
//! let temp = tempfile::tempdir()?;
//! std::fs::write(temp.path().join("server-01.log"), vec![b'x'; 20 * 1024])?;
//! std::fs::write(temp.path().join("server-02.log"), b"short")?;
//!
//! let options = CompositeOptions::new()
//!     .extension("log")
//!     .common_size(CommonSize::Small)
//!     .pattern(PatternCriterion::new(r"^server-\d+$"));
//!
//! let hits: Vec<_> = dirsieve::files(temp.path())
//!     .recursion(Recursion::TopLevelOnly)
//!     .filter(options)
//!     .walk()?
//!     .collect();
//!
//! assert_eq!(hits.len(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![forbid(unsafe_code)]

mod attributes;
mod builder;
mod composite;
mod date;
mod entry;
mod error;
mod filter;
mod fs;
mod name;
mod pattern;
mod results;
mod sink;
mod size;
#[cfg(feature = "async")]
mod task;
mod traits;
mod walker;

use std::path::PathBuf;

// ── Public re-exports ─────────────────────────────────────────────────────────

pub use attributes::{match_by_attributes, Attributes};
pub use builder::TraversalBuilder;
pub use composite::CompositeOptions;
pub use date::{match_by_date, match_by_date_range, DateCriterion, DateField, DateRangeCriterion};
pub use entry::{Entry, EntryKind};
pub use error::SieveError;
pub use filter::Filter;
pub use fs::FsLister;
pub use name::{
    match_by_extension, match_by_name, match_by_name_with_extension, normalize_extension,
    CaseSensitivity, ExtensionCriterion, NameCriterion,
};
pub use pattern::{match_by_pattern, match_by_pattern_with_extension, PatternCriterion};
pub use results::{Results, ScanStats};
pub use sink::{ErrorRecord, ErrorSink, Silent};
pub use size::{
    match_by_common_size, match_by_size, match_by_size_range, size_bounds, CommonSize,
    SizeCriterion, SizeRangeCriterion, SizeUnit,
};
#[cfg(feature = "async")]
pub use task::{
    list_directories_async, list_directories_logged_async, list_files_async,
    list_files_logged_async,
};
pub use traits::{Children, Lister, Matcher};
pub use walker::{Recursion, Target, Walk};

// ── Entry points ──────────────────────────────────────────────────────────────

/// Start configuring a traversal that yields files.
pub fn files(root: impl Into<PathBuf>) -> TraversalBuilder {
    TraversalBuilder::new(root, Target::Files)
}

/// Start configuring a traversal that yields directories.
pub fn directories(root: impl Into<PathBuf>) -> TraversalBuilder {
    TraversalBuilder::new(root, Target::Directories)
}

fn configure(
    builder: TraversalBuilder,
    recursion: Recursion,
    filter: Option<Filter>,
) -> TraversalBuilder {
    let builder = builder.recursion(recursion);
    match filter {
        Some(filter) => builder.filter(filter),
        None => builder,
    }
}

/// List the files under `root`, silently skipping anything unreadable.
///
/// # Errors
///
/// Fails immediately if `root` is empty or not an existing directory. The
/// returned walk itself is lazy and never fails.
pub fn list_files(
    root: impl Into<PathBuf>,
    recursion: Recursion,
    filter: Option<Filter>,
) -> Result<Walk<FsLister, Silent>, SieveError> {
    configure(files(root), recursion, filter).walk()
}

/// List the directories under `root`, silently skipping anything unreadable.
pub fn list_directories(
    root: impl Into<PathBuf>,
    recursion: Recursion,
    filter: Option<Filter>,
) -> Result<Walk<FsLister, Silent>, SieveError> {
    configure(directories(root), recursion, filter).walk()
}

/// List the files under `root`, appending every absorbed failure to `log`.
pub fn list_files_logged(
    root: impl Into<PathBuf>,
    recursion: Recursion,
    filter: Option<Filter>,
    log: &mut Vec<ErrorRecord>,
) -> Result<Walk<FsLister, &mut Vec<ErrorRecord>>, SieveError> {
    configure(files(root), recursion, filter).walk_logged(log)
}

/// List the directories under `root`, appending every absorbed failure to `log`.
pub fn list_directories_logged(
    root: impl Into<PathBuf>,
    recursion: Recursion,
    filter: Option<Filter>,
    log: &mut Vec<ErrorRecord>,
) -> Result<Walk<FsLister, &mut Vec<ErrorRecord>>, SieveError> {
    configure(directories(root), recursion, filter).walk_logged(log)
}
