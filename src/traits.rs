use std::path::Path;

use crate::entry::Entry;
use crate::error::SieveError;

/// Determines whether an entry is a match.
///
/// Every built-in criterion implements this, and so does any
/// `Fn(&Entry) -> bool + Send + Sync` closure, so callers can hand over a
/// custom predicate without writing a type.
///
/// # Errors
///
/// Returning `Err` never aborts a walk. The walker treats the entry as not
/// matching and passes the error to its [`ErrorSink`](crate::ErrorSink),
/// which records it in logging mode and drops it in silent mode.
///
/// # Example
///
/// ```rust
/// use dirsieve::{Entry, Matcher, SieveError};
///
/// struct LargerThan(u64);
///
/// impl Matcher for LargerThan {
///     fn matches(&self, entry: &Entry) -> Result<bool, SieveError> {
///         Ok(entry.size.map_or(false, |s| s > self.0))
///     }
/// }
/// ```
pub trait Matcher: Send + Sync {
    /// Returns `Ok(true)` if this entry should be included in results.
    fn matches(&self, entry: &Entry) -> Result<bool, SieveError>;
}

impl<F> Matcher for F
where
    F: Fn(&Entry) -> bool + Send + Sync,
{
    fn matches(&self, entry: &Entry) -> Result<bool, SieveError> {
        Ok(self(entry))
    }
}

/// The immediate children of one directory.
#[derive(Debug, Default)]
pub struct Children {
    /// Everything that is not a directory: files, links, special files.
    pub files: Vec<Entry>,

    /// Immediate subdirectories.
    pub dirs: Vec<Entry>,

    /// Per-child failures that did not prevent the listing itself,
    /// e.g. an entry removed between the read and its stat.
    pub errors: Vec<SieveError>,
}

/// Lists the contents of a single directory.
///
/// The walker only ever asks for one directory at a time and only when the
/// consumer pulls for more entries, so an implementation sees exactly the
/// directories a walk needed. [`FsLister`](crate::FsLister) is the host
/// filesystem implementation; tests and virtual trees supply their own.
pub trait Lister {
    /// Whether `dir` exists and is a directory. Used to validate the root.
    fn exists(&self, dir: &Path) -> bool;

    /// Read the immediate children of `dir`.
    ///
    /// `Err` means the directory could not be read at all; the walker then
    /// yields nothing from it and does not explore below it.
    fn read_children(&self, dir: &Path) -> Result<Children, SieveError>;
}

impl<L: Lister + ?Sized> Lister for &L {
    fn exists(&self, dir: &Path) -> bool {
        (**self).exists(dir)
    }

    fn read_children(&self, dir: &Path) -> Result<Children, SieveError> {
        (**self).read_children(dir)
    }
}
