use std::path::PathBuf;

use crate::error::SieveError;
use crate::filter::{AllMatcher, Filter};
use crate::fs::FsLister;
use crate::sink::{ErrorRecord, ErrorSink, Silent};
use crate::traits::{Lister, Matcher};
use crate::walker::{Recursion, Target, Walk};

// ---------------------------------------------------------------------------
// TraversalBuilder
// ---------------------------------------------------------------------------

/// Entry point for configuring and starting a traversal.
///
/// Created via [`dirsieve::files()`](crate::files) or
/// [`dirsieve::directories()`](crate::directories). Configure with chained
/// builder methods, then call [`walk()`](TraversalBuilder::walk) or
/// [`walk_logged()`](TraversalBuilder::walk_logged).
///
/// # Example
///
/// ```rust,no_run
/// use dirsieve::{CommonSize, Filter};
///
/// let large: Vec<_> = dirsieve::files("/var/log")
///     .all_levels()
///     .filter(Filter::CommonSize(CommonSize::Large))
///     .walk()?
///     .collect();
/// # Ok::<(), dirsieve::SieveError>(())
/// ```
pub struct TraversalBuilder<L = FsLister> {
    root:      PathBuf,
    target:    Target,
    recursion: Recursion,
    matcher:   Option<Box<dyn Matcher>>,
    lister:    L,
}

impl TraversalBuilder {
    pub(crate) fn new(root: impl Into<PathBuf>, target: Target) -> Self {
        Self {
            root:      root.into(),
            target,
            recursion: Recursion::default(),
            matcher:   None,
            lister:    FsLister,
        }
    }
}

impl<L: Lister> TraversalBuilder<L> {
    // ── Shape ─────────────────────────────────────────────────────────────

    /// Top level only (the default) or the whole subtree.
    pub fn recursion(mut self, recursion: Recursion) -> Self {
        self.recursion = recursion;
        self
    }

    /// Shorthand for `.recursion(Recursion::AllLevels)`.
    pub fn all_levels(self) -> Self {
        self.recursion(Recursion::AllLevels)
    }

    // ── Matching ──────────────────────────────────────────────────────────

    /// Filter with a built-in criterion, a [`CompositeOptions`](crate::CompositeOptions)
    /// bag or a custom predicate.
    ///
    /// Without a filter every entry is returned.
    pub fn filter(mut self, filter: impl Into<Filter>) -> Self {
        self.matcher = Some(filter.into().into_matcher());
        self
    }

    /// Set a custom matcher directly.
    pub fn with_matcher(mut self, m: impl Matcher + 'static) -> Self {
        self.matcher = Some(Box::new(m));
        self
    }

    // ── Source ────────────────────────────────────────────────────────────

    /// Read directories through `lister` instead of the host filesystem.
    pub fn lister<M: Lister>(self, lister: M) -> TraversalBuilder<M> {
        TraversalBuilder {
            root:      self.root,
            target:    self.target,
            recursion: self.recursion,
            matcher:   self.matcher,
            lister,
        }
    }

    // ── Execute ───────────────────────────────────────────────────────────

    /// Start a silent-mode walk.
    ///
    /// # Errors
    ///
    /// [`SieveError::InvalidArgument`] for an empty root and
    /// [`SieveError::NotFound`] when the root is not an existing directory.
    /// These are checked now; everything after is lazy and infallible.
    pub fn walk(self) -> Result<Walk<L, Silent>, SieveError> {
        self.walk_with_sink(Silent)
    }

    /// Start a logging-mode walk that appends every absorbed failure to
    /// `log`. Inspect `log` once the walk has been consumed or dropped.
    pub fn walk_logged(
        self,
        log: &mut Vec<ErrorRecord>,
    ) -> Result<Walk<L, &mut Vec<ErrorRecord>>, SieveError> {
        self.walk_with_sink(log)
    }

    /// Start a walk that reports absorbed failures to `sink`.
    pub fn walk_with_sink<S: ErrorSink>(self, sink: S) -> Result<Walk<L, S>, SieveError> {
        if self.root.as_os_str().is_empty() {
            return Err(SieveError::InvalidArgument("root path is empty".into()));
        }
        if !self.lister.exists(&self.root) {
            return Err(SieveError::NotFound(self.root));
        }

        // Default matcher: match everything
        let matcher: Box<dyn Matcher> = match self.matcher {
            Some(m) => m,
            None    => Box::new(AllMatcher),
        };

        Ok(Walk::new(
            self.root,
            self.lister,
            sink,
            matcher,
            self.target,
            self.recursion,
        ))
    }
}
