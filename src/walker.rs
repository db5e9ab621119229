//! The breadth-first walker.
//!
//! A [`Walk`] is a pull-based iterator over a FIFO queue of pending
//! directories. Nothing is read until the consumer asks for the next entry,
//! and then only as many directories as it takes to produce one. Dropping a
//! walk early leaves the rest of the tree untouched.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::time::Instant;

use crate::entry::Entry;
use crate::results::{Results, ScanStats};
use crate::sink::ErrorSink;
use crate::traits::{Lister, Matcher};

/// How far below the root a walk goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Recursion {
    /// Immediate children of the root only.
    #[default]
    TopLevelOnly,
    /// The whole subtree, breadth-first.
    AllLevels,
}

/// What a walk emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    /// Everything that is not a directory.
    Files,
    /// Directories, emitted as soon as they are discovered as a child.
    Directories,
}

/// A lazy, finite, forward-only traversal.
///
/// Created by [`TraversalBuilder`](crate::TraversalBuilder) or one of the
/// `list_*` functions. Failures never surface through the iterator: an
/// unreadable directory yields nothing and is not explored, a failing
/// predicate counts as "no match", and either way the error goes to the
/// sink `S`.
pub struct Walk<L, S> {
    lister: L,
    sink: S,
    matcher: Box<dyn Matcher>,
    target: Target,
    recursion: Recursion,
    queue: VecDeque<PathBuf>,
    ready: VecDeque<Entry>,
    files: usize,
    dirs: usize,
}

impl<L: Lister, S: ErrorSink> Walk<L, S> {
    pub(crate) fn new(
        root: PathBuf,
        lister: L,
        sink: S,
        matcher: Box<dyn Matcher>,
        target: Target,
        recursion: Recursion,
    ) -> Self {
        tracing::debug!(root = %root.display(), ?target, ?recursion, "starting walk");
        Self {
            lister,
            sink,
            matcher,
            target,
            recursion,
            queue: VecDeque::from([root]),
            ready: VecDeque::new(),
            files: 0,
            dirs: 0,
        }
    }

    /// Counts so far: files seen and directories listed. The duration is
    /// left at zero; [`Walk::into_results`] times a full run.
    pub fn stats(&self) -> ScanStats {
        ScanStats::compute(self.files, self.dirs, Default::default())
    }

    /// Drive the walk to completion and collect everything.
    ///
    /// `errors` holds what the sink hands over; empty for
    /// [`Silent`](crate::Silent). An owned log is moved into `errors`, while
    /// a borrowed `&mut Vec<ErrorRecord>` is copied and keeps its records.
    pub fn into_results(mut self) -> Results {
        let start = Instant::now();
        let entries: Vec<Entry> = self.by_ref().collect();
        let duration = start.elapsed();

        Results {
            entries,
            errors: self.sink.take(),
            stats: ScanStats::compute(self.files, self.dirs, duration),
        }
    }

    /// Drop entries that no longer exist by the time they are consumed.
    pub fn existing(self) -> impl Iterator<Item = Entry> {
        self.filter(Entry::exists)
    }

    /// Give back the sink, e.g. an owned `Vec<ErrorRecord>`.
    pub fn into_sink(self) -> S {
        self.sink
    }

    fn accept(&mut self, entry: &Entry) -> bool {
        match self.matcher.matches(entry) {
            Ok(matched) => matched,
            Err(e) => {
                self.sink.record(e);
                false
            }
        }
    }

    /// List one directory and queue up what it contributes.
    fn visit(&mut self, dir: PathBuf) {
        tracing::debug!(dir = %dir.display(), "visiting directory");

        let children = match self.lister.read_children(&dir) {
            Ok(children) => children,
            Err(e) => {
                self.sink.record(e);
                return;
            }
        };
        self.dirs += 1;
        self.files += children.files.len();

        for e in children.errors {
            self.sink.record(e);
        }

        match self.target {
            Target::Files => {
                for file in children.files {
                    if self.accept(&file) {
                        self.ready.push_back(file);
                    }
                }
            }
            Target::Directories => {
                for sub in &children.dirs {
                    if self.accept(sub) {
                        self.ready.push_back(sub.clone());
                    }
                }
            }
        }

        if self.recursion == Recursion::AllLevels {
            self.queue
                .extend(children.dirs.into_iter().map(|sub| sub.path));
        }
    }
}

impl<L: Lister, S: ErrorSink> Iterator for Walk<L, S> {
    type Item = Entry;

    fn next(&mut self) -> Option<Entry> {
        loop {
            if let Some(entry) = self.ready.pop_front() {
                tracing::trace!(path = %entry.path.display(), "emitting entry");
                return Some(entry);
            }
            let dir = self.queue.pop_front()?;
            self.visit(dir);
        }
    }
}

impl<L, S> std::iter::FusedIterator for Walk<L, S>
where
    L: Lister,
    S: ErrorSink,
{
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::EntryKind;
    use crate::error::SieveError;
    use crate::filter::AllMatcher;
    use crate::sink::{ErrorRecord, Silent};
    use crate::traits::Children;
    use std::cell::{Cell, RefCell};
    use std::collections::{BTreeMap, HashSet};
    use std::path::Path;

    /// In-memory tree. Directories listed in `denied` fail to read.
    #[derive(Default)]
    struct MemTree {
        dirs: BTreeMap<PathBuf, Vec<Entry>>,
        denied: HashSet<PathBuf>,
        reads: Cell<usize>,
        visited: RefCell<Vec<PathBuf>>,
    }

    impl MemTree {
        fn dir(mut self, path: &str, children: &[(&str, EntryKind)]) -> Self {
            let path = PathBuf::from(path);
            let entries = children
                .iter()
                .map(|(name, kind)| Entry::new(path.join(name), *kind))
                .collect();
            self.dirs.insert(path, entries);
            self
        }

        fn deny(mut self, path: &str) -> Self {
            self.denied.insert(PathBuf::from(path));
            self
        }
    }

    impl Lister for MemTree {
        fn exists(&self, dir: &Path) -> bool {
            self.dirs.contains_key(dir)
        }

        fn read_children(&self, dir: &Path) -> Result<Children, SieveError> {
            self.reads.set(self.reads.get() + 1);
            self.visited.borrow_mut().push(dir.to_path_buf());
            if self.denied.contains(dir) {
                return Err(SieveError::PermissionDenied(dir.to_path_buf()));
            }
            let mut children = Children::default();
            for entry in self.dirs.get(dir).cloned().unwrap_or_default() {
                if entry.is_dir() {
                    children.dirs.push(entry);
                } else {
                    children.files.push(entry);
                }
            }
            Ok(children)
        }
    }

    fn sample() -> MemTree {
        MemTree::default()
            .dir(
                "/r",
                &[
                    ("a.txt", EntryKind::File),
                    ("x", EntryKind::Dir),
                    ("y", EntryKind::Dir),
                ],
            )
            .dir("/r/x", &[("b.txt", EntryKind::File), ("z", EntryKind::Dir)])
            .dir("/r/y", &[("c.txt", EntryKind::File)])
            .dir("/r/x/z", &[("d.txt", EntryKind::File)])
    }

    fn walk<'a, S: ErrorSink>(
        tree: &'a MemTree,
        sink: S,
        target: Target,
        recursion: Recursion,
    ) -> Walk<&'a MemTree, S> {
        Walk::new(
            PathBuf::from("/r"),
            tree,
            sink,
            Box::new(AllMatcher),
            target,
            recursion,
        )
    }

    fn names(entries: impl Iterator<Item = Entry>) -> Vec<String> {
        entries.map(|e| e.name).collect()
    }

    #[test]
    fn files_breadth_first() {
        let tree = sample();
        let files = names(walk(&tree, Silent, Target::Files, Recursion::AllLevels));
        assert_eq!(files, ["a.txt", "b.txt", "c.txt", "d.txt"]);
    }

    #[test]
    fn top_level_reads_only_root() {
        let tree = sample();
        let files = names(walk(&tree, Silent, Target::Files, Recursion::TopLevelOnly));
        assert_eq!(files, ["a.txt"]);
        assert_eq!(tree.reads.get(), 1);

        let dirs = names(walk(&tree, Silent, Target::Directories, Recursion::TopLevelOnly));
        assert_eq!(dirs, ["x", "y"]);
    }

    #[test]
    fn directories_emitted_on_discovery() {
        let tree = sample();
        let mut walk = walk(&tree, Silent, Target::Directories, Recursion::AllLevels);

        assert_eq!(walk.next().map(|e| e.name).as_deref(), Some("x"));
        // Both children of the root are known before either is explored.
        assert_eq!(walk.next().map(|e| e.name).as_deref(), Some("y"));
        assert_eq!(*tree.visited.borrow(), [PathBuf::from("/r")]);

        assert_eq!(names(walk), ["z"]);
    }

    #[test]
    fn first_item_does_not_read_whole_tree() {
        let tree = sample();
        let first = walk(&tree, Silent, Target::Files, Recursion::AllLevels).next();
        assert_eq!(first.map(|e| e.name).as_deref(), Some("a.txt"));
        assert_eq!(tree.reads.get(), 1);
    }

    #[test]
    fn denied_directory_truncates_subtree() {
        let tree = sample().deny("/r/x");
        let files = names(walk(&tree, Silent, Target::Files, Recursion::AllLevels));
        assert_eq!(files, ["a.txt", "c.txt"]);
        assert!(!tree.visited.borrow().contains(&PathBuf::from("/r/x/z")));
    }

    #[test]
    fn logging_records_one_error_per_denied_directory() {
        let tree = sample().deny("/r/x");
        let mut log: Vec<ErrorRecord> = Vec::new();
        let files = names(walk(&tree, &mut log, Target::Files, Recursion::AllLevels));

        assert_eq!(files, ["a.txt", "c.txt"]);
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].path.as_deref(), Some(Path::new("/r/x")));
    }

    #[test]
    fn denied_directory_is_still_emitted_as_directory() {
        let tree = sample().deny("/r/x");
        let dirs = names(walk(&tree, Silent, Target::Directories, Recursion::AllLevels));
        assert_eq!(dirs, ["x", "y"]);
    }

    #[test]
    fn failing_predicate_is_no_match_and_recorded() {
        struct Picky;
        impl Matcher for Picky {
            fn matches(&self, entry: &Entry) -> Result<bool, SieveError> {
                if entry.name == "b.txt" {
                    Err(SieveError::Matcher("cannot judge b.txt".into()))
                } else {
                    Ok(true)
                }
            }
        }

        let tree = sample();
        let walk = Walk::new(
            PathBuf::from("/r"),
            &tree,
            Vec::<ErrorRecord>::new(),
            Box::new(Picky),
            Target::Files,
            Recursion::AllLevels,
        );
        let results = walk.into_results();

        assert_eq!(names(results.entries.into_iter()), ["a.txt", "c.txt", "d.txt"]);
        assert_eq!(results.errors.len(), 1);
        assert!(results.errors[0].message.contains("b.txt"));
        assert_eq!(results.stats.files, 4);
        assert_eq!(results.stats.dirs, 4);
    }

    #[test]
    fn stats_track_partial_consumption() {
        let tree = sample();
        let mut run = walk(&tree, Silent, Target::Files, Recursion::AllLevels);
        assert_eq!(run.stats(), ScanStats::default());

        let first = run.next().map(|e| e.name);
        assert_eq!(first.as_deref(), Some("a.txt"));

        let stats = run.stats();
        assert_eq!(stats.dirs, 1);
        assert_eq!(stats.files, 1);
        assert_eq!(stats.duration, Default::default());
        assert_eq!(stats.entries_per_sec, 0);
    }

    #[test]
    fn into_sink_returns_owned_log() {
        let tree = sample().deny("/r/y");
        let log: Vec<ErrorRecord> = Vec::new();
        let mut run = walk(&tree, log, Target::Files, Recursion::AllLevels);
        run.by_ref().for_each(drop);

        let log = run.into_sink();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].path.as_deref(), Some(Path::new("/r/y")));
    }

    #[test]
    fn into_results_leaves_borrowed_log_intact() {
        let tree = sample().deny("/r/x");
        let mut log: Vec<ErrorRecord> = Vec::new();
        let results = walk(&tree, &mut log, Target::Files, Recursion::AllLevels).into_results();

        assert_eq!(results.errors.len(), 1);
        assert_eq!(log, results.errors);
    }
}
