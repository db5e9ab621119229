use std::fs::Metadata;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::attributes::Attributes;

/// A single file or directory produced during traversal.
///
/// Holds a snapshot of the metadata read when the entry was listed. Nothing is
/// cached or refreshed afterwards; call [`Entry::exists`] to re-check the path
/// before acting on an entry that may have been removed since.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Full path to the entry.
    pub path: PathBuf,

    /// The final path component, including any extension.
    pub name: String,

    /// What kind of entry this is.
    pub kind: EntryKind,

    /// Size in bytes. `None` for directories.
    pub size: Option<u64>,

    /// Creation (birth) time, where the platform records one.
    pub created: Option<SystemTime>,

    /// Last modification time.
    pub modified: Option<SystemTime>,

    /// Last access time.
    pub accessed: Option<SystemTime>,

    /// Attribute flags (hidden, read-only, directory, ...).
    pub attributes: Attributes,
}

/// The kind of a traversed entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// A regular file.
    File,

    /// A directory.
    Dir,

    /// A symbolic link. Never descended into.
    Symlink,

    /// Anything else (device files, pipes, sockets, etc.).
    Other,
}

impl Entry {
    /// An entry with no timestamps, as used by in-memory listers.
    ///
    /// Files start at size `0`; directories carry no size.
    pub fn new(path: impl Into<PathBuf>, kind: EntryKind) -> Self {
        let path = path.into();
        let name = file_name_of(&path);
        let attributes = match kind {
            EntryKind::Dir => Attributes::DIRECTORY,
            EntryKind::Symlink => Attributes::SYMLINK,
            EntryKind::File | EntryKind::Other => Attributes::NORMAL,
        };
        Self {
            path,
            name,
            kind,
            size: (kind != EntryKind::Dir).then_some(0),
            created: None,
            modified: None,
            accessed: None,
            attributes,
        }
    }

    /// Snapshot `metadata` (read without following links) for `path`.
    pub fn from_metadata(path: PathBuf, metadata: &Metadata) -> Self {
        let file_type = metadata.file_type();
        let kind = if file_type.is_dir() {
            EntryKind::Dir
        } else if file_type.is_file() {
            EntryKind::File
        } else if file_type.is_symlink() {
            EntryKind::Symlink
        } else {
            EntryKind::Other
        };

        let name = file_name_of(&path);
        let attributes = Attributes::from_metadata(&name, metadata);

        Self {
            path,
            name,
            kind,
            size: (kind != EntryKind::Dir).then(|| metadata.len()),
            created: metadata.created().ok(),
            modified: metadata.modified().ok(),
            accessed: metadata.accessed().ok(),
            attributes,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }

    /// The name without its final extension. Directories keep their full name.
    pub fn stem(&self) -> &str {
        if self.is_dir() {
            return &self.name;
        }
        Path::new(&self.name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.name)
    }

    /// The final extension including its leading dot, e.g. `".txt"`.
    /// Directories have none.
    pub fn extension(&self) -> Option<String> {
        if self.is_dir() {
            return None;
        }
        Path::new(&self.name)
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
    }

    /// Re-stat the path. `false` if the entry was removed or became
    /// inaccessible after it was listed.
    pub fn exists(&self) -> bool {
        std::fs::symlink_metadata(&self.path).is_ok()
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
