use std::fs::Metadata;

use bitflags::bitflags;

use crate::entry::Entry;

bitflags! {
    /// Attribute flags of a filesystem entry.
    ///
    /// Bit values follow the Windows `FILE_ATTRIBUTE_*` constants so the
    /// native attribute word maps straight across on that platform. On Unix
    /// the set is derived from the file type, the permission bits and the
    /// dot-name convention.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Attributes: u32 {
        const READ_ONLY = 0x0001;
        const HIDDEN    = 0x0002;
        const SYSTEM    = 0x0004;
        const DIRECTORY = 0x0010;
        const ARCHIVE   = 0x0020;
        const NORMAL    = 0x0080;
        /// Reparse point on Windows, symbolic link on Unix.
        const SYMLINK   = 0x0400;
    }
}

impl Attributes {
    /// Derive the attribute set for an entry named `name` from its
    /// (non-followed) metadata.
    #[cfg(not(windows))]
    pub fn from_metadata(name: &str, metadata: &Metadata) -> Self {
        let file_type = metadata.file_type();
        let mut attrs = Self::empty();

        if file_type.is_dir() {
            attrs |= Self::DIRECTORY;
        }
        if file_type.is_symlink() {
            attrs |= Self::SYMLINK;
        }
        if metadata.permissions().readonly() {
            attrs |= Self::READ_ONLY;
        }
        if name.starts_with('.') {
            attrs |= Self::HIDDEN;
        }

        if attrs.is_empty() {
            Self::NORMAL
        } else {
            attrs
        }
    }

    #[cfg(windows)]
    pub fn from_metadata(_name: &str, metadata: &Metadata) -> Self {
        use std::os::windows::fs::MetadataExt;

        let attrs = Self::from_bits_truncate(metadata.file_attributes());
        if attrs.is_empty() {
            Self::NORMAL
        } else {
            attrs
        }
    }
}

/// Exact equality of the entry's attribute set with `flags`.
///
/// This is not a mask test: an entry carrying any flag beyond `flags` does
/// not match.
pub fn match_by_attributes(entry: &Entry, flags: Attributes) -> bool {
    entry.attributes == flags
}
