use std::io;
use std::path::Path;

use ignore::WalkBuilder;

use crate::entry::Entry;
use crate::error::SieveError;
use crate::traits::{Children, Lister};

/// Lists directories on the host filesystem.
///
/// Each call reads exactly one directory, one level deep, through
/// `ignore`'s walker with every ignore-file and hidden-file filter switched
/// off. Children come back sorted by file name. Links are not followed: a
/// link is reported as an entry of its own and never descended into.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsLister;

impl Lister for FsLister {
    fn exists(&self, dir: &Path) -> bool {
        dir.is_dir()
    }

    fn read_children(&self, dir: &Path) -> Result<Children, SieveError> {
        let mut builder = WalkBuilder::new(dir);
        builder
            .standard_filters(false)
            .ignore(false)
            .parents(false)
            .hidden(false)
            .follow_links(false)
            .same_file_system(false)
            .max_depth(Some(1))
            .sort_by_file_name(|a, b| a.cmp(b));

        let mut children = Children::default();

        for result in builder.build() {
            let dent = match result {
                Ok(dent) => dent,
                Err(e) => {
                    let err = map_ignore_error(e, dir);
                    // The directory itself could not be read.
                    if err.path().map_or(true, |p| p == dir) {
                        return Err(err);
                    }
                    children.errors.push(err);
                    continue;
                }
            };

            // Skip the directory itself
            if dent.depth() == 0 {
                continue;
            }

            let metadata = match dent.metadata() {
                Ok(m) => m,
                Err(e) => {
                    children.errors.push(map_ignore_error(e, dent.path()));
                    continue;
                }
            };

            let entry = Entry::from_metadata(dent.into_path(), &metadata);
            if entry.is_dir() {
                children.dirs.push(entry);
            } else {
                children.files.push(entry);
            }
        }

        tracing::trace!(
            dir = %dir.display(),
            files = children.files.len(),
            dirs = children.dirs.len(),
            "listed directory"
        );

        Ok(children)
    }
}

// ---------------------------------------------------------------------------
// Map ignore::Error to SieveError
// ---------------------------------------------------------------------------

/// `at` is used when the error itself carries no path.
fn map_ignore_error(e: ignore::Error, at: &Path) -> SieveError {
    match e {
        ignore::Error::WithPath { path, err } => match *err {
            ignore::Error::Io(io_err) => SieveError::io(path, io_err),
            other => SieveError::Io {
                path,
                source: io::Error::other(other.to_string()),
            },
        },
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            map_ignore_error(*err, at)
        }
        ignore::Error::Loop { child, .. } => SieveError::Io {
            path: child,
            source: io::Error::other("filesystem loop"),
        },
        ignore::Error::Io(io_err) => SieveError::io(at.to_path_buf(), io_err),
        other => SieveError::Io {
            path: at.to_path_buf(),
            source: io::Error::other(other.to_string()),
        },
    }
}
