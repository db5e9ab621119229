//! Background-task wrappers (feature `async`).
//!
//! Each function validates the root, then drives the synchronous walk to
//! completion on tokio's blocking pool and resolves to the materialized
//! result. Nothing streams across the await point. Must be called from
//! within a tokio runtime.

use std::path::PathBuf;

use crate::builder::TraversalBuilder;
use crate::entry::Entry;
use crate::error::SieveError;
use crate::filter::Filter;
use crate::results::Results;
use crate::sink::ErrorRecord;
use crate::walker::{Recursion, Target};

async fn run(
    root: PathBuf,
    target: Target,
    recursion: Recursion,
    filter: Option<Filter>,
    logged: bool,
) -> Result<Results, SieveError> {
    let mut builder = TraversalBuilder::new(root, target).recursion(recursion);
    if let Some(filter) = filter {
        builder = builder.filter(filter);
    }

    let results = if logged {
        let walk = builder.walk_with_sink(Vec::<ErrorRecord>::new())?;
        tokio::task::spawn_blocking(move || walk.into_results()).await
    } else {
        let walk = builder.walk()?;
        tokio::task::spawn_blocking(move || walk.into_results()).await
    };

    results.map_err(|e| SieveError::Task(e.to_string()))
}

/// Async form of [`list_files`](crate::list_files).
pub async fn list_files_async(
    root: impl Into<PathBuf>,
    recursion: Recursion,
    filter: Option<Filter>,
) -> Result<Vec<Entry>, SieveError> {
    run(root.into(), Target::Files, recursion, filter, false)
        .await
        .map(|r| r.entries)
}

/// Async form of [`list_directories`](crate::list_directories).
pub async fn list_directories_async(
    root: impl Into<PathBuf>,
    recursion: Recursion,
    filter: Option<Filter>,
) -> Result<Vec<Entry>, SieveError> {
    run(root.into(), Target::Directories, recursion, filter, false)
        .await
        .map(|r| r.entries)
}

/// Async form of [`list_files_logged`](crate::list_files_logged); the
/// error log comes back in [`Results::errors`].
pub async fn list_files_logged_async(
    root: impl Into<PathBuf>,
    recursion: Recursion,
    filter: Option<Filter>,
) -> Result<Results, SieveError> {
    run(root.into(), Target::Files, recursion, filter, true).await
}

/// Async form of [`list_directories_logged`](crate::list_directories_logged).
pub async fn list_directories_logged_async(
    root: impl Into<PathBuf>,
    recursion: Recursion,
    filter: Option<Filter>,
) -> Result<Results, SieveError> {
    run(root.into(), Target::Directories, recursion, filter, true).await
}
