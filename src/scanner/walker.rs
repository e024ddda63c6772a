//! Sequential directory walker

use crate::types::{map_io_error, BucketizeError};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::error;

/// Lazily walk `root_path` and yield every entry beneath it.
///
/// The root itself is the first item. Directories and files are both
/// yielded; hidden files and ignore files get no special treatment, and
/// symlinks are not followed.
///
/// # Errors
/// * The root is checked up front: a missing or unreadable root returns
///   `BucketizeError::Io` (or `PermissionDenied`) before any entry is yielded
/// * Errors on individual subtrees are logged and the walk moves on to the
///   remaining siblings
pub fn scan_directory(
    root_path: &Path,
) -> Result<impl Iterator<Item = PathBuf>, BucketizeError> {
    let metadata = fs::metadata(root_path).map_err(|e| map_io_error(root_path, e))?;
    if metadata.is_dir() {
        fs::read_dir(root_path).map_err(|e| map_io_error(root_path, e))?;
    }

    let walker = ignore::WalkBuilder::new(root_path)
        .standard_filters(false)
        .follow_links(false)
        .build();

    Ok(walker.filter_map(|result| match result {
        Ok(entry) => Some(entry.into_path()),
        Err(e) => {
            error!(
                "error during directory traversal: {}. scan continues with remaining entries",
                e
            );
            None
        }
    }))
}
