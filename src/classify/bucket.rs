//! Bucket path derivation

use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Compute `target/YYYY/YYYY-MM-DD[/subdir]` for a modification instant.
///
/// The date is taken in UTC so the same instant always lands in the same
/// bucket regardless of the machine's timezone.
pub fn bucket_for(target: &Path, modified: SystemTime, subdir: Option<&Path>) -> PathBuf {
    let stamp: DateTime<Utc> = modified.into();
    let mut bucket = target
        .join(stamp.format("%Y").to_string())
        .join(stamp.format("%Y-%m-%d").to_string());
    if let Some(subdir) = subdir {
        bucket.push(subdir);
    }
    bucket
}

/// Raw suffix match on the full path string.
///
/// `foobarmp4` matches `mp4`, and an empty filter matches everything.
pub fn matches_extension(path: &Path, extension: &str) -> bool {
    path.to_string_lossy().ends_with(extension)
}
