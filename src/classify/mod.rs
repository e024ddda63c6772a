//! Classification - turns scanned paths into a transfer plan

mod bucket;
mod plan;

pub use bucket::{bucket_for, matches_extension};
pub use plan::{ClassifyStats, TransferPlan};

use crate::types::{map_io_error, BucketizeError, TransferRecord};
use crate::Config;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// What classification decided for a single entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Directories are never transferred
    Directory,

    /// File path does not end with the extension filter
    Ignored,

    /// File planned for transfer
    Matched(TransferRecord),
}

/// Classify a single path against the configuration.
///
/// Reads the entry's attributes (following symlinks) and, for matching
/// files, derives the bucket from the last-modified time.
pub fn classify_entry(path: &Path, config: &Config) -> Result<Classification, BucketizeError> {
    let metadata = fs::metadata(path).map_err(|e| map_io_error(path, e))?;
    if metadata.is_dir() {
        return Ok(Classification::Directory);
    }

    if !matches_extension(path, &config.extension) {
        return Ok(Classification::Ignored);
    }

    let modified = metadata.modified().map_err(|e| map_io_error(path, e))?;
    let file_name = path.file_name().ok_or_else(|| {
        BucketizeError::Io(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("no file name in {}", path.display()),
        ))
    })?;

    let bucket = bucket_for(&config.target, modified, config.subdir.as_deref());
    let destination = bucket.join(file_name);
    Ok(Classification::Matched(TransferRecord::new(
        path.to_path_buf(),
        destination,
    )))
}

/// Build the transfer plan from scanned entries.
///
/// Per-entry attribute errors are logged and the entry is skipped.
///
/// # Example
/// ```no_run
/// use bucketize::classify::classify_entries;
/// use bucketize::scanner::scan_directory;
/// use bucketize::Config;
///
/// let config = Config::from_tokens(["source=/media/card", "target=/archive", "mode=s"])?;
/// let plan = classify_entries(scan_directory(&config.source)?, &config);
/// println!("{} file(s) planned", plan.records.len());
/// # Ok::<(), bucketize::BucketizeError>(())
/// ```
pub fn classify_entries<I>(entries: I, config: &Config) -> TransferPlan
where
    I: IntoIterator<Item = PathBuf>,
{
    let mut plan = TransferPlan::new();

    for path in entries {
        plan.stats.scanned += 1;
        match classify_entry(&path, config) {
            Ok(Classification::Directory) => plan.stats.directories += 1,
            Ok(Classification::Ignored) => {
                plan.stats.ignored += 1;
                info!(
                    "extension not matching for file: {} extension filter is: {}",
                    path.display(),
                    config.extension
                );
            }
            Ok(Classification::Matched(record)) => {
                plan.add_record(record);
            }
            Err(e) => {
                plan.stats.unreadable += 1;
                error!("cannot read attributes of {}: {}", path.display(), e);
            }
        }
    }

    plan
}
