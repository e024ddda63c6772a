//! Timestamp propagation onto transferred files
//!
//! Copy APIs on some platforms reset the creation time to "now". After the
//! transfer phase, one timestamp of the destination (the configured
//! [`DateSource`]) is written back as both its modification and creation
//! time, so date-based tools see one consistent instant.

use crate::types::{BucketizeError, DateSource, TransferRecord};
use chrono::{DateTime, Utc};
use std::fs::{self, Metadata};
use std::io;
use std::path::Path;
use std::time::SystemTime;
use tracing::{error, info};

/// Outcome counts for a propagation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimestampStats {
    /// Destinations whose times were written
    pub synced: usize,

    /// Destinations that did not exist (skipped or failed transfers)
    pub missing: usize,

    /// Destinations where reading or writing a time failed
    pub failed: usize,

    /// Synced destinations where the platform cannot set creation time
    pub creation_unsupported: usize,
}

/// Result of syncing a single file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncedTimes {
    /// Instant written to the file
    pub instant: SystemTime,

    /// Whether the creation time was written as well
    pub creation_set: bool,
}

/// Read the configured timestamp from metadata
pub fn read_date_source(metadata: &Metadata, source: DateSource) -> io::Result<SystemTime> {
    match source {
        DateSource::Modified => metadata.modified(),
        DateSource::Created => metadata.created(),
        DateSource::Accessed => metadata.accessed(),
    }
}

/// Write `source`'s reading of `path` to its modification and creation times.
pub fn sync_timestamps(path: &Path, source: DateSource) -> Result<SyncedTimes, BucketizeError> {
    let timestamp_error = |e: io::Error| BucketizeError::Timestamp {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };

    let metadata = fs::metadata(path).map_err(timestamp_error)?;
    let instant = read_date_source(&metadata, source).map_err(timestamp_error)?;

    let creation_set = set_created(path, instant).map_err(timestamp_error)?;
    filetime::set_file_mtime(path, filetime::FileTime::from_system_time(instant))
        .map_err(timestamp_error)?;

    Ok(SyncedTimes {
        instant,
        creation_set,
    })
}

/// Sync timestamps for every transferred destination that exists.
pub fn propagate_timestamps<'a, I>(records: I, source: DateSource) -> TimestampStats
where
    I: IntoIterator<Item = &'a TransferRecord>,
{
    let mut stats = TimestampStats::default();

    for record in records {
        let dest = &record.destination;
        if !dest.is_file() {
            stats.missing += 1;
            continue;
        }
        match sync_timestamps(dest, source) {
            Ok(times) => {
                stats.synced += 1;
                if !times.creation_set {
                    stats.creation_unsupported += 1;
                }
                info!(
                    "times copied from {} ({}) on {}",
                    source.label(),
                    DateTime::<Utc>::from(times.instant).to_rfc3339(),
                    dest.display()
                );
            }
            Err(e) => {
                stats.failed += 1;
                error!("{}", e);
            }
        }
    }

    stats
}

#[cfg(any(windows, target_os = "macos"))]
fn set_created(path: &Path, instant: SystemTime) -> io::Result<bool> {
    #[cfg(target_os = "macos")]
    use std::os::macos::fs::FileTimesExt;
    #[cfg(windows)]
    use std::os::windows::fs::FileTimesExt;

    let file = fs::OpenOptions::new().write(true).open(path)?;
    file.set_times(fs::FileTimes::new().set_created(instant))?;
    Ok(true)
}

#[cfg(not(any(windows, target_os = "macos")))]
fn set_created(_path: &Path, _instant: SystemTime) -> io::Result<bool> {
    Ok(false)
}
