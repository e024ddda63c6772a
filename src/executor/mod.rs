//! Executor module for file operations

pub mod copy;
pub mod dirs;
pub mod timestamps;

use crate::classify::TransferPlan;
use crate::types::{map_io_error, BucketizeError, TransferPolicy, TransferRecord};
use std::fs;
use std::io::Error;
use std::path::{Path, PathBuf};
use tracing::{error, info};

pub use copy::copy_file_atomic;
pub use dirs::{materialize_directories, DirectoryStats};
pub use timestamps::{propagate_timestamps, sync_timestamps, TimestampStats};

/// Transfer statistics for a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferStats {
    /// Number of records in the input plan.
    pub total: usize,
    /// Records copied (Skip or Overwrite policy).
    pub copied: usize,
    /// Records renamed into their bucket (Move policy).
    pub moved: usize,
    /// Records left alone because the destination already existed.
    pub skipped: usize,
    /// Records that failed with an I/O error.
    pub failed: usize,
    /// Aggregate copied bytes.
    pub bytes_copied: u64,
}

/// What happened to a single record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferOutcome {
    Copied(u64),
    Moved,
}

/// Transfer report: statistics plus the per-record failures.
#[derive(Debug, Default)]
pub struct TransferReport {
    pub stats: TransferStats,
    pub failures: Vec<(PathBuf, BucketizeError)>,
}

impl TransferReport {
    /// Short human summary of the first few failures, if any.
    pub fn error_summary(&self) -> Option<String> {
        if self.failures.is_empty() {
            None
        } else {
            Some(build_error_summary(&self.failures))
        }
    }
}

/// Execute every record of a plan under one policy.
///
/// Records run sequentially in path order. Conflicts and failures are
/// logged and counted; they never stop the remaining records.
pub fn execute_plan(plan: &TransferPlan, policy: TransferPolicy) -> TransferReport {
    let mut report = TransferReport {
        stats: TransferStats {
            total: plan.records.len(),
            ..Default::default()
        },
        ..Default::default()
    };

    for record in &plan.records {
        match transfer_record(record, policy) {
            Ok(TransferOutcome::Copied(bytes)) => {
                report.stats.copied += 1;
                report.stats.bytes_copied += bytes;
                info!(
                    "{} copied to {}",
                    record.source.display(),
                    record.destination.display()
                );
            }
            Ok(TransferOutcome::Moved) => {
                report.stats.moved += 1;
                info!(
                    "{} moved to {}",
                    record.source.display(),
                    record.destination.display()
                );
            }
            Err(err) if err.is_conflict() => {
                report.stats.skipped += 1;
                error!("{}", err);
            }
            Err(err) => {
                report.stats.failed += 1;
                error!(
                    "transfer of {} to {} failed: {}",
                    record.source.display(),
                    record.destination.display(),
                    err
                );
                report.failures.push((record.source.clone(), err));
            }
        }
    }

    report
}

/// Transfer a single record according to `policy`.
///
/// | Policy    | destination exists          | destination absent |
/// |-----------|-----------------------------|--------------------|
/// | Skip      | `AlreadyExists`, no write   | copy               |
/// | Overwrite | copy, replacing it          | copy               |
/// | Move      | `AlreadyExists`, no write   | rename             |
pub fn transfer_record(
    record: &TransferRecord,
    policy: TransferPolicy,
) -> Result<TransferOutcome, BucketizeError> {
    let dest = &record.destination;
    if policy.skips_existing() && fs::symlink_metadata(dest).is_ok() {
        return Err(BucketizeError::AlreadyExists { path: dest.clone() });
    }

    match policy {
        TransferPolicy::Skip | TransferPolicy::Overwrite => {
            copy_file_atomic(&record.source, dest).map(TransferOutcome::Copied)
        }
        TransferPolicy::Move => move_file(&record.source, dest).map(|_| TransferOutcome::Moved),
    }
}

/// Rename `src` onto `dest`; no copy fallback across filesystems.
fn move_file(src: &Path, dest: &Path) -> Result<(), BucketizeError> {
    fs::rename(src, dest).map_err(|e| map_move_error(src, dest, e))
}

fn map_move_error(src: &Path, dest: &Path, error: Error) -> BucketizeError {
    // EXDEV on Unix, ERROR_NOT_SAME_DEVICE on Windows
    let cross_device = if cfg!(windows) {
        error.raw_os_error() == Some(17)
    } else {
        error.raw_os_error() == Some(18)
    };
    if cross_device {
        BucketizeError::CrossDevice {
            from: src.to_path_buf(),
            to: dest.to_path_buf(),
        }
    } else {
        map_io_error(src, error)
    }
}

fn build_error_summary(errors: &[(PathBuf, BucketizeError)]) -> String {
    let preview = errors
        .iter()
        .take(3)
        .map(|(path, err)| format!("{}: {}", path.display(), err))
        .collect::<Vec<_>>()
        .join("; ");

    let denied = errors.iter().filter(|(_, err)| err.is_permission_error()).count();
    if denied > 0 {
        format!(
            "{} transfer(s) failed ({} permission denied). Example failures: {}",
            errors.len(),
            denied,
            preview
        )
    } else {
        format!(
            "{} transfer(s) failed. Example failures: {}",
            errors.len(),
            preview
        )
    }
}
