//! Main organize command

use crate::classify::{classify_entries, ClassifyStats};
use crate::executor::{
    execute_plan, materialize_directories, propagate_timestamps, DirectoryStats, TimestampStats,
    TransferStats,
};
use crate::scanner::scan_directory;
use crate::types::BucketizeError;
use crate::ui::format_summary;
use crate::Config;
use tracing::{error, info};

/// Aggregate outcome of one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub classify: ClassifyStats,
    pub directories: DirectoryStats,
    pub transfers: TransferStats,
    pub timestamps: TimestampStats,
}

impl RunReport {
    /// Whether any item was abandoned because of an error
    pub fn has_failures(&self) -> bool {
        self.classify.unreadable > 0
            || self.directories.failed > 0
            || self.transfers.failed > 0
            || self.timestamps.failed > 0
    }
}

/// Run the pipeline once: scan, classify, create buckets, transfer, fix timestamps.
///
/// Only an unscannable source root is fatal. Every later error is logged
/// and counted in the returned report.
pub fn run(config: &Config) -> Result<RunReport, BucketizeError> {
    let entries = scan_directory(&config.source)?;
    let plan = classify_entries(entries, config);
    if plan.is_empty() {
        info!(
            "no file under {} matches extension filter '{}'",
            config.source.display(),
            config.extension
        );
    } else {
        info!(
            "{} file(s) to transfer into {} folder(s)",
            plan.records.len(),
            plan.directories.len()
        );
    }

    let directories = materialize_directories(&plan.directories);

    let transfer = execute_plan(&plan, config.policy);
    if let Some(summary) = transfer.error_summary() {
        error!("{}", summary);
    }

    info!("copying file attributes...");
    let timestamps = propagate_timestamps(&plan.records, config.date_source);

    let report = RunReport {
        classify: plan.stats,
        directories,
        transfers: transfer.stats,
        timestamps,
    };
    info!("{}", format_summary(&report));
    info!("ended.");

    Ok(report)
}
