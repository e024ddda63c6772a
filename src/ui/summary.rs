//! End-of-run summary line

use crate::commands::RunReport;
use indicatif::HumanBytes;

/// One-line summary of a run
pub fn format_summary(report: &RunReport) -> String {
    let t = &report.transfers;
    format!(
        "scanned {} entries: {} matched, {} ignored, {} unreadable | \
         folders: {} created | transfers: {} copied, {} moved, {} skipped, {} failed | {} | \
         times synced: {}",
        report.classify.scanned,
        report.classify.matched,
        report.classify.ignored,
        report.classify.unreadable,
        report.directories.created,
        t.copied,
        t.moved,
        t.skipped,
        t.failed,
        HumanBytes(t.bytes_copied),
        report.timestamps.synced
    )
}
