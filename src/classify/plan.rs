//! TransferPlan - directories to create and transfers to run

use crate::types::TransferRecord;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Output of classification
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransferPlan {
    /// Bucket directories that must exist before any transfer
    pub directories: BTreeSet<PathBuf>,

    /// Unique planned transfers
    pub records: BTreeSet<TransferRecord>,

    /// Aggregate statistics about the classification pass
    pub stats: ClassifyStats,
}

impl TransferPlan {
    /// Create a new empty plan
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a transfer and register its bucket directory.
    ///
    /// Returns `false` when the identical pair was already planned.
    pub fn add_record(&mut self, record: TransferRecord) -> bool {
        if let Some(bucket) = record.bucket() {
            self.directories.insert(bucket.to_path_buf());
        }
        let inserted = self.records.insert(record);
        if inserted {
            self.stats.matched += 1;
        } else {
            self.stats.duplicates += 1;
        }
        inserted
    }

    /// Check if there is nothing to transfer
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Statistics about a classification pass
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClassifyStats {
    /// Entries received from the scanner
    pub scanned: usize,

    /// Directories skipped
    pub directories: usize,

    /// Files planned for transfer
    pub matched: usize,

    /// Files whose path does not end with the extension filter
    pub ignored: usize,

    /// Entries whose attributes could not be read
    pub unreadable: usize,

    /// Identical (source, destination) pairs seen more than once
    pub duplicates: usize,
}
