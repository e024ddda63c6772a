//! Bucket directory creation

use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;
use tracing::{error, info};

/// Outcome counts for a materialization pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryStats {
    pub created: usize,
    pub existing: usize,
    pub failed: usize,
}

/// Create every bucket directory that does not exist yet, parents included.
///
/// Running it again over an already materialized tree creates nothing.
pub fn materialize_directories(directories: &BTreeSet<PathBuf>) -> DirectoryStats {
    let mut stats = DirectoryStats::default();

    for dir in directories {
        if dir.is_dir() {
            stats.existing += 1;
            continue;
        }
        match fs::create_dir_all(dir) {
            Ok(()) => {
                stats.created += 1;
                info!("created folder: {}", dir.display());
            }
            Err(e) => {
                stats.failed += 1;
                error!("cannot create folder {}: {}", dir.display(), e);
            }
        }
    }

    stats
}
