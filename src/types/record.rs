//! TransferRecord - one planned source -> destination transfer

use std::fmt;
use std::path::{Path, PathBuf};

/// A planned transfer.
///
/// Equality, ordering and hashing are structural over the path pair, so a
/// set of records never holds the same transfer twice.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TransferRecord {
    /// File as found under the source root
    pub source: PathBuf,

    /// Final location inside a bucket directory
    pub destination: PathBuf,
}

impl TransferRecord {
    pub fn new(source: PathBuf, destination: PathBuf) -> Self {
        Self {
            source,
            destination,
        }
    }

    /// Bucket directory the destination lives in
    pub fn bucket(&self) -> Option<&Path> {
        self.destination.parent()
    }
}

impl fmt::Display for TransferRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {}",
            self.source.display(),
            self.destination.display()
        )
    }
}
