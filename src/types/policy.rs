//! TransferPolicy and DateSource - per-run behavior switches

use std::fmt;

/// How a planned transfer treats its destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferPolicy {
    /// Copy, skip if destination exists (`mode=s`)
    Skip,

    /// Copy, replace destination unconditionally (`mode=c`)
    Overwrite,

    /// Rename into the bucket, skip if destination exists (`mode=m`)
    Move,
}

impl TransferPolicy {
    /// Parse the `mode=` value (case-insensitive)
    pub fn from_mode(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "s" => Some(TransferPolicy::Skip),
            "c" => Some(TransferPolicy::Overwrite),
            "m" => Some(TransferPolicy::Move),
            _ => None,
        }
    }

    /// Whether an existing destination blocks the transfer
    pub fn skips_existing(&self) -> bool {
        !matches!(self, TransferPolicy::Overwrite)
    }
}

impl fmt::Display for TransferPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransferPolicy::Skip => "copy, skip existing",
            TransferPolicy::Overwrite => "copy, replace existing",
            TransferPolicy::Move => "move, skip existing",
        };
        f.write_str(label)
    }
}

/// Which timestamp of a transferred file is propagated to the others
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateSource {
    #[default]
    Modified,
    Created,
    Accessed,
}

impl DateSource {
    /// Parse the `date=` value (case-insensitive, short or long form)
    pub fn from_value(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "m" | "modified" => Some(DateSource::Modified),
            "c" | "created" => Some(DateSource::Created),
            "a" | "accessed" => Some(DateSource::Accessed),
            _ => None,
        }
    }

    /// Human label used in log lines
    pub fn label(&self) -> &'static str {
        match self {
            DateSource::Modified => "last modified",
            DateSource::Created => "creation time",
            DateSource::Accessed => "last accessed",
        }
    }
}
