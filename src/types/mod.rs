//! Core type definitions for bucketize

mod error;
mod policy;
mod record;

pub use error::{map_io_error, BucketizeError};
pub use policy::{DateSource, TransferPolicy};
pub use record::TransferRecord;
