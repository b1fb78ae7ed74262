/* src/model/mod.rs */

//!
//! The data shapes the engine understands: bucket identifiers, the row layout
//! of each bucket and the transaction segment metadata.

mod bucket;
pub mod record;
mod segment;

pub use bucket::{Bucket, BucketNames};
pub use record::{RefPart, TxId, TxRef};
pub use segment::{SegmentLedger, SegmentMeta};
