/* src/holder/mod.rs */

//!
//! The snapshot cache: the last serialized value the engine saw for each
//! bucket.

mod entry;
mod meta;
mod store;

pub use entry::Entry;
pub use meta::{Meta, Origin};
pub use store::Store;
