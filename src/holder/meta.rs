/* src/holder/meta.rs */

use std::time::Instant;

/// How a value reached the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
	/// Written verbatim by `directSet`, without a sweep.
	Seeded,
	/// Committed by a drained `save`.
	Saved,
}

/// Metadata associated with a cached value.
#[derive(Debug, Clone)]
pub struct Meta {
	pub origin: Origin,
	/// Timestamp of the write.
	pub stored_at: Instant,
	/// Store-wide version number, auto-incremented on each write.
	pub version: u64,
}
