/* src/holder/store/mod.rs */

mod read;
mod write;

use std::collections::HashMap;
use std::sync::atomic::AtomicU64;

use arc_swap::ArcSwap;

use super::Entry;
use crate::model::Bucket;

/// Snapshot cache keyed by bucket.
///
/// The engine is the only writer. Readers on other threads (the caller's
/// mirror) load a consistent map without locking, using the RCU pattern.
/// Entries are never evicted.
pub struct Store {
	pub(crate) inner: ArcSwap<HashMap<Bucket, Entry>>,
	pub(crate) version: AtomicU64,
}

impl Store {
	/// Creates a new empty store.
	pub fn new() -> Self {
		Self {
			inner: ArcSwap::from_pointee(HashMap::new()),
			version: AtomicU64::new(0),
		}
	}
}

impl Default for Store {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Debug for Store {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let snapshot = self.inner.load();
		let mut buckets: Vec<&Bucket> = snapshot.keys().collect();
		buckets.sort();
		f.debug_struct("Store").field("buckets", &buckets).finish()
	}
}
