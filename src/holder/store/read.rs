/* src/holder/store/read.rs */

use std::collections::HashMap;
use std::sync::Arc;

use super::super::{Entry, Meta};
use super::Store;
use crate::model::Bucket;

impl Store {
	/// Gets the last known value of a bucket. This is a wait-free operation.
	pub fn get(&self, bucket: Bucket) -> Option<Arc<str>> {
		let snapshot = self.inner.load();
		snapshot.get(&bucket).map(|entry| Arc::clone(&entry.value))
	}

	/// Gets metadata for a bucket.
	pub fn get_meta(&self, bucket: Bucket) -> Option<Meta> {
		let snapshot = self.inner.load();
		snapshot.get(&bucket).map(|entry| entry.meta.clone())
	}

	/// Gets the full entry (value + metadata).
	pub fn get_entry(&self, bucket: Bucket) -> Option<Entry> {
		let snapshot = self.inner.load();
		snapshot.get(&bucket).cloned()
	}

	/// Returns an atomic snapshot of all entries.
	pub fn snapshot(&self) -> Arc<HashMap<Bucket, Entry>> {
		self.inner.load_full()
	}

	/// Returns all cached buckets.
	pub fn buckets(&self) -> Vec<Bucket> {
		let snapshot = self.inner.load();
		snapshot.keys().copied().collect()
	}

	pub fn contains(&self, bucket: Bucket) -> bool {
		self.inner.load().contains_key(&bucket)
	}

	/// Returns the number of cached buckets.
	pub fn len(&self) -> usize {
		let snapshot = self.inner.load();
		snapshot.len()
	}

	/// Returns true if nothing has been cached yet.
	pub fn is_empty(&self) -> bool {
		let snapshot = self.inner.load();
		snapshot.is_empty()
	}
}
