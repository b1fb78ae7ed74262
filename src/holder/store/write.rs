/* src/holder/store/write.rs */

use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Instant;

use super::super::{Entry, Meta, Origin};
use super::Store;
use crate::model::Bucket;

impl Store {
	/// Stores a bucket value, replacing any previous one. Returns the new
	/// version number.
	pub fn set(&self, bucket: Bucket, value: impl Into<Arc<str>>, origin: Origin) -> u64 {
		let version = self.version.fetch_add(1, Ordering::SeqCst) + 1;
		let entry = Entry {
			value: value.into(),
			meta: Meta {
				origin,
				stored_at: Instant::now(),
				version,
			},
		};

		self.inner.rcu(|map| {
			let mut new_map = (**map).clone();
			new_map.insert(bucket, entry.clone());
			new_map
		});

		version
	}
}
