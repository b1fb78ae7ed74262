/* src/model/segment.rs */

use serde::{Deserialize, Serialize};

use super::TxId;

/// Bookkeeping for one transaction segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentMeta {
	pub segment_id: u32,
	/// Live transaction count.
	pub length: u64,
	/// Next per-segment sequence number for minting ids.
	pub next_local_id: u64,
	/// Whether the segment's rows currently reside in the snapshot cache.
	#[serde(default)]
	pub loaded: bool,
}

impl SegmentMeta {
	pub fn new(segment_id: u32) -> Self {
		Self {
			segment_id,
			length: 0,
			next_local_id: 0,
			loaded: true,
		}
	}
}

/// The contents of the `TRANSACTIONS_META` bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SegmentLedger {
	segments: Vec<SegmentMeta>,
}

impl SegmentLedger {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(text)
	}

	pub fn to_json(&self) -> Result<String, serde_json::Error> {
		serde_json::to_string(self)
	}

	pub fn segments(&self) -> &[SegmentMeta] {
		&self.segments
	}

	pub fn get(&self, segment_id: u32) -> Option<&SegmentMeta> {
		self.segments.iter().find(|s| s.segment_id == segment_id)
	}

	/// Mints the id for a new transaction.
	///
	/// Transactions go into the last segment until it holds `max_len` live
	/// rows; then a fresh segment is opened with the next segment id.
	pub fn mint(&mut self, max_len: u64) -> TxId {
		let max_len = max_len.max(1);
		let has_room = self.segments.last().is_some_and(|s| s.length < max_len);
		if !has_room {
			let next = self.segments.last().map_or(0, |s| s.segment_id + 1);
			tracing::debug!(segment = next, "opening transaction segment");
			self.segments.push(SegmentMeta::new(next));
		}

		let index = self.segments.len() - 1;
		let segment = &mut self.segments[index];
		let id = TxId {
			segment: segment.segment_id,
			local: segment.next_local_id,
		};
		segment.next_local_id += 1;
		segment.length += 1;
		id
	}

	/// Records the removal of a transaction. Returns false if the id does
	/// not belong to a known, non-empty segment.
	pub fn release(&mut self, id: &TxId) -> bool {
		match self.segments.iter_mut().find(|s| s.segment_id == id.segment) {
			Some(segment) if segment.length > 0 && id.local < segment.next_local_id => {
				segment.length -= 1;
				true
			}
			_ => false,
		}
	}

	/// Marks whether a segment's rows are in the cache.
	pub fn set_loaded(&mut self, segment_id: u32, loaded: bool) -> bool {
		match self.segments.iter_mut().find(|s| s.segment_id == segment_id) {
			Some(segment) => {
				segment.loaded = loaded;
				true
			}
			None => false,
		}
	}
}
