/* src/resolver.rs */

//!
//! Dependency resolution: which ids of a bucket are still in use.
//!
//! Liveness is shallow. An id is live if a cached transaction points at it or
//! if a direct parent or child declares it; nothing is followed further.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::holder::{Entry, Store};
use crate::model::record::{self, account, category};
use crate::model::{Bucket, RefPart, SegmentLedger, TxRef};

/// How much of the transaction data the resolution could see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum Coverage {
	/// Every known segment was loaded and cached.
	Complete,
	/// Some segments were unloaded or uncached, or the segment metadata
	/// itself was not cached.
	#[serde(rename_all = "camelCase")]
	Partial {
		missing_segments: Vec<u32>,
		meta_missing: bool,
	},
}

impl Coverage {
	pub fn is_complete(&self) -> bool {
		matches!(self, Coverage::Complete)
	}
}

/// The id sets that keep entries of one bucket alive.
#[derive(Debug, Clone)]
pub struct Resolution {
	/// One set per cached segment, followed by the parent/child declarations
	/// when any segment contributed.
	pub sets: Vec<HashSet<String>>,
	pub coverage: Coverage,
}

impl Resolution {
	/// Returns true if any set holds `id`.
	pub fn is_referenced(&self, id: &str) -> bool {
		self.sets.iter().any(|set| set.contains(id))
	}
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum ResolveError {
	/// A cached value needed for resolution does not parse.
	#[error("cached {bucket} is corrupt: {reason}")]
	CorruptSnapshot { bucket: Bucket, reason: String },
}

type Snapshot = HashMap<Bucket, Entry>;

/// Computes the liveness sets for `bucket` from one consistent view of the
/// cache. Returns `None` for buckets that are not garbage collected.
pub fn resolve(store: &Store, bucket: Bucket) -> Result<Option<Resolution>, ResolveError> {
	let (part, declared): (RefPart, fn(&Snapshot) -> Result<HashSet<String>, ResolveError>) =
		match bucket {
			Bucket::SubCategories => (RefPart::SubCategory, attached_sub_categories),
			Bucket::Categories => (RefPart::Category, active_account_categories),
			Bucket::Accounts => (RefPart::Account, category_owners),
			_ => return Ok(None),
		};

	let snapshot = store.snapshot();
	let ledger = match snapshot.get(&Bucket::TransactionsMeta) {
		Some(entry) => Some(SegmentLedger::from_json(&entry.value).map_err(|e| {
			ResolveError::CorruptSnapshot {
				bucket: Bucket::TransactionsMeta,
				reason: e.to_string(),
			}
		})?),
		None => None,
	};

	let mut sets = Vec::new();
	let mut missing_segments = Vec::new();
	for segment in ledger.iter().flat_map(|l| l.segments()) {
		let key = Bucket::Transactions(segment.segment_id);
		// Rows of a segment the ledger marks unloaded may be stale.
		match snapshot.get(&key) {
			Some(entry) if segment.loaded => sets.push(referenced_ids(key, entry, part)?),
			_ => missing_segments.push(segment.segment_id),
		}
	}

	if !sets.is_empty() {
		sets.push(declared(&snapshot)?);
	}

	let coverage = if ledger.is_some() && missing_segments.is_empty() {
		Coverage::Complete
	} else {
		Coverage::Partial {
			missing_segments,
			meta_missing: ledger.is_none(),
		}
	};

	tracing::trace!(%bucket, sets = sets.len(), ?coverage, "resolved dependencies");
	Ok(Some(Resolution { sets, coverage }))
}

fn cached_rows(snapshot: &Snapshot, bucket: Bucket) -> Result<Vec<Value>, ResolveError> {
	match snapshot.get(&bucket) {
		Some(entry) => parse_cached(bucket, entry),
		None => Ok(Vec::new()),
	}
}

fn parse_cached(bucket: Bucket, entry: &Entry) -> Result<Vec<Value>, ResolveError> {
	record::parse_rows(&entry.value)
		.map_err(|reason| ResolveError::CorruptSnapshot { bucket, reason })
}

/// Ids named by the transactions of one segment.
fn referenced_ids(
	bucket: Bucket,
	entry: &Entry,
	part: RefPart,
) -> Result<HashSet<String>, ResolveError> {
	let rows = parse_cached(bucket, entry)?;
	let mut ids = HashSet::with_capacity(rows.len());
	for row in &rows {
		match TxRef::of_row(row) {
			Some(reference) => {
				ids.insert(reference.part(part).to_string());
			}
			None => tracing::debug!(%bucket, row = ?record::row_id(row), "transaction without a valid reference"),
		}
	}
	Ok(ids)
}

/// Sub-categories still listed by some category.
fn attached_sub_categories(snapshot: &Snapshot) -> Result<HashSet<String>, ResolveError> {
	let rows = cached_rows(snapshot, Bucket::Categories)?;
	Ok(rows
		.iter()
		.filter_map(|row| record::field(row, category::SUB_CATEGORIES))
		.flat_map(record::csv_ids)
		.collect())
}

/// Categories listed by active accounts. Inactive accounts protect nothing.
fn active_account_categories(snapshot: &Snapshot) -> Result<HashSet<String>, ResolveError> {
	let rows = cached_rows(snapshot, Bucket::Accounts)?;
	Ok(rows
		.iter()
		.filter(|row| record::field(row, account::ACTIVE).is_some_and(record::is_truthy))
		.filter_map(|row| record::field(row, account::CATEGORIES))
		.flat_map(record::csv_ids)
		.collect())
}

/// Accounts that still own a category.
fn category_owners(snapshot: &Snapshot) -> Result<HashSet<String>, ResolveError> {
	let rows = cached_rows(snapshot, Bucket::Categories)?;
	Ok(rows
		.iter()
		.filter_map(|row| record::field(row, category::OWNER))
		.filter_map(record::id_text)
		.collect())
}
