/* src/sweep.rs */

//!
//! The garbage collection sweep over one bucket's candidate rows.

use serde_json::Value;

use crate::model::Bucket;
use crate::model::record::{self, account};
use crate::resolver::Resolution;

/// Result of a sweep.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SweepOutcome {
	/// Surviving rows, in their original relative order.
	pub kept: Vec<Value>,
	/// Ids of the rows that were dropped, in visit order.
	pub removed: Vec<String>,
}

/// Filters `candidates` down to the rows that are exempt or referenced by
/// some set of `resolution`.
///
/// Active accounts are roots and always survive a sweep of `ACCOUNTS`.
pub fn sweep(bucket: Bucket, candidates: Vec<Value>, resolution: &Resolution) -> SweepOutcome {
	let mut outcome = SweepOutcome {
		kept: Vec::with_capacity(candidates.len()),
		removed: Vec::new(),
	};

	for row in candidates {
		if is_exempt(bucket, &row) {
			outcome.kept.push(row);
			continue;
		}

		match record::row_id(&row) {
			Some(id) if resolution.is_referenced(&id) => outcome.kept.push(row),
			Some(id) => outcome.removed.push(id),
			None => tracing::debug!(%bucket, "dropping row without an id"),
		}
	}

	outcome
}

fn is_exempt(bucket: Bucket, row: &Value) -> bool {
	bucket == Bucket::Accounts && record::field(row, account::ACTIVE).is_some_and(record::is_truthy)
}
