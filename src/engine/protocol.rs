/* src/engine/protocol.rs */

use serde::{Deserialize, Serialize};

use super::{ProtocolError, SweepError};
use crate::model::BucketNames;
use crate::resolver::Coverage;

/// A message sent to the engine.
///
/// On the wire this is a JSON object tagged by `type`, for example
/// `{"type":"save","bucket":"ACCOUNTS","payload":"[[\"1\",\"Cash\",1,\"\"]]"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Request {
	/// Installs the bucket names. Must be the first message, exactly once.
	Init { buckets: BucketNames },
	/// Sweeps `payload` and persists the result.
	Save { bucket: String, payload: String },
	/// Writes `value` into the cache verbatim, without a sweep.
	DirectSet { bucket: String, value: String },
	/// Re-sweeps the cached sub-categories, categories and accounts, in that
	/// order.
	Collect,
}

impl Request {
	/// Parses a wire message.
	pub fn from_wire(text: &str) -> Result<Self, ProtocolError> {
		serde_json::from_str(text).map_err(|e| ProtocolError::Malformed {
			reason: e.to_string(),
		})
	}

	/// Returns true for requests that go through the queue.
	pub fn is_queued(&self) -> bool {
		matches!(self, Request::Save { .. } | Request::Collect)
	}
}

/// A message emitted by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Notice {
	/// A save was drained. `payload` is the new authoritative value.
	Saved {
		bucket: String,
		payload: String,
		removed: Vec<String>,
		coverage: Coverage,
	},
	/// A save failed; later saves are unaffected.
	Failed { bucket: String, error: SweepError },
	/// A message was refused before reaching the queue.
	Rejected { error: ProtocolError },
}

impl Notice {
	pub fn to_wire(&self) -> Result<String, serde_json::Error> {
		serde_json::to_string(self)
	}

	/// The bucket this notice is about, if any.
	pub fn bucket(&self) -> Option<&str> {
		match self {
			Notice::Saved { bucket, .. } | Notice::Failed { bucket, .. } => Some(bucket.as_str()),
			Notice::Rejected { .. } => None,
		}
	}
}
