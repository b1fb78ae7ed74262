/* src/engine/error.rs */

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::resolver::ResolveError;

/// A message that is malformed or arrives out of order.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ProtocolError {
	#[error("engine is not initialized; init must come first")]
	NotInitialized,

	#[error("engine is already initialized")]
	AlreadyInitialized,

	#[error("unknown bucket: {name}")]
	UnknownBucket { name: String },

	#[error("malformed message: {reason}")]
	Malformed { reason: String },
}

/// Failure of a single queued save. The cache is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SweepError {
	#[error("payload for {bucket} is malformed: {reason}")]
	Payload { bucket: String, reason: String },

	#[error("cached {bucket} is corrupt: {reason}")]
	CorruptSnapshot { bucket: String, reason: String },

	#[error("refusing to sweep {bucket}: transaction segments {missing_segments:?} are not cached")]
	#[serde(rename_all = "camelCase")]
	UnsafeSweep {
		bucket: String,
		missing_segments: Vec<u32>,
		meta_missing: bool,
	},
}

impl From<ResolveError> for SweepError {
	fn from(err: ResolveError) -> Self {
		match err {
			ResolveError::CorruptSnapshot { bucket, reason } => SweepError::CorruptSnapshot {
				bucket: bucket.to_string(),
				reason,
			},
		}
	}
}
