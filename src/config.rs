/* src/config.rs */

//!
//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::loader::{self, AnyFormat, FmtError};

/// Default inbox capacity of the worker.
pub const DEFAULT_INBOX_CAPACITY: usize = 256;

/// Default notice channel capacity.
pub const DEFAULT_EVENT_CAPACITY: usize = 100;

/// Default number of live transactions per segment.
pub const DEFAULT_MAX_SEGMENT_LEN: u64 = 500;

/// What a sweep does when some transaction segments are not cached.
///
/// Ids referenced only from an unloaded segment look unreferenced, so a
/// normal sweep could delete live entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UnsafeSweep {
	/// Keep every candidate and report the save as degraded.
	#[default]
	Retain,
	/// Sweep against the partial view and report the save as degraded.
	Proceed,
	/// Fail the save.
	Reject,
}

/// Configuration for the engine and its worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "validate", derive(validator::Validate))]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
	pub unsafe_sweep: UnsafeSweep,

	#[cfg_attr(feature = "validate", validate(range(min = 1)))]
	pub inbox_capacity: usize,

	/// Notices may be dropped for subscribers that fall this far behind.
	#[cfg_attr(feature = "validate", validate(range(min = 1)))]
	pub event_capacity: usize,

	#[cfg_attr(feature = "validate", validate(range(min = 1)))]
	pub max_segment_len: u64,
}

impl Default for EngineConfig {
	fn default() -> Self {
		Self {
			unsafe_sweep: UnsafeSweep::default(),
			inbox_capacity: DEFAULT_INBOX_CAPACITY,
			event_capacity: DEFAULT_EVENT_CAPACITY,
			max_segment_len: DEFAULT_MAX_SEGMENT_LEN,
		}
	}
}

impl EngineConfig {
	/// Parses and validates a configuration document.
	pub fn from_slice(input: &[u8], format: AnyFormat) -> Result<Self, FmtError> {
		loader::load(&format, input)
	}

	pub fn with_unsafe_sweep(mut self, policy: UnsafeSweep) -> Self {
		self.unsafe_sweep = policy;
		self
	}
}
