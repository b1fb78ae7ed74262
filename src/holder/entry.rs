/* src/holder/entry.rs */

use std::sync::Arc;

use super::Meta;

/// A cached bucket value with its metadata.
#[derive(Debug, Clone)]
pub struct Entry {
	/// The serialized bucket value, shared without copying.
	pub value: Arc<str>,
	/// Metadata about this entry.
	pub meta: Meta,
}
