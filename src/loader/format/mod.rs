/* src/loader/format/mod.rs */

use super::{FmtError, Format};
use serde::de::DeserializeOwned;

mod json;
pub use json::Json;

#[cfg(feature = "toml")]
mod toml;
#[cfg(feature = "toml")]
pub use toml::Toml;

/// An enum wrapper for all supported formats, enabling dynamic dispatch-like behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnyFormat {
	Json,
	#[cfg(feature = "toml")]
	Toml,
}

impl AnyFormat {
	/// Every format compiled into this build.
	pub const ALL: &'static [AnyFormat] = &[
		AnyFormat::Json,
		#[cfg(feature = "toml")]
		AnyFormat::Toml,
	];

	/// Picks the format that handles a file extension.
	pub fn from_extension(ext: &str) -> Result<Self, FmtError> {
		let ext = ext.trim_start_matches('.');
		Self::ALL
			.iter()
			.copied()
			.find(|format| format.extensions().contains(&ext))
			.ok_or_else(|| FmtError::Unsupported(ext.to_string()))
	}
}

impl Format for AnyFormat {
	fn extensions(&self) -> &'static [&'static str] {
		match self {
			Self::Json => Json.extensions(),
			#[cfg(feature = "toml")]
			Self::Toml => Toml.extensions(),
		}
	}

	fn parse<T: DeserializeOwned>(&self, input: &[u8]) -> Result<T, FmtError> {
		match self {
			Self::Json => Json.parse(input),
			#[cfg(feature = "toml")]
			Self::Toml => Toml.parse(input),
		}
	}
}
