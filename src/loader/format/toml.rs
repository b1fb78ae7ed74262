/* src/loader/format/toml.rs */

use super::super::{FmtError, Format};
use serde::de::DeserializeOwned;

/// TOML format parser using `toml`.
pub struct Toml;

impl Format for Toml {
	fn extensions(&self) -> &'static [&'static str] {
		&["toml"]
	}

	fn parse<T: DeserializeOwned>(&self, input: &[u8]) -> Result<T, FmtError> {
		let text = std::str::from_utf8(input)
			.map_err(|e| FmtError::ParseError(format!("config is not UTF-8: {e}")))?;
		toml::from_str(text).map_err(|e| FmtError::ParseError(e.message().to_string()))
	}
}
