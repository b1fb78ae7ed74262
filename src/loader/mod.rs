/* src/loader/mod.rs */

//!
//! Format-agnostic parsing of engine configuration.

mod error;
pub mod format;

pub use error::FmtError;
pub use format::AnyFormat;

use serde::de::DeserializeOwned;

/// Internal trait for optional validation.
#[cfg(feature = "validate")]
pub trait ValidateConfig: validator::Validate {
	fn validate_config(&self) -> Result<(), FmtError> {
		self.validate().map_err(FmtError::Validation)
	}
}

#[cfg(feature = "validate")]
impl<T: validator::Validate> ValidateConfig for T {}

#[cfg(not(feature = "validate"))]
pub trait ValidateConfig {
	fn validate_config(&self) -> Result<(), FmtError> {
		Ok(())
	}
}

#[cfg(not(feature = "validate"))]
impl<T> ValidateConfig for T {}

/// Abstract format parser that converts bytes into a structured object.
pub trait Format: Send + Sync {
	/// List of supported extensions or identifiers.
	fn extensions(&self) -> &'static [&'static str];

	/// Parse the raw bytes into the target type.
	fn parse<T: DeserializeOwned>(&self, input: &[u8]) -> Result<T, FmtError>;
}

/// Parses and validates a value in the given format.
pub fn load<T, F>(format: &F, input: &[u8]) -> Result<T, FmtError>
where
	T: DeserializeOwned + ValidateConfig,
	F: Format,
{
	let value: T = format.parse(input)?;
	value.validate_config()?;
	Ok(value)
}
