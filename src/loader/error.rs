/* src/loader/error.rs */

/// Core error type for the loader module.
#[derive(Debug, thiserror::Error)]
pub enum FmtError {
	/// Parsing error from format implementation.
	#[error("parse error: {0}")]
	ParseError(String),

	/// No registered format handles the given extension.
	#[error("unsupported format: {0}")]
	Unsupported(String),

	/// Validation error from validator crate.
	#[cfg(feature = "validate")]
	#[error("validation failed: {0}")]
	Validation(#[from] validator::ValidationErrors),
}
