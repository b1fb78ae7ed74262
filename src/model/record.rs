/* src/model/record.rs */

//!
//! Row accessors for the positional records stored in each bucket.
//!
//! Every bucket holds a JSON array of rows and every row is itself an array
//! whose first element is the row id. Ids may arrive as strings or numbers;
//! both are compared by their text.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

/// `(id, name, activeFlag, categoryIdsCsv, ...)`
pub mod account {
	pub const ACTIVE: usize = 2;
	pub const CATEGORIES: usize = 3;
}

/// `(id, name, color, icon, ownerAccountId, subCategoryIdsCsv, budget?)`
pub mod category {
	pub const OWNER: usize = 4;
	pub const SUB_CATEGORIES: usize = 5;
}

/// `(id, ..., "accountId.categoryId.subCategoryId", ...)`
pub mod transaction {
	pub const REFERENCE: usize = 5;
}

/// Parses a bucket payload into its rows.
///
/// Fails unless the payload is an array of non-empty arrays whose first
/// element is a usable id.
pub fn parse_rows(text: &str) -> Result<Vec<Value>, String> {
	let value: Value = serde_json::from_str(text).map_err(|e| e.to_string())?;
	let Value::Array(rows) = value else {
		return Err("expected an array of rows".to_string());
	};

	for (index, row) in rows.iter().enumerate() {
		if row_id(row).is_none() {
			return Err(format!("row {index} is not an array with an id"));
		}
	}

	Ok(rows)
}

/// Returns the text of an id-like value.
pub fn id_text(value: &Value) -> Option<String> {
	match value {
		Value::String(s) => Some(s.clone()),
		Value::Number(n) => Some(n.to_string()),
		_ => None,
	}
}

/// Returns the id (first field) of a row.
pub fn row_id(row: &Value) -> Option<String> {
	row.as_array()?.first().and_then(id_text)
}

/// Returns a field of a row by position.
pub fn field(row: &Value, index: usize) -> Option<&Value> {
	row.as_array()?.get(index)
}

/// Loose truthiness used for flags stored as `0`/`1`, booleans or strings.
pub fn is_truthy(value: &Value) -> bool {
	match value {
		Value::Null => false,
		Value::Bool(b) => *b,
		Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
		Value::String(s) => !(s.is_empty() || s == "0" || s == "false"),
		Value::Array(_) | Value::Object(_) => true,
	}
}

/// Splits a comma separated id list. Non-string values yield their id text.
pub fn csv_ids(value: &Value) -> Vec<String> {
	match value {
		Value::String(s) => s
			.split(',')
			.map(str::trim)
			.filter(|part| !part.is_empty())
			.map(str::to_string)
			.collect(),
		other => id_text(other).into_iter().collect(),
	}
}

/// Which component of a transaction reference to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefPart {
	Account,
	Category,
	SubCategory,
}

/// The dotted `accountId.categoryId.subCategoryId` key of a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxRef {
	pub account: String,
	pub category: String,
	pub sub_category: String,
}

impl TxRef {
	/// Reads the reference field of a transaction row.
	pub fn of_row(row: &Value) -> Option<Self> {
		field(row, transaction::REFERENCE)?.as_str()?.parse().ok()
	}

	pub fn part(&self, part: RefPart) -> &str {
		match part {
			RefPart::Account => &self.account,
			RefPart::Category => &self.category,
			RefPart::SubCategory => &self.sub_category,
		}
	}
}

impl FromStr for TxRef {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let mut parts = s.split('.');
		match (parts.next(), parts.next(), parts.next(), parts.next()) {
			(Some(account), Some(category), Some(sub_category), None) => Ok(Self {
				account: account.to_string(),
				category: category.to_string(),
				sub_category: sub_category.to_string(),
			}),
			_ => Err(format!("invalid transaction reference: {s}")),
		}
	}
}

impl fmt::Display for TxRef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}.{}.{}", self.account, self.category, self.sub_category)
	}
}

/// A composite `segmentId.localId` transaction id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TxId {
	pub segment: u32,
	pub local: u64,
}

impl FromStr for TxId {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let (segment, local) = s
			.split_once('.')
			.ok_or_else(|| format!("invalid transaction id: {s}"))?;
		Ok(Self {
			segment: segment.parse().map_err(|_| format!("invalid segment in id: {s}"))?,
			local: local.parse().map_err(|_| format!("invalid local id in id: {s}"))?,
		})
	}
}

impl fmt::Display for TxId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}.{}", self.segment, self.local)
	}
}
