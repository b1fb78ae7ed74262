/* src/model/bucket.rs */

use std::fmt;

use serde::{Deserialize, Serialize};

/// A logical partition of the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Bucket {
	Accounts,
	Categories,
	SubCategories,
	TransactionsMeta,
	/// One transaction segment, keyed by its segment id.
	Transactions(u32),
}

impl Bucket {
	/// Buckets subject to garbage collection, in the order a full collection
	/// pass sweeps them. Each sweep only looks one hop away, so children go
	/// first and their parents see the result on the next step.
	pub const COLLECTED: [Bucket; 3] = [Bucket::SubCategories, Bucket::Categories, Bucket::Accounts];

	/// Returns true if saves of this bucket go through a liveness sweep.
	pub fn is_collected(&self) -> bool {
		matches!(self, Bucket::Accounts | Bucket::Categories | Bucket::SubCategories)
	}
}

impl fmt::Display for Bucket {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Bucket::Accounts => f.write_str("ACCOUNTS"),
			Bucket::Categories => f.write_str("CATEGORIES"),
			Bucket::SubCategories => f.write_str("SUB_CATEGORIES"),
			Bucket::TransactionsMeta => f.write_str("TRANSACTIONS_META"),
			Bucket::Transactions(segment) => write!(f, "TRANSACTIONS{segment}"),
		}
	}
}

/// Storage names for every bucket, installed once by `init`.
///
/// Transaction segments are named by appending the segment id to
/// `transactions`, so segment `3` under the default names is `TRANSACTIONS3`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct BucketNames {
	pub accounts: String,
	pub categories: String,
	pub sub_categories: String,
	pub transactions_meta: String,
	pub transactions: String,
}

impl Default for BucketNames {
	fn default() -> Self {
		Self {
			accounts: "ACCOUNTS".to_string(),
			categories: "CATEGORIES".to_string(),
			sub_categories: "SUB_CATEGORIES".to_string(),
			transactions_meta: "TRANSACTIONS_META".to_string(),
			transactions: "TRANSACTIONS".to_string(),
		}
	}
}

impl BucketNames {
	/// Maps a storage name back to its bucket.
	pub fn parse(&self, name: &str) -> Option<Bucket> {
		if name == self.accounts {
			Some(Bucket::Accounts)
		} else if name == self.categories {
			Some(Bucket::Categories)
		} else if name == self.sub_categories {
			Some(Bucket::SubCategories)
		} else if name == self.transactions_meta {
			Some(Bucket::TransactionsMeta)
		} else {
			let segment = name.strip_prefix(self.transactions.as_str())?;
			// Reject signs and leading zeros so every segment has one name.
			if segment.is_empty()
				|| !segment.bytes().all(|b| b.is_ascii_digit())
				|| (segment.len() > 1 && segment.starts_with('0'))
			{
				return None;
			}
			segment.parse().ok().map(Bucket::Transactions)
		}
	}

	/// Returns the storage name of a bucket.
	pub fn name_of(&self, bucket: Bucket) -> String {
		match bucket {
			Bucket::Accounts => self.accounts.clone(),
			Bucket::Categories => self.categories.clone(),
			Bucket::SubCategories => self.sub_categories.clone(),
			Bucket::TransactionsMeta => self.transactions_meta.clone(),
			Bucket::Transactions(segment) => format!("{}{}", self.transactions, segment),
		}
	}

	/// Checks that every name is present and that no two buckets collide.
	pub fn check(&self) -> Result<(), String> {
		let fixed = [
			&self.accounts,
			&self.categories,
			&self.sub_categories,
			&self.transactions_meta,
		];

		if self.transactions.is_empty() || fixed.iter().any(|name| name.is_empty()) {
			return Err("bucket names must not be empty".to_string());
		}

		for (i, name) in fixed.iter().enumerate() {
			if fixed[i + 1..].contains(name) {
				return Err(format!("bucket name '{name}' is used twice"));
			}
			let shadows_segment = name
				.strip_prefix(self.transactions.as_str())
				.is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()));
			if shadows_segment {
				return Err(format!("bucket name '{name}' collides with a transaction segment"));
			}
		}

		Ok(())
	}
}
