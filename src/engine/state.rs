/* src/engine/state.rs */

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use super::{Notice, ProtocolError, Request, RequestQueue, SweepError};
use crate::config::{EngineConfig, UnsafeSweep};
use crate::holder::{Origin, Store};
use crate::model::record;
use crate::model::{Bucket, BucketNames, SegmentLedger};
use crate::resolver::{self, Coverage};
use crate::sweep::{self, SweepOutcome};

/// A save waiting in the queue.
#[derive(Debug)]
struct Pending {
	bucket: Bucket,
	/// The name the caller used, echoed back in the notice.
	name: String,
	payload: Payload,
}

#[derive(Debug)]
enum Payload {
	/// Sent by the caller with the save.
	Given(String),
	/// Whatever the cache holds once the item reaches the head of the queue,
	/// so a collection pass never replays a value an earlier save replaced.
	Cached,
}

/// The single-threaded persistence engine.
///
/// Requests enter through [`submit`](Engine::submit) or
/// [`dispatch`](Engine::dispatch). `init` and `directSet` take effect
/// immediately; saves are queued and processed one at a time by
/// [`drain`](Engine::drain), each running resolve, sweep, commit and notify
/// to completion before the next one starts.
pub struct Engine {
	store: Arc<Store>,
	config: EngineConfig,
	names: Option<BucketNames>,
	queue: RequestQueue<Pending>,
}

impl Engine {
	pub fn new(config: EngineConfig) -> Self {
		Self::with_store(config, Arc::new(Store::new()))
	}

	/// Creates an engine writing into an existing cache.
	pub fn with_store(config: EngineConfig, store: Arc<Store>) -> Self {
		Self {
			store,
			config,
			names: None,
			queue: RequestQueue::new(),
		}
	}

	pub fn store(&self) -> &Arc<Store> {
		&self.store
	}

	pub fn config(&self) -> &EngineConfig {
		&self.config
	}

	/// The bucket names installed by `init`.
	pub fn names(&self) -> Option<&BucketNames> {
		self.names.as_ref()
	}

	pub fn is_initialized(&self) -> bool {
		self.names.is_some()
	}

	/// Number of saves waiting to be drained.
	pub fn pending(&self) -> usize {
		self.queue.len()
	}

	/// Applies a request. Returns true if saves were queued on an idle queue
	/// and [`drain`](Engine::drain) must run.
	pub fn submit(&mut self, request: Request) -> Result<bool, ProtocolError> {
		match request {
			Request::Init { buckets } => {
				if self.names.is_some() {
					return Err(ProtocolError::AlreadyInitialized);
				}
				buckets
					.check()
					.map_err(|reason| ProtocolError::Malformed { reason })?;
				info!(?buckets, "engine initialized");
				self.names = Some(buckets);
				Ok(false)
			}
			Request::DirectSet { bucket, value } => {
				let (key, _) = self.lookup(bucket)?;
				let version = self.store.set(key, value, Origin::Seeded);
				debug!(bucket = %key, version, "seeded cache");
				Ok(false)
			}
			Request::Save { bucket, payload } => {
				let (key, name) = self.lookup(bucket)?;
				Ok(self.queue.enqueue(Pending {
					bucket: key,
					name,
					payload: Payload::Given(payload),
				}))
			}
			Request::Collect => {
				let names = self.names.as_ref().ok_or(ProtocolError::NotInitialized)?;
				let mut needs_drain = false;
				for bucket in Bucket::COLLECTED {
					if self.store.contains(bucket) {
						needs_drain |= self.queue.enqueue(Pending {
							bucket,
							name: names.name_of(bucket),
							payload: Payload::Cached,
						});
					}
				}
				Ok(needs_drain)
			}
		}
	}

	/// Runs queued saves in arrival order until the queue is empty, passing
	/// one notice per save to `emit`.
	pub fn drain<F>(&mut self, mut emit: F)
	where
		F: FnMut(Notice),
	{
		while let Some(pending) = self.queue.next() {
			let bucket = pending.bucket;
			let name = pending.name.clone();
			debug!(%bucket, remaining = self.queue.len(), "draining save");

			let notice = match self.process(pending) {
				Ok(notice) => notice,
				Err(err) => {
					error!(%bucket, error = %err, "save failed");
					Notice::Failed {
						bucket: name,
						error: err,
					}
				}
			};
			emit(notice);
		}
	}

	/// Submits a request and drains the queue if needed, returning the
	/// notices produced.
	pub fn dispatch(&mut self, request: Request) -> Result<Vec<Notice>, ProtocolError> {
		let mut notices = Vec::new();
		if self.submit(request)? {
			self.drain(|notice| notices.push(notice));
		}
		Ok(notices)
	}

	fn lookup(&self, name: String) -> Result<(Bucket, String), ProtocolError> {
		let names = self.names.as_ref().ok_or(ProtocolError::NotInitialized)?;
		match names.parse(&name) {
			Some(bucket) => Ok((bucket, name)),
			None => Err(ProtocolError::UnknownBucket { name }),
		}
	}

	fn process(&self, pending: Pending) -> Result<Notice, SweepError> {
		let Pending {
			bucket,
			name,
			payload,
		} = pending;

		let malformed = |reason: String| SweepError::Payload {
			bucket: bucket.to_string(),
			reason,
		};

		// Cache entries are never evicted, so a bucket queued for collection
		// is still present here.
		let payload = match payload {
			Payload::Given(text) => text,
			Payload::Cached => self
				.store
				.get(bucket)
				.map(|value| value.to_string())
				.unwrap_or_else(|| "[]".to_string()),
		};

		let (payload, removed, coverage) = match bucket {
			Bucket::TransactionsMeta => {
				let ledger =
					SegmentLedger::from_json(&payload).map_err(|e| malformed(e.to_string()))?;
				let limit = self.config.max_segment_len;
				if let Some(over) = ledger.segments().iter().find(|s| s.length > limit) {
					return Err(malformed(format!(
						"segment {} holds {} transactions, limit is {}",
						over.segment_id, over.length, limit
					)));
				}
				(payload, Vec::new(), Coverage::Complete)
			}
			Bucket::Transactions(_) => {
				record::parse_rows(&payload).map_err(malformed)?;
				(payload, Vec::new(), Coverage::Complete)
			}
			Bucket::Accounts | Bucket::Categories | Bucket::SubCategories => {
				let rows = record::parse_rows(&payload).map_err(malformed)?;
				let (outcome, coverage) = self.collect(bucket, rows)?;
				let text = serde_json::to_string(&outcome.kept).map_err(|e| malformed(e.to_string()))?;
				(text, outcome.removed, coverage)
			}
		};

		let version = self.store.set(bucket, payload.as_str(), Origin::Saved);
		debug!(%bucket, version, removed = removed.len(), "committed save");

		Ok(Notice::Saved {
			bucket: name,
			payload,
			removed,
			coverage,
		})
	}

	fn collect(
		&self,
		bucket: Bucket,
		rows: Vec<serde_json::Value>,
	) -> Result<(SweepOutcome, Coverage), SweepError> {
		let Some(resolution) = resolver::resolve(&self.store, bucket)? else {
			return Ok((SweepOutcome { kept: rows, removed: Vec::new() }, Coverage::Complete));
		};

		if let Coverage::Partial {
			missing_segments,
			meta_missing,
		} = &resolution.coverage
		{
			match self.config.unsafe_sweep {
				UnsafeSweep::Retain => {
					warn!(%bucket, ?missing_segments, meta_missing, "transaction data incomplete, keeping all rows");
					let outcome = SweepOutcome {
						kept: rows,
						removed: Vec::new(),
					};
					return Ok((outcome, resolution.coverage.clone()));
				}
				UnsafeSweep::Reject => {
					return Err(SweepError::UnsafeSweep {
						bucket: bucket.to_string(),
						missing_segments: missing_segments.clone(),
						meta_missing: *meta_missing,
					});
				}
				UnsafeSweep::Proceed => {
					warn!(%bucket, ?missing_segments, meta_missing, "sweeping against incomplete transaction data");
				}
			}
		}

		let outcome = sweep::sweep(bucket, rows, &resolution);
		Ok((outcome, resolution.coverage))
	}
}

impl std::fmt::Debug for Engine {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Engine")
			.field("store", &self.store)
			.field("initialized", &self.is_initialized())
			.field("pending", &self.queue.len())
			.finish_non_exhaustive()
	}
}
