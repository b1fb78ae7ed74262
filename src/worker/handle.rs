/* src/worker/handle.rs */

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use super::run::process_requests;
use super::{Result, WorkerError};
use crate::config::EngineConfig;
use crate::engine::{Engine, Notice, Request};
use crate::holder::Store;
use crate::model::{Bucket, BucketNames};

/// Handle to a running engine worker.
pub struct Worker {
	inbox: mpsc::Sender<Request>,
	events: broadcast::Sender<Notice>,
	store: Arc<Store>,
	task_handle: JoinHandle<()>,
}

impl Worker {
	/// Spawns the worker task on the current tokio runtime.
	#[must_use = "Worker must be kept alive"]
	pub fn spawn(config: EngineConfig) -> Self {
		let (inbox, rx) = mpsc::channel(config.inbox_capacity.max(1));
		let (events, _) = broadcast::channel(config.event_capacity.max(1));
		let store = Arc::new(Store::new());

		let engine = Engine::with_store(config, Arc::clone(&store));
		let tx = events.clone();
		let task_handle = tokio::spawn(async move {
			process_requests(engine, rx, tx).await;
		});

		Self {
			inbox,
			events,
			store,
			task_handle,
		}
	}

	/// Sends a request. Waits only for inbox capacity, not for completion;
	/// outcomes arrive as notices.
	pub async fn send(&self, request: Request) -> Result<()> {
		self.inbox.send(request).await.map_err(|_| WorkerError::Closed)
	}

	/// Parses a JSON wire message and sends it.
	pub async fn send_wire(&self, text: &str) -> Result<()> {
		let request = Request::from_wire(text)?;
		self.send(request).await
	}

	pub async fn init(&self, buckets: BucketNames) -> Result<()> {
		self.send(Request::Init { buckets }).await
	}

	pub async fn save(&self, bucket: impl Into<String>, payload: impl Into<String>) -> Result<()> {
		self.send(Request::Save {
			bucket: bucket.into(),
			payload: payload.into(),
		})
		.await
	}

	pub async fn direct_set(&self, bucket: impl Into<String>, value: impl Into<String>) -> Result<()> {
		self.send(Request::DirectSet {
			bucket: bucket.into(),
			value: value.into(),
		})
		.await
	}

	pub async fn collect(&self) -> Result<()> {
		self.send(Request::Collect).await
	}

	/// Subscribes to notices. Only notices sent after subscribing are seen.
	pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
		self.events.subscribe()
	}

	/// Returns the last value the engine committed for a bucket.
	pub fn snapshot(&self, bucket: Bucket) -> Option<Arc<str>> {
		self.store.get(bucket)
	}

	pub fn store(&self) -> &Arc<Store> {
		&self.store
	}

	/// Returns true while the worker task is running.
	pub fn is_running(&self) -> bool {
		!self.task_handle.is_finished()
	}

	pub fn stop(&self) {
		self.task_handle.abort();
	}
}

impl Drop for Worker {
	fn drop(&mut self) {
		self.task_handle.abort();
	}
}

impl std::fmt::Debug for Worker {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Worker")
			.field("store", &self.store)
			.field("running", &self.is_running())
			.finish_non_exhaustive()
	}
}

/// A stream of notices from a worker.
#[cfg(feature = "stream")]
pub struct NoticeStream {
	inner: tokio_stream::wrappers::BroadcastStream<Notice>,
}

#[cfg(feature = "stream")]
impl futures_util::Stream for NoticeStream {
	type Item = std::result::Result<Notice, tokio_stream::wrappers::errors::BroadcastStreamRecvError>;

	fn poll_next(
		mut self: std::pin::Pin<&mut Self>,
		cx: &mut std::task::Context<'_>,
	) -> std::task::Poll<Option<Self::Item>> {
		futures_util::Stream::poll_next(std::pin::Pin::new(&mut self.inner), cx)
	}
}

#[cfg(feature = "stream")]
impl Worker {
	pub fn stream(&self) -> NoticeStream {
		NoticeStream {
			inner: tokio_stream::wrappers::BroadcastStream::new(self.subscribe()),
		}
	}
}
