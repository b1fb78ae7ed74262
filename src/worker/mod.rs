/* src/worker/mod.rs */

//!
//! The isolated execution context hosting the engine.
//!
//! A [`Worker`] owns an [`Engine`](crate::engine::Engine) inside a tokio
//! task. Requests go in through a bounded mpsc inbox and notices come out on
//! a broadcast channel; the snapshot cache is the only shared state and is
//! read-only from the caller's side.

mod handle;
mod run;

pub use handle::Worker;

#[cfg(feature = "stream")]
pub use handle::NoticeStream;

use crate::engine::ProtocolError;

/// Custom error type for the worker module.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkerError {
	/// The worker task has stopped and no longer accepts requests.
	#[error("worker is closed")]
	Closed,

	#[error("protocol error: {0}")]
	Protocol(#[from] ProtocolError),
}

/// Result type alias.
pub type Result<T> = std::result::Result<T, WorkerError>;
