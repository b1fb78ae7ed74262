/* src/lib.rs */

//!
//! An offline persistence engine for segmented personal-finance data.
//!
//! The crate keeps the last known value of every data bucket (accounts,
//! categories, sub-categories, transaction segments) and, before each save,
//! drops the accounts, categories and sub-categories nothing references any
//! more.
//!
//! - **holder**: The snapshot cache (`Store`).
//! - **model**: Bucket identifiers, row layouts and segment bookkeeping.
//! - **resolver**: Computes which ids are still referenced.
//! - **sweep**: Filters a candidate bucket down to live rows.
//! - **engine**: Message protocol, request queue and the `Engine` itself.
//! - **worker**: Runs an engine in its own tokio task (`Worker`).
//! - **loader** / **config**: Engine configuration from JSON or TOML.
//!
//! ## Feature Flags
//!
//! - `full`: Enables all features (default).
//! - `worker`: Enables the `worker` module.
//! - `stream`: Enables `Worker::stream`.
//! - `toml`: Enables TOML configuration files.
//! - `validate`: Validates configuration with `validator`.

pub mod config;
pub mod engine;
pub mod holder;
pub mod loader;
pub mod model;
pub mod resolver;
pub mod sweep;

#[cfg(feature = "worker")]
pub mod worker;

pub use config::{EngineConfig, UnsafeSweep};
pub use engine::{Engine, Notice, ProtocolError, Request, SweepError};
pub use holder::Store;
pub use model::{Bucket, BucketNames};

#[cfg(feature = "worker")]
pub use worker::Worker;
