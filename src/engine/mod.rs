/* src/engine/mod.rs */

//!
//! The persistence engine behind the worker boundary.
//!
//! - [`Request`] / [`Notice`] - inbound and outbound messages
//! - [`RequestQueue`] - FIFO of pending saves
//! - [`Engine`] - protocol state machine, drain loop and sweep pipeline

mod error;
mod protocol;
mod queue;
mod state;

pub use error::{ProtocolError, SweepError};
pub use protocol::{Notice, Request};
pub use queue::RequestQueue;
pub use state::Engine;
