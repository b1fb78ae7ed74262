/* src/worker/run.rs */

use tokio::sync::{broadcast, mpsc};

use crate::engine::{Engine, Notice, Request};

/// The worker loop.
///
/// A save that finds the queue idle starts a drain. Before draining, every
/// message already sitting in the inbox is pulled: saves join the queue
/// behind it, while the first other message is held back until the drain
/// has finished. The drain itself never yields, so a long burst of saves
/// delays any `init` or `directSet` queued behind it.
pub(crate) async fn process_requests(
	mut engine: Engine,
	mut inbox: mpsc::Receiver<Request>,
	events: broadcast::Sender<Notice>,
) {
	let mut held: Option<Request> = None;

	loop {
		let request = match held.take() {
			Some(request) => request,
			None => match inbox.recv().await {
				Some(request) => request,
				None => break,
			},
		};

		if !submit(&mut engine, request, &events) {
			continue;
		}

		while let Ok(next) = inbox.try_recv() {
			if !next.is_queued() {
				held = Some(next);
				break;
			}
			submit(&mut engine, next, &events);
		}

		engine.drain(|notice| {
			let _ = events.send(notice);
		});
	}

	tracing::debug!("worker inbox closed");
}

/// Submits one request, publishing a rejection on protocol errors. Returns
/// true if a drain must follow.
fn submit(engine: &mut Engine, request: Request, events: &broadcast::Sender<Notice>) -> bool {
	match engine.submit(request) {
		Ok(needs_drain) => needs_drain,
		Err(error) => {
			tracing::warn!(%error, "rejected request");
			let _ = events.send(Notice::Rejected { error });
			false
		}
	}
}
