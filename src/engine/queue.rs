/* src/engine/queue.rs */

use std::collections::VecDeque;

/// A FIFO of pending work with an explicit draining flag.
///
/// No priority, deduplication or merging: two entries for the same bucket
/// stay two entries.
#[derive(Debug)]
pub struct RequestQueue<T> {
	items: VecDeque<T>,
	draining: bool,
}

impl<T> RequestQueue<T> {
	pub fn new() -> Self {
		Self {
			items: VecDeque::new(),
			draining: false,
		}
	}

	/// Appends an item. Returns true if the queue was idle, in which case the
	/// caller is responsible for draining it.
	#[must_use = "an idle queue must be drained by the caller"]
	pub fn enqueue(&mut self, item: T) -> bool {
		self.items.push_back(item);
		if self.draining {
			false
		} else {
			self.draining = true;
			true
		}
	}

	/// Takes the head item. Marks the queue idle once it runs dry.
	pub fn next(&mut self) -> Option<T> {
		let item = self.items.pop_front();
		if item.is_none() {
			self.draining = false;
		}
		item
	}

	pub fn is_draining(&self) -> bool {
		self.draining
	}

	pub fn len(&self) -> usize {
		self.items.len()
	}

	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}
}

impl<T> Default for RequestQueue<T> {
	fn default() -> Self {
		Self::new()
	}
}
