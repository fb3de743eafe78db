//! Message queue.
//!
//! An unbounded FIFO of [`Message`]s shared by every open handle.  Writers
//! append at the tail, readers take from the head.  Non-blocking — every
//! operation returns immediately with whatever could be done.
//!
//! All access goes through one spinlock, held only for the structural
//! change itself.  Callers never see the underlying container, and no copy
//! to or from user memory ever happens while the lock is held.

use alloc::collections::VecDeque;

use spin::Mutex;

use crate::error::QueueError;
use crate::message::Message;

/// FIFO of messages behind a spinlock.
pub struct MessageQueue {
	inner: Mutex<VecDeque<Message>>,
}

impl MessageQueue {
	/// Create a new, empty queue.
	pub const fn new() -> Self {
		Self {
			inner: Mutex::new(VecDeque::new()),
		}
	}

	/// Copy `bytes` into a new message at the tail.
	///
	/// Producers are expected to reject oversized data first; the bound is
	/// checked here as well so the queue can never hold an oversized message.
	pub fn append(&self, bytes: &[u8]) -> Result<(), QueueError> {
		let msg = Message::new(bytes).map_err(|_| QueueError::MessageTooLarge { len: bytes.len() })?;

		let mut queue = self.inner.lock();
		queue.try_reserve(1).map_err(|_| {
			log::error!("Memory allocation failed, message of {} bytes dropped", bytes.len());
			QueueError::AllocationFailure
		})?;
		queue.push_back(msg);
		Ok(())
	}

	/// Detach and return the oldest message.
	pub fn dequeue_head(&self) -> Result<Message, QueueError> {
		self.inner.lock().pop_front().ok_or_else(|| {
			log::debug!("Empty list.");
			QueueError::EmptyQueue
		})
	}

	/// Put a message taken by [`dequeue_head`](Self::dequeue_head) back at
	/// the head, ahead of everything queued since.
	pub fn restore_head(&self, msg: Message) -> Result<(), QueueError> {
		let mut queue = self.inner.lock();
		queue.try_reserve(1).map_err(|_| QueueError::AllocationFailure)?;
		queue.push_front(msg);
		Ok(())
	}

	/// Remove the first message whose bytes equal `bytes` exactly.
	pub fn remove_by_content(&self, bytes: &[u8]) -> Result<(), QueueError> {
		let mut queue = self.inner.lock();
		match queue.iter().position(|msg| msg.as_bytes() == bytes) {
			Some(index) => {
				queue.remove(index);
				Ok(())
			}
			None => {
				log::debug!("Could not find data.");
				Err(QueueError::NotFound)
			}
		}
	}

	/// Remove every message.  Returns how many were removed.
	pub fn drain(&self) -> usize {
		let mut queue = self.inner.lock();
		let count = queue.len();
		queue.clear();
		count
	}

	/// Number of queued messages.
	#[inline]
	pub fn len(&self) -> usize {
		self.inner.lock().len()
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.inner.lock().is_empty()
	}

	/// Log every queued message, oldest first.
	pub fn dump(&self) {
		if !log::log_enabled!(log::Level::Debug) {
			return;
		}
		let queue = self.inner.lock();
		for (i, msg) in queue.iter().enumerate() {
			log::debug!("Message #{}: {}", i, msg);
		}
	}
}

impl Default for MessageQueue {
	fn default() -> Self {
		Self::new()
	}
}
