//! Messages — the unit moved through the device.
//!
//! A message is a short byte string stored inline: no separate heap
//! allocation, so queueing a message only ever grows the queue itself.
//! Messages are byte strings, not C strings; embedded NULs are kept.

use core::fmt;

use crate::error::IoError;

/// Size bound for a message.  A message holds at most `MSG_SIZE - 1` bytes.
pub const MSG_SIZE: usize = 128;

/// One queued message.
///
/// Immutable once created.  Equality compares only the meaningful bytes.
#[derive(Clone, Copy)]
pub struct Message {
	data: [u8; MSG_SIZE],
	len: u8,
}

impl Message {
	/// Copy `bytes` into a new message.
	///
	/// Fails with [`IoError::OversizedWrite`] if `bytes.len() >= MSG_SIZE`.
	pub fn new(bytes: &[u8]) -> Result<Self, IoError> {
		if bytes.len() >= MSG_SIZE {
			return Err(IoError::OversizedWrite { len: bytes.len() });
		}
		let mut data = [0u8; MSG_SIZE];
		data[..bytes.len()].copy_from_slice(bytes);
		Ok(Self {
			data,
			len: bytes.len() as u8,
		})
	}

	/// The message bytes.
	#[inline]
	pub fn as_bytes(&self) -> &[u8] {
		&self.data[..self.len()]
	}

	/// Number of bytes in the message.
	#[inline]
	pub fn len(&self) -> usize {
		usize::from(self.len)
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.len == 0
	}
}

impl PartialEq for Message {
	fn eq(&self, other: &Self) -> bool {
		self.as_bytes() == other.as_bytes()
	}
}

impl Eq for Message {}

impl PartialEq<[u8]> for Message {
	fn eq(&self, other: &[u8]) -> bool {
		self.as_bytes() == other
	}
}

impl fmt::Debug for Message {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Message")
			.field("len", &self.len)
			.field("data", &format_args!("\"{}\"", self.as_bytes().escape_ascii()))
			.finish()
	}
}

/// Renders the bytes as text, escaping anything that is not printable ASCII.
impl fmt::Display for Message {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Display::fmt(&self.as_bytes().escape_ascii(), f)
	}
}
