//! File operations — open, read, write, release.
//!
//! A [`FileHandle`] is an open file on the device node.  Holding one means
//! the handle is open; [`FileHandle::release`] consumes it, so a closed
//! handle cannot be read from or written to.
//!
//! Every handle shares the device's single queue:
//!
//! - `write` appends one message (the whole buffer) or nothing at all;
//! - `read` delivers one whole message per call, never a fragment and never
//!   two messages coalesced.
//!
//! Neither call blocks.  An empty queue reads as 0 bytes; an empty write, or
//! one at or over [`MSG_SIZE`] bytes, is accepted as 0 bytes.

use core::sync::atomic::Ordering;

use crate::error::IoError;
use crate::host::{Caller, DeviceHost};
use crate::lifecycle::Device;
use crate::message::MSG_SIZE;
use crate::uaccess::{UserSliceReader, UserSliceWriter};

impl<H: DeviceHost> Device<H> {
    /// Open the device.  Always succeeds.
    pub fn open(&self, caller: Caller<'_>) -> FileHandle<'_, H> {
        let opens = self.opens.fetch_add(1, Ordering::Relaxed) + 1;
        self.active.fetch_add(1, Ordering::Relaxed);
        log::info!("device has been opened {} time(s)", opens);
        log::info!("Process id: {}, name: {}", caller.pid, caller.name);
        FileHandle { device: self }
    }
}

/// An open file on the device.
pub struct FileHandle<'a, H: DeviceHost> {
    device: &'a Device<H>,
}

impl<H: DeviceHost> FileHandle<'_, H> {
    /// Queue the contents of `src` as one message.
    ///
    /// Returns the number of bytes accepted: `src.len()` on success, or 0 if
    /// `src` is empty or at or over the size bound (the queue is left
    /// untouched). An empty message is never queued, so a 0-byte read always
    /// means the queue is empty.
    pub fn write(&self, mut src: impl UserSliceReader) -> Result<usize, IoError> {
        let len = src.len();
        if len >= MSG_SIZE {
            log::info!("too many characters to deal with ({})", len);
            return Ok(0);
        }
        if len == 0 {
            return Ok(0);
        }

        let mut buf = [0u8; MSG_SIZE];
        let data = &mut buf[..len];
        if let Err(e) = src.read_slice(data) {
            log::info!("failed to receive {} characters from the user", len);
            return Err(e);
        }

        self.device.queue.append(data)?;
        self.device.queue.dump();
        log::info!("received {} characters from the user", len);
        Ok(len)
    }

    /// Copy the oldest message into `dst` and remove it from the queue.
    ///
    /// Returns the message length, or 0 if the queue is empty.
    ///
    /// The message is taken off the queue before the copy, with the lock
    /// released.  If `dst` is too small or faults, the message is put back
    /// at the head and the error is returned. The message is only lost if the
    /// queue cannot grow to take it back, which is logged as an error.
    pub fn read(&self, mut dst: impl UserSliceWriter) -> Result<usize, IoError> {
        let queue = &self.device.queue;

        // Skip empty entries queued directly through `Device::queue`.
        let msg = loop {
            match queue.dequeue_head() {
                Ok(msg) if msg.is_empty() => continue,
                Ok(msg) => break msg,
                Err(_) => {
                    log::info!("no data");
                    return Ok(0);
                }
            }
        };

        let capacity = dst.capacity();
        let result = if msg.len() > capacity {
            Err(IoError::ShortBuffer {
                needed: msg.len(),
                capacity,
            })
        } else {
            dst.write_slice(msg.as_bytes())
        };

        match result {
            Ok(()) => {
                log::info!("sent {} characters to the user", msg.len());
                Ok(msg.len())
            }
            Err(e) => {
                log::info!("failed to send {} characters to the user: {}", msg.len(), e);
                if let Err(restore) = queue.restore_head(msg) {
                    log::error!("message lost, could not requeue it: {}", restore);
                }
                Err(e)
            }
        }
    }

    /// Close the handle.  Always succeeds.
    pub fn release(self) {
        // Drop does the work.
    }
}

impl<H: DeviceHost> Drop for FileHandle<'_, H> {
    fn drop(&mut self) {
        self.device.active.fetch_sub(1, Ordering::Relaxed);
        log::info!("device successfully closed");
    }
}
