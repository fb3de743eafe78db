//! User-memory access.
//!
//! Buffers passed to `read(2)`/`write(2)` live in the calling process and may
//! be unmapped, read-only or simply too short. Copies across that boundary
//! can therefore fail on their own, independently of the queue. The host
//! wraps each user buffer in one of the traits below (its `copy_to_user` /
//! `copy_from_user`); in-kernel callers can pass plain slices, which never
//! fault.

use crate::error::IoError;

/// A user buffer the driver reads from (the source of a `write`).
pub trait UserSliceReader {
    /// Bytes the caller offered.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy exactly `dst.len()` bytes from the front of the user buffer.
    ///
    /// Fails with [`IoError::UserCopyFault`] if any byte is inaccessible.
    fn read_slice(&mut self, dst: &mut [u8]) -> Result<(), IoError>;
}

/// A user buffer the driver writes to (the destination of a `read`).
pub trait UserSliceWriter {
    /// Bytes the caller has room for.
    fn capacity(&self) -> usize;

    /// Copy all of `src` to the front of the user buffer.
    ///
    /// Fails with [`IoError::UserCopyFault`] if any byte is inaccessible.
    fn write_slice(&mut self, src: &[u8]) -> Result<(), IoError>;
}

impl UserSliceReader for &[u8] {
    fn len(&self) -> usize {
        <[u8]>::len(self)
    }

    fn read_slice(&mut self, dst: &mut [u8]) -> Result<(), IoError> {
        let src: &[u8] = *self;
        if dst.len() > src.len() {
            return Err(IoError::UserCopyFault {
                missing: dst.len() - src.len(),
            });
        }
        let (head, tail) = src.split_at(dst.len());
        dst.copy_from_slice(head);
        *self = tail;
        Ok(())
    }
}

impl UserSliceWriter for &mut [u8] {
    fn capacity(&self) -> usize {
        <[u8]>::len(self)
    }

    fn write_slice(&mut self, src: &[u8]) -> Result<(), IoError> {
        let capacity = <[u8]>::len(self);
        if src.len() > capacity {
            return Err(IoError::UserCopyFault {
                missing: src.len() - capacity,
            });
        }
        let buf = core::mem::take(self);
        let (head, tail) = buf.split_at_mut(src.len());
        head.copy_from_slice(src);
        *self = tail;
        Ok(())
    }
}
