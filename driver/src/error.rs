//! Error types.
//!
//! Three families, matching how far a failure reaches:
//!
//! - [`RegistrationError`] — bring-up failed; the device never comes into
//!   existence. Everything acquired so far has been released before the
//!   error is returned.
//! - [`QueueError`] — a queue operation could not be carried out. Local to
//!   the call.
//! - [`IoError`] — a read or write on a handle failed. Local to the call;
//!   the device keeps serving other calls.
//!
//! The host kernel speaks in negative errno values, so every error that can
//! leave the driver maps onto an [`Errno`].

use core::fmt;

use thiserror::Error;

/// A host error number (positive, as in `<errno.h>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Errno(pub i32);

impl Errno {
    /// Out of memory.
    pub const ENOMEM: Errno = Errno(12);
    /// Bad address.
    pub const EFAULT: Errno = Errno(14);
    /// Device or resource busy.
    pub const EBUSY: Errno = Errno(16);
    /// No such device.
    pub const ENODEV: Errno = Errno(19);
    /// Invalid argument.
    pub const EINVAL: Errno = Errno(22);

    /// The value returned to the host: the negated errno.
    #[inline]
    pub const fn to_status(self) -> i32 {
        -self.0
    }
}

impl fmt::Display for Errno {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "errno {}", self.0)
    }
}

/// Bring-up failure. Fatal to [`Device::init`](crate::Device::init).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// The host refused to allocate a major number.
    #[error("failed to register a major number ({0})")]
    NumberUnavailable(Errno),
    /// The device class could not be registered.
    #[error("failed to register device class ({0})")]
    ClassCreationFailed(Errno),
    /// The device node could not be created.
    #[error("failed to create the device ({0})")]
    NodeCreationFailed(Errno),
}

impl RegistrationError {
    /// The host error that caused the failure.
    pub const fn errno(self) -> Errno {
        match self {
            Self::NumberUnavailable(e) | Self::ClassCreationFailed(e) | Self::NodeCreationFailed(e) => e,
        }
    }
}

/// Failure of a single [`MessageQueue`](crate::MessageQueue) operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueueError {
    /// Nothing to dequeue.
    #[error("empty list")]
    EmptyQueue,
    /// No message matched the requested content.
    #[error("could not find data")]
    NotFound,
    /// The queue could not grow.
    #[error("memory allocation failed")]
    AllocationFailure,
    /// The message does not fit under the size bound.
    #[error("message of {len} bytes exceeds the size bound")]
    MessageTooLarge { len: usize },
}

impl QueueError {
    /// Errno reported to the host if this error escapes a file operation.
    pub const fn errno(self) -> Errno {
        match self {
            Self::AllocationFailure => Errno::ENOMEM,
            Self::EmptyQueue | Self::NotFound | Self::MessageTooLarge { .. } => Errno::EINVAL,
        }
    }
}

/// Failure of a read or write on an open handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IoError {
    /// The write is at or over the message size bound.
    #[error("too many characters to deal with ({len})")]
    OversizedWrite { len: usize },
    /// The user buffer could not be fully accessed.
    #[error("failed to copy {missing} bytes across the user boundary")]
    UserCopyFault { missing: usize },
    /// The destination cannot hold the whole head message.
    #[error("message of {needed} bytes does not fit in a {capacity} byte buffer")]
    ShortBuffer { needed: usize, capacity: usize },
    /// The queue rejected the operation.
    #[error(transparent)]
    Queue(#[from] QueueError),
}

impl IoError {
    /// Errno reported to the host (`-EFAULT` for a bad user buffer).
    pub const fn errno(self) -> Errno {
        match self {
            Self::UserCopyFault { .. } => Errno::EFAULT,
            Self::OversizedWrite { .. } | Self::ShortBuffer { .. } => Errno::EINVAL,
            Self::Queue(e) => e.errno(),
        }
    }
}

/// A host teardown call reported a failure.
///
/// Teardown cannot be refused, so these are logged and otherwise dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("teardown failed ({0})")]
pub struct TeardownError(pub Errno);
