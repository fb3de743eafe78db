// =============================================================================
// simple-driver — Crate Root
// =============================================================================
//
// A generic character device that relays short messages between processes.
//
//   write(2) on the device node  → message appended to the queue tail
//   read(2)  on the device node  → head message copied out and removed
//
// MODULE MAP:
//   config.rs    — registration parameters (device name, class name)
//   devno.rs     — major:minor device numbers
//   error.rs     — errno values and the driver's error enums
//   host.rs      — what the driver needs from the host kernel
//   uaccess.rs   — copies across the user/kernel boundary
//   message.rs   — one bounded message
//   queue.rs     — the FIFO of messages, behind a spinlock
//   lifecycle.rs — init/exit: register and unregister the device
//   fops.rs      — open/read/write/release on a device handle
//
// ENVIRONMENT:
//   #![no_std] + alloc when built for the kernel. Under `cargo test` the
//   standard library is linked so the unit tests can use threads.
//
// =============================================================================

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod config;
pub mod devno;
pub mod error;
pub mod fops;
pub mod host;
pub mod lifecycle;
pub mod message;
pub mod queue;
pub mod uaccess;

pub use config::{DeviceConfig, CLASS_NAME, DEVICE_NAME};
pub use devno::DevNum;
pub use error::{Errno, IoError, QueueError, RegistrationError, TeardownError};
pub use fops::FileHandle;
pub use host::{Caller, DeviceHost};
pub use lifecycle::{Acquired, Device};
pub use message::{Message, MSG_SIZE};
pub use queue::MessageQueue;
pub use uaccess::{UserSliceReader, UserSliceWriter};
