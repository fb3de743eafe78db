//! Host kernel services.
//!
//! The driver never talks to the host kernel directly. Everything it needs
//! to become visible to user processes goes through [`DeviceHost`]:
//!
//! | acquire             | release                                 |
//! |---------------------|-----------------------------------------|
//! | `register_chrdev`   | `unregister_chrdev`                     |
//! | `class_create`      | `class_unregister`, `class_destroy`     |
//! | `device_create`     | `device_destroy`                        |
//!
//! Release calls cannot be refused by the driver; a `TeardownError` is only
//! ever logged.

use crate::devno::DevNum;
use crate::error::{Errno, TeardownError};

/// Registration services provided by the host kernel.
pub trait DeviceHost {
    /// Handle to a registered device class.
    type Class;
    /// Handle to a created device node.
    type Node;

    /// Register a character device region.
    ///
    /// `major == 0` asks the host to pick a free major number. Returns the
    /// major number actually registered.
    fn register_chrdev(&self, major: u32, name: &str) -> Result<u32, Errno>;

    /// Release a region obtained from [`register_chrdev`](Self::register_chrdev).
    fn unregister_chrdev(&self, major: u32, name: &str) -> Result<(), TeardownError>;

    /// Register a device class.
    fn class_create(&self, name: &str) -> Result<Self::Class, Errno>;

    /// Remove a class from the host's class list.
    fn class_unregister(&self, class: &Self::Class) -> Result<(), TeardownError>;

    /// Free a class object.
    fn class_destroy(&self, class: Self::Class) -> Result<(), TeardownError>;

    /// Create the device node `dev` under `class`.
    fn device_create(&self, class: &Self::Class, dev: DevNum, name: &str) -> Result<Self::Node, Errno>;

    /// Remove the node `dev` from `class`.
    fn device_destroy(&self, class: &Self::Class, dev: DevNum, node: Self::Node) -> Result<(), TeardownError>;
}

/// A shared host (typically a `static`) is as good as an owned one.
impl<T: DeviceHost + ?Sized> DeviceHost for &T {
    type Class = T::Class;
    type Node = T::Node;

    fn register_chrdev(&self, major: u32, name: &str) -> Result<u32, Errno> {
        (**self).register_chrdev(major, name)
    }

    fn unregister_chrdev(&self, major: u32, name: &str) -> Result<(), TeardownError> {
        (**self).unregister_chrdev(major, name)
    }

    fn class_create(&self, name: &str) -> Result<Self::Class, Errno> {
        (**self).class_create(name)
    }

    fn class_unregister(&self, class: &Self::Class) -> Result<(), TeardownError> {
        (**self).class_unregister(class)
    }

    fn class_destroy(&self, class: Self::Class) -> Result<(), TeardownError> {
        (**self).class_destroy(class)
    }

    fn device_create(&self, class: &Self::Class, dev: DevNum, name: &str) -> Result<Self::Node, Errno> {
        (**self).device_create(class, dev, name)
    }

    fn device_destroy(&self, class: &Self::Class, dev: DevNum, node: Self::Node) -> Result<(), TeardownError> {
        (**self).device_destroy(class, dev, node)
    }
}

/// The process on whose behalf a file operation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller<'a> {
    /// Process id.
    pub pid: u32,
    /// Command name (`comm`).
    pub name: &'a str,
}

impl<'a> Caller<'a> {
    pub const fn new(pid: u32, name: &'a str) -> Self {
        Self { pid, name }
    }
}
