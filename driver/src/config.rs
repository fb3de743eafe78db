//! Registration parameters.
//!
//! Supplied once to [`Device::init`](crate::Device::init) and fixed for the
//! lifetime of the device. The major number is never configured: the host
//! always assigns it dynamically.

/// Name the device number and node are registered under (`/dev/simple_driver`).
pub const DEVICE_NAME: &str = "simple_driver";

/// Name of the device class (`/sys/class/simple_class`).
pub const CLASS_NAME: &str = "simple_class";

/// Names used when registering the device with the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceConfig {
    /// Char-device region and device-node name.
    pub device_name: &'static str,
    /// Device-class name.
    pub class_name: &'static str,
}

impl DeviceConfig {
    /// Create a configuration with explicit names.
    pub const fn new(device_name: &'static str, class_name: &'static str) -> Self {
        Self {
            device_name,
            class_name,
        }
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self::new(DEVICE_NAME, CLASS_NAME)
    }
}
