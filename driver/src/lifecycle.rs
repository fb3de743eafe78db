// =============================================================================
// simple-driver — Device Lifecycle (init / exit)
// =============================================================================
//
// Bring-up acquires three host handles, in this order:
//
//   1. device number  — register_chrdev(0, name): the host picks the major
//   2. device class   — class_create(class_name)
//   3. device node    — device_create(class, MKDEV(major, 0), name)
//
// and then creates the empty message queue. Either all three are held or
// none are: when a step fails, everything acquired before it is released in
// reverse order before the error is returned.
//
// Teardown releases the same handles in reverse order:
//
//   device_destroy → class_unregister → class_destroy → unregister_chrdev
//
// Teardown never fails from the caller's point of view. A host call that
// reports an error is logged and the remaining steps still run.
//
// There is no global device state. `Device::init` returns the context
// object, file handles borrow it, and `Device::exit` (or dropping it) tears
// it down.
//
// =============================================================================

use core::sync::atomic::{AtomicUsize, Ordering};

use bitflags::bitflags;

use crate::config::DeviceConfig;
use crate::devno::DevNum;
use crate::error::{RegistrationError, TeardownError};
use crate::host::DeviceHost;
use crate::queue::MessageQueue;

bitflags! {
    /// Host handles currently held by the driver.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Acquired: u8 {
        /// A major number from `register_chrdev`.
        const NUMBER = 1 << 0;
        /// A class from `class_create`.
        const CLASS = 1 << 1;
        /// A node from `device_create`.
        const NODE = 1 << 2;
    }
}

/// The handles acquired so far, released as a unit.
struct Registration<H: DeviceHost> {
    major: Option<u32>,
    class: Option<H::Class>,
    node: Option<H::Node>,
}

impl<H: DeviceHost> Registration<H> {
    const fn empty() -> Self {
        Self {
            major: None,
            class: None,
            node: None,
        }
    }

    fn acquired(&self) -> Acquired {
        let mut set = Acquired::empty();
        set.set(Acquired::NUMBER, self.major.is_some());
        set.set(Acquired::CLASS, self.class.is_some());
        set.set(Acquired::NODE, self.node.is_some());
        set
    }

    /// Acquire number, class and node in order, recording each as it lands.
    ///
    /// On error the handles acquired before the failing step stay recorded
    /// so the caller can release them.
    fn acquire(&mut self, host: &H, config: &DeviceConfig) -> Result<(), RegistrationError> {
        let major = host
            .register_chrdev(0, config.device_name)
            .map_err(RegistrationError::NumberUnavailable)?;
        self.major = Some(major);
        log::info!("registered correctly with major number {}", major);

        let class = host
            .class_create(config.class_name)
            .map_err(RegistrationError::ClassCreationFailed)?;
        let class = self.class.insert(class);
        log::info!("device class registered correctly");

        let node = host
            .device_create(class, DevNum::new(major, 0), config.device_name)
            .map_err(RegistrationError::NodeCreationFailed)?;
        self.node = Some(node);
        log::info!("device class created");

        Ok(())
    }

    /// Release every recorded handle in reverse order of acquisition.
    ///
    /// Safe to call more than once; released handles are forgotten.
    fn release(&mut self, host: &H, config: &DeviceConfig) {
        let acquired = self.acquired();
        if acquired.is_empty() {
            return;
        }
        log::debug!("releasing {:?}", acquired);

        if let Some(major) = self.major {
            if let Some(class) = self.class.as_ref() {
                if let Some(node) = self.node.take() {
                    report("device_destroy", host.device_destroy(class, DevNum::new(major, 0), node));
                }
            }
        }
        if let Some(class) = self.class.take() {
            report("class_unregister", host.class_unregister(&class));
            report("class_destroy", host.class_destroy(class));
        }
        if let Some(major) = self.major.take() {
            report("unregister_chrdev", host.unregister_chrdev(major, config.device_name));
        }
    }
}

fn report(step: &str, result: Result<(), TeardownError>) {
    if let Err(e) = result {
        log::warn!("{} failed during teardown: {}", step, e);
    }
}

/// A registered message-queue character device.
///
/// Exactly one exists between a successful [`init`](Self::init) and
/// [`exit`](Self::exit).
pub struct Device<H: DeviceHost> {
    host: H,
    config: DeviceConfig,
    registration: Registration<H>,
    pub(crate) queue: MessageQueue,
    pub(crate) opens: AtomicUsize,
    pub(crate) active: AtomicUsize,
}

impl<H: DeviceHost> Device<H> {
    /// Register the device with `host` and create an empty queue.
    ///
    /// Nothing stays registered if this returns an error.
    pub fn init(host: H, config: DeviceConfig) -> Result<Self, RegistrationError> {
        log::info!("initializing {}", config.device_name);

        let mut registration = Registration::empty();
        if let Err(e) = registration.acquire(&host, &config) {
            registration.release(&host, &config);
            log::error!("{}", e);
            return Err(e);
        }

        Ok(Self {
            host,
            config,
            registration,
            queue: MessageQueue::new(),
            opens: AtomicUsize::new(0),
            active: AtomicUsize::new(0),
        })
    }

    /// Unregister the device.
    ///
    /// Messages still queued are discarded. Teardown errors reported by the
    /// host are logged; every step runs regardless.
    pub fn exit(mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        if self.registration.acquired().is_empty() {
            return;
        }
        let discarded = self.queue.drain();
        if discarded > 0 {
            log::info!("discarded {} queued message(s)", discarded);
        }
        self.registration.release(&self.host, &self.config);
        log::info!("goodbye");
    }

    /// The device number of the node (`major:0`).
    pub fn dev_num(&self) -> Option<DevNum> {
        self.registration.major.map(|major| DevNum::new(major, 0))
    }

    /// Handles currently held.
    pub fn acquired(&self) -> Acquired {
        self.registration.acquired()
    }

    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    /// The queue shared by every handle.
    pub fn queue(&self) -> &MessageQueue {
        &self.queue
    }

    /// Times the device has been opened. Never decreases.
    pub fn open_count(&self) -> usize {
        self.opens.load(Ordering::Relaxed)
    }

    /// Handles opened and not yet released.
    pub fn active_handles(&self) -> usize {
        self.active.load(Ordering::Relaxed)
    }
}

impl<H: DeviceHost> Drop for Device<H> {
    fn drop(&mut self) {
        self.teardown();
    }
}
