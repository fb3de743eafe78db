//! Stub host and user buffers shared by the integration tests.
#![allow(dead_code)]

use std::sync::Mutex;

use simple_driver::{DevNum, DeviceHost, Errno, IoError, TeardownError, UserSliceReader, UserSliceWriter};

/// Major number the stub hands out.
pub const MAJOR: u32 = 240;

/// One call made by the driver into the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    RegisterChrdev { major: u32, name: String },
    UnregisterChrdev { major: u32, name: String },
    ClassCreate { name: String },
    ClassUnregister,
    ClassDestroy,
    DeviceCreate { dev: DevNum, name: String },
    DeviceDestroy { dev: DevNum },
}

/// Which acquisition step the stub should refuse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailAt {
    Nothing,
    Number,
    Class,
    Node,
}

#[derive(Debug)]
pub struct ClassStub(pub String);

#[derive(Debug)]
pub struct NodeStub(pub DevNum);

/// Records every call; optionally fails one acquisition step or every
/// teardown step.
pub struct HostStub {
    calls: Mutex<Vec<Call>>,
    fail_at: FailAt,
    fail_teardown: bool,
}

impl HostStub {
    pub fn new() -> Self {
        Self::failing_at(FailAt::Nothing)
    }

    pub fn failing_at(fail_at: FailAt) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_at,
            fail_teardown: false,
        }
    }

    pub fn failing_teardown() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_at: FailAt::Nothing,
            fail_teardown: true,
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn teardown_result(&self) -> Result<(), TeardownError> {
        if self.fail_teardown {
            Err(TeardownError(Errno::EBUSY))
        } else {
            Ok(())
        }
    }
}

impl DeviceHost for HostStub {
    type Class = ClassStub;
    type Node = NodeStub;

    fn register_chrdev(&self, major: u32, name: &str) -> Result<u32, Errno> {
        self.record(Call::RegisterChrdev { major, name: name.into() });
        if self.fail_at == FailAt::Number {
            return Err(Errno::EBUSY);
        }
        Ok(MAJOR)
    }

    fn unregister_chrdev(&self, major: u32, name: &str) -> Result<(), TeardownError> {
        self.record(Call::UnregisterChrdev { major, name: name.into() });
        self.teardown_result()
    }

    fn class_create(&self, name: &str) -> Result<ClassStub, Errno> {
        self.record(Call::ClassCreate { name: name.into() });
        if self.fail_at == FailAt::Class {
            return Err(Errno::ENOMEM);
        }
        Ok(ClassStub(name.into()))
    }

    fn class_unregister(&self, _class: &ClassStub) -> Result<(), TeardownError> {
        self.record(Call::ClassUnregister);
        self.teardown_result()
    }

    fn class_destroy(&self, _class: ClassStub) -> Result<(), TeardownError> {
        self.record(Call::ClassDestroy);
        self.teardown_result()
    }

    fn device_create(&self, _class: &ClassStub, dev: DevNum, name: &str) -> Result<NodeStub, Errno> {
        self.record(Call::DeviceCreate { dev, name: name.into() });
        if self.fail_at == FailAt::Node {
            return Err(Errno::ENODEV);
        }
        Ok(NodeStub(dev))
    }

    fn device_destroy(&self, _class: &ClassStub, dev: DevNum, _node: NodeStub) -> Result<(), TeardownError> {
        self.record(Call::DeviceDestroy { dev });
        self.teardown_result()
    }
}

/// A user buffer whose pages are not mapped: every copy faults.
pub struct FaultingBuffer {
    pub len: usize,
}

impl UserSliceReader for FaultingBuffer {
    fn len(&self) -> usize {
        self.len
    }

    fn read_slice(&mut self, dst: &mut [u8]) -> Result<(), IoError> {
        Err(IoError::UserCopyFault { missing: dst.len() })
    }
}

impl UserSliceWriter for FaultingBuffer {
    fn capacity(&self) -> usize {
        self.len
    }

    fn write_slice(&mut self, src: &[u8]) -> Result<(), IoError> {
        Err(IoError::UserCopyFault { missing: src.len() })
    }
}
