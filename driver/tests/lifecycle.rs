//! Bring-up and teardown against a recording host.
//!
//! TEST_SCOPE:
//!   - Registration order: number → class → node
//!   - Unwinding after a failed step releases exactly what was acquired
//!   - Teardown order and its tolerance of host errors
//!   - Queued messages are discarded at exit

mod common;

use common::{Call, FailAt, HostStub, MAJOR};
use simple_driver::{Acquired, Caller, DevNum, Device, DeviceConfig, Errno, RegistrationError};

fn register_calls() -> Vec<Call> {
    vec![
        Call::RegisterChrdev { major: 0, name: "simple_driver".into() },
        Call::ClassCreate { name: "simple_class".into() },
        Call::DeviceCreate { dev: DevNum::new(MAJOR, 0), name: "simple_driver".into() },
    ]
}

fn teardown_calls() -> Vec<Call> {
    vec![
        Call::DeviceDestroy { dev: DevNum::new(MAJOR, 0) },
        Call::ClassUnregister,
        Call::ClassDestroy,
        Call::UnregisterChrdev { major: MAJOR, name: "simple_driver".into() },
    ]
}

#[test]
fn init_registers_all_three_handles() {
    let host = HostStub::new();
    let device = Device::init(&host, DeviceConfig::default()).unwrap();

    assert_eq!(device.acquired(), Acquired::all());
    assert_eq!(device.dev_num(), Some(DevNum::new(MAJOR, 0)));
    assert!(device.queue().is_empty());
    assert_eq!(host.calls(), register_calls());
}

#[test]
fn number_failure_has_nothing_to_unwind() {
    let host = HostStub::failing_at(FailAt::Number);
    let err = Device::init(&host, DeviceConfig::default()).err();

    assert_eq!(err, Some(RegistrationError::NumberUnavailable(Errno::EBUSY)));
    assert_eq!(host.calls(), register_calls()[..1]);
}

#[test]
fn class_failure_releases_the_device_number() {
    let host = HostStub::failing_at(FailAt::Class);
    let err = Device::init(&host, DeviceConfig::default()).err().unwrap();

    assert_eq!(err, RegistrationError::ClassCreationFailed(Errno::ENOMEM));
    assert_eq!(err.errno().to_status(), -12);

    let mut expected = register_calls()[..2].to_vec();
    expected.push(Call::UnregisterChrdev { major: MAJOR, name: "simple_driver".into() });
    assert_eq!(host.calls(), expected);
}

#[test]
fn node_failure_releases_class_then_number() {
    let host = HostStub::failing_at(FailAt::Node);
    let err = Device::init(&host, DeviceConfig::default()).err();

    assert_eq!(err, Some(RegistrationError::NodeCreationFailed(Errno::ENODEV)));

    let mut expected = register_calls();
    expected.extend([
        Call::ClassUnregister,
        Call::ClassDestroy,
        Call::UnregisterChrdev { major: MAJOR, name: "simple_driver".into() },
    ]);
    assert_eq!(host.calls(), expected);
}

#[test]
fn exit_tears_down_in_reverse_order() {
    let host = HostStub::new();
    Device::init(&host, DeviceConfig::default()).unwrap().exit();

    let mut expected = register_calls();
    expected.extend(teardown_calls());
    assert_eq!(host.calls(), expected);
}

#[test]
fn exit_runs_every_step_even_when_the_host_complains() {
    let host = HostStub::failing_teardown();
    Device::init(&host, DeviceConfig::default()).unwrap().exit();

    let calls = host.calls();
    assert_eq!(calls[3..], teardown_calls()[..]);
}

#[test]
fn dropping_the_device_also_tears_down() {
    let host = HostStub::new();
    {
        let _device = Device::init(&host, DeviceConfig::default()).unwrap();
    }
    assert_eq!(host.calls()[3..], teardown_calls()[..]);
}

#[test]
fn exit_discards_queued_messages() {
    let host = HostStub::new();
    let device = Device::init(&host, DeviceConfig::default()).unwrap();
    {
        let file = device.open(Caller::new(1, "writer"));
        assert_eq!(file.write(&b"left behind"[..]), Ok(11));
        file.release();
    }
    assert_eq!(device.queue().len(), 1);
    device.exit();
    assert_eq!(host.calls().len(), 7);
}

#[test]
fn custom_names_reach_the_host() {
    let host = HostStub::new();
    let config = DeviceConfig::new("relay", "relay_class");
    let device = Device::init(&host, config).unwrap();

    assert_eq!(device.config(), &config);
    assert_eq!(
        host.calls(),
        vec![
            Call::RegisterChrdev { major: 0, name: "relay".into() },
            Call::ClassCreate { name: "relay_class".into() },
            Call::DeviceCreate { dev: DevNum::new(MAJOR, 0), name: "relay".into() },
        ]
    );
}
