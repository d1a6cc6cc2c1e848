//! Testing utilities for the Linkam IOC workspace
//!
//! Shared fixtures for descriptor and builder tests.

#![allow(missing_docs)]

use linkam_descriptor::{DeviceDescriptor, DeviceParams};

pub const BRIDGE_ADDRESS: &str = "192.168.0.5";
pub const BRIDGE_PORT: u16 = 4001;
pub const BRIDGE_LINK: &str = "/tmp/port";

pub fn serial_params(prefix: &str) -> DeviceParams {
    DeviceParams::new(format!("Stage {prefix}"), prefix)
}

pub fn virtual_params(prefix: &str) -> DeviceParams {
    serial_params(prefix)
        .with_serial_port(BRIDGE_LINK)
        .with_virtual_port(BRIDGE_ADDRESS, BRIDGE_PORT)
}

pub fn serial_device(prefix: &str) -> DeviceDescriptor {
    DeviceDescriptor::new(serial_params(prefix)).unwrap()
}

pub fn virtual_device(prefix: &str) -> DeviceDescriptor {
    DeviceDescriptor::new(virtual_params(prefix)).unwrap()
}

/// Two-device IOC definition: one serial, one bridged
pub const SAMPLE_IOC_YAML: &str = r#"
ioc_name: BL-EA-IOC-01
description: Sample environment
devices:
  - name: Hot stage
    P: "BL:T96:01"
    log_path: /var/log/linkam/hot.log
  - name: Cryo stage
    P: "BL:T96:02"
    serial_port: /tmp/port
    virtual_port: true
    ip_address: 192.168.0.5
    ip_port: 4001
"#;
