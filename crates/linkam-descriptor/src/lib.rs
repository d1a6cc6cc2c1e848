//! Linkam T96 device descriptor
//!
//! Build-time description of one Linkam T96 temperature controller in an
//! EPICS IOC.
//!
//! # Overview
//!
//! - **DeviceParams**: raw parameters as written in the IOC definition
//! - **DeviceDescriptor**: validated instance; construction is the only
//!   point that can fail
//! - **TemplateBinding**: macros for `Linkam.template`
//! - **BootScript**: lazy, restartable boot-script lines
//! - **DependencySet**: modules, libraries and DBD files for a whole build
//!
//! # Example
//!
//! ```rust
//! use linkam_descriptor::{DeviceDescriptor, DeviceParams};
//!
//! let params = DeviceParams::new("Stage", "T1")
//!     .with_serial_port("/tmp/port")
//!     .with_virtual_port("192.168.0.5", 4001);
//! let device = DeviceDescriptor::new(params).unwrap();
//!
//! assert_eq!(device.port_name(), "T1_AP");
//! assert_eq!(device.boot_script().lines().count(), 6);
//! ```

#![warn(missing_docs)]

pub mod arginfo;
pub mod binding;
pub mod boot_script;
pub mod descriptor;
pub mod error;
pub mod support;

// Re-exports
pub use arginfo::{ArgInfo, ArgKind, ARG_INFO};
pub use binding::{MacroValue, TemplateBinding, TEMPLATE_FILE};
pub use boot_script::{BootScript, Lines};
pub use descriptor::{Connection, DeviceDescriptor, DeviceParams};
pub use error::ConfigurationError;
pub use support::DependencySet;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for descriptor users
    pub use crate::{
        BootScript, ConfigurationError, Connection, DependencySet, DeviceDescriptor, DeviceParams,
        MacroValue, TemplateBinding,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
