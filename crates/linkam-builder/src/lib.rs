//! Linkam T96 IOC builder
//!
//! Loads an IOC definition, validates every Linkam device in it and renders
//! the files the IOC build consumes.
//!
//! # Pipeline
//!
//! ```text
//! ioc.yaml → IocDefinition → IocBuild → { .substitutions, st.cmd.linkam, dependencies.yaml }
//! ```
//!
//! # Example
//!
//! ```rust
//! use linkam_builder::{IocBuild, IocDefinition};
//! use linkam_descriptor::DeviceParams;
//!
//! let definition = IocDefinition::new("TEST-IOC")
//!     .with_device(DeviceParams::new("Stage", "T1"));
//! let build = IocBuild::new(definition).unwrap();
//!
//! assert!(build.render_startup().contains("linkamConnect \"T1_AP\""));
//! ```

#![warn(missing_docs)]

pub mod build;
pub mod config;
pub mod error;
pub mod output;
pub mod substitutions;

// Re-exports
pub use build::IocBuild;
pub use config::IocDefinition;
pub use error::{BuildError, BuildResult};
pub use output::{write_all, WrittenFiles};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
