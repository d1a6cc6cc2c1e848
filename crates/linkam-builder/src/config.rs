//! IOC definition file
//!
//! YAML document naming the IOC and listing its Linkam devices:
//!
//! ```yaml
//! ioc_name: BL-EA-IOC-01
//! description: Sample environment
//! devices:
//!   - name: Stage
//!     P: "BL:T96"
//!     serial_port: /tmp/linkam
//!     virtual_port: true
//!     ip_address: 192.168.0.5
//!     ip_port: 4001
//! ```

use crate::error::{BuildError, BuildResult};
use linkam_descriptor::DeviceParams;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Parsed IOC definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IocDefinition {
    /// IOC name, used for output file names
    pub ioc_name: String,

    /// Free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Linkam devices in boot order
    #[serde(default)]
    pub devices: Vec<DeviceParams>,
}

impl IocDefinition {
    /// Empty definition
    #[must_use]
    pub fn new(ioc_name: impl Into<String>) -> Self {
        Self {
            ioc_name: ioc_name.into(),
            description: None,
            devices: Vec::new(),
        }
    }

    /// Append a device
    #[must_use]
    pub fn with_device(mut self, device: DeviceParams) -> Self {
        self.devices.push(device);
        self
    }

    /// Parse from YAML text
    ///
    /// `origin` is only used for error reporting.
    pub fn from_yaml(content: &str, origin: &Path) -> BuildResult<Self> {
        serde_yaml::from_str(content).map_err(|source| BuildError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Read and parse a definition file
    pub fn load(path: impl AsRef<Path>) -> BuildResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| BuildError::read(path, e))?;
        let definition = Self::from_yaml(&content, path)?;
        tracing::debug!(
            "Loaded IOC definition {} from {} ({} devices)",
            definition.ioc_name,
            path.display(),
            definition.devices.len()
        );
        Ok(definition)
    }
}
