//! Build-time support requirements
//!
//! The IOC build needs to know which support modules, libraries and DBD
//! files the configured Linkam devices pull in. [`DependencySet::for_devices`]
//! derives that from the whole device list, so nothing is accumulated as a
//! side effect of constructing a single descriptor.

use crate::descriptor::DeviceDescriptor;
use serde::{Deserialize, Serialize};

/// Support module every Linkam device depends on
pub const ASYN_MODULE: &str = "asyn";

/// Library linked into the IOC
pub const LINKAM_LIBRARY: &str = "linkamT96";

/// DBD file registering `linkamConnect`
pub const LINKAM_DBD: &str = "linkamT96Support";

/// DBD file registering the `system` iocsh command
pub const SYSTEM_COMMAND_DBD: &str = "systemCommandSupport";

/// De-duplicated, insertion-ordered build requirements
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencySet {
    /// Support modules
    pub modules: Vec<String>,
    /// Libraries to link
    pub libraries: Vec<String>,
    /// DBD files to include
    pub dbd_files: Vec<String>,
}

impl DependencySet {
    /// Empty set
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requirements of a list of Linkam devices
    ///
    /// Empty input yields an empty set.
    #[must_use]
    pub fn for_devices<'a, I>(devices: I) -> Self
    where
        I: IntoIterator<Item = &'a DeviceDescriptor>,
    {
        let mut set = Self::new();
        for device in devices {
            set.add_device(device);
        }
        set
    }

    /// Merge the requirements of one device
    pub fn add_device(&mut self, device: &DeviceDescriptor) {
        self.add_module(ASYN_MODULE);
        self.add_library(LINKAM_LIBRARY);
        self.add_dbd(LINKAM_DBD);
        if device.uses_virtual_port() {
            self.add_dbd(SYSTEM_COMMAND_DBD);
        }
    }

    /// Add a support module if not present
    pub fn add_module(&mut self, module: &str) {
        push_unique(&mut self.modules, module);
    }

    /// Add a library if not present
    pub fn add_library(&mut self, library: &str) {
        push_unique(&mut self.libraries, library);
    }

    /// Add a DBD file if not present
    pub fn add_dbd(&mut self, dbd: &str) {
        push_unique(&mut self.dbd_files, dbd);
    }

    /// Merge another set, keeping this set's order first
    pub fn extend(&mut self, other: &DependencySet) {
        for module in &other.modules {
            self.add_module(module);
        }
        for library in &other.libraries {
            self.add_library(library);
        }
        for dbd in &other.dbd_files {
            self.add_dbd(dbd);
        }
    }

    /// Whether a DBD file is required
    #[inline]
    #[must_use]
    pub fn requires_dbd(&self, dbd: &str) -> bool {
        self.dbd_files.iter().any(|d| d == dbd)
    }

    /// Whether nothing is required
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty() && self.libraries.is_empty() && self.dbd_files.is_empty()
    }
}

fn push_unique(list: &mut Vec<String>, item: &str) {
    if !list.iter().any(|existing| existing == item) {
        list.push(item.to_string());
    }
}
