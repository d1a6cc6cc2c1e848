//! Build orchestration
//!
//! Turns an [`IocDefinition`] into validated descriptors plus the derived
//! build outputs. Construction happens once, up front; rendering works on
//! the validated set and cannot fail.

use crate::config::IocDefinition;
use crate::error::{BuildError, BuildResult};
use crate::substitutions;
use linkam_descriptor::{DependencySet, DeviceDescriptor, TemplateBinding};
use std::collections::HashMap;

/// Validated IOC ready for rendering
#[derive(Debug, Clone)]
pub struct IocBuild {
    ioc_name: String,
    devices: Vec<DeviceDescriptor>,
    dependencies: DependencySet,
}

impl IocBuild {
    /// Validate every device in the definition
    ///
    /// # Errors
    /// - [`BuildError::NoDevices`] for an empty device list
    /// - [`BuildError::Device`] for the first device failing validation
    /// - [`BuildError::DuplicatePort`] when two prefixes collide
    pub fn new(definition: IocDefinition) -> BuildResult<Self> {
        let IocDefinition {
            ioc_name, devices, ..
        } = definition;

        if devices.is_empty() {
            return Err(BuildError::NoDevices);
        }

        tracing::info!("Building {}: {} Linkam device(s)", ioc_name, devices.len());

        let devices = devices
            .into_iter()
            .enumerate()
            .map(|(index, params)| {
                let name = params.name.clone();
                DeviceDescriptor::new(params).map_err(|source| BuildError::Device {
                    index,
                    name,
                    source,
                })
            })
            .collect::<BuildResult<Vec<_>>>()?;

        Self::check_ports(&devices)?;

        let dependencies = DependencySet::for_devices(&devices);
        tracing::debug!("Dependencies: {:?}", dependencies);

        Ok(Self {
            ioc_name,
            devices,
            dependencies,
        })
    }

    /// Reject two devices claiming the same asyn port
    fn check_ports(devices: &[DeviceDescriptor]) -> BuildResult<()> {
        let mut claimed: HashMap<String, &str> = HashMap::with_capacity(devices.len());
        for device in devices {
            let port = device.port_name();
            if let Some(first) = claimed.get(&port) {
                return Err(BuildError::DuplicatePort {
                    port,
                    first: (*first).to_string(),
                    second: device.name().to_string(),
                });
            }
            claimed.insert(port, device.name());
        }
        Ok(())
    }

    /// IOC name
    #[inline]
    #[must_use]
    pub fn ioc_name(&self) -> &str {
        &self.ioc_name
    }

    /// Validated devices in boot order
    #[inline]
    #[must_use]
    pub fn devices(&self) -> &[DeviceDescriptor] {
        &self.devices
    }

    /// Support requirements of the whole build
    #[inline]
    #[must_use]
    pub fn dependencies(&self) -> &DependencySet {
        &self.dependencies
    }

    /// Template bindings in device order
    #[must_use]
    pub fn bindings(&self) -> Vec<TemplateBinding> {
        self.devices.iter().map(DeviceDescriptor::template_binding).collect()
    }

    /// Number of devices bridged with socat
    #[must_use]
    pub fn virtual_port_count(&self) -> usize {
        self.devices.iter().filter(|d| d.uses_virtual_port()).count()
    }

    /// Substitutions file text
    #[must_use]
    pub fn render_substitutions(&self) -> String {
        substitutions::render(&self.ioc_name, &self.bindings())
    }

    /// Boot-script fragment for all devices
    #[must_use]
    pub fn render_startup(&self) -> String {
        let mut out = String::new();
        for device in &self.devices {
            for line in device.boot_script().lines() {
                out.push_str(&line);
                out.push('\n');
            }
        }
        out
    }

    /// Dependency manifest as YAML
    pub fn render_manifest(&self) -> BuildResult<String> {
        serde_yaml::to_string(&self.dependencies).map_err(BuildError::Manifest)
    }
}

impl TryFrom<IocDefinition> for IocBuild {
    type Error = BuildError;

    fn try_from(definition: IocDefinition) -> Result<Self, Self::Error> {
        Self::new(definition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkam_descriptor::DeviceParams;

    #[test]
    fn empty_definition_rejected() {
        let result = IocBuild::new(IocDefinition::new("X"));
        assert!(matches!(result, Err(BuildError::NoDevices)));
    }

    #[test]
    fn failing_device_reports_index() {
        let mut bad = DeviceParams::new("Broken", "T2");
        bad.use_virtual_port = true;

        let definition = IocDefinition::new("X")
            .with_device(DeviceParams::new("Stage", "T1"))
            .with_device(bad);

        match IocBuild::new(definition) {
            Err(BuildError::Device { index, name, .. }) => {
                assert_eq!(index, 1);
                assert_eq!(name, "Broken");
            }
            other => panic!("expected device error, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_prefix_rejected() {
        let definition = IocDefinition::new("X")
            .with_device(DeviceParams::new("A", "T1"))
            .with_device(DeviceParams::new("B", "T1").with_serial_port("/dev/ttyUSB1"));

        match IocBuild::new(definition) {
            Err(BuildError::DuplicatePort { port, first, second }) => {
                assert_eq!(port, "T1_AP");
                assert_eq!(first, "A");
                assert_eq!(second, "B");
            }
            other => panic!("expected duplicate port, got {other:?}"),
        }
    }

    #[test]
    fn startup_concatenates_in_device_order() {
        let definition = IocDefinition::new("X")
            .with_device(DeviceParams::new("A", "T1"))
            .with_device(DeviceParams::new("B", "T2").with_virtual_port("10.0.0.2", 4001));
        let build = IocBuild::new(definition).unwrap();

        let startup = build.render_startup();
        assert_eq!(startup.lines().count(), 8);
        assert!(startup.starts_with("# Linkam 3.0 connect\nlinkamConnect \"T1_AP\""));
        assert_eq!(build.virtual_port_count(), 1);
        assert!(build.dependencies().requires_dbd("systemCommandSupport"));
    }
}
