//! Linkam T96 device descriptor
//!
//! [`DeviceParams`] is the raw, field-by-field parameter set as it appears in
//! an IOC definition. [`DeviceDescriptor::new`] validates it once; everything
//! downstream works on the validated descriptor and cannot fail.

use crate::binding::TemplateBinding;
use crate::boot_script::BootScript;
use crate::error::ConfigurationError;
use serde::{Deserialize, Serialize};

/// Serial port used when none is configured
pub const DEFAULT_SERIAL_PORT: &str = "/dev/ttyUSB0";

/// SDK log path used when none is configured
pub const DEFAULT_LOG_PATH: &str = "/dev/null";

/// Suffix appended to the prefix to form the asyn port name
pub const PORT_SUFFIX: &str = "_AP";

fn default_serial_port() -> String {
    DEFAULT_SERIAL_PORT.to_string()
}

fn default_log_path() -> String {
    DEFAULT_LOG_PATH.to_string()
}

/// Unvalidated construction parameters for one Linkam T96 instance
///
/// Field names follow the IOC definition keys (`P`, `virtual_port`,
/// `ip_address`, `ip_port`); the Rust names describe what they hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeviceParams {
    /// GUI display name
    pub name: String,

    /// Device / record-name prefix
    #[serde(rename = "P", alias = "prefix")]
    pub prefix: String,

    /// Path to the real serial port, or to the pty socat will create
    #[serde(default = "default_serial_port")]
    pub serial_port: String,

    /// Create the port at runtime with socat
    #[serde(default, rename = "virtual_port")]
    pub use_virtual_port: bool,

    /// Address socat connects to
    #[serde(default, rename = "ip_address", skip_serializing_if = "Option::is_none")]
    pub remote_address: Option<String>,

    /// TCP port socat connects to
    #[serde(default, rename = "ip_port", skip_serializing_if = "Option::is_none")]
    pub remote_port: Option<u16>,

    /// Log file path for the Linkam SDK
    #[serde(default = "default_log_path")]
    pub log_path: String,
}

impl DeviceParams {
    /// Parameters for a directly attached device with all defaults
    #[must_use]
    pub fn new(name: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prefix: prefix.into(),
            serial_port: default_serial_port(),
            use_virtual_port: false,
            remote_address: None,
            remote_port: None,
            log_path: default_log_path(),
        }
    }

    /// Override the serial port path
    #[must_use]
    pub fn with_serial_port(mut self, serial_port: impl Into<String>) -> Self {
        self.serial_port = serial_port.into();
        self
    }

    /// Bridge the serial port to a remote TCP endpoint
    #[must_use]
    pub fn with_virtual_port(mut self, remote_address: impl Into<String>, remote_port: u16) -> Self {
        self.use_virtual_port = true;
        self.remote_address = Some(remote_address.into());
        self.remote_port = Some(remote_port);
        self
    }

    /// Override the SDK log path
    #[must_use]
    pub fn with_log_path(mut self, log_path: impl Into<String>) -> Self {
        self.log_path = log_path.into();
        self
    }
}

/// How the IOC reaches the controller
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Connection {
    /// Serial port attached to the IOC host
    Serial,

    /// Pseudo-terminal bridged by socat to a TCP endpoint
    VirtualPort {
        /// Address of the serial-to-ethernet converter
        remote_address: String,
        /// TCP port of the serial-to-ethernet converter
        remote_port: u16,
    },
}

impl Connection {
    /// Whether a socat bridge has to be started first
    #[inline]
    #[must_use]
    pub fn is_virtual(&self) -> bool {
        matches!(self, Self::VirtualPort { .. })
    }
}

/// Validated Linkam T96 instance
///
/// Produces the record-template binding and the boot-script lines for one
/// controller. Both are pure derivations of the stored fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeviceDescriptor {
    name: String,
    prefix: String,
    serial_port: String,
    connection: Connection,
    log_path: String,
}

impl DeviceDescriptor {
    /// Validate parameters and build a descriptor
    ///
    /// # Errors
    /// - [`ConfigurationError::MissingField`] if `name` or `P` is blank
    /// - [`ConfigurationError::MissingEndpoint`] if a virtual port is
    ///   requested without both `ip_address` and `ip_port`
    pub fn new(params: DeviceParams) -> Result<Self, ConfigurationError> {
        let DeviceParams {
            name,
            prefix,
            serial_port,
            use_virtual_port,
            remote_address,
            remote_port,
            log_path,
        } = params;

        if name.trim().is_empty() {
            return Err(ConfigurationError::MissingField { field: "name" });
        }
        if prefix.trim().is_empty() {
            return Err(ConfigurationError::MissingField { field: "P" });
        }

        let connection = if use_virtual_port {
            let remote_address = remote_address
                .filter(|addr| !addr.trim().is_empty())
                .ok_or(ConfigurationError::MissingEndpoint { field: "ip_address" })?;
            let remote_port = remote_port
                .filter(|port| *port != 0)
                .ok_or(ConfigurationError::MissingEndpoint { field: "ip_port" })?;

            if serial_port.starts_with("/dev/tty") {
                tracing::warn!(
                    "{}: virtual port link {} shadows a hardware serial device path",
                    prefix,
                    serial_port
                );
            }

            Connection::VirtualPort {
                remote_address,
                remote_port,
            }
        } else {
            if remote_address.is_some() || remote_port.is_some() {
                tracing::debug!("{}: ignoring ip endpoint, virtual port disabled", prefix);
            }
            Connection::Serial
        };

        tracing::debug!("Constructed Linkam T96 descriptor {} ({})", name, prefix);

        Ok(Self {
            name,
            prefix,
            serial_port,
            connection,
            log_path,
        })
    }

    /// GUI display name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Device prefix
    #[inline]
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Serial port path (real device or socat pty link)
    #[inline]
    #[must_use]
    pub fn serial_port(&self) -> &str {
        &self.serial_port
    }

    /// Connection mode
    #[inline]
    #[must_use]
    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Whether the boot script bridges the port with socat
    #[inline]
    #[must_use]
    pub fn uses_virtual_port(&self) -> bool {
        self.connection.is_virtual()
    }

    /// SDK log path
    #[inline]
    #[must_use]
    pub fn log_path(&self) -> &str {
        &self.log_path
    }

    /// asyn port name, `<prefix>_AP`
    #[must_use]
    pub fn port_name(&self) -> String {
        format!("{}{}", self.prefix, PORT_SUFFIX)
    }

    /// Record-template binding for `Linkam.template`
    #[must_use]
    pub fn template_binding(&self) -> TemplateBinding {
        TemplateBinding::for_device(self)
    }

    /// Boot-script lines that connect this device
    #[inline]
    #[must_use]
    pub fn boot_script(&self) -> BootScript<'_> {
        BootScript::new(self)
    }
}

impl TryFrom<DeviceParams> for DeviceDescriptor {
    type Error = ConfigurationError;

    fn try_from(params: DeviceParams) -> Result<Self, Self::Error> {
        Self::new(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_applied() {
        let descriptor = DeviceDescriptor::new(DeviceParams::new("T96", "T1")).unwrap();
        assert_eq!(descriptor.serial_port(), DEFAULT_SERIAL_PORT);
        assert_eq!(descriptor.log_path(), DEFAULT_LOG_PATH);
        assert_eq!(descriptor.connection(), &Connection::Serial);
        assert_eq!(descriptor.port_name(), "T1_AP");
    }

    #[test]
    fn virtual_port_requires_remote_port() {
        let mut params = DeviceParams::new("T96", "T1");
        params.use_virtual_port = true;
        params.remote_address = Some("192.168.0.5".to_string());

        let err = DeviceDescriptor::new(params).unwrap_err();
        assert_eq!(err, ConfigurationError::MissingEndpoint { field: "ip_port" });
    }

    #[test]
    fn virtual_port_requires_remote_address() {
        let mut params = DeviceParams::new("T96", "T1");
        params.use_virtual_port = true;
        params.remote_port = Some(4001);

        let err = DeviceDescriptor::new(params).unwrap_err();
        assert_eq!(err, ConfigurationError::MissingEndpoint { field: "ip_address" });
    }

    #[test]
    fn virtual_port_rejects_blank_address() {
        let params = DeviceParams::new("T96", "T1").with_virtual_port("  ", 4001);
        assert!(matches!(
            DeviceDescriptor::new(params),
            Err(ConfigurationError::MissingEndpoint { field: "ip_address" })
        ));
    }

    #[test]
    fn virtual_port_rejects_port_zero() {
        let params = DeviceParams::new("T96", "T1").with_virtual_port("10.0.0.1", 0);
        assert!(matches!(
            DeviceDescriptor::new(params),
            Err(ConfigurationError::MissingEndpoint { field: "ip_port" })
        ));
    }

    #[test]
    fn serial_mode_ignores_endpoint() {
        let mut params = DeviceParams::new("T96", "T1");
        params.remote_port = Some(4001);

        let descriptor = DeviceDescriptor::new(params).unwrap();
        assert!(!descriptor.uses_virtual_port());
    }

    #[test]
    fn blank_name_rejected() {
        let err = DeviceDescriptor::new(DeviceParams::new("", "T1")).unwrap_err();
        assert_eq!(err, ConfigurationError::MissingField { field: "name" });
    }

    #[test]
    fn blank_prefix_rejected() {
        let err = DeviceDescriptor::new(DeviceParams::new("T96", " ")).unwrap_err();
        assert_eq!(err, ConfigurationError::MissingField { field: "P" });
    }

    #[test]
    fn params_from_yaml_use_ioc_keys() {
        let params: DeviceParams = serde_yaml::from_str(
            r#"
name: Stage
P: "BL:T96"
virtual_port: true
ip_address: 192.168.0.5
ip_port: 4001
"#,
        )
        .unwrap();

        assert_eq!(params.prefix, "BL:T96");
        assert_eq!(params.serial_port, DEFAULT_SERIAL_PORT);
        assert_eq!(params.log_path, DEFAULT_LOG_PATH);
        assert!(params.use_virtual_port);
        assert_eq!(params.remote_port, Some(4001));
    }

    #[test]
    fn params_from_yaml_reject_unknown_keys() {
        let result: Result<DeviceParams, _> = serde_yaml::from_str("name: a\nP: b\nserial: /dev/ttyS0\n");
        assert!(result.is_err());
    }
}
