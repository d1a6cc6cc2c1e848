//! Parameter documentation for the Linkam T96 descriptor

use crate::descriptor::{DEFAULT_LOG_PATH, DEFAULT_SERIAL_PORT};
use serde::Serialize;
use std::fmt::{self, Display, Formatter};

/// Value type accepted for a parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgKind {
    /// String
    Str,
    /// Boolean
    Bool,
    /// Integer
    Int,
}

impl Display for ArgKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Str => "str",
            Self::Bool => "bool",
            Self::Int => "int",
        })
    }
}

/// One documented parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ArgInfo {
    /// IOC-file key
    pub key: &'static str,
    /// Human description
    pub description: &'static str,
    /// Value type
    pub kind: ArgKind,
    /// Default, `None` when the parameter is required or optional without default
    pub default: Option<&'static str>,
}

/// All descriptor parameters in declaration order
pub static ARG_INFO: [ArgInfo; 7] = [
    ArgInfo {
        key: "name",
        description: "GUI name",
        kind: ArgKind::Str,
        default: None,
    },
    ArgInfo {
        key: "P",
        description: "Device Prefix",
        kind: ArgKind::Str,
        default: None,
    },
    ArgInfo {
        key: "serial_port",
        description: "Path to real or virtual serial port (virtual is created at runtime)",
        kind: ArgKind::Str,
        default: Some(DEFAULT_SERIAL_PORT),
    },
    ArgInfo {
        key: "virtual_port",
        description: "Whether to create virtual port at runtime using socat (requires IP address and port)",
        kind: ArgKind::Bool,
        default: Some("false"),
    },
    ArgInfo {
        key: "ip_address",
        description: "IP address for virtual port to connect to using socat",
        kind: ArgKind::Str,
        default: None,
    },
    ArgInfo {
        key: "ip_port",
        description: "IP port for virtual port to connect to using socat",
        kind: ArgKind::Int,
        default: None,
    },
    ArgInfo {
        key: "log_path",
        description: "Log file path for the Linkam SDK",
        kind: ArgKind::Str,
        default: Some(DEFAULT_LOG_PATH),
    },
];

/// Look up a parameter by IOC-file key
#[must_use]
pub fn lookup(key: &str) -> Option<&'static ArgInfo> {
    ARG_INFO.iter().find(|info| info.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_key_is_documented() {
        for key in ["name", "P", "serial_port", "virtual_port", "ip_address", "ip_port", "log_path"] {
            assert!(lookup(key).is_some(), "{key} missing");
        }
        assert!(lookup("serial").is_none());
    }

    #[test]
    fn defaults_match_descriptor() {
        assert_eq!(lookup("serial_port").unwrap().default, Some("/dev/ttyUSB0"));
        assert_eq!(lookup("log_path").unwrap().default, Some("/dev/null"));
        assert_eq!(lookup("ip_port").unwrap().kind, ArgKind::Int);
    }
}
