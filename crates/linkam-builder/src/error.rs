//! Error types for IOC builds
//!
//! Covers:
//! - Reading and parsing the IOC definition
//! - Descriptor construction failures, tagged with the offending device
//! - Cross-device conflicts
//! - Writing generated files

use linkam_descriptor::ConfigurationError;
use std::path::PathBuf;

/// Errors raised while building an IOC
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// IOC definition could not be read
    #[error("io error reading {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IOC definition is not valid YAML for the expected schema
    #[error("invalid IOC definition {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// A device failed validation
    #[error("device #{index} ({name}): {source}")]
    Device {
        index: usize,
        name: String,
        #[source]
        source: ConfigurationError,
    },

    /// Two devices would register the same asyn port
    #[error("asyn port '{port}' used by both '{first}' and '{second}'")]
    DuplicatePort {
        port: String,
        first: String,
        second: String,
    },

    /// IOC definition lists no Linkam devices
    #[error("IOC definition contains no devices")]
    NoDevices,

    /// Generated file could not be written
    #[error("io error writing {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Dependency manifest could not be serialized
    #[error("manifest serialization failed: {0}")]
    Manifest(#[source] serde_yaml::Error),
}

impl BuildError {
    /// Create read error for path
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    /// Create write error for path
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    /// Whether the failure is in the user's configuration rather than I/O
    #[inline]
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::Parse { .. } | Self::Device { .. } | Self::DuplicatePort { .. } | Self::NoDevices
        )
    }
}

/// Result type alias for build operations
pub type BuildResult<T> = Result<T, BuildError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_error_display() {
        let err = BuildError::Device {
            index: 2,
            name: "Stage".to_string(),
            source: ConfigurationError::MissingEndpoint { field: "ip_port" },
        };
        assert_eq!(
            err.to_string(),
            "device #2 (Stage): missing endpoint for virtual port: ip_port"
        );
        assert!(err.is_configuration());
    }

    #[test]
    fn duplicate_port_display() {
        let err = BuildError::DuplicatePort {
            port: "T1_AP".to_string(),
            first: "A".to_string(),
            second: "B".to_string(),
        };
        assert!(err.to_string().contains("T1_AP"));
    }

    #[test]
    fn io_errors_are_not_configuration() {
        let err = BuildError::write("out", std::io::Error::other("disk full"));
        assert!(!err.is_configuration());
    }
}
