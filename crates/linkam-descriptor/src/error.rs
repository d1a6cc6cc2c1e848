//! Error types for descriptor construction
//!
//! All validation happens when a [`DeviceDescriptor`](crate::DeviceDescriptor)
//! is built. Once constructed, binding and boot-script emission cannot fail.

/// Construction-time configuration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    /// A required parameter was empty
    #[error("missing required parameter: {field}")]
    MissingField {
        /// IOC-file key of the parameter
        field: &'static str,
    },

    /// Virtual port requested without a complete remote endpoint
    #[error("missing endpoint for virtual port: {field}")]
    MissingEndpoint {
        /// IOC-file key of the missing endpoint parameter
        field: &'static str,
    },
}

impl ConfigurationError {
    /// IOC-file key of the offending parameter
    #[inline]
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingField { field } | Self::MissingEndpoint { field } => field,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_endpoint_display() {
        let err = ConfigurationError::MissingEndpoint { field: "ip_port" };
        assert_eq!(err.to_string(), "missing endpoint for virtual port: ip_port");
        assert_eq!(err.field(), "ip_port");
    }

    #[test]
    fn missing_field_display() {
        let err = ConfigurationError::MissingField { field: "P" };
        assert_eq!(err.to_string(), "missing required parameter: P");
    }
}
