//! Record-template binding
//!
//! Macro values handed to the template substitution engine for one
//! `Linkam.template` instance.

use crate::descriptor::DeviceDescriptor;
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt::{self, Display, Formatter};

/// Record template instantiated for every Linkam T96
pub const TEMPLATE_FILE: &str = "Linkam.template";

/// asyn address of the controller on its port
pub const DEFAULT_ADDR: i64 = 0;

/// asyn timeout in seconds
pub const DEFAULT_TIMEOUT: i64 = 1;

/// Macro names, in the order the template expects them
pub const MACRO_NAMES: [&str; 5] = ["PORT", "P", "ADDR", "TIMEOUT", "name"];

/// A single macro value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum MacroValue {
    /// String macro
    Text(String),
    /// Integer macro
    Integer(i64),
}

impl MacroValue {
    /// String contents, if this is a text value
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Integer(_) => None,
        }
    }

    /// Integer contents, if this is an integer value
    #[inline]
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            Self::Text(_) => None,
        }
    }
}

impl Display for MacroValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Integer(i) => write!(f, "{i}"),
        }
    }
}

impl From<&str> for MacroValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for MacroValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for MacroValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

/// Template file plus its ordered macro values
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateBinding {
    template: &'static str,
    macros: IndexMap<&'static str, MacroValue>,
}

impl TemplateBinding {
    /// Derive the binding for a descriptor
    #[must_use]
    pub fn for_device(device: &DeviceDescriptor) -> Self {
        let mut macros = IndexMap::with_capacity(MACRO_NAMES.len());
        macros.insert("PORT", MacroValue::from(device.port_name()));
        macros.insert("P", MacroValue::from(device.prefix()));
        macros.insert("ADDR", MacroValue::from(DEFAULT_ADDR));
        macros.insert("TIMEOUT", MacroValue::from(DEFAULT_TIMEOUT));
        macros.insert("name", MacroValue::from(device.name()));

        Self {
            template: TEMPLATE_FILE,
            macros,
        }
    }

    /// Template file name
    #[inline]
    #[must_use]
    pub fn template(&self) -> &'static str {
        self.template
    }

    /// Look up a macro by name
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&MacroValue> {
        self.macros.get(name)
    }

    /// Macro names in template order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.macros.keys().copied()
    }

    /// `(name, value)` pairs in template order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &MacroValue)> + '_ {
        self.macros.iter().map(|(k, v)| (*k, v))
    }

    /// Number of macros
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.macros.len()
    }

    /// Whether the binding has no macros
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.macros.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::DeviceParams;

    fn binding(prefix: &str) -> TemplateBinding {
        DeviceDescriptor::new(DeviceParams::new("Stage", prefix))
            .unwrap()
            .template_binding()
    }

    #[test]
    fn binding_for_t1() {
        let binding = binding("T1");
        assert_eq!(binding.template(), "Linkam.template");
        assert_eq!(binding.get("PORT").and_then(MacroValue::as_str), Some("T1_AP"));
        assert_eq!(binding.get("P").and_then(MacroValue::as_str), Some("T1"));
        assert_eq!(binding.get("ADDR").and_then(MacroValue::as_int), Some(0));
        assert_eq!(binding.get("TIMEOUT").and_then(MacroValue::as_int), Some(1));
        assert_eq!(binding.get("name").and_then(MacroValue::as_str), Some("Stage"));
    }

    #[test]
    fn binding_keeps_template_order() {
        let binding = binding("T1");
        let names: Vec<_> = binding.names().collect();
        assert_eq!(names, MACRO_NAMES);
        assert_eq!(binding.len(), 5);
    }

    #[test]
    fn macro_value_display() {
        assert_eq!(MacroValue::from(0).to_string(), "0");
        assert_eq!(MacroValue::from("BL:T96").to_string(), "BL:T96");
    }
}
