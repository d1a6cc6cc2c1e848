//! msi substitutions file rendering
//!
//! Groups bindings by template file and writes one `pattern` block per
//! template:
//!
//! ```text
//! file "Linkam.template"
//! {
//! pattern
//! { PORT, P, ADDR, TIMEOUT, name }
//! { "T1_AP", "T1", "0", "1", "Stage" }
//! }
//! ```

use linkam_descriptor::{MacroValue, TemplateBinding};
use std::fmt::Write;

/// Render the substitutions text for a list of bindings
#[must_use]
pub fn render(ioc_name: &str, bindings: &[TemplateBinding]) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = writeln!(out, "# Generated by linkam-builder for {ioc_name}");

    let mut templates: Vec<&'static str> = Vec::new();
    for binding in bindings {
        if !templates.contains(&binding.template()) {
            templates.push(binding.template());
        }
    }

    for template in templates {
        let rows: Vec<&TemplateBinding> =
            bindings.iter().filter(|b| b.template() == template).collect();
        let Some(first) = rows.first() else {
            continue;
        };

        let _ = writeln!(out);
        let _ = writeln!(out, "file \"{template}\"");
        let _ = writeln!(out, "{{");
        let _ = writeln!(out, "pattern");
        let header: Vec<&str> = first.names().collect();
        let _ = writeln!(out, "{{ {} }}", header.join(", "));
        for row in rows {
            let values: Vec<String> = row.iter().map(|(_, value)| quote(value)).collect();
            let _ = writeln!(out, "{{ {} }}", values.join(", "));
        }
        let _ = writeln!(out, "}}");
    }

    out
}

/// Quote a macro value for a substitutions row
fn quote(value: &MacroValue) -> String {
    let text = value.to_string();
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for c in text.chars() {
        if c == '"' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}
