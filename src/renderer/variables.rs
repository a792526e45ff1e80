//! Variable map for Obsidian LaTeX Suite
//!
//! Each variable `NAME` becomes a `"${NAME}": "value"` entry, matching the
//! `${NAME}` references written into triggers by the array-literal renderer.

use indexmap::IndexMap;
use serde::Serialize;

/// Render the variable map as four-space indented JSON, without a trailing
/// newline
pub fn render(variables: &IndexMap<String, String>) -> Result<String, serde_json::Error> {
    let references: IndexMap<String, &str> = variables
        .iter()
        .map(|(name, value)| (format!("${{{}}}", name), value.as_str()))
        .collect();

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    references.serialize(&mut serializer)?;

    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_variables() {
        let mut variables = IndexMap::new();
        variables.insert("GREEK".to_string(), "alpha|beta".to_string());
        variables.insert("SYMBOL".to_string(), "\\\\pm".to_string());

        let json = render(&variables).expect("Should serialize");
        insta::assert_snapshot!(json, @r#"
        {
            "${GREEK}": "alpha|beta",
            "${SYMBOL}": "\\\\pm"
        }
        "#);
    }

    #[test]
    fn test_render_preserves_order() {
        let mut variables = IndexMap::new();
        variables.insert("Z".to_string(), "1".to_string());
        variables.insert("A".to_string(), "2".to_string());

        let json = render(&variables).unwrap();
        assert!(json.find("${Z}").unwrap() < json.find("${A}").unwrap());
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render(&IndexMap::new()).unwrap(), "{}");
    }
}
