//! Structural edits to `package.json`.
//!
//! Edits go through `serde_json` with key order preserved, so an unrelated
//! field never moves and repeating an edit yields the same document.

use serde_json::{Map, Value};

use crate::domain::{artifacts::SCRIPTS, error::DomainError};

pub const MANIFEST_PATH: &str = "package.json";

#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    fields: Map<String, Value>,
}

impl Manifest {
    pub fn parse(text: &str) -> Result<Self, DomainError> {
        let value: Value = serde_json::from_str(text).map_err(|e| DomainError::InvalidManifest {
            reason: e.to_string(),
        })?;
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(DomainError::InvalidManifest {
                reason: format!("expected an object at the top level, found {}", kind(&other)),
            }),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.fields.get("name").and_then(Value::as_str)
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.fields.insert("name".into(), Value::String(name.into()));
    }

    /// Replace the whole `scripts` map with the fixed workspace scripts.
    pub fn replace_scripts(&mut self) {
        let scripts: Map<String, Value> = SCRIPTS
            .iter()
            .map(|(name, command, _)| ((*name).to_string(), Value::String((*command).to_string())))
            .collect();
        self.fields.insert("scripts".into(), Value::Object(scripts));
    }

    pub fn scripts(&self) -> Option<&Map<String, Value>> {
        self.fields.get("scripts").and_then(Value::as_object)
    }

    /// Two-space indented JSON with a trailing newline.
    pub fn render(&self) -> Result<String, DomainError> {
        let mut out = serde_json::to_string_pretty(&self.fields).map_err(|e| {
            DomainError::InvalidManifest {
                reason: e.to_string(),
            }
        })?;
        out.push('\n');
        Ok(out)
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GENERATED: &str = r#"{
  "name": "@demo-app/source",
  "version": "0.0.0",
  "license": "MIT",
  "scripts": { "old": "echo old" },
  "private": true
}"#;

    #[test]
    fn set_name_keeps_other_fields_in_place() {
        let mut m = Manifest::parse(GENERATED).unwrap();
        m.set_name("demo-app");
        let out = m.render().unwrap();
        assert!(out.starts_with("{\n  \"name\": \"demo-app\",\n  \"version\""));
        assert!(out.ends_with("}\n"));
    }

    #[test]
    fn scripts_are_replaced_in_order() {
        let mut m = Manifest::parse(GENERATED).unwrap();
        m.replace_scripts();
        let scripts = m.scripts().unwrap();
        assert_eq!(scripts.len(), 18);
        assert!(!scripts.contains_key("old"));
        let keys: Vec<&str> = scripts.keys().map(String::as_str).collect();
        assert_eq!(keys.first(), Some(&"dev"));
        assert_eq!(keys.last(), Some(&"graph"));
        assert_eq!(scripts["docker:up"], "docker compose up -d");
    }

    #[test]
    fn edits_are_idempotent() {
        let mut m = Manifest::parse(GENERATED).unwrap();
        m.set_name("demo-app");
        m.replace_scripts();
        let once = m.render().unwrap();

        let mut again = Manifest::parse(&once).unwrap();
        again.set_name("demo-app");
        again.replace_scripts();
        assert_eq!(again.render().unwrap(), once);
    }

    #[test]
    fn non_object_is_rejected() {
        let err = Manifest::parse("[1, 2]").unwrap_err();
        assert!(err.to_string().contains("an array"));
        assert!(Manifest::parse("{ nope").is_err());
    }
}
