//! Tool argument schemas and the request validator
//!
//! Every tool declares its argument shape as a static [`ToolDefinition`].
//! Validation is strict: no coercion is performed (a string is never parsed
//! as a number), and every violated field is reported, not just the first,
//! so an agent can fix all of its arguments in one retry.

use serde_json::{Map, Value, json};

/// Raw argument bundle as delivered by the MCP transport
pub type ArgumentBundle = Map<String, Value>;

/// Primitive types a tool argument may have
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    /// JSON number, carried as f64
    Number,
    /// Non-negative integer fitting in u32 (contract milestone ids)
    Integer,
    StringArray,
}

/// Per-field constraint checked after the type check passes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    None,
    NonEmpty,
    Positive,
    MinItems(usize),
}

/// One declared argument of a tool
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub ty: FieldType,
    pub required: bool,
    pub constraint: Constraint,
}

/// Static description of one tool: name, description, argument schema
#[derive(Debug, Clone, Copy)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub fields: &'static [FieldSpec],
}

impl ToolDefinition {
    /// Render the argument schema as a JSON Schema object for `tools/list`
    pub fn input_schema(&self) -> Map<String, Value> {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for field in self.fields {
            let mut prop = Map::new();
            match field.ty {
                FieldType::String => {
                    prop.insert("type".into(), json!("string"));
                }
                FieldType::Number => {
                    prop.insert("type".into(), json!("number"));
                }
                FieldType::Integer => {
                    prop.insert("type".into(), json!("integer"));
                    prop.insert("minimum".into(), json!(0));
                }
                FieldType::StringArray => {
                    prop.insert("type".into(), json!("array"));
                    prop.insert("items".into(), json!({ "type": "string" }));
                }
            }
            prop.insert("description".into(), json!(field.description));
            match field.constraint {
                Constraint::Positive => {
                    prop.insert("exclusiveMinimum".into(), json!(0));
                }
                Constraint::NonEmpty => {
                    prop.insert("minLength".into(), json!(1));
                }
                Constraint::MinItems(n) => {
                    prop.insert("minItems".into(), json!(n));
                }
                Constraint::None => {}
            }
            properties.insert(field.name.to_string(), Value::Object(prop));
            if field.required {
                required.push(json!(field.name));
            }
        }

        let mut schema = Map::new();
        schema.insert("type".into(), json!("object"));
        schema.insert("properties".into(), Value::Object(properties));
        schema.insert("required".into(), Value::Array(required));
        schema
    }
}

/// Validate a raw argument bundle against a tool definition.
///
/// Returns the full list of violations on failure. Fields not declared in
/// the schema are ignored.
pub fn validate(def: &ToolDefinition, args: &ArgumentBundle) -> Result<(), Vec<String>> {
    let mut violations = Vec::new();

    for field in def.fields {
        let Some(value) = args.get(field.name) else {
            if field.required {
                violations.push(format!("missing required field '{}'", field.name));
            }
            continue;
        };
        if let Some(violation) = check_field(field, value) {
            violations.push(violation);
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

fn check_field(field: &FieldSpec, value: &Value) -> Option<String> {
    match field.ty {
        FieldType::String => {
            let Some(s) = value.as_str() else {
                return Some(format!("field '{}' must be a string", field.name));
            };
            if field.constraint == Constraint::NonEmpty && s.trim().is_empty() {
                return Some(format!("field '{}' must be a non-empty string", field.name));
            }
            None
        }
        FieldType::Number => {
            // as_f64 is None for anything that is not a JSON number, so a
            // numeric string like "5" is rejected rather than parsed
            let Some(n) = value.as_f64() else {
                return Some(format!("field '{}' must be a number", field.name));
            };
            if field.constraint == Constraint::Positive && n <= 0.0 {
                return Some(format!(
                    "field '{}' must be a positive number (got {n})",
                    field.name
                ));
            }
            None
        }
        FieldType::Integer => {
            let ok = value.as_u64().is_some_and(|v| v <= u64::from(u32::MAX));
            if !ok {
                return Some(format!(
                    "field '{}' must be a non-negative integer",
                    field.name
                ));
            }
            None
        }
        FieldType::StringArray => {
            let Some(items) = value.as_array() else {
                return Some(format!("field '{}' must be an array of strings", field.name));
            };
            if items.iter().any(|item| !item.is_string()) {
                return Some(format!("field '{}' must be an array of strings", field.name));
            }
            if let Constraint::MinItems(min) = field.constraint {
                if items.len() < min {
                    return Some(format!(
                        "field '{}' must contain at least {min} item(s)",
                        field.name
                    ));
                }
            }
            None
        }
    }
}
