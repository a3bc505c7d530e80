//! Declared response schemas and their conformance check.
//!
//! # Invariants
//! - The wire schema sent to the model and the local check are derived
//!   from the same field table.
//! - A conforming value is an object with exactly the declared fields.

use super::{GatewayError, GatewayResult};
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};

/// Value type of one schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Array of strings, optionally with a fixed item count.
    TextList { len: Option<usize> },
}

/// One required property of a response object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaField {
    pub name: &'static str,
    pub kind: FieldKind,
}

/// Strict object schema for one AI operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseSchema {
    pub name: &'static str,
    pub fields: &'static [SchemaField],
}

pub const REPORT_SCHEMA: ResponseSchema = ResponseSchema {
    name: "weekly_report",
    fields: &[
        SchemaField {
            name: "summary",
            kind: FieldKind::Text,
        },
        SchemaField {
            name: "keyInsights",
            kind: FieldKind::TextList { len: Some(3) },
        },
        SchemaField {
            name: "recommendations",
            kind: FieldKind::TextList { len: Some(3) },
        },
    ],
};

pub const ASSIGNMENT_SCHEMA: ResponseSchema = ResponseSchema {
    name: "task_assignment",
    fields: &[
        SchemaField {
            name: "employeeId",
            kind: FieldKind::Text,
        },
        SchemaField {
            name: "reasoning",
            kind: FieldKind::Text,
        },
    ],
};

pub const STRATEGY_SCHEMA: ResponseSchema = ResponseSchema {
    name: "strategy",
    fields: &[
        SchemaField {
            name: "title",
            kind: FieldKind::Text,
        },
        SchemaField {
            name: "content",
            kind: FieldKind::Text,
        },
    ],
};

impl ResponseSchema {
    /// Renders the schema in the model API's `responseSchema` format.
    pub fn to_wire(&self) -> Value {
        let mut properties = Map::new();
        for field in self.fields {
            let property = match field.kind {
                FieldKind::Text => json!({ "type": "STRING" }),
                FieldKind::TextList { len } => {
                    let mut list = json!({ "type": "ARRAY", "items": { "type": "STRING" } });
                    if let Some(len) = len {
                        list["minItems"] = json!(len.to_string());
                        list["maxItems"] = json!(len.to_string());
                    }
                    list
                }
            };
            properties.insert(field.name.to_string(), property);
        }
        let required: Vec<&str> = self.fields.iter().map(|field| field.name).collect();

        json!({
            "type": "OBJECT",
            "properties": properties,
            "required": required,
        })
    }

    /// Checks that `value` matches this schema exactly.
    pub fn check(&self, value: &Value) -> GatewayResult<()> {
        let object = value
            .as_object()
            .ok_or_else(|| self.mismatch(format!("expected object, got {}", kind_of(value))))?;

        for key in object.keys() {
            if !self.fields.iter().any(|field| field.name == key.as_str()) {
                return Err(self.mismatch(format!("unexpected field `{key}`")));
            }
        }

        for field in self.fields {
            let Some(item) = object.get(field.name) else {
                return Err(self.mismatch(format!("missing field `{}`", field.name)));
            };
            match field.kind {
                FieldKind::Text => {
                    if !item.is_string() {
                        return Err(self.mismatch(format!(
                            "field `{}` must be a string, got {}",
                            field.name,
                            kind_of(item)
                        )));
                    }
                }
                FieldKind::TextList { len } => {
                    let items = item.as_array().ok_or_else(|| {
                        self.mismatch(format!(
                            "field `{}` must be an array, got {}",
                            field.name,
                            kind_of(item)
                        ))
                    })?;
                    if let Some(position) = items.iter().position(|entry| !entry.is_string()) {
                        return Err(self.mismatch(format!(
                            "field `{}` item {position} must be a string",
                            field.name
                        )));
                    }
                    if let Some(expected) = len {
                        if items.len() != expected {
                            return Err(self.mismatch(format!(
                                "field `{}` must have {expected} items, got {}",
                                field.name,
                                items.len()
                            )));
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Parses model text as JSON, checks it, and decodes it into `T`.
    pub fn parse<T: DeserializeOwned>(&self, text: &str) -> GatewayResult<T> {
        let value: Value = serde_json::from_str(text.trim()).map_err(GatewayError::MalformedJson)?;
        self.check(&value)?;
        serde_json::from_value(value).map_err(|err| self.mismatch(err.to_string()))
    }

    fn mismatch(&self, details: String) -> GatewayError {
        GatewayError::SchemaMismatch(format!("{}: {details}", self.name))
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
