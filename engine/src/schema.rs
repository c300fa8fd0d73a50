//! Schema validation for resolved records.
//!
//! The full hotel schema is a static table; a [`SchemaView`] restricts it to
//! the fields a client actually requested so that unrequested-but-invalid
//! data never fails validation. Failures are structured data, not raised
//! errors: the caller decides whether a violation list sinks the record.

use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

/// JSON types a hotel field may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Number,
    Bool,
    Object,
    Array,
    /// Arbitrary nested JSON
    Json,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::String => write!(f, "String"),
            FieldType::Number => write!(f, "Number"),
            FieldType::Bool => write!(f, "Bool"),
            FieldType::Object => write!(f, "Object"),
            FieldType::Array => write!(f, "Array"),
            FieldType::Json => write!(f, "Json"),
        }
    }
}

/// Every public hotel field and its expected type.
const HOTEL_SCHEMA: &[(&str, FieldType)] = &[
    ("id", FieldType::String),
    ("managerAddress", FieldType::String),
    ("created", FieldType::Number),
    ("dataFormatVersion", FieldType::String),
    ("name", FieldType::String),
    ("description", FieldType::String),
    ("location", FieldType::Object),
    ("contacts", FieldType::Object),
    ("address", FieldType::Object),
    ("roomTypes", FieldType::Object),
    ("timezone", FieldType::String),
    ("currency", FieldType::String),
    ("images", FieldType::Array),
    ("amenities", FieldType::Array),
    ("updatedAt", FieldType::String),
    ("ratePlans", FieldType::Object),
    ("availability", FieldType::Object),
    ("notificationsUri", FieldType::String),
    ("bookingUri", FieldType::String),
];

/// Definition of a single validated field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    pub name: String,
    pub field_type: FieldType,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
        }
    }

    fn validate(&self, value: &Value) -> Result<(), Violation> {
        let valid = match self.field_type {
            FieldType::String => value.is_string(),
            FieldType::Number => value.is_number(),
            FieldType::Bool => value.is_boolean(),
            FieldType::Object => value.is_object(),
            FieldType::Array => value.is_array(),
            FieldType::Json => true,
        };

        if valid {
            Ok(())
        } else {
            Err(Violation {
                field: self.name.clone(),
                expected: self.field_type.to_string(),
                got: json_type_name(value).to_string(),
            })
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "Null",
        Value::Bool(_) => "Bool",
        Value::Number(_) => "Number",
        Value::String(_) => "String",
        Value::Array(_) => "Array",
        Value::Object(_) => "Object",
    }
}

/// A single schema violation, in machine-readable form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    pub field: String,
    pub expected: String,
    pub got: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "field '{}': expected {}, got {}",
            self.field, self.expected, self.got
        )
    }
}

/// A resolved record that does not conform to the requested schema view.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("data format validation failed: {} violation(s)", violations.len())]
pub struct ValidationFailure {
    pub violations: Vec<Violation>,
}

/// The hotel schema restricted to a set of requested fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaView {
    fields: Vec<FieldDef>,
}

impl SchemaView {
    /// Build a view covering the requested internal field names plus `id`.
    ///
    /// Names are translated to their public response keys first; unknown
    /// names are ignored, matching the planner's dropped-field rule.
    pub fn for_fields<'a>(requested: impl IntoIterator<Item = &'a str>) -> Self {
        let mut names: Vec<&str> = vec!["id"];
        for field in requested {
            let public = crate::fields::to_response_key(field.split('.').next().unwrap_or(field));
            if !names.contains(&public) {
                names.push(public);
            }
        }
        let fields = HOTEL_SCHEMA
            .iter()
            .filter(|(name, _)| names.contains(name))
            .map(|(name, field_type)| FieldDef::new(*name, *field_type))
            .collect();
        Self { fields }
    }

    /// Validate a resolved record against this view.
    ///
    /// `id` must be present; every other covered field is validated only
    /// when the record carries it. Fields outside the view are ignored.
    pub fn validate(&self, record: &Map<String, Value>) -> Result<(), ValidationFailure> {
        let mut violations = Vec::new();
        for def in &self.fields {
            match record.get(&def.name) {
                Some(value) => {
                    if let Err(violation) = def.validate(value) {
                        violations.push(violation);
                    }
                }
                None if def.name == "id" => violations.push(Violation {
                    field: "id".into(),
                    expected: def.field_type.to_string(),
                    got: "missing".into(),
                }),
                None => {}
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationFailure { violations })
        }
    }
}
