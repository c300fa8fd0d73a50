//! Per-record resolution: merging registry attributes with flattened
//! document data into one plain response object.
//!
//! Resolution never raises: a record either resolves to a
//! [`ResolvedRecord`] or degrades to a [`ResolutionFailure`] carrying the
//! record identity and a stable failure message, so one bad record cannot
//! abort a page.

use crate::error::SourceError;
use crate::fields::{self, DESCRIPTION_GROUP};
use crate::flatten::flatten;
use crate::tree::Pointer;
use crate::FieldPath;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Map, Value};

/// Stable failure message for an unreachable registry entry.
pub const INDEX_ERROR: &str = "Cannot access index data, the backing registry entry may be broken";

/// Stable failure message for a failed document resolution.
pub const DOCUMENT_ERROR: &str = "Cannot access remote document data";

/// Fallback failure message.
pub const GENERIC_ERROR: &str = "Cannot get hotel data";

/// Version attribute carried by the root document.
const DATA_FORMAT_VERSION: &str = "dataFormatVersion";

/// Synthetic document groups promoted to public top-level attributes.
const PROMOTED_GROUPS: &[(&str, &str)] = &[
    ("notificationsUri", "notificationsUri"),
    ("bookingUri", "bookingUri"),
    ("ratePlansUri", "ratePlans"),
    ("availabilityUri", "availability"),
];

/// One record handle from the registry index.
///
/// Attributes are independently fetchable; `to_plain_object` materializes
/// the remote document tree with the listed groups resolved and everything
/// else left as unresolved pointers.
#[async_trait]
pub trait HotelRecord: Send + Sync {
    /// Stable unique identifier, also the pagination key.
    fn address(&self) -> &str;

    /// Fetch an index-resident attribute, `None` when the record does not
    /// expose it.
    async fn attribute(&self, name: &str) -> std::result::Result<Option<Value>, SourceError>;

    /// Materialize the record's document tree for the given field paths.
    async fn to_plain_object(
        &self,
        fields: &[FieldPath],
    ) -> std::result::Result<PlainRecord, SourceError>;
}

/// A record with its root document materialized.
#[derive(Debug, Clone, PartialEq)]
pub struct PlainRecord {
    pub address: String,
    /// Root document pointer; resolved when materialization succeeded.
    pub data: Pointer,
}

/// A fully resolved, response-shaped record.
pub type ResolvedRecord = Map<String, Value>;

/// A record that could not be resolved or failed validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionFailure {
    /// Stable, client-safe failure message.
    pub error: String,
    /// The underlying failure, as text or structured violation data.
    pub original_error: Value,
    /// Enough identity to log the record, or the partially resolved record
    /// for validation failures.
    pub data: Value,
}

impl ResolutionFailure {
    /// Classify a collaborator failure into a stable message.
    pub fn from_source(address: &str, error: &SourceError) -> Self {
        let message = match error {
            SourceError::Index(_) => INDEX_ERROR,
            SourceError::Document(_) => DOCUMENT_ERROR,
            SourceError::Other(_) => GENERIC_ERROR,
        };
        Self {
            error: message.to_string(),
            original_error: Value::String(error.to_string()),
            data: json!({ "id": address }),
        }
    }

    /// Convert a schema-validation failure, keeping the partially resolved
    /// record for diagnostics.
    pub fn from_validation(
        failure: &crate::schema::ValidationFailure,
        resolved: ResolvedRecord,
    ) -> Self {
        Self {
            error: format!("Upstream hotel data format validation failed: {failure}"),
            original_error: json!({
                "valid": false,
                "errors": failure
                    .violations
                    .iter()
                    .map(|v| v.to_string())
                    .collect::<Vec<_>>(),
            }),
            data: Value::Object(resolved),
        }
    }
}

/// Resolve one record: materialize and flatten the requested document
/// groups, merge in the requested index attributes, inject `id` and map the
/// result to its public shape.
pub async fn resolve_record(
    record: &dyn HotelRecord,
    to_flatten: &[FieldPath],
    on_index: &[FieldPath],
) -> std::result::Result<ResolvedRecord, ResolutionFailure> {
    match resolve_inner(record, to_flatten, on_index).await {
        Ok(data) => Ok(to_public_shape(data)),
        Err(error) => Err(ResolutionFailure::from_source(record.address(), &error)),
    }
}

async fn resolve_inner(
    record: &dyn HotelRecord,
    to_flatten: &[FieldPath],
    on_index: &[FieldPath],
) -> std::result::Result<ResolvedRecord, SourceError> {
    let mut data = Map::new();

    if !to_flatten.is_empty() {
        let plain = record.to_plain_object(to_flatten).await?;
        let contents = plain.data.contents().ok_or_else(|| {
            SourceError::Document(format!(
                "root document {} was not materialized",
                plain.data.document_ref()
            ))
        })?;
        let flattened = flatten(contents, to_flatten);

        if let Some(version) = contents.get(DATA_FORMAT_VERSION) {
            data.insert(DATA_FORMAT_VERSION.to_string(), version.to_value());
        }
        // The description group is spread at the top level.
        if let Some(Value::Object(description)) = flattened.get(DESCRIPTION_GROUP) {
            for (key, value) in description {
                data.insert(key.clone(), value.clone());
            }
        }
        for (group, target) in PROMOTED_GROUPS {
            if let Some(value) = flattened.get(*group) {
                data.insert(target.to_string(), value.clone());
            }
        }
    }

    for name in on_index {
        if let Some(value) = record.attribute(name).await? {
            data.insert(name.clone(), value);
        }
    }

    // Always last, overriding anything that leaked through projection.
    data.insert("id".to_string(), Value::String(record.address().to_string()));
    Ok(data)
}

/// Rename internal attribute names to their public response keys.
fn to_public_shape(data: ResolvedRecord) -> ResolvedRecord {
    data.into_iter()
        .map(|(key, value)| (fields::to_response_key(&key).to_string(), value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ValidationFailure, Violation};

    #[test]
    fn source_failures_carry_stable_messages() {
        let failure = ResolutionFailure::from_source(
            "0x01",
            &SourceError::Index("contract call reverted".into()),
        );
        assert_eq!(failure.error, INDEX_ERROR);
        assert_eq!(failure.data, json!({"id": "0x01"}));

        let failure = ResolutionFailure::from_source(
            "0x01",
            &SourceError::Document("ref not found".into()),
        );
        assert_eq!(failure.error, DOCUMENT_ERROR);

        let failure =
            ResolutionFailure::from_source("0x01", &SourceError::Other("boom".into()));
        assert_eq!(failure.error, GENERIC_ERROR);
        assert_eq!(failure.original_error, json!("boom"));
    }

    #[test]
    fn validation_failures_keep_the_partial_record() {
        let mut resolved = Map::new();
        resolved.insert("id".into(), json!("0x01"));
        resolved.insert("name".into(), json!(42));

        let failure = ResolutionFailure::from_validation(
            &ValidationFailure {
                violations: vec![Violation {
                    field: "name".into(),
                    expected: "String".into(),
                    got: "Number".into(),
                }],
            },
            resolved,
        );
        assert!(failure
            .error
            .starts_with("Upstream hotel data format validation failed"));
        assert_eq!(
            failure.original_error["errors"],
            json!(["field 'name': expected String, got Number"])
        );
        assert_eq!(failure.data["name"], json!(42));
    }

    #[test]
    fn failure_serializes_with_camel_case_keys() {
        let failure = ResolutionFailure::from_source("0x01", &SourceError::Other("boom".into()));
        let value = serde_json::to_value(&failure).unwrap();
        assert!(value.get("originalError").is_some());
        assert!(value.get("error").is_some());
    }
}
