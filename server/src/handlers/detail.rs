//! Detail handlers - a single projected hotel record and its raw metadata.

use crate::error::{ApiError, Result};
use crate::handlers::DEFAULT_DETAIL_FIELDS;
use crate::AppState;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use waypost_engine::{
    plan_query, resolve_record, HotelRecord, ResolvedRecord, SchemaView, Tree,
};

/// Query parameters for the detail endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct DetailQuery {
    pub fields: Option<String>,
}

/// Metadata for one registry record: the raw document refs, nothing
/// resolved.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaResponse {
    pub address: String,
    pub data_uri: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_plans_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_format_version: Option<Value>,
}

/// Serve one projected hotel for `GET /hotels/{address}`.
pub async fn handle_detail(
    state: &AppState,
    address: &str,
    query: DetailQuery,
) -> Result<ResolvedRecord> {
    let record = lookup(state, address).await?;

    let fields = query.fields.as_deref().unwrap_or(DEFAULT_DETAIL_FIELDS);
    let spec = plan_query(fields);
    let view = SchemaView::for_fields(spec.mapped.iter().map(String::as_str));

    match resolve_record(record.as_ref(), &spec.to_flatten, &spec.on_index).await {
        Ok(resolved) => match view.validate(&resolved) {
            Ok(()) => Ok(resolved),
            // A schema violation is its own failure kind, distinct from
            // the record being unreachable.
            Err(failure) => Err(ApiError::DataInvalid {
                violations: failure.violations.iter().map(ToString::to_string).collect(),
                data: Some(Value::Object(resolved)),
            }),
        },
        Err(failure) => Err(ApiError::NotAccessible(failure.error)),
    }
}

/// Serve the raw document refs for `GET /hotels/{address}/meta`.
pub async fn handle_meta(state: &AppState, address: &str) -> Result<MetaResponse> {
    let record = lookup(state, address).await?;

    let plain = record
        .to_plain_object(&[])
        .await
        .map_err(|e| ApiError::NotAccessible(e.to_string()))?;
    let contents = plain
        .data
        .contents()
        .ok_or_else(|| ApiError::NotAccessible("root document was not materialized".into()))?;

    Ok(MetaResponse {
        address: plain.address.clone(),
        data_uri: plain.data.document_ref().to_string(),
        description_uri: document_ref_of(contents, "descriptionUri"),
        rate_plans_uri: document_ref_of(contents, "ratePlansUri"),
        availability_uri: document_ref_of(contents, "availabilityUri"),
        data_format_version: contents.get("dataFormatVersion").map(Tree::to_value),
    })
}

async fn lookup(state: &AppState, address: &str) -> Result<Arc<dyn HotelRecord>> {
    state
        .index
        .hotel(address)
        .await
        .map_err(|e| ApiError::Upstream(e.to_string()))?
        .ok_or_else(|| ApiError::HotelNotFound(address.to_string()))
}

/// Pull the raw ref out of a pointer slot, resolved or not.
fn document_ref_of(contents: &Tree, key: &str) -> Option<String> {
    match contents.get(key) {
        Some(Tree::Pointer(pointer)) => Some(pointer.document_ref().to_string()),
        Some(Tree::Leaf(Value::String(reference))) => Some(reference.clone()),
        _ => None,
    }
}
