//! List handler - assembles a page of projected hotel records.

use crate::error::{ApiError, Result};
use crate::handlers::{DEFAULT_LIST_FIELDS, DEFAULT_PAGE_SIZE};
use crate::AppState;
use serde::{Deserialize, Serialize};
use waypost_engine::{fill_page, plan_query, ResolutionFailure, ResolvedRecord, SchemaView};

/// Query parameters for the list endpoint.
///
/// `limit` is taken as a raw string so that non-numeric input maps to the
/// limit-validation error instead of a framework-level rejection.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub limit: Option<String>,
    pub start_with: Option<String>,
    pub fields: Option<String>,
}

/// Response for the list endpoint.
#[derive(Debug, Serialize)]
pub struct ListResponse {
    /// Successfully resolved records, in registry order.
    pub items: Vec<ResolvedRecord>,
    /// Records skipped because they failed resolution or validation.
    pub errors: Vec<ResolutionFailure>,
    /// Link to the next page, when more records exist.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

/// Serve a page of hotels for `GET /hotels`.
pub async fn handle_list(state: &AppState, path: &str, query: ListQuery) -> Result<ListResponse> {
    let limit = match &query.limit {
        None => DEFAULT_PAGE_SIZE,
        Some(raw) => raw
            .trim()
            .parse::<i64>()
            .map_err(|_| ApiError::PaginationLimit)?,
    };

    let fields = query
        .fields
        .as_deref()
        .unwrap_or(DEFAULT_LIST_FIELDS);
    let spec = plan_query(fields);
    let view = SchemaView::for_fields(spec.mapped.iter().map(String::as_str));

    let hotels = state
        .index
        .all_hotels()
        .await
        .map_err(|e| ApiError::Upstream(e.to_string()))?;

    let page = fill_page(&hotels, &spec, &view, limit, query.start_with.as_deref()).await?;

    let next = page
        .next_start
        .as_deref()
        .map(|cursor| next_link(&state.config.base_url, path, limit, &spec.mapped, cursor));

    Ok(ListResponse {
        items: page.items,
        errors: page.errors,
        next,
    })
}

/// Re-embed the original query into a link for the next page.
fn next_link(base_url: &str, path: &str, limit: i64, mapped: &[String], cursor: &str) -> String {
    format!(
        "{base_url}{path}?limit={limit}&fields={}&startWith={cursor}",
        mapped.join(",")
    )
}
