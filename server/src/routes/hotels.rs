//! Hotel endpoint routes.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use waypost_engine::ResolvedRecord;

use crate::error::Result;
use crate::handlers::{
    handle_detail, handle_list, handle_meta, DetailQuery, ListQuery, ListResponse, MetaResponse,
};
use crate::AppState;

/// Create hotel routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/hotels", get(list_handler))
        .route("/hotels/{address}", get(detail_handler))
        .route("/hotels/{address}/meta", get(meta_handler))
}

/// GET /hotels - a page of projected hotel records.
async fn list_handler(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListResponse>> {
    let response = handle_list(&state, "/hotels", query).await?;
    Ok(Json(response))
}

/// GET /hotels/{address} - one projected hotel record.
async fn detail_handler(
    State(state): State<AppState>,
    Path(address): Path<String>,
    Query(query): Query<DetailQuery>,
) -> Result<Json<ResolvedRecord>> {
    let response = handle_detail(&state, &address, query).await?;
    Ok(Json(response))
}

/// GET /hotels/{address}/meta - raw document refs for one record.
async fn meta_handler(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<MetaResponse>> {
    let response = handle_meta(&state, &address).await?;
    Ok(Json(response))
}
