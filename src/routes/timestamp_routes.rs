use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use crate::errors::StampdError;
use crate::services::timestamp_service;
use crate::store::SharedStore;

/// Wire shape for POST /timestamp.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub timestamp: String,
    pub id: i64,
}

/// Wire shape for GET /timestamp/{id}. `timestamp` is null when the id is
/// unknown; lookups answer 200 either way.
#[derive(Debug, Serialize)]
pub struct LookupResponse {
    pub timestamp: Option<String>,
}

/// Build the timestamp routes, nested under /timestamp by the app.
pub fn routes(store: SharedStore) -> Router {
    Router::new()
        .route("/", post(create_timestamp))
        .route("/:id", get(get_timestamp))
        .with_state(store)
}

//
// ─────────────────────────────────────────────────────────────
// POST /timestamp
// Stamp the clock, claim the next id, persist, return both
// ─────────────────────────────────────────────────────────────
//
async fn create_timestamp(
    State(store): State<SharedStore>,
) -> Result<Json<CreatedResponse>, StampdError> {
    let (id, timestamp) = timestamp_service::create(store.as_ref()).await?;
    Ok(Json(CreatedResponse { timestamp, id }))
}

//
// ─────────────────────────────────────────────────────────────
// GET /timestamp/{id}
// Look up a stored timestamp; unknown ids yield a null payload
// ─────────────────────────────────────────────────────────────
//
async fn get_timestamp(
    Path(id): Path<String>,
    State(store): State<SharedStore>,
) -> Result<Json<LookupResponse>, StampdError> {
    let timestamp = timestamp_service::fetch(store.as_ref(), &id).await?;
    Ok(Json(LookupResponse { timestamp }))
}
