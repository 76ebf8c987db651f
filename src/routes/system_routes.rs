use axum::{extract::State, routing::get, Json, Router};
use serde_json::json;

use crate::config::AppConfig;

/// Operational surface, nested under /system. These answer from the
/// process alone: the service keeps no state of its own, so liveness says
/// nothing about the key-value store behind /timestamp.
pub fn routes(config: AppConfig) -> Router {
    Router::new()
        .route("/alive", get(is_alive))
        .route("/version", get(version))
        .with_state(config)
}

/// GET /system/alive — liveness probe.
async fn is_alive() -> &'static str {
    "OK"
}

/// GET /system/version — the version the server was configured with.
async fn version(State(config): State<AppConfig>) -> Json<serde_json::Value> {
    Json(json!({
        "version": config.server_version
    }))
}
