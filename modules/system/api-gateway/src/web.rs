use axum::Json;
use axum::http::Uri;
use eventhost_api::Problem;
use serde_json::{Value, json};

/// Liveness probe.
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Fallback for unrouted paths that made it through the gate.
pub async fn not_found(uri: Uri) -> Problem {
    Problem::not_found(format!("No route for {}", uri.path())).with_instance(uri.path())
}
