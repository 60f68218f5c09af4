use axum::Json;
use serde_json::{Value, json};

/// Liveness check; does not touch the recognizer.
pub async fn health_check() -> Json<Value> {
    Json(json!({"status": "OK"}))
}
