//! HTTP request handlers

pub mod billing;
pub mod expenses;
pub mod grid;
pub mod orders;
pub mod products;
pub mod sync;

use axum::Json;
use serde_json::{json, Value};

/// Health check endpoint
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "retail-back-office-backend"
    }))
}
