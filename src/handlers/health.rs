use axum::response::Json;
use serde::{Deserialize, Serialize};

use crate::utils::{now_utc, to_iso_millis};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub timestamp: String,
    pub version: String,
}

/// Simple health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        timestamp: to_iso_millis(now_utc()),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
