use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::error::AppError;
use crate::utils::monitoring::export_metrics;

/// Handler for Prometheus metrics endpoint
pub async fn metrics_handler() -> Result<Response, AppError> {
    match export_metrics() {
        Ok(metrics_text) => Ok((
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
            metrics_text,
        )
            .into_response()),
        Err(e) => {
            error!("Failed to export metrics: {}", e);
            Err(e)
        }
    }
}
