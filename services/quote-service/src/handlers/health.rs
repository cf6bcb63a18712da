use axum::{extract::State, response::Json};
use serde_json::{json, Value};

use crate::AppState;

const SERVICE_NAME: &str = "quote-service";

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": SERVICE_NAME,
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Liveness plus the effective import and pricing settings
pub async fn detailed_health_check(State(state): State<AppState>) -> Json<Value> {
    let config = &state.config;

    Json(json!({
        "status": "healthy",
        "service": SERVICE_NAME,
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "import": {
            "allowed_extensions": config.import.allowed_extensions,
            "max_file_size": config.import.max_file_size,
        },
        "pricing": {
            "mode": config.pricing.mode,
            "default_markup_percent": config.pricing.default_markup_percent,
        }
    }))
}

pub async fn metrics_handler() -> String {
    use prometheus::TextEncoder;

    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    encoder.encode_to_string(&metric_families)
        .unwrap_or_else(|_| "Error encoding metrics".to_string())
}
