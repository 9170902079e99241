//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};

use crate::{
    infrastructure::dto::http::{EndpointsDto, HealthDto, InfoDto, NotFoundDto, StatsDto},
    ui::state::AppState,
};
use support_relay_shared::time::{get_timestamp_millis, timestamp_to_rfc3339};

const SERVICE_NAME: &str = "Support Relay API";

const API_ENDPOINTS: [&str; 4] = ["/api/health", "/api/info", "/api/stats", "/ws"];

fn storage_label(enabled: bool) -> &'static str {
    if enabled { "memory" } else { "disabled" }
}

/// Service description
pub async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": API_ENDPOINTS,
    }))
}

/// Health check endpoint
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthDto> {
    let stats = state.relay.stats.execute().await;
    Json(HealthDto {
        status: "OK".to_string(),
        message: "Support relay is running".to_string(),
        timestamp: timestamp_to_rfc3339(get_timestamp_millis()),
        storage: storage_label(stats.storage_enabled).to_string(),
        port: state.config.port,
        environment: state.config.environment.clone(),
    })
}

/// Build and runtime information
pub async fn info(State(state): State<Arc<AppState>>) -> Json<InfoDto> {
    Json(InfoDto {
        name: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: state.config.environment.clone(),
        services: vec!["websocket".to_string(), "auto-reply".to_string()],
        endpoints: EndpointsDto {
            health: "/api/health".to_string(),
            info: "/api/info".to_string(),
            stats: "/api/stats".to_string(),
            websocket: "/ws".to_string(),
        },
    })
}

/// Relay statistics (read-only)
pub async fn stats(State(state): State<Arc<AppState>>) -> Json<StatsDto> {
    let stats = state.relay.stats.execute().await;

    // Domain Model から DTO への変換
    Json(StatsDto {
        active_connections: stats.active_connections,
        stored_messages: stats.stored_messages,
        storage: storage_label(stats.storage_enabled).to_string(),
        uptime_seconds: stats.uptime.as_secs(),
        timestamp: timestamp_to_rfc3339(get_timestamp_millis()),
    })
}

/// Fallback for unknown routes. `/api/*` gets a JSON body listing the
/// available endpoints.
pub async fn api_not_found(uri: Uri) -> Response {
    if !uri.path().starts_with("/api") {
        return StatusCode::NOT_FOUND.into_response();
    }

    tracing::debug!("Unknown API route: {}", uri.path());
    let body = NotFoundDto {
        error: "API route not found".to_string(),
        available_endpoints: API_ENDPOINTS.iter().map(|e| e.to_string()).collect(),
    };
    (StatusCode::NOT_FOUND, Json(body)).into_response()
}
