//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthDto {
    pub status: String,
    pub message: String,
    pub timestamp: String,
    pub storage: String,
    pub port: u16,
    pub environment: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoDto {
    pub name: String,
    pub version: String,
    pub environment: String,
    pub services: Vec<String>,
    pub endpoints: EndpointsDto,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointsDto {
    pub health: String,
    pub info: String,
    pub stats: String,
    pub websocket: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsDto {
    pub active_connections: usize,
    pub stored_messages: usize,
    pub storage: String,
    pub uptime_seconds: u64,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotFoundDto {
    pub error: String,
    pub available_endpoints: Vec<String>,
}
