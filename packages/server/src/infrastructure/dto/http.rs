//! HTTP API DTOs.

use serde::{Deserialize, Serialize};

/// Body of `POST /send`
#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub from: String,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self { status: "ok" }
    }
}

/// Body of `GET /info`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceInfoDto {
    pub version: String,
    pub start_time: String,
    pub uptime: String,
    pub online_users: usize,
}
