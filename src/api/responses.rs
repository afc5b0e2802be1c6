//! Tray endpoint response structures

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::state::StatusSnapshot;

/// Response for requests that enqueue an intent
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    /// State as of the request; the queued intent is applied afterwards
    pub state: StatusSnapshot,
}

impl ApiResponse {
    pub fn new(status: &str, message: String, state: StatusSnapshot) -> Self {
        Self {
            status: status.to_string(),
            message,
            timestamp: Utc::now(),
            state,
        }
    }

    pub fn queued(message: String, state: StatusSnapshot) -> Self {
        Self::new("queued", message, state)
    }
}

/// Status response with server metadata
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    #[serde(flatten)]
    pub state: StatusSnapshot,
    pub uptime: String,
}

/// One entry of the tray menu
#[derive(Debug, Clone, Serialize)]
pub struct MenuItem {
    pub id: &'static str,
    pub label: &'static str,
    /// Action of a plain click on the tray icon
    pub default: bool,
    pub action: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct MenuResponse {
    pub title: &'static str,
    pub items: Vec<MenuItem>,
}

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
