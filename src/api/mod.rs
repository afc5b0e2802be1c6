//! Tray control endpoint
//!
//! The background affordance: a loopback HTTP endpoint exposing the tray menu
//! and a few controls, served on its own task so the event loop never blocks on it.

pub mod handlers;
pub mod responses;

use std::{sync::Arc, time::Instant};

use axum::{
    routing::{get, post},
    Router,
};
use tokio::{
    net::TcpListener,
    sync::{mpsc::UnboundedSender, oneshot, watch},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

use crate::{
    error::PlatformError,
    state::{Intent, StatusSnapshot},
};
use handlers::*;

/// What the tray task is allowed to hold: a way to enqueue intents and a view
/// of the last published state
#[derive(Debug)]
pub struct TrayState {
    pub intents: UnboundedSender<Intent>,
    pub status: watch::Receiver<StatusSnapshot>,
    pub start_time: Instant,
}

impl TrayState {
    pub fn new(intents: UnboundedSender<Intent>, status: watch::Receiver<StatusSnapshot>) -> Self {
        Self {
            intents,
            status,
            start_time: Instant::now(),
        }
    }

    pub fn snapshot(&self) -> StatusSnapshot {
        self.status.borrow().clone()
    }

    /// Calculate uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<TrayState>) -> Router {
    Router::new()
        .route("/menu", get(menu_handler))
        .route("/settings", post(settings_handler))
        .route("/toggle", post(toggle_handler))
        .route("/restore", post(restore_handler))
        .route("/hide", post(hide_handler))
        .route("/exit", post(exit_handler))
        .route("/start", post(start_handler))
        .route("/stop", post(stop_handler))
        .route("/acknowledge", post(acknowledge_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind the tray endpoint. Failure means there is no background affordance.
pub async fn bind_tray(addr: &str) -> Result<TcpListener, PlatformError> {
    TcpListener::bind(addr)
        .await
        .map_err(|e| PlatformError::TrayUnavailable(format!("cannot bind {}: {}", addr, e)))
}

/// Serve the tray endpoint until `shutdown` fires
pub async fn serve_tray(listener: TcpListener, state: Arc<TrayState>, shutdown: oneshot::Receiver<()>) {
    if let Ok(addr) = listener.local_addr() {
        info!("Tray endpoint running on http://{}", addr);
    }
    let server = axum::serve(listener, create_router(state)).with_graceful_shutdown(async move {
        let _ = shutdown.await;
    });
    if let Err(e) = server.await {
        error!("Tray endpoint error: {}", e);
    }
    info!("Tray endpoint stopped");
}
