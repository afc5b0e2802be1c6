//! Tray endpoint handlers
//!
//! Handlers never touch the reminder state; they enqueue intents and read the
//! last published snapshot.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use tracing::{error, info, warn};

use super::{
    responses::{ApiResponse, HealthResponse, MenuItem, MenuResponse, StatusResponse},
    TrayState,
};
use crate::{
    i18n::{text, TextKey},
    state::{Intent, SettingsForm, VisibilityState},
};

type QueuedResult = Result<(StatusCode, Json<ApiResponse>), StatusCode>;

fn enqueue(state: &TrayState, intent: Intent, message: &str) -> QueuedResult {
    if let Err(e) = state.intents.send(intent) {
        error!("Event loop is not accepting intents: {:?}", e.0);
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    }
    info!("Tray request queued: {}", message);
    Ok((
        StatusCode::ACCEPTED,
        Json(ApiResponse::queued(message.to_string(), state.snapshot())),
    ))
}

/// Handle GET /menu - The fixed tray menu, labelled for the current language
pub async fn menu_handler(State(state): State<Arc<TrayState>>) -> Json<MenuResponse> {
    let snapshot = state.snapshot();
    let language = snapshot.language;
    let (toggle_label, toggle_action) = match snapshot.visibility {
        VisibilityState::Backgrounded => (TextKey::RestoreWindow, "/restore"),
        VisibilityState::Foreground => (TextKey::HideWindow, "/hide"),
    };

    Json(MenuResponse {
        title: text(language, TextKey::AppName),
        items: vec![
            MenuItem {
                id: "settings",
                label: text(language, TextKey::SettingsButton),
                default: false,
                action: "/settings",
            },
            MenuItem {
                id: "toggle",
                label: text(language, toggle_label),
                default: true,
                action: toggle_action,
            },
            MenuItem {
                id: "exit",
                label: text(language, TextKey::ExitButton),
                default: false,
                action: "/exit",
            },
        ],
    })
}

/// Handle POST /settings - Open the settings view when the body is empty,
/// otherwise save the submitted form. A body that is not a complete form is
/// rejected and nothing is queued.
pub async fn settings_handler(State(state): State<Arc<TrayState>>, body: Bytes) -> Response {
    if body.iter().all(u8::is_ascii_whitespace) {
        return enqueue(&state, Intent::OpenSettings, "open settings").into_response();
    }
    match Json::<SettingsForm>::from_bytes(&body) {
        Ok(Json(form)) => {
            enqueue(&state, Intent::SaveSettings(form), "save settings").into_response()
        }
        Err(rejection) => {
            warn!("Rejected settings body: {}", rejection.body_text());
            rejection.into_response()
        }
    }
}

/// Handle POST /toggle - Hide or restore, whichever applies
pub async fn toggle_handler(State(state): State<Arc<TrayState>>) -> QueuedResult {
    enqueue(&state, Intent::ToggleVisibility, "toggle window")
}

/// Handle POST /restore
pub async fn restore_handler(State(state): State<Arc<TrayState>>) -> QueuedResult {
    enqueue(&state, Intent::Restore, "restore window")
}

/// Handle POST /hide
pub async fn hide_handler(State(state): State<Arc<TrayState>>) -> QueuedResult {
    enqueue(&state, Intent::Backgroundize, "hide window")
}

/// Handle POST /exit - Full teardown
pub async fn exit_handler(State(state): State<Arc<TrayState>>) -> QueuedResult {
    enqueue(&state, Intent::Exit, "exit")
}

pub async fn start_handler(State(state): State<Arc<TrayState>>) -> QueuedResult {
    enqueue(&state, Intent::Start, "start reminder")
}

pub async fn stop_handler(State(state): State<Arc<TrayState>>) -> QueuedResult {
    enqueue(&state, Intent::Stop, "stop reminder")
}

pub async fn acknowledge_handler(State(state): State<Arc<TrayState>>) -> QueuedResult {
    enqueue(&state, Intent::Acknowledge, "acknowledge prompt")
}

/// Handle GET /status - Last published state
pub async fn status_handler(State(state): State<Arc<TrayState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        state: state.snapshot(),
        uptime: state.get_uptime(),
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
