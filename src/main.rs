//! Water Reminder - periodic drink-water prompts within a daily time window
//!
//! This is the main entry point for the water-reminder application.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{info, warn};

use water_reminder::{
    api::{bind_tray, serve_tray, TrayState},
    clock::SystemClock,
    config::Config,
    error::PlatformError,
    services::{SettingsStore, XdgAutoStart},
    state::{AppState, Intent},
    tasks::{console_input_task, event_loop},
    ui::ConsoleSurface,
    utils::exit_on_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Logs go to stderr; stdout belongs to the console surface
    tracing_subscriber::fmt()
        .with_env_filter(format!("water_reminder={},tower_http=info", config.log_level()))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting water-reminder v{}", env!("CARGO_PKG_VERSION"));
    let settings_path = config.settings_path();
    info!("Configuration: tray={}, settings={}",
          if config.no_tray { "disabled".to_string() } else { config.address() },
          settings_path.display());

    let mut app = AppState::new(
        SettingsStore::new(settings_path),
        Box::new(XdgAutoStart::for_current_user()),
        Box::new(SystemClock),
        Box::new(ConsoleSurface::stdout()),
    );
    let (intent_tx, intent_rx) = mpsc::unbounded_channel::<Intent>();

    // Bring up the tray endpoint; without it the surface stays in the foreground
    let (tray_shutdown_tx, tray_shutdown_rx) = oneshot::channel();
    let tray_task = if config.no_tray {
        app.set_affordance(Err(PlatformError::TrayUnavailable(
            "disabled with --no-tray".to_string(),
        )));
        None
    } else {
        match bind_tray(&config.address()).await {
            Ok(listener) => {
                app.set_affordance(Ok(()));
                let tray_state = Arc::new(TrayState::new(intent_tx.clone(), app.subscribe()));
                Some(tokio::spawn(serve_tray(listener, tray_state, tray_shutdown_rx)))
            }
            Err(e) => {
                app.set_affordance(Err(e));
                None
            }
        }
    };

    if config.background {
        if let Err(e) = intent_tx.send(Intent::Backgroundize) {
            warn!("Failed to queue backgroundize: {}", e);
        }
    }

    tokio::spawn(console_input_task(intent_tx.clone()));
    tokio::spawn(exit_on_signal(intent_tx));

    let app = event_loop(app, intent_rx).await;
    info!("Final reminder state: {}", app.reminder_state());

    // Full teardown: stop the tray endpoint after the loop has cancelled its tick
    if let Some(task) = tray_task {
        let _ = tray_shutdown_tx.send(());
        if let Err(e) = task.await {
            warn!("Tray task ended abnormally: {}", e);
        }
    }

    info!("Shutdown complete");
    // The stdin reader may still be parked in a blocking read
    std::process::exit(0)
}
