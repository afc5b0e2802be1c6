//! Signal handling for graceful shutdown

use futures::stream::StreamExt;
use signal_hook_tokio::Signals;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{error, info};

use crate::state::Intent;

/// Wait for shutdown signals (SIGTERM, SIGINT)
pub async fn shutdown_signal() -> std::io::Result<()> {
    let mut signals = Signals::new([
        signal_hook::consts::SIGTERM,
        signal_hook::consts::SIGINT,
    ])?;

    if let Some(signal) = signals.next().await {
        info!("Received signal: {}", signal);
    }
    Ok(())
}

/// Turn the first shutdown signal into an exit request
pub async fn exit_on_signal(intents: UnboundedSender<Intent>) {
    if let Err(e) = shutdown_signal().await {
        error!("Failed to install signal handler: {}", e);
        return;
    }
    if intents.send(Intent::Exit).is_err() {
        info!("Event loop already stopped");
    }
}
