//! Main event loop
//!
//! All core state lives in the [`AppState`] owned by this task. Other tasks
//! enqueue [`Intent`]s; ticks come from the deadline the state machine
//! re-arms after every firing.

use tokio::{
    sync::mpsc::UnboundedReceiver,
    time::{sleep_until, Instant},
};
use tracing::{debug, info};

use crate::state::{AppState, Flow, Intent};

/// Apply intents and ticks serially until an exit is requested.
///
/// Returns the torn-down state.
pub async fn event_loop(mut app: AppState, mut intents: UnboundedReceiver<Intent>) -> AppState {
    info!("Starting reminder event loop");
    app.refresh();

    loop {
        let next_tick = app.next_tick();
        tokio::select! {
            intent = intents.recv() => match intent {
                Some(intent) => {
                    if app.apply(intent) == Flow::Exit {
                        break;
                    }
                }
                None => {
                    info!("All intent producers are gone, shutting down");
                    app.teardown();
                    break;
                }
            },
            _ = wait_for_tick(next_tick) => {
                debug!("Tick fired");
                app.on_tick();
            }
        }
    }

    info!("Event loop stopped");
    app
}

async fn wait_for_tick(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::sync::mpsc;

    use super::*;
    use crate::state::{app_state::tests::harness, ReminderState};

    fn set_inputs(interval: &str, start: &str, end: &str) -> Intent {
        Intent::SetInputs {
            interval: interval.to_string(),
            start_time: start.to_string(),
            end_time: end.to_string(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn one_minute_cycle_runs_to_notification_and_rearms() {
        let h = harness(12, 0);
        let mut status = h.app.subscribe();
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(event_loop(h.app, rx));

        tx.send(set_inputs("1", "00:00", "23:59")).unwrap();
        tx.send(Intent::Start).unwrap();

        tokio::time::sleep(Duration::from_secs(30)).await;
        let halfway = status.borrow_and_update().clone();
        assert_eq!(halfway.state, ReminderState::Armed);
        assert!(halfway.remaining_seconds.unwrap() <= 31);

        tokio::time::sleep(Duration::from_secs(40)).await;
        let notifying = status.borrow_and_update().clone();
        assert_eq!(notifying.state, ReminderState::Notifying);
        assert_eq!(notifying.remaining_seconds, Some(0));

        // Paused while the prompt is open.
        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(status.borrow().remaining_seconds, Some(0));

        tx.send(Intent::Acknowledge).unwrap();
        let rearmed = status
            .wait_for(|s| s.state == ReminderState::Armed)
            .await
            .unwrap()
            .clone();
        assert_eq!(rearmed.remaining_seconds, Some(60));

        tx.send(Intent::Exit).unwrap();
        let app = handle.await.unwrap();
        assert_eq!(app.reminder_state(), ReminderState::Idle);
        assert!(app.next_tick().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn stop_cancels_the_pending_tick() {
        let h = harness(12, 0);
        let mut status = h.app.subscribe();
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(event_loop(h.app, rx));

        tx.send(Intent::Start).unwrap();
        tokio::time::sleep(Duration::from_secs(5)).await;
        tx.send(Intent::Stop).unwrap();
        status
            .wait_for(|s| s.state == ReminderState::Idle)
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_secs(10)).await;
        let idle = status.borrow().clone();
        assert_eq!(idle.state, ReminderState::Idle);
        assert_eq!(idle.remaining_seconds, None);

        drop(tx);
        let app = handle.await.unwrap();
        assert!(app.next_tick().is_none());
    }
}
