//! Reminder scheduling state machine
//!
//! ```text
//! Idle --start--> Armed --expired--> Notifying --ack--> Armed
//!                   |
//!                   +--left window--> Suspended --ack--> Idle
//!
//! Armed | Notifying | Suspended --stop--> Idle
//! ```
//!
//! The machine is synchronous: the event loop feeds it commands and ticks and
//! carries out the returned [`Effect`]s on the surface.

use std::fmt;

use chrono::NaiveTime;
use serde::Serialize;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

use super::{
    countdown::{CountdownTimer, TickResult, Ticker},
    notification::{NotificationFlow, NotificationSlot, Prompt},
    ReminderPlan,
};
use crate::error::CommandError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderState {
    /// No active cycle, inputs editable
    Idle,
    /// Cycle running, inputs locked, ticking
    Armed,
    /// Prompt outstanding, ticking paused
    Notifying,
    /// Halted because the time left the schedule window; needs a manual restart
    Suspended,
}

impl fmt::Display for ReminderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReminderState::Idle => "idle",
            ReminderState::Armed => "armed",
            ReminderState::Notifying => "notifying",
            ReminderState::Suspended => "suspended",
        };
        f.write_str(name)
    }
}

/// Prompt side effects requested by a transition. Input locking and the
/// countdown display are read back from the machine itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Present a modal prompt
    Present(Prompt),
    /// Take down a prompt without it being acknowledged
    Retract(Prompt),
}

/// Continuation run when the outstanding prompt is acknowledged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resume {
    Rearm,
    Reset,
}

#[derive(Debug)]
pub struct ReminderStateMachine {
    state: ReminderState,
    plan: Option<ReminderPlan>,
    countdown: Option<CountdownTimer>,
    ticker: Ticker,
    prompt: NotificationSlot<Resume>,
}

impl Default for ReminderStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl ReminderStateMachine {
    pub fn new() -> Self {
        Self {
            state: ReminderState::Idle,
            plan: None,
            countdown: None,
            ticker: Ticker::new(),
            prompt: NotificationSlot::default(),
        }
    }

    pub fn state(&self) -> ReminderState {
        self.state
    }

    pub fn plan(&self) -> Option<&ReminderPlan> {
        self.plan.as_ref()
    }

    pub fn remaining_seconds(&self) -> Option<u64> {
        self.countdown.map(|c| c.remaining_seconds())
    }

    pub fn inputs_locked(&self) -> bool {
        self.state != ReminderState::Idle
    }

    pub fn pending_prompt(&self) -> Option<&Prompt> {
        self.prompt.pending()
    }

    /// When the next tick is due, if one is scheduled
    pub fn next_tick(&self) -> Option<Instant> {
        self.ticker.deadline()
    }

    /// Validate the inputs against `now` and begin a cycle
    pub fn start(
        &mut self,
        interval_text: &str,
        start_text: &str,
        end_text: &str,
        now: NaiveTime,
    ) -> Result<Vec<Effect>, CommandError> {
        if self.state != ReminderState::Idle {
            return Err(CommandError::NotIdle(self.state));
        }
        let plan = ReminderPlan::validate_at(interval_text, start_text, end_text, now)?;
        let countdown = CountdownTimer::arm(plan.interval_seconds());

        info!(
            "Reminder armed: every {} min within {}",
            plan.interval_minutes, plan.window
        );
        self.plan = Some(plan);
        self.countdown = Some(countdown);
        self.state = ReminderState::Armed;
        self.ticker.arm();

        Ok(Vec::new())
    }

    /// Handle a due tick. Ticks that arrive when none is scheduled are ignored.
    pub fn tick(&mut self, now: NaiveTime) -> Vec<Effect> {
        if self.ticker.take().is_none() || self.state != ReminderState::Armed {
            debug!("Ignoring stale tick in state {}", self.state);
            return Vec::new();
        }
        let Some(plan) = self.plan else {
            error!("Armed without a plan, resetting to idle");
            return self.reset();
        };
        let Some(result) = self.countdown.as_mut().map(CountdownTimer::tick) else {
            error!("Armed without a countdown, resetting to idle");
            return self.reset();
        };

        match result {
            TickResult::Continuing(remaining) if plan.window.contains(now) => {
                debug!("Tick: {}s remaining", remaining);
                self.ticker.arm();
                Vec::new()
            }
            TickResult::Continuing(remaining) => {
                info!(
                    "Current time {} left window {} with {}s remaining, suspending",
                    now.format("%H:%M:%S"),
                    plan.window,
                    remaining
                );
                self.state = ReminderState::Suspended;
                self.open_prompt(Prompt::outside_range(), Resume::Reset)
            }
            TickResult::Expired => {
                info!("Countdown expired, notifying");
                self.state = ReminderState::Notifying;
                self.open_prompt(Prompt::reminder(), Resume::Rearm)
            }
        }
    }

    /// Acknowledge the outstanding prompt and run its continuation
    pub fn acknowledge(&mut self) -> Vec<Effect> {
        match self.prompt.acknowledge() {
            Some(Resume::Rearm) => {
                let rearmed = self.countdown.as_mut().map(|countdown| {
                    countdown.rearm();
                    countdown.remaining_seconds()
                });
                let Some(remaining) = rearmed else {
                    error!("Reminder acknowledged without a countdown, resetting to idle");
                    return self.reset();
                };
                info!("Reminder acknowledged, rearmed for {}s", remaining);
                self.state = ReminderState::Armed;
                self.ticker.arm();
                Vec::new()
            }
            Some(Resume::Reset) => {
                info!("Out-of-range notice acknowledged, back to idle");
                self.reset()
            }
            None => {
                debug!("Acknowledge with no outstanding prompt");
                Vec::new()
            }
        }
    }

    /// Cancel the cycle from any state. Idempotent in `Idle`.
    pub fn stop(&mut self) -> Vec<Effect> {
        if self.state == ReminderState::Idle {
            return Vec::new();
        }
        info!("Reminder stopped from {}", self.state);
        let mut effects = Vec::new();
        if let Some(prompt) = self.prompt.retract() {
            effects.push(Effect::Retract(prompt));
        }
        effects.extend(self.reset());
        effects
    }

    fn open_prompt(&mut self, prompt: Prompt, resume: Resume) -> Vec<Effect> {
        self.ticker.cancel();
        if let Err(e) = self.prompt.open(NotificationFlow::new(prompt, resume)) {
            error!("Refusing to open a second prompt: {}", e);
            return Vec::new();
        }
        vec![Effect::Present(prompt)]
    }

    fn reset(&mut self) -> Vec<Effect> {
        if self.prompt.is_open() {
            warn!("Resetting with a prompt still open");
            self.prompt.retract();
        }
        self.ticker.cancel();
        self.countdown = None;
        self.plan = None;
        self.state = ReminderState::Idle;
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::state::notification::PromptKind;

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn armed(interval: &str) -> ReminderStateMachine {
        let mut machine = ReminderStateMachine::new();
        machine.start(interval, "00:00", "23:59", at(12, 0)).unwrap();
        machine
    }

    #[test]
    fn start_arms_and_locks_inputs() {
        let mut machine = ReminderStateMachine::new();
        let effects = machine.start("10", "09:00", "17:30", at(9, 0)).unwrap();
        assert_eq!(machine.state(), ReminderState::Armed);
        assert!(machine.inputs_locked());
        assert_eq!(machine.remaining_seconds(), Some(600));
        assert!(machine.next_tick().is_some());
        assert!(effects.is_empty());
    }

    #[test]
    fn invalid_start_leaves_machine_idle() {
        let mut machine = ReminderStateMachine::new();
        for (interval, start, end, expected) in [
            ("", "09:00", "17:30", ValidationError::Empty),
            ("x", "09:00", "17:30", ValidationError::NotANumber),
            ("0", "09:00", "17:30", ValidationError::NotPositive),
            ("10", "9am", "17:30", ValidationError::TimeFormatError),
            ("10", "18:00", "09:00", ValidationError::TimeOrderError),
            ("10", "09:00", "17:30", ValidationError::OutsideRange),
        ] {
            let err = machine.start(interval, start, end, at(18, 0)).unwrap_err();
            assert_eq!(err, CommandError::Invalid(expected));
            assert_eq!(machine.state(), ReminderState::Idle);
            assert!(!machine.inputs_locked());
            assert!(machine.next_tick().is_none());
        }
    }

    #[test]
    fn start_is_rejected_while_running() {
        let mut machine = armed("1");
        let err = machine.start("1", "00:00", "23:59", at(12, 0)).unwrap_err();
        assert_eq!(err, CommandError::NotIdle(ReminderState::Armed));
    }

    #[test]
    fn one_minute_cycle_notifies_then_rearms() {
        let mut machine = armed("1");
        assert_eq!(machine.remaining_seconds(), Some(60));

        for _ in 0..59 {
            machine.tick(at(12, 0));
            assert_eq!(machine.state(), ReminderState::Armed);
        }
        let effects = machine.tick(at(12, 1));
        assert_eq!(machine.state(), ReminderState::Notifying);
        assert_eq!(machine.remaining_seconds(), Some(0));
        assert_eq!(effects, vec![Effect::Present(Prompt::reminder())]);
        assert!(machine.next_tick().is_none());

        let effects = machine.acknowledge();
        assert_eq!(machine.state(), ReminderState::Armed);
        assert_eq!(machine.remaining_seconds(), Some(60));
        assert!(effects.is_empty());
        assert!(machine.next_tick().is_some());
    }

    #[test]
    fn ticks_while_notifying_do_not_change_remaining_time() {
        let mut machine = armed("1");
        for _ in 0..60 {
            machine.tick(at(12, 0));
        }
        assert_eq!(machine.state(), ReminderState::Notifying);
        for _ in 0..5 {
            assert!(machine.tick(at(12, 0)).is_empty());
        }
        assert_eq!(machine.remaining_seconds(), Some(0));
        assert_eq!(
            machine.pending_prompt().map(|p| p.kind),
            Some(PromptKind::Reminder)
        );
    }

    #[test]
    fn leaving_the_window_suspends_until_acknowledged() {
        let mut machine = ReminderStateMachine::new();
        machine.start("10", "09:00", "17:30", at(17, 29)).unwrap();
        machine.tick(at(17, 29));
        assert_eq!(machine.state(), ReminderState::Armed);

        let effects = machine.tick(at(17, 30));
        assert_eq!(machine.state(), ReminderState::Suspended);
        assert_eq!(effects, vec![Effect::Present(Prompt::outside_range())]);
        assert!(machine.next_tick().is_none());

        // Re-entering the window does not resume on its own.
        assert!(machine.tick(at(10, 0)).is_empty());
        assert_eq!(machine.state(), ReminderState::Suspended);

        let effects = machine.acknowledge();
        assert_eq!(machine.state(), ReminderState::Idle);
        assert!(!machine.inputs_locked());
        assert!(effects.is_empty());
        assert_eq!(machine.remaining_seconds(), None);
    }

    #[test]
    fn stop_returns_to_idle_from_every_running_state() {
        let mut machine = armed("1");
        assert!(machine.stop().is_empty());
        assert_eq!(machine.state(), ReminderState::Idle);
        assert!(machine.next_tick().is_none());

        let mut machine = armed("1");
        for _ in 0..60 {
            machine.tick(at(12, 0));
        }
        let effects = machine.stop();
        assert_eq!(effects, vec![Effect::Retract(Prompt::reminder())]);
        assert_eq!(machine.state(), ReminderState::Idle);
        assert!(machine.pending_prompt().is_none());
        // The retracted prompt's continuation must not run.
        assert!(machine.acknowledge().is_empty());
        assert_eq!(machine.state(), ReminderState::Idle);

        let mut machine = ReminderStateMachine::new();
        machine.start("5", "09:00", "10:00", at(9, 59)).unwrap();
        machine.tick(at(10, 0));
        assert_eq!(machine.state(), ReminderState::Suspended);
        machine.stop();
        assert_eq!(machine.state(), ReminderState::Idle);
    }

    #[test]
    fn stop_when_idle_is_a_no_op() {
        let mut machine = ReminderStateMachine::new();
        assert!(machine.stop().is_empty());
        assert_eq!(machine.state(), ReminderState::Idle);
    }

    #[test]
    fn stale_tick_after_stop_is_ignored() {
        let mut machine = armed("1");
        machine.stop();
        assert!(machine.tick(at(12, 0)).is_empty());
        assert_eq!(machine.remaining_seconds(), None);
    }

    #[test]
    fn remaining_time_never_increases_within_a_cycle() {
        let mut machine = armed("2");
        let mut last = machine.remaining_seconds().unwrap();
        for _ in 0..120 {
            machine.tick(at(12, 0));
            let now = machine.remaining_seconds().unwrap();
            assert!(now <= last);
            last = now;
        }
        assert_eq!(last, 0);
    }
}
