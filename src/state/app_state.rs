//! Application context owning every piece of core state

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::{sync::watch, time::Instant};
use tracing::{debug, info, warn};

use super::{
    intent::{Intent, SettingsForm},
    notification::PromptKind,
    reminder::{Effect, ReminderState, ReminderStateMachine},
    visibility::{VisibilityController, VisibilityState},
    ReminderPlan,
};
use crate::{
    clock::Clock,
    error::{CommandError, PlatformError},
    i18n::{text, Language, TextKey},
    services::{AutoStart, Settings, SettingsStore},
    ui::{Surface, View},
};

/// Whether the event loop should keep running after an intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// The editable text fields of the main view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Inputs {
    pub interval: String,
    pub start_time: String,
    pub end_time: String,
}

/// Read-only copy of the state published after every event
#[derive(Debug, Clone, Serialize)]
pub struct StatusSnapshot {
    pub state: ReminderState,
    pub remaining_seconds: Option<u64>,
    pub interval_minutes: Option<u64>,
    pub window: Option<String>,
    pub visibility: VisibilityState,
    pub inputs_locked: bool,
    pub pending_prompt: Option<PromptKind>,
    pub language: Language,
    pub inputs: Inputs,
    pub auto_start: bool,
    pub tray_available: bool,
    pub last_error: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Owns the reminder state machine, visibility and the collaborators they talk to.
///
/// Only the event loop holds this; other tasks reach it through [`Intent`]s.
pub struct AppState {
    machine: ReminderStateMachine,
    visibility: VisibilityController,
    language: Language,
    inputs: Inputs,
    settings: SettingsStore,
    autostart: Box<dyn AutoStart>,
    clock: Box<dyn Clock>,
    surface: Box<dyn Surface>,
    last_error: Option<String>,
    status_tx: watch::Sender<StatusSnapshot>,
}

impl AppState {
    pub fn new(
        settings: SettingsStore,
        autostart: Box<dyn AutoStart>,
        clock: Box<dyn Clock>,
        surface: Box<dyn Surface>,
    ) -> Self {
        let loaded = settings.load();
        let language = Language::from_name(&loaded.language);
        let inputs = Inputs {
            interval: loaded.interval,
            start_time: loaded.start_time,
            end_time: loaded.end_time,
        };

        let state = Self {
            machine: ReminderStateMachine::new(),
            visibility: VisibilityController::new(),
            language,
            inputs,
            settings,
            autostart,
            clock,
            surface,
            last_error: None,
            status_tx: watch::channel(placeholder_snapshot()).0,
        };
        state.publish(state.autostart.is_enabled());
        state
    }

    /// Receiver for the status published after every event
    pub fn subscribe(&self) -> watch::Receiver<StatusSnapshot> {
        self.status_tx.subscribe()
    }

    pub fn reminder_state(&self) -> ReminderState {
        self.machine.state()
    }

    pub fn visibility(&self) -> VisibilityState {
        self.visibility.state()
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn inputs(&self) -> &Inputs {
        &self.inputs
    }

    pub fn remaining_seconds(&self) -> Option<u64> {
        self.machine.remaining_seconds()
    }

    /// Deadline of the next countdown tick
    pub fn next_tick(&self) -> Option<Instant> {
        self.machine.next_tick()
    }

    /// Record whether the tray endpoint came up
    pub fn set_affordance(&mut self, affordance: Result<(), PlatformError>) {
        let failure = affordance.as_ref().err().cloned();
        if self.visibility.set_affordance(affordance) {
            self.surface.set_visible(true);
        }
        if let Some(e) = failure {
            self.report(TextKey::AppName, e.to_string());
        }
        self.refresh();
    }

    /// Redraw the surface and publish the status
    pub fn refresh(&mut self) {
        let auto_start = self.autostart.is_enabled();
        self.render(auto_start);
        self.publish(auto_start);
    }

    pub fn apply(&mut self, intent: Intent) -> Flow {
        debug!("Applying intent {:?}", intent);
        match intent {
            Intent::StartStop => {
                if self.machine.state() == ReminderState::Idle {
                    self.start();
                } else {
                    let effects = self.machine.stop();
                    self.run_effects(effects);
                }
            }
            Intent::Start => self.start(),
            Intent::Stop => {
                let effects = self.machine.stop();
                self.run_effects(effects);
            }
            Intent::Acknowledge => {
                let effects = self.machine.acknowledge();
                self.run_effects(effects);
            }
            Intent::SetInputs {
                interval,
                start_time,
                end_time,
            } => {
                if self.machine.inputs_locked() {
                    self.report(TextKey::InvalidInput, CommandError::InputsLocked.to_string());
                } else {
                    self.inputs = Inputs {
                        interval,
                        start_time,
                        end_time,
                    };
                    self.last_error = None;
                }
            }
            Intent::SaveSettings(form) => self.save_settings(form),
            Intent::OpenSettings => {
                self.restore();
                let view = self.view(self.autostart.is_enabled());
                self.surface.show_settings(&view);
            }
            Intent::Backgroundize => self.backgroundize(),
            Intent::Restore => self.restore(),
            Intent::ToggleVisibility => {
                match self.visibility.toggle() {
                    Ok(true) => self.surface.set_visible(!self.visibility.is_backgrounded()),
                    Ok(false) => {}
                    Err(e) => self.report(TextKey::AppName, e.to_string()),
                }
            }
            Intent::EnableAutoStart => {
                if let Err(e) = self.autostart.enable() {
                    self.report(TextKey::AppName, e.to_string());
                }
            }
            Intent::DisableAutoStart => {
                if let Err(e) = self.autostart.disable() {
                    self.report(TextKey::AppName, e.to_string());
                }
            }
            Intent::Refresh => {}
            Intent::Exit => {
                self.teardown();
                return Flow::Exit;
            }
        }
        self.refresh();
        Flow::Continue
    }

    /// Handle the due countdown tick
    pub fn on_tick(&mut self) {
        let now = self.clock.time_of_day();
        let effects = self.machine.tick(now);
        self.run_effects(effects);
        self.refresh();
    }

    /// Cancel any pending tick and take down outstanding prompts
    pub fn teardown(&mut self) {
        info!("Tearing down reminder state");
        let effects = self.machine.stop();
        for effect in effects {
            if let Effect::Retract(prompt) = effect {
                self.surface.retract(self.language, &prompt);
            }
        }
        self.publish(self.autostart.is_enabled());
    }

    fn start(&mut self) {
        let now = self.clock.time_of_day();
        let result = self.machine.start(
            &self.inputs.interval,
            &self.inputs.start_time,
            &self.inputs.end_time,
            now,
        );
        match result {
            Ok(effects) => {
                self.last_error = None;
                self.run_effects(effects);
            }
            Err(CommandError::Invalid(e)) => {
                info!("Start rejected: {}", e);
                self.report(TextKey::InvalidInput, text(self.language, e.text_key()).to_string());
            }
            Err(e) => {
                warn!("Start rejected: {}", e);
                self.report(TextKey::InvalidInput, e.to_string());
            }
        }
    }

    fn save_settings(&mut self, form: SettingsForm) {
        if let Err(e) = ReminderPlan::validate(&form.interval, &form.start_time, &form.end_time) {
            info!("Settings rejected: {}", e);
            self.report(TextKey::InvalidInput, text(self.language, e.text_key()).to_string());
            return;
        }

        self.language = Language::from_name(&form.language);
        self.inputs = Inputs {
            interval: form.interval,
            start_time: form.start_time,
            end_time: form.end_time,
        };
        self.last_error = None;

        let record = Settings {
            language: self.language.name().to_string(),
            interval: self.inputs.interval.clone(),
            start_time: self.inputs.start_time.clone(),
            end_time: self.inputs.end_time.clone(),
        };
        if let Err(e) = self.settings.save(&record) {
            warn!("Failed to save settings: {}", e);
            self.report(TextKey::AppName, e.to_string());
        }
    }

    fn backgroundize(&mut self) {
        match self.visibility.backgroundize() {
            Ok(true) => self.surface.set_visible(false),
            Ok(false) => {}
            Err(e) => self.report(TextKey::AppName, e.to_string()),
        }
    }

    fn restore(&mut self) {
        if self.visibility.restore() {
            self.surface.set_visible(true);
        }
    }

    fn run_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Present(prompt) => self.surface.present(self.language, &prompt),
                Effect::Retract(prompt) => self.surface.retract(self.language, &prompt),
            }
        }
    }

    /// Surface a message once and keep it for the status endpoint
    fn report(&mut self, title: TextKey, message: String) {
        let title = text(self.language, title);
        self.surface.alert(title, &message);
        self.last_error = Some(message);
    }

    fn view(&self, auto_start: bool) -> View {
        View {
            language: self.language,
            interval: self.inputs.interval.clone(),
            start_time: self.inputs.start_time.clone(),
            end_time: self.inputs.end_time.clone(),
            inputs_locked: self.machine.inputs_locked(),
            countdown: self.machine.remaining_seconds(),
            auto_start,
            visibility: self.visibility.state(),
        }
    }

    fn render(&mut self, auto_start: bool) {
        let view = self.view(auto_start);
        self.surface.render(&view);
    }

    fn snapshot(&self, auto_start: bool) -> StatusSnapshot {
        let plan = self.machine.plan();
        StatusSnapshot {
            state: self.machine.state(),
            remaining_seconds: self.machine.remaining_seconds(),
            interval_minutes: plan.map(|p| p.interval_minutes),
            window: plan.map(|p| p.window.to_string()),
            visibility: self.visibility.state(),
            inputs_locked: self.machine.inputs_locked(),
            pending_prompt: self.machine.pending_prompt().map(|p| p.kind),
            language: self.language,
            inputs: self.inputs.clone(),
            auto_start,
            tray_available: self.visibility.has_affordance(),
            last_error: self.last_error.clone(),
            updated_at: Utc::now(),
        }
    }

    fn publish(&self, auto_start: bool) {
        // Replace even without subscribers so late subscribers see the latest state.
        self.status_tx.send_replace(self.snapshot(auto_start));
    }
}

fn placeholder_snapshot() -> StatusSnapshot {
    StatusSnapshot {
        state: ReminderState::Idle,
        remaining_seconds: None,
        interval_minutes: None,
        window: None,
        visibility: VisibilityState::Foreground,
        inputs_locked: false,
        pending_prompt: None,
        language: Language::English,
        inputs: Inputs {
            interval: String::new(),
            start_time: String::new(),
            end_time: String::new(),
        },
        auto_start: false,
        tray_available: false,
        last_error: None,
        updated_at: Utc::now(),
    }
}
