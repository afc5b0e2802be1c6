//! Interactive surface
//!
//! The surface renders what the event loop tells it to and presents prompts.
//! It never decides anything itself.

pub mod console;

use crate::{
    i18n::Language,
    state::{notification::Prompt, VisibilityState},
};

pub use console::ConsoleSurface;

/// Everything the main view shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub language: Language,
    pub interval: String,
    pub start_time: String,
    pub end_time: String,
    pub inputs_locked: bool,
    /// Remaining seconds, `None` while no cycle runs
    pub countdown: Option<u64>,
    pub auto_start: bool,
    pub visibility: VisibilityState,
}

pub trait Surface: Send {
    /// Redraw the main view
    fn render(&mut self, view: &View);

    /// Show a modal prompt over whatever is currently visible
    fn present(&mut self, language: Language, prompt: &Prompt);

    /// Take down a prompt that was never acknowledged
    fn retract(&mut self, language: Language, prompt: &Prompt);

    /// One-off message, e.g. a validation failure
    fn alert(&mut self, title: &str, message: &str);

    fn set_visible(&mut self, visible: bool);

    fn show_settings(&mut self, view: &View);
}
