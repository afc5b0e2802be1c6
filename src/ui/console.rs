//! Terminal rendition of the main window

use std::io::{self, Write};

use tracing::warn;

use super::{Surface, View};
use crate::{
    i18n::{countdown_text, text, Language, TextKey},
    state::notification::Prompt,
};

/// Draws the view as text on a writer (stdout by default).
///
/// While hidden only prompts and alerts get through.
pub struct ConsoleSurface {
    out: Box<dyn Write + Send>,
    visible: bool,
    /// Last drawn view with the countdown blanked, to tell countdown-only updates apart
    last_layout: Option<View>,
}

impl ConsoleSurface {
    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout()))
    }

    pub fn new(out: Box<dyn Write + Send>) -> Self {
        Self {
            out,
            visible: true,
            last_layout: None,
        }
    }

    fn write(&mut self, content: &str) {
        if let Err(e) = self.out.write_all(content.as_bytes()).and_then(|_| self.out.flush()) {
            warn!("Failed to write to console: {}", e);
        }
    }

    fn draw_full(&mut self, view: &View) {
        let t = |key| text(view.language, key);
        let auto_start = if view.auto_start {
            (TextKey::AutoStartLabelOn, TextKey::RemoveAutoStart, "autostart off")
        } else {
            (TextKey::AutoStartLabelOff, TextKey::SetAutoStart, "autostart on")
        };
        let button = if view.inputs_locked {
            TextKey::StopButton
        } else {
            TextKey::StartButton
        };
        let lock = if view.inputs_locked { " (locked)" } else { "" };

        let content = format!(
            "\n== {} ==\n{} {}{}\n{} {}{}\n{} {}{}\n{}\n[toggle] {}\n{}  [{}] {}\n",
            t(TextKey::AppName),
            t(TextKey::IntervalLabel),
            view.interval,
            lock,
            t(TextKey::StartTimeLabel),
            view.start_time,
            lock,
            t(TextKey::EndTimeLabel),
            view.end_time,
            lock,
            countdown_line(view),
            t(button),
            t(auto_start.0),
            auto_start.2,
            t(auto_start.1),
        );
        self.write(&content);
    }
}

fn countdown_line(view: &View) -> String {
    match view.countdown {
        Some(remaining) => countdown_text(view.language, remaining),
        None => text(view.language, TextKey::CountdownIdle).to_string(),
    }
}

impl Surface for ConsoleSurface {
    fn render(&mut self, view: &View) {
        let layout = View {
            countdown: None,
            ..view.clone()
        };
        let layout_changed = self.last_layout.as_ref() != Some(&layout);
        self.last_layout = Some(layout);

        if !self.visible {
            return;
        }
        if layout_changed {
            self.draw_full(view);
        } else {
            let line = format!("{}\n", countdown_line(view));
            self.write(&line);
        }
    }

    fn present(&mut self, language: Language, prompt: &Prompt) {
        let content = format!(
            "\n*** {} ***\n{}\n[ok] {}\n",
            text(language, prompt.title),
            text(language, prompt.message),
            text(language, TextKey::Acknowledge),
        );
        self.write(&content);
    }

    fn retract(&mut self, language: Language, prompt: &Prompt) {
        let content = format!("(dismissed: {})\n", text(language, prompt.message));
        self.write(&content);
    }

    fn alert(&mut self, title: &str, message: &str) {
        let content = format!("\n! {}: {}\n", title, message);
        self.write(&content);
    }

    fn set_visible(&mut self, visible: bool) {
        if self.visible == visible {
            return;
        }
        self.visible = visible;
        if visible {
            // Force a full redraw on the next render.
            self.last_layout = None;
        } else {
            self.write("(running in background)\n");
        }
    }

    fn show_settings(&mut self, view: &View) {
        let t = |key| text(view.language, key);
        let languages: Vec<&str> = Language::ALL.iter().map(Language::name).collect();
        let content = format!(
            "\n-- {} --\n{} {} ({})\n{} {}\n{} {}\n{} {}\nsave <language> <interval> <start> <end>  [{}]\n",
            t(TextKey::SettingsTitle),
            t(TextKey::LanguageLabel),
            view.language.name(),
            languages.join(" / "),
            t(TextKey::IntervalLabel),
            view.interval,
            t(TextKey::StartTimeLabel),
            view.start_time,
            t(TextKey::EndTimeLabel),
            view.end_time,
            t(TextKey::SaveButton),
        );
        self.write(&content);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::state::VisibilityState;

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Buffer {
        fn drain(&self) -> String {
            String::from_utf8(std::mem::take(&mut *self.0.lock().unwrap())).unwrap()
        }
    }

    fn view(countdown: Option<u64>) -> View {
        View {
            language: Language::English,
            interval: "10".to_string(),
            start_time: "09:00".to_string(),
            end_time: "17:30".to_string(),
            inputs_locked: countdown.is_some(),
            countdown,
            auto_start: false,
            visibility: VisibilityState::Foreground,
        }
    }

    #[test]
    fn countdown_only_changes_print_a_single_line() {
        let buffer = Buffer::default();
        let mut surface = ConsoleSurface::new(Box::new(buffer.clone()));

        surface.render(&view(Some(600)));
        assert!(buffer.drain().contains("Stop Reminder"));

        surface.render(&view(Some(599)));
        assert_eq!(buffer.drain(), "Time Remaining: 09:59\n");
    }

    #[test]
    fn hidden_surface_still_presents_prompts() {
        let buffer = Buffer::default();
        let mut surface = ConsoleSurface::new(Box::new(buffer.clone()));
        surface.set_visible(false);
        buffer.drain();

        surface.render(&view(Some(10)));
        assert_eq!(buffer.drain(), "");

        surface.present(Language::English, &Prompt::reminder());
        assert!(buffer.drain().contains("Time to drink water!"));
    }
}
