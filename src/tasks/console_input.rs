//! Line commands typed into the terminal

use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::mpsc::UnboundedSender,
};
use tracing::{debug, info, warn};

use crate::state::{Intent, SettingsForm};

pub const HELP: &str = "commands: start | stop | toggle | ok | hide | show | w | \
set <interval> <start> <end> | save <language> <interval> <start> <end> | settings | \
autostart on|off | status | exit";

/// Translate one input line into an intent. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Intent>, String> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let intent = match (command.to_lowercase().as_str(), args.as_slice()) {
        ("start", []) => Intent::Start,
        ("stop", []) => Intent::Stop,
        ("toggle" | "s", []) => Intent::StartStop,
        ("ok" | "ack", []) => Intent::Acknowledge,
        ("hide", []) => Intent::Backgroundize,
        ("show" | "restore", []) => Intent::Restore,
        ("w", []) => Intent::ToggleVisibility,
        ("settings", []) => Intent::OpenSettings,
        ("status", []) => Intent::Refresh,
        ("exit" | "quit", []) => Intent::Exit,
        ("autostart", ["on"]) => Intent::EnableAutoStart,
        ("autostart", ["off"]) => Intent::DisableAutoStart,
        ("set", [interval, start, end]) => Intent::SetInputs {
            interval: interval.to_string(),
            start_time: start.to_string(),
            end_time: end.to_string(),
        },
        ("save", [language, interval, start, end]) => Intent::SaveSettings(SettingsForm {
            language: language.to_string(),
            interval: interval.to_string(),
            start_time: start.to_string(),
            end_time: end.to_string(),
        }),
        _ => return Err(format!("unrecognized command {:?}; {}", line.trim(), HELP)),
    };
    Ok(Some(intent))
}

/// Read stdin until EOF or until the event loop goes away
pub async fn console_input_task(intents: UnboundedSender<Intent>) {
    info!("Reading commands from stdin");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        match lines.next_line().await {
            Ok(Some(line)) => match parse_command(&line) {
                Ok(Some(intent)) => {
                    if intents.send(intent).is_err() {
                        debug!("Event loop gone, stopping console input");
                        return;
                    }
                }
                Ok(None) => {}
                Err(message) => println!("{}", message),
            },
            Ok(None) => {
                // Running detached; the tray endpoint remains the way in.
                info!("stdin closed, console input stopped");
                return;
            }
            Err(e) => {
                warn!("Failed to read stdin: {}", e);
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_commands() {
        assert_eq!(parse_command("start"), Ok(Some(Intent::Start)));
        assert_eq!(parse_command("  OK "), Ok(Some(Intent::Acknowledge)));
        assert_eq!(parse_command("w"), Ok(Some(Intent::ToggleVisibility)));
        assert_eq!(parse_command("autostart off"), Ok(Some(Intent::DisableAutoStart)));
        assert_eq!(parse_command(""), Ok(None));
    }

    #[test]
    fn parses_inputs_and_settings() {
        assert_eq!(
            parse_command("set 20 08:00 18:00"),
            Ok(Some(Intent::SetInputs {
                interval: "20".to_string(),
                start_time: "08:00".to_string(),
                end_time: "18:00".to_string(),
            }))
        );
        assert!(matches!(
            parse_command("save 中文 20 08:00 18:00"),
            Ok(Some(Intent::SaveSettings(form))) if form.language == "中文"
        ));
    }

    #[test]
    fn rejects_unknown_or_malformed_commands() {
        assert!(parse_command("dance").is_err());
        assert!(parse_command("set 20 08:00").is_err());
        assert!(parse_command("autostart maybe").is_err());
    }
}
