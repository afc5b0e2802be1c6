//! Configuration and CLI argument handling

use std::path::PathBuf;

use clap::Parser;

use crate::services::APP_ID;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "water-reminder")]
#[command(about = "Periodically reminds you to drink water within a daily time window")]
#[command(version)]
pub struct Config {
    /// Port of the tray control endpoint
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address of the tray control endpoint
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Settings file (defaults to the user config directory)
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Do not start the tray control endpoint
    #[arg(long)]
    pub no_tray: bool,

    /// Start hidden, reachable through the tray endpoint
    #[arg(long)]
    pub background: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the tray endpoint address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Resolve where the settings record lives
    pub fn settings_path(&self) -> PathBuf {
        if let Some(path) = &self.settings {
            return path.clone();
        }
        dirs::config_dir()
            .map(|dir| dir.join(APP_ID))
            .unwrap_or_default()
            .join("settings.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["water-reminder"]).unwrap();
        assert_eq!(config.address(), "127.0.0.1:20554");
        assert_eq!(config.log_level(), "info");
        assert!(!config.no_tray);
        assert!(config.settings_path().ends_with("settings.json"));
    }

    #[test]
    fn explicit_settings_path_wins() {
        let config =
            Config::try_parse_from(["water-reminder", "--settings", "/tmp/s.json", "-v", "--no-tray"])
                .unwrap();
        assert_eq!(config.settings_path(), PathBuf::from("/tmp/s.json"));
        assert_eq!(config.log_level(), "debug");
        assert!(config.no_tray);
    }
}
