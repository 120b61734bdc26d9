//! CLI argument definitions for the Sahayak assistant.
//!
//! Uses `clap` with derive macros for ergonomic argument parsing.
//! Priority resolution: CLI args > env vars > config file > defaults.

use clap::Parser;
use std::path::PathBuf;

use sahayak_core::config::SahayakConfig;
use sahayak_core::types::Locale;

/// Sahayak - a small bilingual (English / Bengali) voice and text assistant.
#[derive(Parser, Debug)]
#[command(name = "sahayak", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Conversation language (en, bn).
    #[arg(short = 'L', long = "locale")]
    pub locale: Option<Locale>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,

    /// Listen and speak through the configured speech commands.
    #[arg(long = "voice")]
    pub voice: bool,

    /// Read utterances from a file, one per line, instead of the terminal.
    #[arg(short = 's', long = "script")]
    pub script: Option<PathBuf>,

    /// Never open a browser; print the URLs instead.
    #[arg(long = "no-web")]
    pub no_web: bool,

    /// Disable encyclopedia lookups.
    #[arg(long = "offline")]
    pub offline: bool,
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > SAHAYAK_CONFIG env var > platform default (~/.sahayak/config.toml).
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("SAHAYAK_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Apply command-line overrides on top of the loaded configuration.
    pub fn apply(&self, config: &mut SahayakConfig) {
        if let Some(locale) = self.locale {
            config.general.locale = locale;
        }
        if let Some(ref level) = self.log_level {
            config.general.log_level = level.clone();
        }
        if self.voice {
            config.voice.enabled = true;
        }
        if self.no_web {
            config.web.enabled = false;
        }
        if self.offline {
            config.lookup.enabled = false;
        }
    }
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".sahayak").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".sahayak").join("config.toml");
    }
    PathBuf::from("config.toml")
}
