use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;
use crate::types::{Fallback, Locale};

/// Top-level configuration for the Sahayak assistant.
///
/// Loaded from `~/.sahayak/config.toml` by default. Every section is optional
/// and falls back to its defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SahayakConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub assistant: AssistantConfig,
    #[serde(default)]
    pub voice: VoiceConfig,
    #[serde(default)]
    pub lookup: LookupConfig,
    #[serde(default)]
    pub web: WebConfig,
    #[serde(default)]
    pub facts: FactsConfig,
}

impl SahayakConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: SahayakConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
    /// Conversation language.
    pub locale: Locale,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            locale: Locale::En,
        }
    }
}

/// Identity and personality of the assistant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// Name the assistant answers with. `None` uses the locale default.
    pub name: Option<String>,
    /// Who made the assistant.
    pub creator: Option<String>,
    /// Answer to "how are you".
    pub status: Option<String>,
    /// Line spoken when a session starts. `None` uses the locale default.
    pub intro: Option<String>,
    /// Intent used when no rule matches.
    pub fallback: Fallback,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            name: None,
            creator: None,
            status: None,
            intro: None,
            fallback: Fallback::Continue,
        }
    }
}

/// Voice mode: external speech-to-text and text-to-speech commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceConfig {
    /// Listen through the transcriber instead of reading stdin.
    pub enabled: bool,
    /// A transcript must contain one of these before a command is accepted.
    /// Empty disables the wake-word gate.
    pub wake_words: Vec<String>,
    /// Program and arguments that record one phrase and print its transcript.
    pub transcribe_command: Vec<String>,
    /// Program and arguments that read text on stdin and speak it.
    pub speak_command: Vec<String>,
    /// Maximum seconds to wait for one transcription.
    pub listen_timeout_secs: u64,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            wake_words: vec!["rt".to_string(), "r.t".to_string(), "artie".to_string()],
            transcribe_command: Vec::new(),
            speak_command: Vec::new(),
            listen_timeout_secs: 5,
        }
    }
}

/// Encyclopedia lookup settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    /// Whether encyclopedia lookups are performed at all.
    pub enabled: bool,
    /// Base URL; `{lang}` is replaced with the locale code.
    pub base_url: String,
    /// Number of sentences kept from a summary.
    pub summary_sentences: usize,
    /// Maximum candidate pages offered on an ambiguous topic.
    pub max_options: usize,
    /// HTTP timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: "https://{lang}.wikipedia.org".to_string(),
            summary_sentences: 2,
            max_options: 3,
            timeout_secs: 10,
        }
    }
}

impl LookupConfig {
    /// Base URL with the locale substituted.
    pub fn base_url_for(&self, locale: Locale) -> String {
        self.base_url.replace("{lang}", locale.code())
    }
}

/// Web search and video playback launching.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    /// Whether URLs are actually opened.
    pub enabled: bool,
    /// Override for the platform URL opener (the URL is appended).
    pub open_command: Option<Vec<String>>,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            open_command: None,
        }
    }
}

/// Fact store sources.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FactsConfig {
    /// Extra facts file (TOML, `[[fact]]` tables).
    pub path: Option<String>,
    /// Seed the store with the built-in tables for the locale.
    pub include_builtin: bool,
}

impl Default for FactsConfig {
    fn default() -> Self {
        Self {
            path: None,
            include_builtin: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SahayakError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = SahayakConfig::default();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.general.locale, Locale::En);
        assert!(config.assistant.name.is_none());
        assert_eq!(config.assistant.fallback, Fallback::Continue);
        assert!(!config.voice.enabled);
        assert_eq!(config.voice.wake_words, vec!["rt", "r.t", "artie"]);
        assert_eq!(config.lookup.summary_sentences, 2);
        assert_eq!(config.lookup.max_options, 3);
        assert!(config.web.enabled);
        assert!(config.facts.include_builtin);
        assert!(config.facts.path.is_none());
    }

    #[test]
    fn test_load_valid_config() {
        let content = r#"
[general]
log_level = "debug"
locale = "bn"

[assistant]
name = "সহায়ক"
fallback = "unknown"

[voice]
enabled = true
wake_words = []
transcribe_command = ["whisper-listen", "--lang", "bn"]
speak_command = ["espeak-ng", "-v", "bn"]

[lookup]
summary_sentences = 3
"#;
        let file = create_temp_config(content);
        let config = SahayakConfig::load(file.path()).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.general.locale, Locale::Bn);
        assert_eq!(config.assistant.name.as_deref(), Some("সহায়ক"));
        assert_eq!(config.assistant.fallback, Fallback::Unknown);
        // Unset fields keep their defaults.
        assert!(config.assistant.creator.is_none());
        assert!(config.voice.enabled);
        assert!(config.voice.wake_words.is_empty());
        assert_eq!(config.voice.transcribe_command.len(), 3);
        assert_eq!(config.voice.listen_timeout_secs, 5);
        assert_eq!(config.lookup.summary_sentences, 3);
        assert_eq!(config.lookup.max_options, 3);
    }

    #[test]
    fn test_load_empty_file_uses_defaults() {
        let file = create_temp_config("");
        let config = SahayakConfig::load(file.path()).unwrap();
        assert_eq!(config.general.locale, Locale::En);
        assert_eq!(config.lookup.timeout_secs, 10);
    }

    #[test]
    fn test_load_invalid_toml() {
        let file = create_temp_config("[general\nlocale = ");
        let err = SahayakConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, SahayakError::Config(_)));
    }

    #[test]
    fn test_load_unknown_locale_rejected() {
        let file = create_temp_config("[general]\nlocale = \"fr\"\n");
        assert!(SahayakConfig::load(file.path()).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = SahayakConfig::load(Path::new("/nonexistent/sahayak.toml")).unwrap_err();
        assert!(matches!(err, SahayakError::Io(_)));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = SahayakConfig::load_or_default(Path::new("/nonexistent/sahayak.toml"));
        assert_eq!(config.general.log_level, "info");
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = SahayakConfig::default();
        config.general.locale = Locale::Bn;
        config.assistant.intro = Some("নমস্কার".to_string());
        config.web.open_command = Some(vec!["firefox".to_string()]);
        config.save(&path).unwrap();

        let reloaded = SahayakConfig::load(&path).unwrap();
        assert_eq!(reloaded.general.locale, Locale::Bn);
        assert_eq!(reloaded.assistant.intro.as_deref(), Some("নমস্কার"));
        assert_eq!(reloaded.web.open_command, Some(vec!["firefox".to_string()]));
    }

    #[test]
    fn test_base_url_for_locale() {
        let lookup = LookupConfig::default();
        assert_eq!(lookup.base_url_for(Locale::En), "https://en.wikipedia.org");
        assert_eq!(lookup.base_url_for(Locale::Bn), "https://bn.wikipedia.org");
    }
}
