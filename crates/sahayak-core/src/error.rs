use thiserror::Error;

/// Top-level error type for the Sahayak assistant.
///
/// Covers failures that stop the assistant from starting or persisting its
/// settings. Per-turn problems are [`AssistError`] and never abort a session.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SahayakError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Unsupported locale: {0}")]
    UnsupportedLocale(String),
}

impl From<toml::de::Error> for SahayakError {
    fn from(err: toml::de::Error) -> Self {
        SahayakError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for SahayakError {
    fn from(err: toml::ser::Error) -> Self {
        SahayakError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for SahayakError {
    fn from(err: serde_json::Error) -> Self {
        SahayakError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Sahayak operations.
pub type Result<T> = std::result::Result<T, SahayakError>;

/// Recoverable problems that can occur during a single conversational turn.
///
/// Every variant is answered with an apology or a re-prompt; none of them
/// ends the session loop.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssistError {
    /// Speech was captured but could not be transcribed.
    #[error("input not recognized")]
    InputUnrecognized,

    /// A fact or encyclopedia lookup found nothing for the topic.
    #[error("topic not found")]
    TopicNotFound,

    /// The encyclopedia matched several pages for the topic.
    #[error("topic is ambiguous: {}", .0.join(", "))]
    TopicAmbiguous(Vec<String>),

    /// A collaborator could not be reached.
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),

    /// No rule matched the utterance.
    #[error("utterance could not be classified")]
    Unclassifiable,
}

impl AssistError {
    /// Keep at most `max` candidate options on an ambiguous lookup.
    pub fn truncate_options(self, max: usize) -> Self {
        match self {
            AssistError::TopicAmbiguous(mut options) => {
                options.truncate(max);
                AssistError::TopicAmbiguous(options)
            }
            other => other,
        }
    }
}
