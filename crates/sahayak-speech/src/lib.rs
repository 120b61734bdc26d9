//! Sahayak speech crate - input and output collaborators for the session loop.
//!
//! Provides trait-based abstractions for hearing the user (typed text or an
//! external speech-to-text program) and answering them (console or an
//! external text-to-speech program), plus in-memory implementations for
//! tests and scripted runs.

pub mod command;
pub mod console;
pub mod scripted;
pub mod wake;

use async_trait::async_trait;
use sahayak_core::error::AssistError;

pub use command::{CommandSpeaker, CommandTranscriber};
pub use console::{ConsoleInput, ConsoleOutput};
pub use scripted::{RecordingOutput, ScriptedFailure, ScriptedInput};
pub use wake::WakeWordGate;

// =============================================================================
// Errors
// =============================================================================

/// Errors from speech collaborators.
#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    #[error("speech was not understood")]
    NotUnderstood,
    #[error("speech service unavailable: {0}")]
    ServiceUnavailable(String),
    #[error("input closed")]
    Closed,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<SpeechError> for AssistError {
    fn from(err: SpeechError) -> Self {
        match err {
            SpeechError::NotUnderstood => AssistError::InputUnrecognized,
            SpeechError::ServiceUnavailable(msg) => AssistError::ServiceUnavailable(msg),
            SpeechError::Closed => AssistError::ServiceUnavailable("input closed".to_string()),
            SpeechError::Io(e) => AssistError::ServiceUnavailable(e.to_string()),
        }
    }
}

// =============================================================================
// Traits
// =============================================================================

/// Source of user utterances: one call yields one utterance.
#[async_trait]
pub trait SpeechInput: Send {
    /// Wait for the next utterance.
    ///
    /// Returns [`SpeechError::Closed`] once no more input will arrive.
    async fn listen(&mut self) -> Result<String, SpeechError>;
}

/// Sink for assistant responses.
#[async_trait]
pub trait SpeechOutput: Send {
    /// Display or speak one response.
    async fn say(&mut self, text: &str) -> Result<(), SpeechError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speech_error_display() {
        assert_eq!(
            SpeechError::NotUnderstood.to_string(),
            "speech was not understood"
        );
        assert_eq!(
            SpeechError::ServiceUnavailable("no network".into()).to_string(),
            "speech service unavailable: no network"
        );
        assert_eq!(SpeechError::Closed.to_string(), "input closed");
    }

    #[test]
    fn test_speech_error_into_assist_error() {
        assert_eq!(
            AssistError::from(SpeechError::NotUnderstood),
            AssistError::InputUnrecognized
        );
        assert_eq!(
            AssistError::from(SpeechError::ServiceUnavailable("down".into())),
            AssistError::ServiceUnavailable("down".into())
        );
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe");
        assert!(matches!(
            AssistError::from(SpeechError::Io(io)),
            AssistError::ServiceUnavailable(_)
        ));
    }
}
