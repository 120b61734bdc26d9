//! Error types for the conversational engine.

use sahayak_core::error::SahayakError;
use sahayak_core::types::FactCategory;

/// Errors from building or driving an assistant.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("agent not found: {0}")]
    AgentNotFound(String),
    #[error("agent name cannot be empty")]
    EmptyAgentName,
    #[error("duplicate {category} topic: {topic}")]
    DuplicateTopic {
        category: FactCategory,
        topic: String,
    },
    #[error("fact file error: {0}")]
    FactFile(String),
}

impl From<SahayakError> for ChatError {
    fn from(err: SahayakError) -> Self {
        ChatError::FactFile(err.to_string())
    }
}

impl From<toml::de::Error> for ChatError {
    fn from(err: toml::de::Error) -> Self {
        ChatError::FactFile(err.to_string())
    }
}

impl From<std::io::Error> for ChatError {
    fn from(err: std::io::Error) -> Self {
        ChatError::FactFile(err.to_string())
    }
}
