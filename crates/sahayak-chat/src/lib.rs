//! Conversational engine for Sahayak.
//!
//! Classifies utterances into intents, answers them from a fact store or
//! canned phrasings, plans delegations to external collaborators, and runs
//! the listen-answer session loop.

pub mod agent;
pub mod classifier;
pub mod delegate;
pub mod error;
pub mod facts;
pub mod locale;
pub mod response;
pub mod session;

pub use agent::{Agent, Environment, Turn};
pub use classifier::IntentClassifier;
pub use delegate::{extract_topic, plan, Delegation};
pub use error::ChatError;
pub use facts::FactStore;
pub use locale::{phrases, Phrases};
pub use response::{Clock, ResponseGenerator};
pub use session::{ExitReason, Session, SessionSummary};
