pub mod config;
pub mod error;
pub mod types;

pub use config::SahayakConfig;
pub use error::{AssistError, Result, SahayakError};
pub use types::*;
