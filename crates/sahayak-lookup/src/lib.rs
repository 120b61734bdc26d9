//! Sahayak lookup crate - encyclopedia summaries and web launching.
//!
//! Collaborators the assistant delegates to for intents the fact store
//! cannot answer: a short encyclopedia summary of a topic, a web search,
//! or a video search to play a song.

pub mod encyclopedia;
pub mod error;
pub mod launcher;
pub mod wikipedia;

pub use encyclopedia::{first_sentences, Encyclopedia, StaticEncyclopedia};
pub use error::{LaunchError, LookupError};
pub use launcher::{web_search_url, youtube_search_url, BrowserLauncher, NullLauncher, WebLauncher};
pub use wikipedia::WikipediaClient;
