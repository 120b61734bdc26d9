use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SahayakError;

// =============================================================================
// Enums
// =============================================================================

/// Conversation language. Selects the rule set, fact tables and phrasebook.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    /// English.
    #[default]
    En,
    /// Bengali (Bangla).
    Bn,
}

impl Locale {
    /// ISO 639-1 code, also used as the Wikipedia language subdomain.
    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Bn => "bn",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = SahayakError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Locale::En),
            "bn" | "bengali" | "bangla" => Ok(Locale::Bn),
            other => Err(SahayakError::UnsupportedLocale(other.to_string())),
        }
    }
}

/// Partition of the fact store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactCategory {
    /// Facts about the assistant itself (name, creator, status).
    General,
    /// World facts: capitals, currencies, populations.
    Fact,
    /// Canned arithmetic answers.
    Math,
}

impl fmt::Display for FactCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FactCategory::General => f.write_str("general"),
            FactCategory::Fact => f.write_str("fact"),
            FactCategory::Math => f.write_str("math"),
        }
    }
}

/// What a user utterance is asking for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Greet,
    StateName,
    AnswerFact,
    AnswerMath,
    AcknowledgeThanks,
    ContinueConversation,
    GetTime,
    PlaySong,
    SearchWeb,
    GetWikiInfo,
    Exit,
    Unknown,
}

impl Intent {
    /// Every intent, in declaration order.
    pub const ALL: [Intent; 12] = [
        Intent::Greet,
        Intent::StateName,
        Intent::AnswerFact,
        Intent::AnswerMath,
        Intent::AcknowledgeThanks,
        Intent::ContinueConversation,
        Intent::GetTime,
        Intent::PlaySong,
        Intent::SearchWeb,
        Intent::GetWikiInfo,
        Intent::Exit,
        Intent::Unknown,
    ];

    /// Snake-case label used in structured logs.
    pub fn label(self) -> &'static str {
        match self {
            Intent::Greet => "greet",
            Intent::StateName => "state_name",
            Intent::AnswerFact => "answer_fact",
            Intent::AnswerMath => "answer_math",
            Intent::AcknowledgeThanks => "acknowledge_thanks",
            Intent::ContinueConversation => "continue_conversation",
            Intent::GetTime => "get_time",
            Intent::PlaySong => "play_song",
            Intent::SearchWeb => "search_web",
            Intent::GetWikiInfo => "get_wiki_info",
            Intent::Exit => "exit",
            Intent::Unknown => "unknown",
        }
    }

    /// Whether answering this intent needs an external collaborator.
    pub fn is_delegated(self) -> bool {
        matches!(self, Intent::PlaySong | Intent::SearchWeb | Intent::GetWikiInfo)
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What the classifier returns when no rule matches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fallback {
    /// Keep the conversation going with a random prompt.
    #[default]
    Continue,
    /// Ask the user to rephrase.
    Unknown,
}

impl Fallback {
    pub fn intent(self) -> Intent {
        match self {
            Fallback::Continue => Intent::ContinueConversation,
            Fallback::Unknown => Intent::Unknown,
        }
    }
}

// =============================================================================
// Records
// =============================================================================

/// One row of the fact store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactEntry {
    /// Phrase searched for inside the utterance.
    pub topic: String,
    pub category: FactCategory,
    pub answer: String,
}

impl FactEntry {
    pub fn new(topic: impl Into<String>, category: FactCategory, answer: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            category,
            answer: answer.into(),
        }
    }
}

/// Raw input for one turn. Immutable once received.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Utterance(String);

impl Utterance {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercased, trimmed form used for keyword matching.
    ///
    /// Precomposed Bengali nukta letters are decomposed so that both
    /// spellings of e.g. "য়" match the same cue.
    pub fn normalized(&self) -> String {
        let mut out = String::with_capacity(self.0.len());
        for c in self.0.trim().chars() {
            match c {
                '\u{09DC}' => out.push_str("\u{09A1}\u{09BC}"),
                '\u{09DD}' => out.push_str("\u{09A2}\u{09BC}"),
                '\u{09DF}' => out.push_str("\u{09AF}\u{09BC}"),
                c => out.extend(c.to_lowercase()),
            }
        }
        out
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for Utterance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Utterance {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Utterance {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Append-only memory of one conversation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionState {
    pub id: Uuid,
    pub started_at: DateTime<Local>,
    history: Vec<Utterance>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Local::now(),
            history: Vec::new(),
        }
    }

    /// Record a new utterance.
    pub fn push(&mut self, utterance: Utterance) {
        self.history.push(utterance);
    }

    /// Most recent utterance, if any.
    pub fn latest(&self) -> Option<&Utterance> {
        self.history.last()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn history(&self) -> &[Utterance] {
        &self.history
    }
}

// =============================================================================
// Tests
// =============================================================================
