//! In-memory fact store.
//!
//! Topics are phrases searched for inside an utterance. Each category keeps
//! its entries in insertion order and the first contained topic wins.

use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use sahayak_core::types::{FactCategory, FactEntry, Locale, Utterance};

use crate::error::ChatError;

/// General-category key for the assistant's name.
pub const NAME_KEY: &str = "name";
/// General-category key for whoever made the assistant.
pub const CREATOR_KEY: &str = "creator";
/// General-category key for the answer to "how are you".
pub const STATUS_KEY: &str = "status";

const ENGLISH_GENERAL: &[(&str, &str)] = &[
    (NAME_KEY, "R.T."),
    (CREATOR_KEY, "Ariq Azmain"),
    (STATUS_KEY, "I'm fine, thank you!"),
];

const ENGLISH_FACTS: &[(&str, &str)] = &[
    ("capital of bangladesh", "Dhaka"),
    ("capital of india", "New Delhi"),
    ("currency of bangladesh", "Taka"),
    ("currency of india", "Rupee"),
];

const ENGLISH_MATH: &[(&str, &str)] = &[
    ("1+1", "2"),
    ("2+2", "4"),
    ("one plus one", "2"),
    ("two plus two", "4"),
];

const BENGALI_GENERAL: &[(&str, &str)] = &[
    (NAME_KEY, "সহায়ক"),
    (CREATOR_KEY, "আপনি"),
    (STATUS_KEY, "আমি ভাল আছি, ধন্যবাদ!"),
];

const BENGALI_FACTS: &[(&str, &str)] = &[
    ("বাংলাদেশের রাজধানী", "ঢাকা"),
    ("ভারতের রাজধানী", "নয়াদিল্লী"),
    ("বাংলাদেশের মুদ্রা", "টাকা"),
    ("ভারতের মুদ্রা", "রুপি"),
    ("এক ও এক", "২ (দুই)"),
];

const BENGALI_MATH: &[(&str, &str)] = &[("এক ও এক", "২ (দুই)"), ("দুই ও দুই", "৪ (চার)")];

fn normalize(topic: &str) -> String {
    Utterance::new(topic).normalized()
}

/// Shape of a facts file: a list of `[[fact]]` tables.
#[derive(Debug, Deserialize)]
struct FactFile {
    #[serde(default)]
    fact: Vec<FactEntry>,
}

/// Topic → answer tables, partitioned by category.
#[derive(Debug, Clone, Default)]
pub struct FactStore {
    general: Vec<FactEntry>,
    facts: Vec<FactEntry>,
    math: Vec<FactEntry>,
}

impl FactStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in tables for `locale`.
    pub fn builtin(locale: Locale) -> Self {
        let (general, facts, math) = match locale {
            Locale::En => (ENGLISH_GENERAL, ENGLISH_FACTS, ENGLISH_MATH),
            Locale::Bn => (BENGALI_GENERAL, BENGALI_FACTS, BENGALI_MATH),
        };
        let build = |rows: &[(&str, &str)], category| -> Vec<FactEntry> {
            rows.iter()
                .map(|(topic, answer)| FactEntry::new(*topic, category, *answer))
                .collect()
        };
        Self {
            general: build(general, FactCategory::General),
            facts: build(facts, FactCategory::Fact),
            math: build(math, FactCategory::Math),
        }
    }

    fn bucket(&self, category: FactCategory) -> &Vec<FactEntry> {
        match category {
            FactCategory::General => &self.general,
            FactCategory::Fact => &self.facts,
            FactCategory::Math => &self.math,
        }
    }

    fn bucket_mut(&mut self, category: FactCategory) -> &mut Vec<FactEntry> {
        match category {
            FactCategory::General => &mut self.general,
            FactCategory::Fact => &mut self.facts,
            FactCategory::Math => &mut self.math,
        }
    }

    fn position(&self, category: FactCategory, topic: &str) -> Option<usize> {
        let wanted = normalize(topic);
        self.bucket(category)
            .iter()
            .position(|e| normalize(&e.topic) == wanted)
    }

    /// Add an entry. Topics are unique per category, ignoring case.
    pub fn insert(&mut self, entry: FactEntry) -> Result<(), ChatError> {
        let topic = entry.topic.trim().to_string();
        if topic.is_empty() {
            return Err(ChatError::FactFile("fact topic cannot be empty".to_string()));
        }
        if self.position(entry.category, &topic).is_some() {
            return Err(ChatError::DuplicateTopic {
                category: entry.category,
                topic,
            });
        }
        self.bucket_mut(entry.category)
            .push(FactEntry::new(topic, entry.category, entry.answer));
        Ok(())
    }

    /// Insert or replace the answer for `topic`.
    pub fn set(&mut self, category: FactCategory, topic: &str, answer: impl Into<String>) {
        let answer = answer.into();
        match self.position(category, topic) {
            Some(i) => self.bucket_mut(category)[i].answer = answer,
            None => self
                .bucket_mut(category)
                .push(FactEntry::new(topic.trim(), category, answer)),
        }
    }

    /// Override the assistant's identity facts where a value is given.
    pub fn set_identity(
        &mut self,
        name: Option<&str>,
        creator: Option<&str>,
        status: Option<&str>,
    ) {
        for (key, value) in [(NAME_KEY, name), (CREATOR_KEY, creator), (STATUS_KEY, status)] {
            if let Some(value) = value {
                self.set(FactCategory::General, key, value);
            }
        }
    }

    /// First entry in `category` whose topic occurs in the utterance.
    pub fn lookup(&self, category: FactCategory, utterance: &Utterance) -> Option<&FactEntry> {
        let text = utterance.normalized();
        self.bucket(category)
            .iter()
            .find(|e| text.contains(&normalize(&e.topic)))
    }

    /// Answer stored under exactly `topic` (ignoring case).
    pub fn get(&self, category: FactCategory, topic: &str) -> Option<&str> {
        self.position(category, topic)
            .map(|i| self.bucket(category)[i].answer.as_str())
    }

    /// Merge `[[fact]]` tables from a TOML file. Returns how many were added.
    pub fn load_file(&mut self, path: &Path) -> Result<usize, ChatError> {
        let content = std::fs::read_to_string(path)?;
        let file: FactFile = toml::from_str(&content)?;
        let count = file.fact.len();
        for entry in file.fact {
            debug!(topic = %entry.topic, category = %entry.category, "Adding fact");
            self.insert(entry)?;
        }
        info!(count, path = %path.display(), "Facts loaded");
        Ok(count)
    }

    /// Entries of one category in insertion order.
    pub fn entries(&self, category: FactCategory) -> &[FactEntry] {
        self.bucket(category)
    }

    pub fn len(&self) -> usize {
        self.general.len() + self.facts.len() + self.math.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
