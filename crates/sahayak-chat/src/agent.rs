//! Perceive-think-act agent and the environment that hosts agents.

use std::collections::HashMap;

use tracing::{debug, info};

use sahayak_core::types::{Fallback, Intent, Locale, SessionState, Utterance};

use crate::classifier::IntentClassifier;
use crate::delegate::{clean_topic, plan, Delegation};
use crate::error::ChatError;
use crate::facts::FactStore;
use crate::response::ResponseGenerator;

/// Outcome of one agent turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub intent: Intent,
    /// Text to say to the user.
    pub reply: String,
    /// Collaborator request to carry out after replying.
    pub delegation: Option<Delegation>,
}

// =============================================================================
// Agent
// =============================================================================

/// A named assistant with its own facts, rules and memory.
#[derive(Debug)]
pub struct Agent {
    name: String,
    facts: FactStore,
    classifier: IntentClassifier,
    generator: ResponseGenerator,
    memory: SessionState,
}

impl Agent {
    pub fn new(
        name: impl Into<String>,
        locale: Locale,
        facts: FactStore,
        fallback: Fallback,
    ) -> Result<Self, ChatError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ChatError::EmptyAgentName);
        }
        Ok(Self {
            name,
            facts,
            classifier: IntentClassifier::new(locale, fallback),
            generator: ResponseGenerator::new(locale),
            memory: SessionState::new(),
        })
    }

    /// Replace the response generator (seeded or with a fixed clock).
    pub fn with_generator(mut self, generator: ResponseGenerator) -> Self {
        self.generator = generator;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn locale(&self) -> Locale {
        self.classifier.locale()
    }

    pub fn facts(&self) -> &FactStore {
        &self.facts
    }

    pub fn memory(&self) -> &SessionState {
        &self.memory
    }

    pub fn generator(&self) -> &ResponseGenerator {
        &self.generator
    }

    pub fn generator_mut(&mut self) -> &mut ResponseGenerator {
        &mut self.generator
    }

    /// Record an utterance.
    pub fn perceive(&mut self, utterance: Utterance) {
        debug!(agent = %self.name, utterance = %utterance, "Perceived");
        self.memory.push(utterance);
    }

    /// Classify the latest utterance.
    pub fn think(&self) -> Intent {
        self.memory
            .latest()
            .map(|u| self.classifier.classify(u))
            .unwrap_or(Intent::Unknown)
    }

    /// Answer the latest utterance as `intent`.
    pub fn act(&mut self, intent: Intent) -> Turn {
        let utterance = self.memory.latest().cloned().unwrap_or_else(|| Utterance::new(""));
        let reply = self.generator.respond(intent, &utterance, &self.facts);
        let delegation = plan(self.locale(), intent, &utterance);
        Turn {
            intent,
            reply,
            delegation,
        }
    }

    /// Perceive, think and act on one line of input.
    pub fn handle(&mut self, text: &str) -> Turn {
        self.perceive(Utterance::new(text));
        let intent = self.think();
        info!(
            agent = %self.name,
            session_id = %self.memory.id,
            turn = self.memory.len(),
            intent = intent.label(),
            "Classified"
        );
        self.act(intent)
    }

    /// Treat `text` as the topic of a delegation that was missing one.
    ///
    /// Exit still ends the conversation; anything else becomes the topic.
    pub fn follow_up(&mut self, text: &str, pending: Delegation) -> Turn {
        self.perceive(Utterance::new(text));
        if self.think() == Intent::Exit {
            return self.act(Intent::Exit);
        }
        let topic = clean_topic(text);
        if topic.is_empty() {
            return self.act(Intent::Unknown);
        }
        let delegation = pending.with_topic(topic);
        debug!(agent = %self.name, topic = %delegation.topic(), "Follow-up topic");
        Turn {
            intent: delegation.intent(),
            reply: self.generator.announce(&delegation),
            delegation: Some(delegation),
        }
    }
}

// =============================================================================
// Environment
// =============================================================================

/// Registry of agents addressed by name.
#[derive(Debug, Default)]
pub struct Environment {
    agents: HashMap<String, Agent>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an agent, replacing any agent with the same name.
    pub fn add_agent(&mut self, agent: Agent) {
        if self.agents.contains_key(agent.name()) {
            info!(agent = %agent.name(), "Replacing agent");
        }
        self.agents.insert(agent.name().to_string(), agent);
    }

    pub fn agent(&self, name: &str) -> Option<&Agent> {
        self.agents.get(name)
    }

    pub fn agent_mut(&mut self, name: &str) -> Option<&mut Agent> {
        self.agents.get_mut(name)
    }

    /// Run one turn of the named agent.
    pub fn interact(&mut self, name: &str, text: &str) -> Result<Turn, ChatError> {
        self.agents
            .get_mut(name)
            .map(|agent| agent.handle(text))
            .ok_or_else(|| ChatError::AgentNotFound(name.to_string()))
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.agents.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}
