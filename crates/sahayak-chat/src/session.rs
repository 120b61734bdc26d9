//! The session loop: listen, answer, delegate, repeat.

use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use sahayak_core::error::AssistError;
use sahayak_core::types::Intent;
use sahayak_lookup::{web_search_url, youtube_search_url, Encyclopedia, WebLauncher};
use sahayak_speech::{SpeechError, SpeechInput, SpeechOutput, WakeWordGate};

use crate::agent::{Agent, Environment, Turn};
use crate::delegate::Delegation;
use crate::error::ChatError;

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// The user asked to leave.
    ExitIntent,
    /// The input source has no more utterances.
    InputClosed,
}

/// What happened during a finished session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub session_id: Uuid,
    /// Utterances answered by the agent.
    pub turns: usize,
    pub exit: ExitReason,
}

/// Result of one attempt to hear the user.
enum Heard {
    Text(String),
    Retry,
    Closed,
}

/// One conversation between the user and a named agent.
pub struct Session {
    env: Environment,
    agent: String,
    input: Box<dyn SpeechInput>,
    output: Box<dyn SpeechOutput>,
    encyclopedia: Option<Arc<dyn Encyclopedia>>,
    launcher: Option<Arc<dyn WebLauncher>>,
    wake: Option<WakeWordGate>,
    max_options: usize,
    intro: Option<String>,
}

impl Session {
    pub fn new(
        env: Environment,
        agent: impl Into<String>,
        input: Box<dyn SpeechInput>,
        output: Box<dyn SpeechOutput>,
    ) -> Self {
        Self {
            env,
            agent: agent.into(),
            input,
            output,
            encyclopedia: None,
            launcher: None,
            wake: None,
            max_options: 3,
            intro: None,
        }
    }

    pub fn with_encyclopedia(mut self, encyclopedia: Arc<dyn Encyclopedia>) -> Self {
        self.encyclopedia = Some(encyclopedia);
        self
    }

    pub fn with_launcher(mut self, launcher: Arc<dyn WebLauncher>) -> Self {
        self.launcher = Some(launcher);
        self
    }

    /// Require a wake word before each command. `None` accepts everything.
    pub fn with_wake_gate(mut self, gate: Option<WakeWordGate>) -> Self {
        self.wake = gate;
        self
    }

    /// Most candidates listed when a lookup is ambiguous.
    pub fn with_max_options(mut self, max_options: usize) -> Self {
        self.max_options = max_options;
        self
    }

    /// Replace the agent's default opening line.
    pub fn with_intro(mut self, intro: Option<String>) -> Self {
        self.intro = intro;
        self
    }

    fn agent_mut(&mut self) -> Result<&mut Agent, ChatError> {
        self.env
            .agent_mut(&self.agent)
            .ok_or_else(|| ChatError::AgentNotFound(self.agent.clone()))
    }

    /// Run until the user exits or the input closes.
    pub async fn run(mut self) -> Result<SessionSummary, ChatError> {
        let intro = self.intro.clone();
        let agent = self.agent_mut()?;
        let session_id = agent.memory().id;
        let intro = agent.generator().intro(agent.facts(), intro.as_deref());
        info!(%session_id, agent = %self.agent, "Session started");
        self.say(&intro).await;

        let mut turns = 0;
        let mut pending: Option<Delegation> = None;

        let exit = loop {
            // The wake word is only needed to start a command, not to answer
            // a follow-up question.
            let waiting_for_wake = pending.is_none() && self.wake.is_some();
            let heard = if waiting_for_wake {
                self.hear_idle().await?
            } else {
                self.hear().await?
            };
            let text = match heard {
                Heard::Text(text) => text,
                Heard::Retry => continue,
                Heard::Closed => break ExitReason::InputClosed,
            };

            let text = if waiting_for_wake {
                if !self.wake.as_ref().is_some_and(|gate| gate.matches(&text)) {
                    debug!(transcript = %text, "No wake word, ignoring");
                    continue;
                }
                let ack = self.agent_mut()?.generator().wake_ack();
                self.say(ack).await;
                match self.hear().await? {
                    Heard::Text(text) => text,
                    Heard::Retry => continue,
                    Heard::Closed => break ExitReason::InputClosed,
                }
            } else {
                text
            };

            turns += 1;
            let agent = self.agent_mut()?;
            let turn = match pending.take() {
                Some(delegation) => agent.follow_up(&text, delegation),
                None => agent.handle(&text),
            };

            if self.finish_turn(turn, &mut pending).await? {
                break ExitReason::ExitIntent;
            }
        };

        info!(%session_id, turns, exit = ?exit, "Session ended");
        Ok(SessionSummary {
            session_id,
            turns,
            exit,
        })
    }

    /// Speak the turn's reply and carry out its delegation. Returns true
    /// when the session should end.
    async fn finish_turn(
        &mut self,
        turn: Turn,
        pending: &mut Option<Delegation>,
    ) -> Result<bool, ChatError> {
        let Turn {
            intent,
            reply,
            delegation,
        } = turn;

        match delegation {
            Some(d) if d.needs_topic() => {
                self.say(&reply).await;
                *pending = Some(d);
            }
            // The lookup announcement waits until there is a summary to read.
            Some(Delegation::Lookup(topic)) => self.lookup(&topic, &reply).await?,
            Some(d) => {
                self.say(&reply).await;
                self.launch(&d).await?;
            }
            None => self.say(&reply).await,
        }

        match intent {
            Intent::Exit => return Ok(true),
            Intent::GetTime => {
                if let Some(prompt) = self.agent_mut()?.generator_mut().idle_prompt() {
                    self.say(&prompt).await;
                }
            }
            _ => {}
        }
        Ok(false)
    }

    /// Next utterance, speaking an apology for recognition failures.
    async fn hear(&mut self) -> Result<Heard, ChatError> {
        match self.input.listen().await {
            Ok(text) => Ok(Heard::Text(text)),
            Err(SpeechError::Closed) => Ok(Heard::Closed),
            Err(e) => {
                warn!(error = %e, "Listening failed");
                self.apologize(AssistError::from(e)).await?;
                Ok(Heard::Retry)
            }
        }
    }

    /// Like [`Session::hear`], but silence while waiting for the wake word
    /// is not worth an apology.
    async fn hear_idle(&mut self) -> Result<Heard, ChatError> {
        match self.input.listen().await {
            Err(SpeechError::NotUnderstood) => {
                debug!("Nothing recognized while waiting for the wake word");
                Ok(Heard::Retry)
            }
            Ok(text) => Ok(Heard::Text(text)),
            Err(SpeechError::Closed) => Ok(Heard::Closed),
            Err(e) => {
                warn!(error = %e, "Listening failed");
                self.apologize(AssistError::from(e)).await?;
                Ok(Heard::Retry)
            }
        }
    }

    async fn lookup(&mut self, topic: &str, announcement: &str) -> Result<(), ChatError> {
        let Some(encyclopedia) = self.encyclopedia.clone() else {
            debug!(%topic, "Lookup disabled");
            return self
                .apologize(AssistError::ServiceUnavailable("lookup disabled".to_string()))
                .await;
        };
        match encyclopedia.summary(topic).await {
            Ok(summary) => {
                info!(%topic, "Lookup succeeded");
                self.say(announcement).await;
                self.say(&summary).await;
                Ok(())
            }
            Err(e) => {
                warn!(%topic, error = %e, "Lookup failed");
                self.apologize(e.into()).await
            }
        }
    }

    async fn launch(&mut self, delegation: &Delegation) -> Result<(), ChatError> {
        let Some(launcher) = self.launcher.clone() else {
            debug!(topic = %delegation.topic(), "Web launching disabled");
            return Ok(());
        };
        let url = match delegation {
            Delegation::Play(topic) => youtube_search_url(topic),
            Delegation::Search(topic) => web_search_url(topic),
            Delegation::Lookup(_) => return Ok(()),
        };
        let result = match url {
            Ok(url) => launcher.open(&url).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(()) => Ok(()),
            Err(e) => {
                warn!(topic = %delegation.topic(), error = %e, "Launch failed");
                self.apologize(e.into()).await
            }
        }
    }

    async fn apologize(&mut self, err: AssistError) -> Result<(), ChatError> {
        let max = self.max_options;
        let line = self.agent_mut()?.generator().apology(&err, max);
        self.say(&line).await;
        Ok(())
    }

    /// Output failures never end the session.
    async fn say(&mut self, text: &str) {
        if let Err(e) = self.output.say(text).await {
            warn!(error = %e, "Output failed");
        }
    }
}
