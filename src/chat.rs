//! Conversation state for the offline emergency chatbot: current location,
//! transcript, and the routing between keyword guides, decline / redirect
//! replies and the optional local model.

use std::fmt;

use chrono::Utc;
use tracing::{debug, warn};

use crate::dispatch::{
    self, Category, get_decline_response, get_emergency_response, get_redirect_response,
    is_emergency_related, is_non_emergency_topic,
};
use crate::llm::{CompletionClient, build_master_prompt};

/// Who wrote a chat bubble.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Bot,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Bot => "bot",
        }
    }
}

/// How a bot reply was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySource {
    Matcher,
    Decline,
    Redirect,
    Model,
}

impl ReplySource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Matcher => "matcher",
            Self::Decline => "decline",
            Self::Redirect => "redirect",
            Self::Model => "model",
        }
    }
}

/// One bubble in the transcript.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatTurn {
    pub role: Role,
    pub text: String,
    /// Unix seconds.
    pub timestamp: i64,
    /// Category the user's text routed to.  Set on both bubbles of a turn.
    pub category: Option<Category>,
    pub source: Option<ReplySource>,
}

/// Stateful chat: one per conversation.
pub struct ChatSession {
    location: String,
    transcript: Vec<ChatTurn>,
    /// When `true`, the keyword-only path declines clearly off-topic
    /// requests instead of showing the generic fallback.
    gate_off_topic: bool,
}

impl ChatSession {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            transcript: Vec::new(),
            gate_off_topic: false,
        }
    }

    /// Construct from environment variables.
    ///
    /// | Env var          | Default | Purpose                                   |
    /// |------------------|---------|-------------------------------------------|
    /// | `CHAT_LOCATION`  | —       | Location shown in greetings / redirects   |
    /// | `GATE_OFF_TOPIC` | `false` | Decline off-topic text without the model  |
    pub fn from_env() -> Self {
        let location = std::env::var("CHAT_LOCATION")
            .map(|v| v.trim().to_string())
            .unwrap_or_default();
        let gate = std::env::var("GATE_OFF_TOPIC")
            .ok()
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        Self::new(location).with_off_topic_gate(gate)
    }

    pub fn with_off_topic_gate(mut self, gate: bool) -> Self {
        self.gate_off_topic = gate;
        self
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn set_location(&mut self, location: impl Into<String>) {
        self.location = location.into();
    }

    pub fn transcript(&self) -> &[ChatTurn] {
        &self.transcript
    }

    pub fn clear(&mut self) {
        self.transcript.clear();
    }

    /// Opening bubble: the greeting for the current location.
    pub fn welcome(&mut self) -> String {
        let text = dispatch::render(Category::Greeting, "", &self.location);
        self.push(Role::Bot, text.clone(), Some(Category::Greeting), Some(ReplySource::Matcher));
        text
    }

    /// Keyword-only reply.  Returns `None` (and records nothing) for blank
    /// input.
    pub fn respond(&mut self, text: &str) -> Option<String> {
        if text.trim().is_empty() {
            return None;
        }
        let category = dispatch::classify(text);
        self.push(Role::User, text.to_string(), Some(category), None);

        let (reply, source) = if self.gate_off_topic && is_off_topic(text) {
            debug!("Off-topic request – declining");
            (get_decline_response(text), ReplySource::Decline)
        } else {
            (
                get_emergency_response(text, &self.location),
                ReplySource::Matcher,
            )
        };

        self.push(Role::Bot, reply.clone(), Some(category), Some(source));
        Some(reply)
    }

    /// Reply using the local model when it is enabled, falling back to the
    /// keyword guides when it is not or when the call fails.  With the model
    /// on, off-topic text is always declined and text without any emergency
    /// keyword is redirected before the model is asked.
    pub async fn respond_with_llm(
        &mut self,
        text: &str,
        llm: &CompletionClient,
    ) -> Option<String> {
        if !llm.is_enabled() {
            return self.respond(text);
        }
        if text.trim().is_empty() {
            return None;
        }
        let category = dispatch::classify(text);
        self.push(Role::User, text.to_string(), Some(category), None);

        let (reply, source) = if is_off_topic(text) {
            debug!("Off-topic request – declining");
            (get_decline_response(text), ReplySource::Decline)
        } else if !is_emergency_related(text) {
            debug!("No emergency keyword – redirecting");
            (
                get_redirect_response(text, &self.location),
                ReplySource::Redirect,
            )
        } else {
            let prompt = build_master_prompt(text, &self.location);
            match llm.complete(&prompt, llm.options()).await {
                Ok(answer) if !answer.is_empty() => (answer, ReplySource::Model),
                Ok(_) => {
                    warn!("LLM returned an empty answer (fail-open)");
                    (
                        dispatch::render(category, text, &self.location),
                        ReplySource::Matcher,
                    )
                }
                Err(e) => {
                    warn!("LLM completion failed (fail-open): {e:#}");
                    (
                        dispatch::render(category, text, &self.location),
                        ReplySource::Matcher,
                    )
                }
            }
        };

        self.push(Role::Bot, reply.clone(), Some(category), Some(source));
        Some(reply)
    }

    fn push(
        &mut self,
        role: Role,
        text: String,
        category: Option<Category>,
        source: Option<ReplySource>,
    ) {
        self.transcript.push(ChatTurn {
            role,
            text,
            timestamp: Utc::now().timestamp(),
            category,
            source,
        });
    }
}

/// Clearly about something else and mentions nothing emergency-like.
fn is_off_topic(text: &str) -> bool {
    is_non_emergency_topic(text) && !is_emergency_related(text)
}

impl fmt::Display for ChatSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ChatSession(location={:?}, gate_off_topic={}, turns={})",
            self.location,
            self.gate_off_topic,
            self.transcript.len(),
        )
    }
}
