//! Optional local-model completion for free-form emergency questions.
//!
//! Talks to a local [Ollama](https://ollama.com/) or llama.cpp server through
//! the OpenAI-compatible `/v1/completions` endpoint.  The chat session only
//! calls it for utterances the keyword scope check already accepted, and
//! falls back to the rule-based guides on timeout or error (fail-open).
//!
//! # Setup
//!
//! 1. Install Ollama: <https://ollama.com/download>
//!
//! 2. Pull a small model that fits on a phone-class device:
//!    ```bash
//!    ollama pull qwen2.5:3b          # ~2 GB RAM
//!    ```
//!
//! 3. Set env vars:
//!    ```env
//!    LLM_ENABLED=true
//!    LLM_MODEL=qwen2.5:3b                       # default
//!    LLM_ENDPOINT=http://127.0.0.1:11434        # default (Ollama)
//!    LLM_TIMEOUT_MS=15000                       # default
//!    ```
//!
//! For llama.cpp use `LLM_ENDPOINT=http://127.0.0.1:8012`.

use anyhow::{Context, Result, anyhow};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::dispatch::templates::UNKNOWN_LOCATION;

// ─────────────────────────── Master prompt ───────────────────────────────

const MASTER_PROMPT: &str = r####"You are an offline Emergency Response Assistant for disaster-affected communities in the Philippines.

Your ONLY purpose is to give clear, calm, life-saving guidance about:
- Typhoons and storms (bagyo)
- Earthquakes (lindol)
- Floods (baha)
- Fires (sunog)
- Medical emergencies and first aid
- Emergency preparedness (go bags, kits, family plans)

Rules:
- If the question is not about one of these topics, politely decline and list what you can help with.
- Put immediate safety actions first. Keep sentences short.
- Never invent phone numbers. Use only: 911 (national emergency), 143 (Philippine Red Cross), 160 (Bureau of Fire Protection).
- For anything life-threatening, tell the user to call 911 right away.
- Do not diagnose. Give first aid steps and tell the user to seek professional help.

Format:
- Start with a "## " header line with one emoji.
- Use "### " section headers and "• " bullets.
- Use **bold** for the most important actions.
- End with one short reassuring line in **bold**.
"####;

/// Full completion prompt: master instructions, the user's location, and
/// the turn to answer.
pub fn build_master_prompt(utterance: &str, location: &str) -> String {
    let location = match location.trim() {
        "" => UNKNOWN_LOCATION,
        loc => loc,
    };
    format!("{MASTER_PROMPT}\nUser location: {location}\n\nUser: {utterance}\nAssistant:")
}

// ─────────────────────────── Data types ──────────────────────────────────

/// Sampling options for one completion call.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionOptions {
    pub temperature: f32,
    pub max_tokens: u32,
    pub stop: Vec<String>,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 512,
            stop: vec!["</s>".into(), "User:".into(), "\nUser:".into()],
        }
    }
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    temperature: f32,
    max_tokens: u32,
    #[serde(skip_serializing_if = "no_stop_strings")]
    stop: &'a [String],
    stream: bool,
}

fn no_stop_strings(stop: &&[String]) -> bool {
    stop.is_empty()
}

#[derive(Deserialize, Debug)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize, Debug)]
struct Choice {
    text: String,
}

/// Pull the generated text out of a `/v1/completions` body.
fn extract_text(body: CompletionResponse) -> Result<String> {
    let choice = body
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("LLM returned no choices"))?;
    Ok(choice.text.trim().to_string())
}

// ───────────────────────── CompletionClient ──────────────────────────────

/// Async completion client.  Constructed once, reused for every turn.
pub struct CompletionClient {
    client: Client,
    endpoint: String,
    model: String,
    enabled: bool,
    timeout: Duration,
    options: CompletionOptions,
}

impl CompletionClient {
    /// Build from environment variables.
    ///
    /// | Env var           | Default                    | Description                  |
    /// |-------------------|----------------------------|------------------------------|
    /// | `LLM_ENABLED`     | `false`                    | Use the model for answers    |
    /// | `LLM_MODEL`       | `qwen2.5:3b`               | Ollama model name            |
    /// | `LLM_ENDPOINT`    | `http://127.0.0.1:11434`   | Ollama / llama-server URL    |
    /// | `LLM_TIMEOUT_MS`  | `15000`                    | Request timeout in ms        |
    /// | `LLM_TEMPERATURE` | `0.7`                      | Sampling temperature         |
    /// | `LLM_MAX_TOKENS`  | `512`                      | Completion length cap        |
    pub fn from_env() -> Self {
        let enabled = std::env::var("LLM_ENABLED")
            .ok()
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let endpoint =
            std::env::var("LLM_ENDPOINT").unwrap_or_else(|_| "http://127.0.0.1:11434".into());

        let model = std::env::var("LLM_MODEL").unwrap_or_else(|_| "qwen2.5:3b".into());

        let timeout_ms: u64 = std::env::var("LLM_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(15_000);

        let defaults = CompletionOptions::default();
        let options = CompletionOptions {
            temperature: std::env::var("LLM_TEMPERATURE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.temperature),
            max_tokens: std::env::var("LLM_MAX_TOKENS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_tokens),
            stop: defaults.stop,
        };

        Self::new(endpoint, model, enabled, Duration::from_millis(timeout_ms), options)
    }

    pub fn new(
        endpoint: String,
        model: String,
        enabled: bool,
        timeout: Duration,
        options: CompletionOptions,
    ) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model,
            enabled,
            timeout,
            options,
        }
    }

    /// A client that never calls out; every `complete` fails.
    #[cfg(test)]
    pub fn disabled() -> Self {
        Self::new(
            "http://127.0.0.1:11434".into(),
            "qwen2.5:3b".into(),
            false,
            Duration::from_millis(15_000),
            CompletionOptions::default(),
        )
    }

    /// Returns `true` when model answers are enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Options configured from the environment.
    pub fn options(&self) -> &CompletionOptions {
        &self.options
    }

    /// Run one completion.  Errors on a disabled client, transport failure,
    /// non-2xx status, or a body without choices.
    pub async fn complete(&self, prompt: &str, options: &CompletionOptions) -> Result<String> {
        if !self.enabled {
            return Err(anyhow!("LLM completion is disabled"));
        }

        let request = CompletionRequest {
            model: &self.model,
            prompt,
            temperature: options.temperature,
            max_tokens: options.max_tokens,
            stop: &options.stop,
            stream: false,
        };

        let url = format!("{}/v1/completions", self.endpoint);

        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await
            .with_context(|| format!("LLM request to {url} failed"))?;

        if !response.status().is_success() {
            let status = response.status();
            let raw = response.text().await.unwrap_or_default();
            return Err(anyhow!("LLM completion failed: {status} body={raw}"));
        }

        let body = response
            .json::<CompletionResponse>()
            .await
            .context("LLM response parse failed")?;
        debug!("LLM raw response: {body:?}");

        extract_text(body)
    }
}

impl std::fmt::Display for CompletionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "CompletionClient(enabled={}, model={}, endpoint={}, timeout={}ms, temp={}, max_tokens={})",
            self.enabled,
            self.model,
            self.endpoint,
            self.timeout.as_millis(),
            self.options.temperature,
            self.options.max_tokens,
        )
    }
}
