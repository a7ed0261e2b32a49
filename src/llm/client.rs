//! Streaming client for the Ollama generate API.
//!
//! The endpoint answers `POST {base_url}/api/generate` with newline
//! delimited JSON objects, each carrying a `response` fragment until a
//! final object with `done: true`. Fragments are handed to a caller
//! supplied sink as they decode so answers render progressively; the
//! accumulated text is returned at the end.

use anyhow::{bail, Context, Result};
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "llama2";

/// Endpoint configuration, read from `OLLAMA_URL` / `OLLAMA_MODEL` with
/// local defaults.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub base_url: String,
    pub model: String,
}

impl LlmConfig {
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("OLLAMA_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            model: std::env::var("OLLAMA_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateChunk {
    #[serde(default)]
    response: String,
    #[serde(default)]
    done: bool,
    error: Option<String>,
}

pub struct OllamaClient {
    http: reqwest::Client,
    config: LlmConfig,
}

impl OllamaClient {
    pub fn new(config: LlmConfig) -> Self {
        Self { http: reqwest::Client::new(), config }
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Stream a completion for `prompt`, calling `on_fragment` for every
    /// decoded text fragment. Returns the full response text.
    pub async fn generate_streamed<F>(&self, prompt: &str, mut on_fragment: F) -> Result<String>
    where
        F: FnMut(&str),
    {
        let url = format!("{}/api/generate", self.config.base_url.trim_end_matches('/'));
        debug!(model = %self.config.model, prompt_len = prompt.len(), "sending generate request");

        let response = self
            .http
            .post(&url)
            .json(&GenerateRequest { model: &self.config.model, prompt, stream: true })
            .send()
            .await
            .with_context(|| format!("request to {url} failed"))?
            .error_for_status()
            .context("model endpoint returned an error status")?;

        let mut full = String::new();
        let mut pending = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let bytes = chunk.context("error reading model response stream")?;
            pending.extend_from_slice(&bytes);
            // The stream is line-delimited; decode every complete line.
            while let Some(pos) = pending.iter().position(|&b| b == b'\n') {
                let line: Vec<u8> = pending.drain(..=pos).collect();
                if let Some(done) = Self::decode_line(&line, &mut full, &mut on_fragment)? {
                    if done {
                        return Ok(full);
                    }
                }
            }
        }
        // Some servers close the stream without a trailing newline.
        if !pending.is_empty() {
            let _ = Self::decode_line(&pending, &mut full, &mut on_fragment)?;
        }
        Ok(full)
    }

    /// Convenience wrapper for callers that only want the final text.
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        self.generate_streamed(prompt, |_| {}).await
    }

    fn decode_line<F>(line: &[u8], full: &mut String, on_fragment: &mut F) -> Result<Option<bool>>
    where
        F: FnMut(&str),
    {
        let text = String::from_utf8_lossy(line);
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        let chunk: GenerateChunk = match serde_json::from_str(trimmed) {
            Ok(chunk) => chunk,
            Err(e) => {
                // A malformed line is skipped, not fatal.
                warn!(error = %e, "could not decode model response line");
                return Ok(None);
            }
        };
        if let Some(error) = chunk.error {
            bail!("model endpoint reported an error: {error}");
        }
        if !chunk.response.is_empty() {
            on_fragment(&chunk.response);
            full.push_str(&chunk.response);
        }
        Ok(Some(chunk.done))
    }
}
