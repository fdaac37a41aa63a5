//! LLM annotation client
//!
//! Optional Ollama integration that enriches rule-based results with
//! short natural-language notes. Annotations are attach-only: a failed
//! or unavailable LLM never changes a risk level, a score or a summary.

use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::models::{CrisisAssessment, PatternSummary};
use crate::utils::truncate_for_log;

/// Configuration for the annotation LLM
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Ollama endpoint URL
    pub endpoint: String,

    /// Model name to use
    pub model: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Maximum tokens to generate
    pub max_tokens: u32,

    /// Temperature for generation (0.0 - 1.0)
    pub temperature: f32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:11434".to_string(),
            model: "qwen2.5:7b".to_string(),
            timeout_secs: 30,
            max_tokens: 512,
            temperature: 0.2,
        }
    }
}

impl LlmConfig {
    /// Create config from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            endpoint: std::env::var("OLLAMA_ENDPOINT").unwrap_or(defaults.endpoint),
            model: std::env::var("OLLAMA_MODEL").unwrap_or(defaults.model),
            timeout_secs: std::env::var("OLLAMA_TIMEOUT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.timeout_secs),
            max_tokens: std::env::var("OLLAMA_MAX_TOKENS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_tokens),
            temperature: std::env::var("OLLAMA_TEMPERATURE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.temperature),
        }
    }
}

/// Ollama generate request
#[derive(Debug, Serialize)]
struct OllamaRequest {
    model: String,
    prompt: String,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Debug, Serialize)]
struct OllamaOptions {
    temperature: f32,
    num_predict: u32,
}

/// Ollama generate response
#[derive(Debug, Deserialize)]
struct OllamaResponse {
    response: String,
}

/// Client producing short annotations for assessments and summaries
pub struct ReasoningClient {
    client: Client,
    config: LlmConfig,
}

impl ReasoningClient {
    pub fn new(config: LlmConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(LlmConfig::from_env())
    }

    /// Check if Ollama is available
    pub async fn is_available(&self) -> bool {
        let url = format!("{}/api/tags", self.config.endpoint);
        self.client.get(&url).send().await.is_ok()
    }

    /// Explain a crisis assessment in one or two sentences.
    ///
    /// Returns `None` on any failure; callers attach the note only when
    /// one was produced.
    pub async fn crisis_reasoning(
        &self,
        text: &str,
        assessment: &CrisisAssessment,
    ) -> Option<String> {
        let prompt = format!(
            "You are assisting a mental-wellness service. A rule-based scan \
             classified the following journal text as {} risk.\n\
             Matched indicators: {}.\n\n\
             Text: {}\n\n\
             In at most two sentences, explain in supportive language what in \
             the text supports this classification. Do not change the \
             classification, do not give medical advice.",
            assessment.risk_level,
            assessment.indicators.join("; "),
            text,
        );
        self.generate_note(&prompt).await
    }

    /// One-paragraph insight over a pattern summary
    pub async fn pattern_insight(&self, summary: &PatternSummary) -> Option<String> {
        let average = summary
            .average_mood
            .map(|a| format!("{a:.1}"))
            .unwrap_or_else(|| "unknown".to_string());
        let emotions: Vec<&str> = summary
            .top_emotions
            .iter()
            .map(|e| e.name.as_str())
            .collect();

        let prompt = format!(
            "A user's mood journal over {} entries shows an average mood of {} \
             out of 10, a {} trend, and frequent emotions: {}.\n\
             Write one short supportive paragraph of insight. No medical \
             advice, no diagnosis.",
            summary.entry_count,
            average,
            summary.trend,
            emotions.join(", "),
        );
        self.generate_note(&prompt).await
    }

    /// A single personalized suggestion grounded in the summary
    pub async fn personalized_suggestion(&self, summary: &PatternSummary) -> Option<String> {
        let average = summary
            .average_mood
            .map(|a| format!("{a:.1}"))
            .unwrap_or_else(|| "unknown".to_string());

        let prompt = format!(
            "Given an average mood of {} out of 10 and a {} trend over {} \
             journal entries, suggest one concrete, low-effort wellbeing \
             activity in a single sentence. No medical advice.",
            average, summary.trend, summary.entry_count,
        );
        self.generate_note(&prompt).await
    }

    async fn generate_note(&self, prompt: &str) -> Option<String> {
        match self.generate(prompt).await {
            Ok(text) => {
                let cleaned = clean_response(&text);
                if cleaned.is_empty() {
                    None
                } else {
                    debug!(note = %truncate_for_log(&cleaned, 80), "llm note generated");
                    Some(cleaned)
                }
            }
            Err(e) => {
                warn!("LLM annotation skipped: {e}");
                None
            }
        }
    }

    /// Generate text using Ollama
    async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/api/generate", self.config.endpoint);

        let request = OllamaRequest {
            model: self.config.model.clone(),
            prompt: prompt.to_string(),
            stream: false,
            options: OllamaOptions {
                temperature: self.config.temperature,
                num_predict: self.config.max_tokens,
            },
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .context("Failed to send request to Ollama")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Ollama request failed: {} - {}", status, body);
        }

        let ollama_response: OllamaResponse = response
            .json()
            .await
            .context("Failed to parse Ollama response")?;

        Ok(ollama_response.response)
    }
}

/// Strip code fences and surrounding whitespace from model output
fn clean_response(text: &str) -> String {
    let trimmed = text.trim();

    if let Some(start) = trimmed.find("```") {
        let after_start = &trimmed[start + 3..];
        let content_start = after_start.find('\n').map(|i| i + 1).unwrap_or(0);
        if let Some(end) = after_start[content_start..].find("```") {
            return after_start[content_start..content_start + end]
                .trim()
                .to_string();
        }
    }

    trimmed.trim_matches('"').trim().to_string()
}
