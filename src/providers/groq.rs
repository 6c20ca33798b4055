//! Groq Chat-Completions Client
//!
//! Contextual toxicity analysis and same-language rephrasing through Groq's
//! OpenAI-compatible API.
//!
//! Credential precedence:
//! 1. Caller key, if it carries the `gsk_` prefix
//! 2. Process-wide default key from `GROQ_API_KEY`
//! 3. Neither: fail without touching the network
//!
//! The model reply is untrusted. It must deserialize into [`ProviderVerdict`]
//! with every field present and typed, otherwise the call counts as failed.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info};

use super::prompt::{build_user_prompt, SYSTEM_PROMPT};
use super::ToxicityProvider;
use crate::models::config::ProviderConfig;
use crate::models::errors::{AppError, AppResult, ErrorCode};
use crate::models::types::{AnalysisResult, ProviderTag, Suggestions};
use crate::utils::constants::{is_groq_key, GENERIC_TOXICITY_MATCH, USER_AGENT};

// ============================================
// Wire types (OpenAI-compatible)
// ============================================

#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
    pub response_format: ResponseFormat,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

#[derive(Debug, Serialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub kind: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatReply,
}

#[derive(Debug, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub content: Option<String>,
}

/// Schema the model must answer with. All fields are required.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderVerdict {
    pub is_toxic: bool,
    pub matches: Vec<String>,
    pub suggestions: VerdictSuggestions,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VerdictSuggestions {
    pub kind: String,
    pub funny: String,
    pub professional: String,
}

impl ProviderVerdict {
    /// Parse the model's message content
    pub fn parse(content: &str) -> AppResult<Self> {
        serde_json::from_str(content.trim()).map_err(|e| {
            AppError::with_source(
                ErrorCode::ProviderInvalidResponse,
                "Model reply does not match the verdict schema",
                e,
            )
        })
    }

    /// Convert into the canonical result.
    ///
    /// `matches` must be empty iff the message is clean, which the model only
    /// promises. Clean verdicts lose their matches and suggestions, toxic
    /// verdicts without a category get a generic one.
    pub fn into_result(self) -> AnalysisResult {
        let mut matches: Vec<String> = if self.is_toxic {
            self.matches
                .into_iter()
                .map(|m| m.trim().to_string())
                .filter(|m| !m.is_empty())
                .collect()
        } else {
            Vec::new()
        };

        if self.is_toxic && matches.is_empty() {
            matches.push(GENERIC_TOXICITY_MATCH.to_string());
        }

        AnalysisResult::from_tier(
            ProviderTag::Groq,
            matches,
            Suggestions::new(
                self.suggestions.kind,
                self.suggestions.funny,
                self.suggestions.professional,
            ),
        )
    }
}

// ============================================
// Client
// ============================================

/// Groq provider tier
pub struct GroqClient {
    client: reqwest::Client,
    config: ProviderConfig,
}

impl GroqClient {
    pub fn new(config: ProviderConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorCode::ConfigInvalidValue, "Failed to build HTTP client", e)
            })?;

        Ok(Self { client, config })
    }

    /// Pick the credential for this call.
    ///
    /// Only a syntactic check: revoked or exhausted keys fail on the call.
    pub fn select_key<'a>(&'a self, caller_key: Option<&'a str>) -> Option<&'a str> {
        caller_key
            .map(str::trim)
            .filter(|k| is_groq_key(k))
            .or(self.config.default_api_key.as_deref())
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    /// Request body for one analysis
    pub fn build_request<'a>(&'a self, user_prompt: &'a str) -> ChatCompletionRequest<'a> {
        ChatCompletionRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            response_format: ResponseFormat {
                kind: "json_object",
            },
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        }
    }

    /// One attempt against the provider, no retries
    pub async fn analyze_with_provider(
        &self,
        text: &str,
        caller_key: Option<&str>,
    ) -> AppResult<AnalysisResult> {
        let key = self.select_key(caller_key).ok_or_else(AppError::missing_api_key)?;
        let key_source = if caller_key.map(str::trim).is_some_and(is_groq_key) {
            "caller"
        } else {
            "default"
        };

        let start = Instant::now();
        let user_prompt = build_user_prompt(text);
        let body = self.build_request(&user_prompt);

        debug!(model = %self.config.model, key_source, "Calling Groq chat completions");

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::provider_status(status.as_u16()));
        }

        let envelope: ChatCompletionResponse = response.json().await?;
        let content = envelope
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| AppError::invalid_response("Reply has no message content"))?;

        let result = ProviderVerdict::parse(&content)?.into_result();

        info!(
            latency_ms = %start.elapsed().as_millis(),
            key_source,
            toxic = result.is_toxic,
            "Groq analysis complete"
        );

        Ok(result)
    }
}

#[async_trait]
impl ToxicityProvider for GroqClient {
    fn name(&self) -> &'static str {
        "groq"
    }

    async fn analyze(&self, text: &str, caller_key: Option<&str>) -> AppResult<AnalysisResult> {
        self.analyze_with_provider(text, caller_key).await
    }
}
