//! Chat-completions client
//!
//! HTTP client for an OpenAI-compatible endpoint (OpenRouter by default).

use super::fallback::fallback_with_explanation;
use super::{AssistantBackend, AssistantError, RecommendationDraft, SymptomAnalysis};
use crate::config::AssistantConfig;
use crate::journal::SymptomEntry;
use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const SYSTEM_PROMPT: &str = "You are a helpful medical AI assistant. Provide informative, empathetic responses about symptoms while emphasizing that this is not a substitute for professional medical advice. Always respond with valid JSON.";

const ANALYSIS_PROMPT: &str = r#"As a medical AI assistant, analyze these symptoms and provide a helpful response. Remember this is for informational purposes only and not a substitute for professional medical advice.

Symptoms described: "{symptoms}"

Please provide a JSON response with the following structure:
{
  "explanation": "A detailed, empathetic explanation of possible causes and general guidance",
  "symptoms": ["list of identified symptoms"],
  "possibleConditions": ["list of 2-3 most likely conditions"],
  "urgencyLevel": "low/medium/high",
  "confidenceScore": 0.7,
  "keyInsights": ["3-4 key insights about the symptoms"],
  "recommendedActions": ["3-4 recommended next steps"],
  "recommendations": [
    {"text": "specific recommendation", "type": "Diet/Exercise/Lifestyle/General"}
  ]
}

Guidelines:
- Be empathetic and reassuring while being medically responsible
- Always recommend consulting healthcare professionals for persistent or concerning symptoms
- Provide practical, actionable advice
- Avoid definitive diagnoses
- Consider common causes first
- Include relevant lifestyle recommendations"#;

const RECOMMENDATION_PROMPT: &str = r#"Based on this recent symptom history (newest first), suggest 3-5 practical health recommendations. This is for informational purposes only and not a substitute for professional medical advice.

History:
{history}

Respond with a JSON array only:
[
  {"text": "specific recommendation", "type": "Diet/Exercise/Lifestyle/General"}
]"#;

/// OpenAI-compatible chat-completions client
pub struct OpenRouterClient {
    client: Client,
    config: AssistantConfig,
    json_object: Regex,
    json_array: Regex,
}

impl OpenRouterClient {
    /// Create a new client with the given configuration
    pub fn new(config: AssistantConfig) -> Result<Self, AssistantError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            config,
            json_object: Regex::new(r"(?s)\{.*\}")?,
            json_array: Regex::new(r"(?s)\[.*\]")?,
        })
    }

    /// Get the current configuration
    pub fn config(&self) -> &AssistantConfig {
        &self.config
    }

    fn request_body(&self, prompt: String) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt,
                },
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        }
    }

    /// Send a completion request with retry logic and return the reply text
    async fn complete(&self, prompt: String) -> Result<String, AssistantError> {
        let url = format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'));
        let body = self.request_body(prompt);
        let api_key = self.config.api_key.as_deref().unwrap_or_default();
        let mut last_error = AssistantError::Unavailable;

        for attempt in 0..self.config.max_retries.max(1) {
            if attempt > 0 {
                // Backoff: 1s, 4s, 9s...
                let delay = Duration::from_secs((attempt as u64).pow(2));
                tokio::time::sleep(delay).await;
            }

            match self
                .client
                .post(&url)
                .bearer_auth(api_key)
                .json(&body)
                .send()
                .await
            {
                Ok(response) => {
                    if response.status().is_success() {
                        let completion: ChatCompletionResponse = response.json().await?;
                        return completion
                            .choices
                            .into_iter()
                            .next()
                            .and_then(|choice| choice.message.content)
                            .ok_or_else(|| {
                                AssistantError::InvalidResponse(
                                    "missing message content".to_string(),
                                )
                            });
                    } else if response.status().as_u16() == 429 {
                        if let Some(secs) = response
                            .headers()
                            .get("Retry-After")
                            .and_then(|v| v.to_str().ok())
                            .and_then(|v| v.parse::<u64>().ok())
                        {
                            tokio::time::sleep(Duration::from_secs(secs)).await;
                        }
                        tracing::debug!(attempt, "Assistant rate limited");
                        last_error = AssistantError::RateLimited;
                        continue;
                    } else {
                        let status = response.status();
                        let text = response.text().await.unwrap_or_default();
                        return Err(AssistantError::ApiError {
                            status: status.as_u16(),
                            message: text,
                        });
                    }
                }
                Err(e) => {
                    tracing::debug!(attempt, error = %e, "Assistant request failed");
                    last_error = if e.is_timeout() {
                        AssistantError::Timeout
                    } else if e.is_connect() {
                        AssistantError::Unavailable
                    } else {
                        AssistantError::Request(e)
                    };
                    continue;
                }
            }
        }

        Err(last_error)
    }

    /// Parse the first `{...}` block of a reply. Prose or malformed JSON
    /// becomes the explanation of a fallback analysis.
    fn parse_analysis(&self, text: &str, reply: &str) -> SymptomAnalysis {
        self.json_object
            .find(reply)
            .and_then(|m| serde_json::from_str::<SymptomAnalysis>(m.as_str()).ok())
            .unwrap_or_else(|| {
                tracing::warn!("Failed to parse assistant reply as JSON, using fallback");
                fallback_with_explanation(text, reply)
            })
    }

    fn parse_recommendations(
        &self,
        reply: &str,
    ) -> Result<Vec<RecommendationDraft>, AssistantError> {
        let block = self
            .json_array
            .find(reply)
            .ok_or_else(|| AssistantError::InvalidResponse("no JSON array in reply".to_string()))?;

        serde_json::from_str(block.as_str())
            .map_err(|e| AssistantError::InvalidResponse(e.to_string()))
    }
}

fn history_lines(entries: &[SymptomEntry]) -> String {
    entries
        .iter()
        .map(|e| format!("- {}: {}", e.timestamp.format("%Y-%m-%d"), e.symptom_text()))
        .collect::<Vec<_>>()
        .join("\n")
}

#[async_trait]
impl AssistantBackend for OpenRouterClient {
    async fn analyze(&self, text: &str) -> Result<SymptomAnalysis, AssistantError> {
        let reply = self.complete(ANALYSIS_PROMPT.replace("{symptoms}", text)).await?;
        Ok(self.parse_analysis(text, &reply))
    }

    async fn recommend(
        &self,
        entries: &[SymptomEntry],
    ) -> Result<Vec<RecommendationDraft>, AssistantError> {
        let prompt = RECOMMENDATION_PROMPT.replace("{history}", &history_lines(entries));
        let reply = self.complete(prompt).await?;
        self.parse_recommendations(&reply)
    }
}

// ============================================
// Request/Response DTOs
// ============================================

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    #[serde(default)]
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    content: Option<String>,
}
