//! Symptom Assistant
//!
//! The LLM collaborator that turns free text into a structured analysis and
//! produces batch recommendations from recent history.
//!
//! Two seams:
//! - [`AssistantBackend`]: fallible, one implementation per provider
//!   ([`OpenRouterClient`], [`DemoAssistant`])
//! - [`SymptomAssistant`]: infallible, what the rest of the crate awaits.
//!   [`ResilientAssistant`] bridges the two by logging failures and
//!   substituting the static fallback.

mod client;
mod fallback;

pub use client::OpenRouterClient;
pub use fallback::{
    extract_symptoms, fallback_analysis, fallback_recommendations, fallback_with_explanation,
    DemoAssistant, ASSISTANT_VOCABULARY,
};

use crate::config::AssistantConfig;
use crate::journal::{FreeText, Recommendation, RecommendationType, SymptomEntry};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Confidence recorded on an entry when the analysis did not report one
pub const UNREPORTED_CONFIDENCE: f64 = 0.7;

/// Number of most recent entries sent for batch recommendations
pub const RECOMMENDATION_WINDOW: usize = 10;

/// How urgently the user should seek care
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum UrgencyLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl From<String> for UrgencyLevel {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "low" => UrgencyLevel::Low,
            "high" => UrgencyLevel::High,
            _ => UrgencyLevel::Medium,
        }
    }
}

impl From<UrgencyLevel> for String {
    fn from(value: UrgencyLevel) -> Self {
        value.to_string()
    }
}

impl std::fmt::Display for UrgencyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UrgencyLevel::Low => write!(f, "low"),
            UrgencyLevel::Medium => write!(f, "medium"),
            UrgencyLevel::High => write!(f, "high"),
        }
    }
}

/// A recommendation before it is stamped and stored
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationDraft {
    pub text: String,
    #[serde(rename = "type", default = "general")]
    pub kind: RecommendationType,
}

fn general() -> RecommendationType {
    RecommendationType::General
}

impl RecommendationDraft {
    pub fn new(kind: impl Into<RecommendationType>, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: kind.into(),
        }
    }

    pub fn into_recommendation(self) -> Recommendation {
        Recommendation::new(self.kind, self.text)
    }
}

/// Structured reply to a symptom description
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SymptomAnalysis {
    /// Explanation of possible causes
    #[serde(alias = "explanation", default)]
    pub diagnosis: String,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub possible_conditions: Vec<String>,
    #[serde(default)]
    pub urgency_level: UrgencyLevel,
    #[serde(alias = "confidenceScore", default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub key_insights: Vec<String>,
    #[serde(default)]
    pub recommended_actions: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<RecommendationDraft>,
}

impl SymptomAnalysis {
    /// Journal entry for the described symptoms. Falls back to the raw text
    /// when no symptoms were identified.
    pub fn to_entry(&self, text: &str) -> SymptomEntry {
        let symptoms = if self.symptoms.is_empty() {
            FreeText::from(text)
        } else {
            FreeText::List(self.symptoms.clone())
        };

        let mut entry = SymptomEntry::new(symptoms)
            .details(text)
            .confidence(self.confidence.unwrap_or(UNREPORTED_CONFIDENCE));
        if !self.possible_conditions.is_empty() {
            entry = entry.diagnosis(self.possible_conditions.clone());
        }
        entry
    }

    pub fn to_recommendations(&self) -> Vec<Recommendation> {
        self.recommendations
            .iter()
            .cloned()
            .map(RecommendationDraft::into_recommendation)
            .collect()
    }
}

/// Provider-facing assistant; errors surface to the caller
#[async_trait]
pub trait AssistantBackend: Send + Sync {
    async fn analyze(&self, text: &str) -> Result<SymptomAnalysis, AssistantError>;

    async fn recommend(
        &self,
        entries: &[SymptomEntry],
    ) -> Result<Vec<RecommendationDraft>, AssistantError>;
}

/// Assistant as seen by the journal: always answers
#[async_trait]
pub trait SymptomAssistant: Send + Sync {
    async fn analyze(&self, text: &str) -> SymptomAnalysis;

    /// Recommendations for `entries`, newest first. Only the first ten
    /// are considered.
    async fn recommend(&self, entries: &[SymptomEntry]) -> Vec<RecommendationDraft>;
}

/// Maps backend failures to the static fallback responses
pub struct ResilientAssistant<B> {
    backend: B,
}

impl<B: AssistantBackend> ResilientAssistant<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

#[async_trait]
impl<B: AssistantBackend> SymptomAssistant for ResilientAssistant<B> {
    async fn analyze(&self, text: &str) -> SymptomAnalysis {
        match self.backend.analyze(text).await {
            Ok(analysis) => analysis,
            Err(e) => {
                tracing::warn!(error = %e, "Symptom analysis failed, using fallback response");
                fallback_analysis(text)
            }
        }
    }

    async fn recommend(&self, entries: &[SymptomEntry]) -> Vec<RecommendationDraft> {
        let window = &entries[..entries.len().min(RECOMMENDATION_WINDOW)];
        match self.backend.recommend(window).await {
            Ok(drafts) => drafts,
            Err(e) => {
                tracing::warn!(error = %e, "Recommendation request failed, using fallback list");
                fallback_recommendations()
            }
        }
    }
}

/// Build the assistant described by `config`: demo mode without an API key,
/// the chat-completions client otherwise.
pub fn from_config(config: &AssistantConfig) -> Result<Box<dyn SymptomAssistant>, AssistantError> {
    if config.demo_mode() {
        tracing::info!("No assistant API key configured, running in demo mode");
        return Ok(Box::new(ResilientAssistant::new(DemoAssistant::new())));
    }

    tracing::debug!(
        model = %config.model,
        base_url = %config.base_url,
        "Using chat-completions assistant"
    );
    Ok(Box::new(ResilientAssistant::new(OpenRouterClient::new(
        config.clone(),
    )?)))
}

/// Errors that can occur when talking to the assistant backend
#[derive(Error, Debug)]
pub enum AssistantError {
    #[error("Assistant unavailable")]
    Unavailable,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Request timeout")]
    Timeout,

    #[error("Rate limited")]
    RateLimited,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}
