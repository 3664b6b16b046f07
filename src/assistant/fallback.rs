//! Canned assistant responses
//!
//! Demo mode replies, and the fixed fallbacks used when the provider fails
//! or answers with something that is not the requested JSON.

use super::{AssistantBackend, AssistantError, RecommendationDraft, SymptomAnalysis, UrgencyLevel};
use crate::journal::SymptomEntry;
use async_trait::async_trait;

/// Terms the assistant recognises in free text when it has no model reply
pub const ASSISTANT_VOCABULARY: [&str; 16] = [
    "headache",
    "fever",
    "cough",
    "fatigue",
    "nausea",
    "dizziness",
    "pain",
    "shortness of breath",
    "chest pain",
    "stomach ache",
    "muscle ache",
    "sore throat",
    "runny nose",
    "congestion",
    "anxiety",
    "stress",
];

const GENERAL_SYMPTOMS: &str = "general symptoms";

/// Terms that steer demo mode to the respiratory reply
const RESPIRATORY_TERMS: [&str; 6] = [
    "cough",
    "congestion",
    "runny nose",
    "sore throat",
    "sneez",
    "breath",
];

/// Vocabulary terms found in `text` (substring match, case-insensitive),
/// or `["general symptoms"]` when nothing matches.
pub fn extract_symptoms(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    let found: Vec<String> = ASSISTANT_VOCABULARY
        .iter()
        .filter(|term| lower.contains(*term))
        .map(|term| term.to_string())
        .collect();

    if found.is_empty() {
        vec![GENERAL_SYMPTOMS.to_string()]
    } else {
        found
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Reply used when the provider cannot be reached
pub fn fallback_analysis(text: &str) -> SymptomAnalysis {
    SymptomAnalysis {
        diagnosis: "I'm having trouble analyzing your symptoms right now, but I can offer some general guidance. If you're experiencing concerning symptoms, it's always best to consult with a healthcare professional who can provide personalized advice based on your medical history.".to_string(),
        symptoms: extract_symptoms(text),
        possible_conditions: strings(&["Various possible causes"]),
        urgency_level: UrgencyLevel::Medium,
        confidence: Some(0.5),
        key_insights: strings(&[
            "Unable to complete full analysis at this time",
            "Symptoms warrant professional medical evaluation",
            "Consider monitoring symptoms closely",
        ]),
        recommended_actions: strings(&[
            "Consult with a healthcare provider",
            "Monitor symptoms for any changes",
            "Seek immediate care if symptoms worsen",
        ]),
        recommendations: fallback_recommendations(),
    }
}

/// Reply used when the provider answered with prose instead of JSON; the
/// prose becomes the explanation.
pub fn fallback_with_explanation(text: &str, reply: &str) -> SymptomAnalysis {
    let diagnosis = if reply.trim().is_empty() {
        "Based on your symptoms, I recommend monitoring them closely and consulting with a healthcare professional for proper evaluation and guidance.".to_string()
    } else {
        reply.to_string()
    };

    SymptomAnalysis {
        diagnosis,
        symptoms: extract_symptoms(text),
        possible_conditions: strings(&["Various possible causes"]),
        urgency_level: UrgencyLevel::Medium,
        confidence: Some(0.6),
        key_insights: strings(&[
            "Symptoms require professional evaluation",
            "Multiple factors could be contributing",
            "Proper medical assessment is recommended",
        ]),
        recommended_actions: strings(&[
            "Consult healthcare provider",
            "Monitor symptom progression",
            "Maintain symptom diary",
        ]),
        recommendations: vec![
            RecommendationDraft::new("General", "Schedule medical consultation"),
            RecommendationDraft::new("General", "Track symptoms daily"),
        ],
    }
}

/// Recommendations used when a batch request fails
pub fn fallback_recommendations() -> Vec<RecommendationDraft> {
    vec![
        RecommendationDraft::new(
            "General",
            "Schedule an appointment with your healthcare provider",
        ),
        RecommendationDraft::new("General", "Keep a symptom diary to track changes"),
    ]
}

fn general_reply() -> SymptomAnalysis {
    SymptomAnalysis {
        diagnosis: "Based on your symptoms, there are several possible explanations. Common causes could include viral infections, stress-related symptoms, or minor conditions that often resolve on their own. However, it's important to monitor your symptoms and seek medical attention if they worsen or persist.".to_string(),
        symptoms: strings(&["general discomfort", "fatigue"]),
        possible_conditions: strings(&["Viral infection", "Stress response", "Minor illness"]),
        urgency_level: UrgencyLevel::Low,
        confidence: Some(0.6),
        key_insights: strings(&[
            "Symptoms appear to be mild and non-specific",
            "Could be related to common viral infections",
            "Stress and lifestyle factors may be contributing",
        ]),
        recommended_actions: strings(&[
            "Rest and stay hydrated",
            "Monitor symptoms for any changes",
            "Consult healthcare provider if symptoms persist",
        ]),
        recommendations: vec![
            RecommendationDraft::new(
                "Lifestyle",
                "Get adequate sleep (7-9 hours) to support immune function",
            ),
            RecommendationDraft::new(
                "General",
                "Stay hydrated by drinking plenty of water throughout the day",
            ),
            RecommendationDraft::new(
                "Exercise",
                "Consider gentle exercise like walking to boost circulation",
            ),
        ],
    }
}

fn respiratory_reply() -> SymptomAnalysis {
    SymptomAnalysis {
        diagnosis: "Your symptoms suggest a possible upper respiratory condition or allergic reaction. These are common and usually manageable with proper care. The combination of symptoms you've described could indicate several conditions, from minor infections to environmental factors.".to_string(),
        symptoms: strings(&["respiratory symptoms", "congestion"]),
        possible_conditions: strings(&[
            "Upper respiratory infection",
            "Allergic rhinitis",
            "Common cold",
        ]),
        urgency_level: UrgencyLevel::Low,
        confidence: Some(0.7),
        key_insights: strings(&[
            "Respiratory symptoms are commonly caused by infections or allergies",
            "Seasonal factors may be contributing to symptoms",
            "Most cases resolve within 7-10 days with proper care",
        ]),
        recommended_actions: strings(&[
            "Use a humidifier to ease congestion",
            "Avoid known allergens if applicable",
            "Seek medical care if symptoms worsen or fever develops",
        ]),
        recommendations: vec![
            RecommendationDraft::new(
                "Lifestyle",
                "Use a humidifier or steam inhalation to ease breathing",
            ),
            RecommendationDraft::new(
                "Diet",
                "Avoid dairy products temporarily as they can increase mucus production",
            ),
            RecommendationDraft::new(
                "General",
                "Try warm salt water gargles to soothe throat irritation",
            ),
        ],
    }
}

/// Offline assistant. The same text always gets the same reply.
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoAssistant;

impl DemoAssistant {
    pub fn new() -> Self {
        Self
    }

    fn reply_for(&self, text: &str) -> SymptomAnalysis {
        let lower = text.to_lowercase();
        if RESPIRATORY_TERMS.iter().any(|term| lower.contains(term)) {
            respiratory_reply()
        } else {
            general_reply()
        }
    }
}

#[async_trait]
impl AssistantBackend for DemoAssistant {
    async fn analyze(&self, text: &str) -> Result<SymptomAnalysis, AssistantError> {
        tracing::debug!("Demo mode: using canned assistant response");
        let mut analysis = self.reply_for(text);
        analysis.symptoms = extract_symptoms(text);
        Ok(analysis)
    }

    async fn recommend(
        &self,
        entries: &[SymptomEntry],
    ) -> Result<Vec<RecommendationDraft>, AssistantError> {
        let history = entries
            .iter()
            .map(|e| e.symptom_text())
            .collect::<Vec<_>>()
            .join(" ");
        Ok(self.reply_for(&history).recommendations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_symptoms() {
        assert_eq!(
            extract_symptoms("Chest pain and STRESS"),
            vec!["pain", "chest pain", "stress"]
        );
        assert_eq!(extract_symptoms("feeling off"), vec!["general symptoms"]);
    }

    #[test]
    fn test_fallbacks() {
        let failed = fallback_analysis("fever");
        assert_eq!(failed.confidence, Some(0.5));
        assert_eq!(failed.symptoms, vec!["fever"]);
        assert_eq!(failed.recommendations.len(), 2);

        let prose = fallback_with_explanation("fever", "It is probably nothing.");
        assert_eq!(prose.diagnosis, "It is probably nothing.");
        assert_eq!(prose.confidence, Some(0.6));

        let empty = fallback_with_explanation("fever", "  ");
        assert!(empty.diagnosis.starts_with("Based on your symptoms"));
    }

    #[tokio::test]
    async fn test_demo_is_deterministic() {
        let demo = DemoAssistant::new();

        let first = demo.analyze("runny nose and a cough").await.unwrap();
        let second = demo.analyze("runny nose and a cough").await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.possible_conditions[0], "Upper respiratory infection");
        assert_eq!(first.symptoms, vec!["cough", "runny nose"]);

        let general = demo.analyze("tired all week").await.unwrap();
        assert_eq!(general.confidence, Some(0.6));
        assert_eq!(general.symptoms, vec!["general symptoms"]);
    }

    #[tokio::test]
    async fn test_demo_recommendations_follow_history() {
        let demo = DemoAssistant::new();
        let entries = vec![SymptomEntry::new("sore throat")];

        let drafts = demo.recommend(&entries).await.unwrap();
        assert_eq!(drafts.len(), 3);
        assert!(drafts[1].text.starts_with("Avoid dairy"));

        assert_eq!(demo.recommend(&[]).await.unwrap().len(), 3);
    }
}
