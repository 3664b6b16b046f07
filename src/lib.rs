//! # SymptomSense
//!
//! Personal symptom journal with a rule-based pattern analysis engine.
//!
//! ## Features
//!
//! - **Pattern analysis**: Keyword frequency, weekday skew, severity trends
//! - **Risk scoring**: Fixed linear score with low / moderate / high levels
//! - **Chronic indicators**: Recurring symptoms, alerts and next steps
//! - **Export**: JSON snapshot or CSV rows, and CSV import back in
//! - **Assistant**: OpenAI-compatible chat-completions client with an
//!   offline demo mode
//!
//! ## Modules
//!
//! - [`journal`]: Entry and recommendation records
//! - [`analysis`]: The pure, synchronous pattern analysis engine
//! - [`health`]: Health insights combining the engine and the assistant
//! - [`dashboard`]: Summary counts, recurring terms and daily activity
//! - [`export`]: JSON and CSV export
//! - [`assistant`]: Symptom assistant collaborator
//! - [`storage`]: Journal stores
//! - [`config`]: TOML and environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use symptomsense::analysis::analyze_symptom_patterns;
//! use symptomsense::storage::{JournalStore, MemoryStore};
//! use symptomsense::journal::SymptomEntry;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = MemoryStore::new();
//!     store.add_entry(SymptomEntry::new("headache and fatigue").confidence(0.6)).await?;
//!     store.add_entry(SymptomEntry::new("headache again").confidence(0.7)).await?;
//!
//!     let entries = store.entries().await?;
//!     let analysis = analyze_symptom_patterns(&entries);
//!
//!     println!("Overall risk: {}", analysis.summary.overall_risk);
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod assistant;
pub mod config;
pub mod dashboard;
pub mod export;
pub mod health;
pub mod journal;
pub mod storage;

// Re-export top-level types for convenience
pub use journal::{DateRange, FreeText, Recommendation, RecommendationType, SymptomEntry, TimeSpan};

pub use analysis::{analyze_symptom_patterns, PatternAnalysis, RiskLevel};

pub use health::{generate_health_insights, HealthInsights};

pub use dashboard::{build_dashboard, Dashboard};

pub use export::{export_health_data, ExportError, ExportFormat, HealthExport};

pub use assistant::{
    AssistantBackend, AssistantError, DemoAssistant, OpenRouterClient, ResilientAssistant,
    SymptomAnalysis, SymptomAssistant,
};

pub use storage::{FileStore, JournalStore, MemoryStore, StoreError, StoreResult};

pub use config::{AssistantConfig, Config, ConfigError, ConfigLoad, LoggingConfig, StorageConfig};
