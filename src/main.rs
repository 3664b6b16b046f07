//! SymptomSense CLI
//!
//! Command-line interface for the symptom journal:
//! - Log symptoms through the assistant
//! - List and delete entries
//! - Pattern analysis, health insights and dashboard
//! - Import/Export data

use anyhow::{bail, Context};
use chrono::{Local, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use symptomsense::analysis::{analyze_symptom_patterns_in, Pattern, PatternAnalysis};
use symptomsense::assistant::{self, SymptomAnalysis};
use symptomsense::config::{generate_default_config, Config, ConfigLoad, LoggingConfig};
use symptomsense::dashboard::{build_dashboard, Dashboard};
use symptomsense::export::{export_health_data, ExportFormat};
use symptomsense::health::{generate_health_insights, HealthInsights};
use symptomsense::storage::{import_csv_path, FileStore, JournalStore};
use symptomsense::SymptomEntry;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "symptomsense")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Symptom journal with pattern analysis")]
#[command(long_about = "SymptomSense keeps a journal of your symptoms.\nLog how you feel, spot recurring patterns and export your history for your doctor.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search standard locations)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Describe symptoms and record the analysed entry
    Log {
        /// What you are experiencing
        text: String,
        /// Extra details stored with the entry
        #[arg(short, long)]
        details: Option<String>,
    },

    /// List recent entries
    List {
        /// Maximum number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Delete an entry by id
    Delete {
        /// Entry id (as shown by `list`)
        id: String,
    },

    /// Run the pattern analysis
    Analyze,

    /// Overview, trends, alerts and recommendations
    Insights,

    /// Dashboard summary
    Dashboard,

    /// Export the journal
    Export {
        /// Export type (json, csv)
        #[arg(long = "type", default_value = "json")]
        kind: String,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Import entries from a CSV export
    Import {
        /// Path to CSV file
        path: PathBuf,
        /// Dry run (don't actually import)
        #[arg(long)]
        dry_run: bool,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("symptomsense={}", logging.level)));
    let registry = tracing_subscriber::registry().with(filter);

    // Logs go to stderr so stdout stays parseable
    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let load = match &cli.config {
        Some(path) => ConfigLoad::from_file(path)?,
        None => Config::search_default(),
    };
    init_tracing(&load.config.logging);
    load.log();
    let config = load.config;

    if let Commands::Config { output } = &cli.command {
        let content = generate_default_config();
        match output {
            Some(path) => {
                std::fs::write(path, content)
                    .with_context(|| format!("writing config to {:?}", path))?;
                println!("Config written to {:?}", path);
            }
            None => print!("{}", content),
        }
        return Ok(());
    }

    let store = FileStore::from_config(&config.storage)
        .await
        .context("opening journal")?;
    tracing::debug!(data_dir = ?store.data_dir(), "Journal ready");

    let json = cli.format == "json";

    match cli.command {
        Commands::Log { text, details } => {
            if text.trim().is_empty() {
                bail!("Describe at least one symptom");
            }

            let assistant = assistant::from_config(&config.assistant)?;
            let analysis = assistant.analyze(&text).await;

            let mut entry = analysis.to_entry(&text);
            if let Some(details) = details {
                entry = entry.details(details);
            }
            let recommendations = analysis.to_recommendations();

            store.add_entry(entry.clone()).await?;
            for recommendation in recommendations {
                store.add_recommendation(recommendation).await?;
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&analysis)?);
            } else {
                print_analysis(&entry, &analysis);
            }
        }

        Commands::List { limit } => {
            let entries = store.entries().await?;

            if json {
                let shown: Vec<_> = entries.iter().take(limit).collect();
                println!("{}", serde_json::to_string_pretty(&shown)?);
            } else if entries.is_empty() {
                println!("No entries yet.");
                println!();
                println!("Log your first symptoms with:");
                println!("  symptomsense log \"headache since this morning\"");
            } else {
                print_entries(&entries[..entries.len().min(limit)]);
            }
        }

        Commands::Delete { id } => {
            if !store.delete_entry(&id).await? {
                bail!("No entry with id {}", id);
            }
            println!("Deleted entry {}", id);
        }

        Commands::Analyze => {
            let entries = store.entries().await?;
            let analysis = analyze_symptom_patterns_in(&entries, &Local);

            if json {
                println!("{}", serde_json::to_string_pretty(&analysis)?);
            } else {
                print_pattern_analysis(entries.len(), &analysis);
            }
        }

        Commands::Insights => {
            let entries = store.entries().await?;
            let assistant = assistant::from_config(&config.assistant)?;
            let insights = generate_health_insights(&entries, assistant.as_ref(), &Local).await;

            if json {
                println!("{}", serde_json::to_string_pretty(&insights)?);
            } else {
                print_insights(&insights);
            }
        }

        Commands::Dashboard => {
            let entries = store.entries().await?;
            let recommendations = store.recommendations().await?;
            let dashboard = build_dashboard(&entries, recommendations.len(), Utc::now());

            if json {
                println!("{}", serde_json::to_string_pretty(&dashboard)?);
            } else {
                print_dashboard(&dashboard);
            }
        }

        Commands::Export { kind, output } => {
            let format: ExportFormat = kind.parse()?;
            let entries = store.entries().await?;
            let recommendations = store.recommendations().await?;
            let content = export_health_data(&entries, &recommendations, format, &Local)?;

            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("writing export to {:?}", path))?;
                    println!("Exported {} entries to {:?}", entries.len(), path);
                }
                None => println!("{}", content),
            }
        }

        Commands::Import { path, dry_run } => {
            if !path.exists() {
                bail!("File not found: {:?}", path);
            }

            let result = import_csv_path(&path)?;

            println!("Import results:");
            println!("  Rows processed: {}", result.rows_processed);
            println!("  Rows failed: {}", result.rows_failed);

            if !result.errors.is_empty() {
                println!();
                println!("Errors (first 10):");
                for error in result.errors.iter().take(10) {
                    println!("  {}", error);
                }
            }

            if dry_run {
                println!();
                println!("(Dry run - no data was imported)");
            } else if !result.entries.is_empty() {
                let imported = store.add_entries(result.entries).await?;
                println!();
                println!("  Imported: {}", imported);
            }
        }

        // handled before the journal is opened
        Commands::Config { .. } => {}
    }

    Ok(())
}

fn print_analysis(entry: &SymptomEntry, analysis: &SymptomAnalysis) {
    println!("{}", analysis.diagnosis);
    println!();
    println!("Symptoms:    {}", entry.symptoms);
    if !analysis.possible_conditions.is_empty() {
        println!("Conditions:  {}", analysis.possible_conditions.join(", "));
    }
    println!("Urgency:     {}", analysis.urgency_level);
    println!("Confidence:  {:.0}%", entry.effective_confidence() * 100.0);

    if !analysis.recommendations.is_empty() {
        println!();
        println!("Recommendations:");
        for rec in &analysis.recommendations {
            println!("  [{}] {}", rec.kind, rec.text);
        }
    }

    println!();
    println!("Saved entry {}", entry.entry_id);
}

fn print_entries(entries: &[SymptomEntry]) {
    println!("{:<36} {:<17} {:<6} {}", "ID", "Date", "Conf", "Symptoms");
    println!("{}", "-".repeat(90));

    for entry in entries {
        let confidence = entry
            .confidence_score
            .map(|c| format!("{:.2}", c))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<36} {:<17} {:<6} {}",
            entry.entry_id,
            entry.timestamp.format("%Y-%m-%d %H:%M").to_string(),
            confidence,
            entry.symptoms
        );
    }
}

fn print_pattern_analysis(total: usize, analysis: &PatternAnalysis) {
    println!("Entries analyzed: {}", total);
    println!("Overall risk:     {}", analysis.summary.overall_risk);

    println!();
    if analysis.patterns.is_empty() {
        println!("No patterns detected yet.");
    } else {
        println!("Patterns:");
        for pattern in &analysis.patterns {
            let label = match pattern {
                Pattern::Frequency { .. } => "frequency",
                Pattern::Temporal { .. } => "temporal",
            };
            println!("  [{}] {}", label, pattern.description());
        }
    }

    if let Some(severity) = &analysis.trends.severity {
        println!();
        println!(
            "Severity trend: {} (recent {:.2}, historical {:.2})",
            severity.trend, severity.recent, severity.historical
        );
    }

    if !analysis.insights.is_empty() {
        println!();
        println!("Insights:");
        for insight in &analysis.insights {
            println!("  [{}] {}: {}", insight.severity, insight.title, insight.description);
        }
    }

    for factor in &analysis.risk_factors {
        println!();
        println!("Risk factor: {} ({})", factor.factor, factor.severity);
        println!("  {}", factor.description);
    }
}

fn print_insights(insights: &HealthInsights) {
    let overview = &insights.overview;
    println!("Entries:         {}", overview.total_entries);
    println!("Unique symptoms: {}", overview.unique_symptoms);
    println!("Time span:       {} days", overview.time_span.days);
    println!("Per week:        {:.1}", overview.average_entries_per_week);

    for trend in &insights.trends {
        println!();
        println!("{} ({} confidence)", trend.description, trend.confidence);
    }

    if !insights.alerts.is_empty() {
        println!();
        println!("Alerts:");
        for alert in &insights.alerts {
            println!("  ! {}", alert.message);
            println!("    {}", alert.recommendation);
        }
    }

    if !insights.recommendations.is_empty() {
        println!();
        println!("Recommendations:");
        for rec in &insights.recommendations {
            println!("  [{}] {}", rec.kind, rec.text);
        }
    }

    println!();
    println!("Next steps:");
    for step in &insights.next_steps {
        println!("  [{}] {} - {}", step.priority, step.action, step.reason);
    }
}

fn print_dashboard(dashboard: &Dashboard) {
    let summary = &dashboard.summary;
    println!("Total entries:   {}", summary.total_entries);
    println!("This week:       {}", summary.entries_this_week);
    println!("Recommendations: {}", summary.total_recommendations);

    if let Some(recurring) = dashboard.recurring.as_ref().filter(|r| !r.is_empty()) {
        println!();
        println!("Recurring:");
        for term in recurring {
            println!("  {} ({}x)", term.symptom, term.frequency);
        }
    }

    if !dashboard.symptom_frequency.is_empty() {
        println!();
        println!("{:<14} {:>6} {:>8}", "Symptom", "Count", "Share");
        println!("{}", "-".repeat(30));
        for row in &dashboard.symptom_frequency {
            println!("{:<14} {:>6} {:>7.1}%", row.symptom, row.count, row.percentage);
        }
    }

    if !dashboard.daily_activity.is_empty() {
        println!();
        println!("{:<12} {:>6} {:>8}", "Date", "Count", "Conf");
        println!("{}", "-".repeat(28));
        for day in &dashboard.daily_activity {
            println!("{:<12} {:>6} {:>8.2}", day.date.to_string(), day.count, day.avg_confidence);
        }

        let trend = &dashboard.activity_trend;
        println!();
        println!("Activity: {} ({:.1}%)", trend.direction, trend.change);
    }
}
