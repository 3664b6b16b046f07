//! File-backed journal store
//!
//! Each collection is one pretty-printed JSON array in the data directory.
//! Every mutation rewrites the affected file through a temp file and a
//! rename, so a crash leaves either the old or the new array on disk.
//!
//! Thread-safe via Tokio's async RwLock; the write lock is held across the
//! file write so saves never interleave.

use super::{prepend_batch, JournalStore, StoreResult};
use crate::config::StorageConfig;
use crate::journal::{Recommendation, SymptomEntry};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

pub const ENTRIES_FILE: &str = "symptomsense_entries.json";
pub const RECOMMENDATIONS_FILE: &str = "symptomsense_recommendations.json";

pub struct FileStore {
    data_dir: PathBuf,
    entries: RwLock<Vec<SymptomEntry>>,
    recommendations: RwLock<Vec<Recommendation>>,
}

impl FileStore {
    /// Open (creating if needed) a store rooted at `data_dir`
    pub async fn open(data_dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let data_dir = data_dir.into();
        tokio::fs::create_dir_all(&data_dir).await?;

        let entries: Vec<SymptomEntry> = load(&data_dir.join(ENTRIES_FILE)).await?;
        let recommendations: Vec<Recommendation> =
            load(&data_dir.join(RECOMMENDATIONS_FILE)).await?;

        tracing::debug!(
            data_dir = ?data_dir,
            entries = entries.len(),
            recommendations = recommendations.len(),
            "Opened journal"
        );

        Ok(Self {
            data_dir,
            entries: RwLock::new(entries),
            recommendations: RwLock::new(recommendations),
        })
    }

    pub async fn from_config(config: &StorageConfig) -> StoreResult<Self> {
        Self::open(expand_home(&config.data_dir)).await
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn entries_path(&self) -> PathBuf {
        self.data_dir.join(ENTRIES_FILE)
    }

    fn recommendations_path(&self) -> PathBuf {
        self.data_dir.join(RECOMMENDATIONS_FILE)
    }
}

/// Resolve a leading `~` against the home directory
fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ if path == "~" => dirs::home_dir().unwrap_or_else(|| PathBuf::from(path)),
        _ => PathBuf::from(path),
    }
}

/// A missing file is an empty collection
async fn load<T: DeserializeOwned>(path: &Path) -> StoreResult<Vec<T>> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => Ok(serde_json::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e.into()),
    }
}

async fn save<T: Serialize>(path: &Path, items: &[T]) -> StoreResult<()> {
    let content = serde_json::to_string_pretty(items)?;
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, content).await?;
    tokio::fs::rename(&tmp, path).await?;
    tracing::debug!(path = ?path, records = items.len(), "Saved journal file");
    Ok(())
}

#[async_trait]
impl JournalStore for FileStore {
    async fn entries(&self) -> StoreResult<Vec<SymptomEntry>> {
        Ok(self.entries.read().await.clone())
    }

    async fn recommendations(&self) -> StoreResult<Vec<Recommendation>> {
        Ok(self.recommendations.read().await.clone())
    }

    async fn add_entry(&self, entry: SymptomEntry) -> StoreResult<()> {
        let mut entries = self.entries.write().await;
        let mut updated = Vec::with_capacity(entries.len() + 1);
        updated.push(entry);
        updated.extend(entries.iter().cloned());

        save(&self.entries_path(), &updated).await?;
        *entries = updated;
        Ok(())
    }

    async fn add_recommendation(&self, recommendation: Recommendation) -> StoreResult<()> {
        let mut recommendations = self.recommendations.write().await;
        let mut updated = Vec::with_capacity(recommendations.len() + 1);
        updated.push(recommendation);
        updated.extend(recommendations.iter().cloned());

        save(&self.recommendations_path(), &updated).await?;
        *recommendations = updated;
        Ok(())
    }

    async fn delete_entry(&self, entry_id: &str) -> StoreResult<bool> {
        let mut entries = self.entries.write().await;
        let updated: Vec<SymptomEntry> = entries
            .iter()
            .filter(|e| e.entry_id != entry_id)
            .cloned()
            .collect();

        if updated.len() == entries.len() {
            return Ok(false);
        }

        save(&self.entries_path(), &updated).await?;
        *entries = updated;
        Ok(true)
    }

    async fn add_entries(&self, batch: Vec<SymptomEntry>) -> StoreResult<usize> {
        let count = batch.len();
        let mut entries = self.entries.write().await;
        let mut updated = entries.clone();
        prepend_batch(&mut updated, batch);

        save(&self.entries_path(), &updated).await?;
        *entries = updated;
        Ok(count)
    }
}
