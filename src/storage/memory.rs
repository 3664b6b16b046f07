//! In-memory journal store

use super::{prepend_batch, JournalStore, StoreResult};
use crate::journal::{Recommendation, SymptomEntry};
use async_trait::async_trait;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<Vec<SymptomEntry>>,
    recommendations: RwLock<Vec<Recommendation>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with existing collections, already newest first
    pub fn with_data(entries: Vec<SymptomEntry>, recommendations: Vec<Recommendation>) -> Self {
        Self {
            entries: RwLock::new(entries),
            recommendations: RwLock::new(recommendations),
        }
    }
}

#[async_trait]
impl JournalStore for MemoryStore {
    async fn entries(&self) -> StoreResult<Vec<SymptomEntry>> {
        Ok(self.entries.read().await.clone())
    }

    async fn recommendations(&self) -> StoreResult<Vec<Recommendation>> {
        Ok(self.recommendations.read().await.clone())
    }

    async fn add_entry(&self, entry: SymptomEntry) -> StoreResult<()> {
        self.entries.write().await.insert(0, entry);
        Ok(())
    }

    async fn add_recommendation(&self, recommendation: Recommendation) -> StoreResult<()> {
        self.recommendations.write().await.insert(0, recommendation);
        Ok(())
    }

    async fn delete_entry(&self, entry_id: &str) -> StoreResult<bool> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|e| e.entry_id != entry_id);
        Ok(entries.len() != before)
    }

    async fn add_entries(&self, batch: Vec<SymptomEntry>) -> StoreResult<usize> {
        let count = batch.len();
        prepend_batch(&mut *self.entries.write().await, batch);
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_newest_first() {
        let store = MemoryStore::new();
        store.add_entry(SymptomEntry::new("first")).await.unwrap();
        store.add_entry(SymptomEntry::new("second")).await.unwrap();
        store
            .add_recommendation(Recommendation::new("Diet", "Less sugar"))
            .await
            .unwrap();

        let entries = store.entries().await.unwrap();
        assert_eq!(entries[0].symptom_text(), "second");
        assert_eq!(entries[1].symptom_text(), "first");
        assert_eq!(store.recommendations().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_entry() {
        let store = MemoryStore::new();
        store
            .add_entry(SymptomEntry::new("cough").with_id("a"))
            .await
            .unwrap();

        assert!(!store.delete_entry("missing").await.unwrap());
        assert!(store.delete_entry("a").await.unwrap());
        assert!(store.entries().await.unwrap().is_empty());
    }
}
