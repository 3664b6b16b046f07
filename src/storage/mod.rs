//! Journal Storage
//!
//! The storage collaborator owns the journal; the analysis engine only
//! ever sees snapshots handed to it by the caller.
//!
//! - **file**: JSON file per collection under a data directory
//! - **memory**: In-process store for tests and one-shot runs
//! - **csv_import**: Reads a CSV export back into entries
//! - **error**: Error types
//!
//! Both collections are kept newest first; new records are prepended.
//!
//! # Example
//!
//! ```rust,no_run
//! use symptomsense::journal::SymptomEntry;
//! use symptomsense::storage::{FileStore, JournalStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = FileStore::open("./journal").await?;
//!     store.add_entry(SymptomEntry::new("headache").confidence(0.7)).await?;
//!
//!     let entries = store.entries().await?;
//!     println!("{} entries", entries.len());
//!     Ok(())
//! }
//! ```

pub mod csv_import;
pub mod error;
pub mod file;
pub mod memory;

pub use csv_import::{import_csv_path, import_csv_str, CsvImportResult};
pub use error::{StoreError, StoreResult};
pub use file::{FileStore, ENTRIES_FILE, RECOMMENDATIONS_FILE};
pub use memory::MemoryStore;

use crate::journal::{Recommendation, SymptomEntry};
use async_trait::async_trait;

/// Load, append and delete for the two journal collections
#[async_trait]
pub trait JournalStore: Send + Sync {
    /// All entries, newest first
    async fn entries(&self) -> StoreResult<Vec<SymptomEntry>>;

    /// All recommendations, newest first
    async fn recommendations(&self) -> StoreResult<Vec<Recommendation>>;

    async fn add_entry(&self, entry: SymptomEntry) -> StoreResult<()>;

    async fn add_recommendation(&self, recommendation: Recommendation) -> StoreResult<()>;

    /// Remove an entry by id. Returns false when no entry matched.
    async fn delete_entry(&self, entry_id: &str) -> StoreResult<bool>;

    /// Append a batch. Entries are added oldest first so the newest of the
    /// batch ends up at the front.
    async fn add_entries(&self, mut entries: Vec<SymptomEntry>) -> StoreResult<usize> {
        entries.sort_by_key(|e| e.timestamp);
        let count = entries.len();
        for entry in entries {
            self.add_entry(entry).await?;
        }
        Ok(count)
    }
}

/// Prepend `batch` (any order) to `existing`, newest first
pub(crate) fn prepend_batch(existing: &mut Vec<SymptomEntry>, mut batch: Vec<SymptomEntry>) {
    batch.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    batch.append(existing);
    *existing = batch;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn test_prepend_batch() {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut existing = vec![SymptomEntry::new("old").with_timestamp(base)];
        let batch = vec![
            SymptomEntry::new("b").with_timestamp(base + Duration::days(1)),
            SymptomEntry::new("c").with_timestamp(base + Duration::days(2)),
        ];

        prepend_batch(&mut existing, batch);
        let order: Vec<_> = existing.iter().map(|e| e.symptom_text()).collect();
        assert_eq!(order, vec!["c", "b", "old"]);
    }
}
