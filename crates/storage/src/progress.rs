use std::sync::Arc;

use dex_core::Progress;
use tracing::debug;

use crate::records::{EnteredRecord, EntryRecords, entries_to_records, records_to_entries};
use crate::repository::{KeyValueStore, StorageError};

pub const COUNT_KEY: &str = "count";
pub const ENTERED_KEY: &str = "entered";
pub const REMAINING_KEY: &str = "remaining";

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

/// Reads and writes the `{count, entered, remaining}` triple as JSON under
/// three fixed keys.
#[derive(Clone)]
pub struct ProgressStore {
    values: Arc<dyn KeyValueStore>,
}

impl ProgressStore {
    #[must_use]
    pub fn new(values: Arc<dyn KeyValueStore>) -> Self {
        Self { values }
    }

    /// Load previously saved progress.
    ///
    /// Returns `Ok(None)` when nothing has been saved.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if only part of the triple is
    /// present or any value is malformed, and other storage errors as-is.
    pub async fn load(&self) -> Result<Option<Progress>, StorageError> {
        let count = self.values.get(COUNT_KEY).await?;
        let entered = self.values.get(ENTERED_KEY).await?;
        let remaining = self.values.get(REMAINING_KEY).await?;

        let (count, entered, remaining) = match (count, entered, remaining) {
            (None, None, None) => return Ok(None),
            (Some(count), Some(entered), Some(remaining)) => (count, entered, remaining),
            _ => {
                return Err(StorageError::Serialization(
                    "incomplete progress triple".into(),
                ));
            }
        };

        let count: usize = serde_json::from_str(&count).map_err(ser)?;
        let entered: Vec<EnteredRecord> = serde_json::from_str(&entered).map_err(ser)?;
        let remaining: EntryRecords = serde_json::from_str(&remaining).map_err(ser)?;

        let progress = Progress {
            count,
            entered: entered
                .into_iter()
                .map(EnteredRecord::into_entered)
                .collect(),
            remaining: records_to_entries(remaining).map_err(ser)?,
        };
        debug!(count = progress.count, "loaded persisted progress");
        Ok(Some(progress))
    }

    /// Persist the triple, one key at a time.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if encoding or any write fails.
    pub async fn save(&self, progress: &Progress) -> Result<(), StorageError> {
        let count = serde_json::to_string(&progress.count).map_err(ser)?;
        let entered: Vec<EnteredRecord> = progress
            .entered
            .iter()
            .map(EnteredRecord::from_entered)
            .collect();
        let entered = serde_json::to_string(&entered).map_err(ser)?;
        let remaining =
            serde_json::to_string(&entries_to_records(progress.remaining.values())).map_err(ser)?;

        self.values.set(COUNT_KEY, &count).await?;
        self.values.set(ENTERED_KEY, &entered).await?;
        self.values.set(REMAINING_KEY, &remaining).await?;
        Ok(())
    }

    /// Delete all three keys.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if any removal fails.
    pub async fn clear(&self) -> Result<(), StorageError> {
        self.values.remove(COUNT_KEY).await?;
        self.values.remove(ENTERED_KEY).await?;
        self.values.remove(REMAINING_KEY).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryKeyValueStore;
    use dex_core::model::{Dataset, Entry, EntryKey, Group, Order};
    use dex_core::{ChallengeState, Effect};

    fn dataset() -> Dataset {
        let entries = [("bulbasaur", "Bulbasaur", 1), ("nidoran-f", "Nidoran♀", 29)]
            .into_iter()
            .map(|(key, name, order)| {
                Entry::new(
                    EntryKey::new(key),
                    name,
                    Order::new(order),
                    format!("{key}.png"),
                    Group::from(1),
                )
                .unwrap()
            });
        Dataset::new(entries).unwrap()
    }

    fn store() -> (InMemoryKeyValueStore, ProgressStore) {
        let values = InMemoryKeyValueStore::new();
        let progress = ProgressStore::new(Arc::new(values.clone()));
        (values, progress)
    }

    #[tokio::test]
    async fn save_then_load_restores_progress() {
        let (values, store) = store();
        assert_eq!(store.load().await.unwrap(), None);

        let mut state = ChallengeState::new(dataset());
        state.input_changed("Nidoran♀");
        let Effect::Save(progress) = state.submit() else {
            panic!("expected save");
        };
        store.save(&progress).await.unwrap();

        assert_eq!(values.get(COUNT_KEY).await.unwrap().as_deref(), Some("1"));
        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded, progress);
        assert!(loaded.validate_against(&dataset()).is_ok());
    }

    #[tokio::test]
    async fn clear_removes_all_keys() {
        let (values, store) = store();
        let state = ChallengeState::new(dataset());
        store.save(&state.progress()).await.unwrap();
        assert_eq!(values.len().unwrap(), 3);

        store.clear().await.unwrap();
        assert_eq!(values.len().unwrap(), 0);
        assert_eq!(store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn malformed_or_partial_progress_is_an_error() {
        let (values, store) = store();
        values.set(COUNT_KEY, "1").await.unwrap();
        assert!(matches!(
            store.load().await,
            Err(StorageError::Serialization(_))
        ));

        values.set(ENTERED_KEY, "not json").await.unwrap();
        values.set(REMAINING_KEY, "{}").await.unwrap();
        assert!(matches!(
            store.load().await,
            Err(StorageError::Serialization(_))
        ));
    }
}
