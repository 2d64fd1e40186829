use std::sync::Arc;

use dex_core::model::Dataset;
use storage::Storage;
use tracing::info;

use crate::challenge::{ChallengeLoopService, ChallengeOptions};
use crate::error::ChallengeError;

/// Assembles the challenge service and the working set for one selection.
#[derive(Clone, Debug)]
pub struct AppServices {
    options: ChallengeOptions,
    working_set: Arc<Dataset>,
    challenge: Arc<ChallengeLoopService>,
}

impl AppServices {
    /// Build services whose progress lives in `SQLite`.
    ///
    /// # Errors
    ///
    /// Returns `ChallengeError` if the selection is empty or storage
    /// initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        dataset: &Dataset,
        options: ChallengeOptions,
    ) -> Result<Self, ChallengeError> {
        let working_set = options.working_set(dataset)?;
        let scope = options.scope();
        let storage = Storage::sqlite(db_url, &scope).await?;
        info!(scope = %scope, entries = working_set.len(), "challenge storage ready");
        Ok(Self::from_storage(&storage, working_set, options))
    }

    /// Build services whose progress only lives as long as the process.
    ///
    /// # Errors
    ///
    /// Returns `ChallengeError::Dataset` if the selection is empty.
    pub fn in_memory(dataset: &Dataset, options: ChallengeOptions) -> Result<Self, ChallengeError> {
        let working_set = options.working_set(dataset)?;
        Ok(Self::from_storage(&Storage::in_memory(), working_set, options))
    }

    fn from_storage(storage: &Storage, working_set: Dataset, options: ChallengeOptions) -> Self {
        Self {
            options,
            working_set: Arc::new(working_set),
            challenge: Arc::new(ChallengeLoopService::new(storage.progress())),
        }
    }

    #[must_use]
    pub fn options(&self) -> &ChallengeOptions {
        &self.options
    }

    #[must_use]
    pub fn working_set(&self) -> Arc<Dataset> {
        Arc::clone(&self.working_set)
    }

    #[must_use]
    pub fn challenge(&self) -> Arc<ChallengeLoopService> {
        Arc::clone(&self.challenge)
    }
}
