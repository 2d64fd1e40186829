//! Shared error types for the services crate.

use thiserror::Error;

use dex_core::model::DatasetError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted while preparing a challenge.
///
/// Playing a challenge never fails: invalid entries are reported through
/// `Validity`, and persistence failures are logged and absorbed.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChallengeError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
