use thiserror::Error;

use crate::challenge::ProgressError;
use crate::model::{DatasetError, EntryError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Entry(#[from] EntryError),
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    #[error(transparent)]
    Progress(#[from] ProgressError),
}
