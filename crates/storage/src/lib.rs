#![forbid(unsafe_code)]

pub mod dataset;
pub mod progress;
pub mod records;
pub mod repository;
pub mod sqlite;

pub use dataset::{DatasetLoadError, load_dataset, parse_dataset};
pub use progress::ProgressStore;
pub use repository::{InMemoryKeyValueStore, KeyValueStore, Storage, StorageError};
