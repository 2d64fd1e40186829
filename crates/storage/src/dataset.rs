//! Loads the static entry dataset from its JSON layout.

use std::path::{Path, PathBuf};

use dex_core::model::Dataset;
use thiserror::Error;
use tracing::info;

use crate::records::{EntryRecords, records_to_entries};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DatasetLoadError {
    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("dataset is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] dex_core::Error),
}

/// Parse a dataset from its JSON text.
///
/// # Errors
///
/// Returns `DatasetLoadError` for malformed JSON, invalid entries, or a
/// dataset that violates key/order uniqueness.
pub fn parse_dataset(json: &str) -> Result<Dataset, DatasetLoadError> {
    let records: EntryRecords = serde_json::from_str(json)?;
    let entries = records_to_entries(records).map_err(dex_core::Error::from)?;
    let dataset = Dataset::new(entries.into_values()).map_err(dex_core::Error::from)?;
    Ok(dataset)
}

/// Read and parse a dataset file.
///
/// # Errors
///
/// Returns `DatasetLoadError::Io` if the file cannot be read, otherwise as
/// [`parse_dataset`].
pub fn load_dataset(path: &Path) -> Result<Dataset, DatasetLoadError> {
    let json = std::fs::read_to_string(path).map_err(|source| DatasetLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let dataset = parse_dataset(&json)?;
    info!(path = %path.display(), entries = dataset.len(), "loaded dataset");
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dex_core::model::{DatasetError, EntryError, Group};
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "bulbasaur": {"displayName": "Bulbasaur", "generation": 1, "order": 1, "url": "bulbasaur.png"},
        "chikorita": {"displayName": "Chikorita", "generation": 2, "order": 152, "url": "chikorita.png"},
        "mr-mime": {"displayName": "Mr. Mime", "generation": 1, "order": 122, "url": "mr-mime.png"}
    }"#;

    #[test]
    fn parses_keyed_layout() {
        let dataset = parse_dataset(SAMPLE).unwrap();
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.get("mr-mime").unwrap().display_name(), "Mr. Mime");
        assert_eq!(dataset.groups(), vec![Group::from(1), Group::from(2)]);
    }

    #[test]
    fn rejects_invalid_datasets() {
        assert!(matches!(parse_dataset("[]"), Err(DatasetLoadError::Json(_))));
        assert!(matches!(
            parse_dataset("{}"),
            Err(DatasetLoadError::Invalid(dex_core::Error::Dataset(DatasetError::Empty)))
        ));

        let zero = r#"{"a": {"displayName": "A", "group": 1, "order": 0, "url": ""}}"#;
        assert!(matches!(
            parse_dataset(zero),
            Err(DatasetLoadError::Invalid(dex_core::Error::Entry(EntryError::ZeroOrder { .. })))
        ));

        let shared = r#"{
            "a": {"displayName": "A", "group": 1, "order": 1, "url": ""},
            "b": {"displayName": "B", "group": 1, "order": 1, "url": ""}
        }"#;
        assert!(matches!(
            parse_dataset(shared),
            Err(DatasetLoadError::Invalid(dex_core::Error::Dataset(
                DatasetError::DuplicateOrder { .. }
            )))
        ));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let dataset = load_dataset(file.path()).unwrap();
        assert_eq!(dataset.len(), 3);

        let missing = load_dataset(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(missing, DatasetLoadError::Io { .. }));
    }
}
