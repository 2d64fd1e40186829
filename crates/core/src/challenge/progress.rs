use std::collections::{BTreeMap, HashSet};

use thiserror::Error;

use crate::model::{Dataset, EnteredEntry, Entry, EntryKey};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProgressError {
    #[error("count ({count}) does not match entered entries ({entered})")]
    CountMismatch { count: usize, entered: usize },

    #[error("{0} is both entered and remaining")]
    Overlap(EntryKey),

    #[error("{0} was entered more than once")]
    DuplicateEntered(EntryKey),

    #[error("{0} is not part of the dataset")]
    UnknownKey(EntryKey),

    #[error("{0} does not match the dataset entry")]
    EntryMismatch(EntryKey),

    #[error("progress covers {found} entries, dataset has {expected}")]
    Incomplete { expected: usize, found: usize },
}

/// Persisted progress triple: `{count, entered, remaining}`.
///
/// This is what gets written after every valid submit and read back when a
/// session resumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    pub count: usize,
    pub entered: Vec<EnteredEntry>,
    pub remaining: BTreeMap<EntryKey, Entry>,
}

impl Progress {
    /// Checks that this progress describes a session over `dataset`.
    ///
    /// # Errors
    ///
    /// Returns the first `ProgressError` found.
    pub fn validate_against(&self, dataset: &Dataset) -> Result<(), ProgressError> {
        if self.count != self.entered.len() {
            return Err(ProgressError::CountMismatch {
                count: self.count,
                entered: self.entered.len(),
            });
        }

        let mut seen = HashSet::with_capacity(self.entered.len());
        for entered in &self.entered {
            if !seen.insert(&entered.key) {
                return Err(ProgressError::DuplicateEntered(entered.key.clone()));
            }
            if self.remaining.contains_key(&entered.key) {
                return Err(ProgressError::Overlap(entered.key.clone()));
            }
            let Some(source) = dataset.get(entered.key.as_str()) else {
                return Err(ProgressError::UnknownKey(entered.key.clone()));
            };
            if !entered.matches(source) {
                return Err(ProgressError::EntryMismatch(entered.key.clone()));
            }
        }

        for (key, entry) in &self.remaining {
            let Some(source) = dataset.get(key.as_str()) else {
                return Err(ProgressError::UnknownKey(key.clone()));
            };
            if source != entry {
                return Err(ProgressError::EntryMismatch(key.clone()));
            }
        }

        let found = self.entered.len() + self.remaining.len();
        if found != dataset.len() {
            return Err(ProgressError::Incomplete {
                expected: dataset.len(),
                found,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Group, Order};

    fn entry(key: &str, order: u32) -> Entry {
        Entry::new(
            EntryKey::new(key),
            key,
            Order::new(order),
            format!("{key}.png"),
            Group::from(1),
        )
        .unwrap()
    }

    fn dataset() -> Dataset {
        Dataset::new(vec![entry("a", 1), entry("ab", 2), entry("abc", 3)]).unwrap()
    }

    fn progress(entered: &[&str], remaining: &[&str]) -> Progress {
        let dataset = dataset();
        Progress {
            count: entered.len(),
            entered: entered
                .iter()
                .map(|key| dataset.get(key).unwrap().snapshot())
                .collect(),
            remaining: remaining
                .iter()
                .map(|key| (EntryKey::new(*key), dataset.get(key).unwrap().clone()))
                .collect(),
        }
    }

    #[test]
    fn consistent_progress_validates() {
        assert!(progress(&["ab"], &["a", "abc"]).validate_against(&dataset()).is_ok());
        assert!(progress(&[], &["a", "ab", "abc"]).validate_against(&dataset()).is_ok());
    }

    #[test]
    fn inconsistent_progress_is_rejected() {
        let mut wrong_count = progress(&["ab"], &["a", "abc"]);
        wrong_count.count = 2;
        assert!(matches!(
            wrong_count.validate_against(&dataset()),
            Err(ProgressError::CountMismatch { count: 2, entered: 1 })
        ));

        let overlap = progress(&["ab"], &["a", "ab", "abc"]);
        assert_eq!(
            overlap.validate_against(&dataset()),
            Err(ProgressError::Overlap(EntryKey::new("ab")))
        );

        let missing = progress(&["ab"], &["a"]);
        assert_eq!(
            missing.validate_against(&dataset()),
            Err(ProgressError::Incomplete { expected: 3, found: 2 })
        );

        let mut foreign = progress(&[], &["a", "ab", "abc"]);
        foreign
            .remaining
            .insert(EntryKey::new("pikachu"), entry("pikachu", 25));
        assert_eq!(
            foreign.validate_against(&dataset()),
            Err(ProgressError::UnknownKey(EntryKey::new("pikachu")))
        );

        let mut renamed = progress(&["a"], &["ab", "abc"]);
        renamed.entered[0].display_name = "Renamed".into();
        assert_eq!(
            renamed.validate_against(&dataset()),
            Err(ProgressError::EntryMismatch(EntryKey::new("a")))
        );
    }
}
