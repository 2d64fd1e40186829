use std::collections::{BTreeMap, BTreeSet, HashMap};

use thiserror::Error;

use crate::model::entry::Entry;
use crate::model::ids::{EntryKey, Group, Order};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DatasetError {
    #[error("dataset has no entries")]
    Empty,

    #[error("duplicate entry key: {0}")]
    DuplicateKey(EntryKey),

    #[error("order {order} is shared by {first} and {second}")]
    DuplicateOrder {
        order: Order,
        first: EntryKey,
        second: EntryKey,
    },

    #[error("no entries belong to the selected groups")]
    NoEntriesForGroups,
}

/// Immutable universe of entries a challenge is played against.
///
/// Keys and orders are unique. Iteration is in key order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    entries: BTreeMap<EntryKey, Entry>,
}

impl Dataset {
    /// Builds a dataset from validated entries.
    ///
    /// # Errors
    ///
    /// Returns `DatasetError::Empty` for no entries, or a duplicate error when a
    /// key or order appears twice.
    pub fn new(entries: impl IntoIterator<Item = Entry>) -> Result<Self, DatasetError> {
        let mut by_key = BTreeMap::new();
        let mut by_order: HashMap<Order, EntryKey> = HashMap::new();

        for entry in entries {
            if let Some(first) = by_order.get(&entry.order()) {
                return Err(DatasetError::DuplicateOrder {
                    order: entry.order(),
                    first: first.clone(),
                    second: entry.key().clone(),
                });
            }
            if by_key.contains_key(entry.key()) {
                return Err(DatasetError::DuplicateKey(entry.key().clone()));
            }
            by_order.insert(entry.order(), entry.key().clone());
            by_key.insert(entry.key().clone(), entry);
        }

        if by_key.is_empty() {
            return Err(DatasetError::Empty);
        }

        Ok(Self { entries: by_key })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.entries.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.values()
    }

    /// Distinct groups present in the dataset, numeric groups in numeric order.
    #[must_use]
    pub fn groups(&self) -> Vec<Group> {
        let mut groups: Vec<Group> = self
            .entries
            .values()
            .map(|entry| entry.group().clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        groups.sort_by(Group::natural_cmp);
        groups
    }

    /// Restricts the dataset to entries whose group is selected.
    ///
    /// An empty selection keeps every entry.
    ///
    /// # Errors
    ///
    /// Returns `DatasetError::NoEntriesForGroups` if nothing remains.
    pub fn filter_groups(&self, groups: &[Group]) -> Result<Self, DatasetError> {
        if groups.is_empty() {
            return Ok(self.clone());
        }

        let entries: BTreeMap<_, _> = self
            .entries
            .iter()
            .filter(|(_, entry)| groups.contains(entry.group()))
            .map(|(key, entry)| (key.clone(), entry.clone()))
            .collect();

        if entries.is_empty() {
            return Err(DatasetError::NoEntriesForGroups);
        }
        Ok(Self { entries })
    }

    pub(crate) fn as_map(&self) -> &BTreeMap<EntryKey, Entry> {
        &self.entries
    }
}
