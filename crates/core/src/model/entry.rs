use thiserror::Error;

use crate::model::ids::{EntryKey, Group, Order};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EntryError {
    #[error("entry key cannot be empty")]
    EmptyKey,

    #[error("display name cannot be empty for {key}")]
    EmptyDisplayName { key: EntryKey },

    #[error("order must be > 0 for {key}")]
    ZeroOrder { key: EntryKey },
}

//
// ─── ENTRY ─────────────────────────────────────────────────────────────────────
//

/// One collectible target supplied by the dataset provider.
///
/// Entries are immutable once built; a session only moves them between its
/// remaining set and its entered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    key: EntryKey,
    display_name: String,
    order: Order,
    image_ref: String,
    group: Group,
}

impl Entry {
    /// Creates a validated entry.
    ///
    /// # Errors
    ///
    /// Returns `EntryError` if the key or display name is empty, or the order is zero.
    pub fn new(
        key: EntryKey,
        display_name: impl Into<String>,
        order: Order,
        image_ref: impl Into<String>,
        group: Group,
    ) -> Result<Self, EntryError> {
        if key.is_empty() {
            return Err(EntryError::EmptyKey);
        }
        let display_name = display_name.into();
        if display_name.trim().is_empty() {
            return Err(EntryError::EmptyDisplayName { key });
        }
        if order.value() == 0 {
            return Err(EntryError::ZeroOrder { key });
        }

        Ok(Self {
            key,
            display_name,
            order,
            image_ref: image_ref.into(),
            group,
        })
    }

    #[must_use]
    pub fn key(&self) -> &EntryKey {
        &self.key
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    #[must_use]
    pub fn order(&self) -> Order {
        self.order
    }

    /// Opaque asset reference, resolved by whoever renders the entry.
    #[must_use]
    pub fn image_ref(&self) -> &str {
        &self.image_ref
    }

    #[must_use]
    pub fn group(&self) -> &Group {
        &self.group
    }

    /// Snapshot recorded in the entered list when this entry is matched.
    #[must_use]
    pub fn snapshot(&self) -> EnteredEntry {
        EnteredEntry {
            key: self.key.clone(),
            display_name: self.display_name.clone(),
            order: self.order,
            image_ref: self.image_ref.clone(),
        }
    }
}

/// A matched entry as it appears in the entered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnteredEntry {
    pub key: EntryKey,
    pub display_name: String,
    pub order: Order,
    pub image_ref: String,
}

impl EnteredEntry {
    /// Returns true if this snapshot was taken from `entry`.
    #[must_use]
    pub fn matches(&self, entry: &Entry) -> bool {
        self.key == entry.key
            && self.display_name == entry.display_name
            && self.order == entry.order
            && self.image_ref == entry.image_ref
    }
}
