use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;

/// Canonical lowercase hyphenated identifier for an entry (e.g. `mr-mime`).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryKey(String);

impl EntryKey {
    /// Creates a new `EntryKey` from an already canonical identifier.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// Lets maps keyed by `EntryKey` be queried with a normalized `&str`.
impl Borrow<str> for EntryKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Positive rank of an entry; unique within a dataset and used for sorting.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Order(u32);

impl Order {
    /// Creates a new `Order`
    #[must_use]
    pub fn new(order: u32) -> Self {
        Self(order)
    }

    /// Returns the underlying u32 value
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }
}

/// Categorical tag (e.g. a generation number) used to pre-filter a dataset.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Group(String);

impl Group {
    #[must_use]
    pub fn new(group: impl Into<String>) -> Self {
        Self(group.into().trim().to_owned())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Natural ordering: non-numeric groups first, then numeric groups by value.
    #[must_use]
    pub fn natural_cmp(&self, other: &Self) -> Ordering {
        let key = |group: &Self| (group.0.parse::<u64>().ok(), group.0.clone());
        key(self).cmp(&key(other))
    }
}

impl From<u32> for Group {
    fn from(value: u32) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Debug for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntryKey({:?})", self.0)
    }
}

impl fmt::Debug for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Order({})", self.0)
    }
}

impl fmt::Debug for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Group({:?})", self.0)
    }
}

// ─── Display Implementations ───────────────────────────────────────────────────

impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn entry_key_lookup_by_str() {
        let mut map = BTreeMap::new();
        map.insert(EntryKey::new("mr-mime"), 122);
        assert_eq!(map.get("mr-mime"), Some(&122));
    }

    #[test]
    fn order_displays_bare_number() {
        assert_eq!(Order::new(25).to_string(), "25");
        assert_eq!(Order::new(25).value(), 25);
    }

    #[test]
    fn group_trims_and_sorts_numerically() {
        let mut groups = vec![Group::new(" 10 "), Group::from(2), Group::new("kanto")];
        groups.sort_by(Group::natural_cmp);
        let names: Vec<_> = groups.iter().map(Group::as_str).collect();
        assert_eq!(names, vec!["kanto", "2", "10"]);
    }
}
