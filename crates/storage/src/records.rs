//! Serialized shapes for datasets and persisted progress.
//!
//! These mirror the domain types so the JSON layout stays a storage concern.

use std::collections::BTreeMap;

use dex_core::model::{EnteredEntry, Entry, EntryError, EntryKey, Group, Order};
use serde::{Deserialize, Serialize};

/// Group tags appear as integers (`"generation": 1`) or strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GroupRecord {
    Number(u64),
    Text(String),
}

impl GroupRecord {
    #[must_use]
    pub fn from_group(group: &Group) -> Self {
        match group.as_str().parse::<u64>() {
            Ok(number) => Self::Number(number),
            Err(_) => Self::Text(group.as_str().to_owned()),
        }
    }

    #[must_use]
    pub fn into_group(self) -> Group {
        match self {
            Self::Number(number) => Group::new(number.to_string()),
            Self::Text(text) => Group::new(text),
        }
    }
}

/// One dataset value, keyed externally by its canonical key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryRecord {
    pub display_name: String,
    pub order: u32,
    pub url: String,
    #[serde(alias = "generation")]
    pub group: GroupRecord,
}

impl EntryRecord {
    #[must_use]
    pub fn from_entry(entry: &Entry) -> Self {
        Self {
            display_name: entry.display_name().to_owned(),
            order: entry.order().value(),
            url: entry.image_ref().to_owned(),
            group: GroupRecord::from_group(entry.group()),
        }
    }

    /// Convert the record back into a domain `Entry`.
    ///
    /// # Errors
    ///
    /// Returns `EntryError` if the entry fails validation.
    pub fn into_entry(self, key: String) -> Result<Entry, EntryError> {
        Entry::new(
            EntryKey::new(key),
            self.display_name,
            Order::new(self.order),
            self.url,
            self.group.into_group(),
        )
    }
}

/// An entered snapshot as stored under the `entered` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnteredRecord {
    pub name: String,
    pub display_name: String,
    pub order: u32,
    pub url: String,
}

impl EnteredRecord {
    #[must_use]
    pub fn from_entered(entered: &EnteredEntry) -> Self {
        Self {
            name: entered.key.as_str().to_owned(),
            display_name: entered.display_name.clone(),
            order: entered.order.value(),
            url: entered.image_ref.clone(),
        }
    }

    #[must_use]
    pub fn into_entered(self) -> EnteredEntry {
        EnteredEntry {
            key: EntryKey::new(self.name),
            display_name: self.display_name,
            order: Order::new(self.order),
            image_ref: self.url,
        }
    }
}

/// Map of canonical key to entry record, the on-disk dataset layout.
pub type EntryRecords = BTreeMap<String, EntryRecord>;

#[must_use]
pub fn entries_to_records<'a>(entries: impl IntoIterator<Item = &'a Entry>) -> EntryRecords {
    entries
        .into_iter()
        .map(|entry| (entry.key().as_str().to_owned(), EntryRecord::from_entry(entry)))
        .collect()
}

/// Rebuilds keyed entries from records.
///
/// # Errors
///
/// Returns the first `EntryError` encountered.
pub fn records_to_entries(records: EntryRecords) -> Result<BTreeMap<EntryKey, Entry>, EntryError> {
    records
        .into_iter()
        .map(|(key, record)| {
            let entry = record.into_entry(key)?;
            Ok((entry.key().clone(), entry))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_generation_alias_and_integer_groups() {
        let json = r#"{"displayName":"Mr. Mime","generation":1,"order":122,"url":"mr-mime.png"}"#;
        let record: EntryRecord = serde_json::from_str(json).unwrap();
        let entry = record.into_entry("mr-mime".into()).unwrap();

        assert_eq!(entry.display_name(), "Mr. Mime");
        assert_eq!(entry.group(), &Group::from(1));
        assert_eq!(entry.order(), Order::new(122));
    }

    #[test]
    fn writes_numeric_groups_as_numbers() {
        let entry = Entry::new(
            EntryKey::new("pikachu"),
            "Pikachu",
            Order::new(25),
            "pikachu.png",
            Group::from(1),
        )
        .unwrap();
        let value = serde_json::to_value(EntryRecord::from_entry(&entry)).unwrap();

        assert_eq!(value["group"], serde_json::json!(1));
        assert_eq!(value["displayName"], serde_json::json!("Pikachu"));

        let text = GroupRecord::from_group(&Group::new("kanto"));
        assert_eq!(text, GroupRecord::Text("kanto".into()));
    }

    #[test]
    fn entered_record_uses_name_field() {
        let entered = EnteredEntry {
            key: EntryKey::new("farfetchd"),
            display_name: "Farfetch'd".into(),
            order: Order::new(83),
            image_ref: "farfetchd.png".into(),
        };
        let value = serde_json::to_value(EnteredRecord::from_entered(&entered)).unwrap();
        assert_eq!(value["name"], serde_json::json!("farfetchd"));

        let back: EnteredRecord = serde_json::from_value(value).unwrap();
        assert_eq!(back.into_entered(), entered);
    }
}
