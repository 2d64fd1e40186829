mod dataset;
mod entry;
mod ids;

pub use ids::{EntryKey, Group, Order};

pub use dataset::{Dataset, DatasetError};
pub use entry::{EnteredEntry, Entry, EntryError};
