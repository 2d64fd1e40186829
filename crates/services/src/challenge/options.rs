use dex_core::model::{Dataset, Group};

use crate::error::ChallengeError;

const SCOPE_PREFIX: &str = "dex";

/// Which part of the dataset a challenge is played over.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChallengeOptions {
    groups: Vec<Group>,
}

impl ChallengeOptions {
    /// Play every entry in the dataset.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Play only the selected groups. Duplicates and blank tags are dropped.
    #[must_use]
    pub fn with_groups(groups: impl IntoIterator<Item = Group>) -> Self {
        let mut groups: Vec<Group> = groups
            .into_iter()
            .filter(|group| !group.as_str().is_empty())
            .collect();
        groups.sort_by(Group::natural_cmp);
        groups.dedup();
        Self { groups }
    }

    #[must_use]
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Storage scope for this selection, e.g. `dex:all` or `dex:gen-1+2`.
    #[must_use]
    pub fn scope(&self) -> String {
        if self.groups.is_empty() {
            return format!("{SCOPE_PREFIX}:all");
        }
        let joined: Vec<&str> = self.groups.iter().map(Group::as_str).collect();
        format!("{SCOPE_PREFIX}:gen-{}", joined.join("+"))
    }

    /// The working set for a session: the dataset filtered to the selection.
    ///
    /// # Errors
    ///
    /// Returns `ChallengeError::Dataset` if the selection matches no entries.
    pub fn working_set(&self, dataset: &Dataset) -> Result<Dataset, ChallengeError> {
        Ok(dataset.filter_groups(&self.groups)?)
    }
}
