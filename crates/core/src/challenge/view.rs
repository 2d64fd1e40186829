use crate::challenge::state::Validity;
use crate::model::{EnteredEntry, Order};

/// Read-only snapshot of a challenge, taken after every transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeView {
    pub count: usize,
    pub total: usize,
    pub remaining: usize,
    pub entered: Vec<EnteredEntry>,
    pub validity: Validity,
    pub suggestion: Option<String>,
    pub input_text: String,
    pub last_matched_order: Option<Order>,
    pub complete: bool,
}

impl ChallengeView {
    /// Order of the entry to highlight, if any. Nothing is highlighted once
    /// the challenge is complete.
    #[must_use]
    pub fn highlighted_order(&self) -> Option<Order> {
        if self.complete {
            None
        } else {
            self.last_matched_order
        }
    }
}
