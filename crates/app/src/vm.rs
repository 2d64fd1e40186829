//! Turns engine snapshots into terminal lines.

use dex_core::model::{EnteredEntry, Group};
use dex_core::{ChallengeView, Validity};
use services::SubmitResult;

pub struct ChallengeVm<'a> {
    view: &'a ChallengeView,
}

impl<'a> ChallengeVm<'a> {
    #[must_use]
    pub fn new(view: &'a ChallengeView) -> Self {
        Self { view }
    }

    #[must_use]
    pub fn header(&self, groups: &[Group]) -> String {
        let selection = if groups.is_empty() {
            "all generations".to_owned()
        } else {
            let names: Vec<&str> = groups.iter().map(Group::as_str).collect();
            format!("Generation {}", names.join(", "))
        };
        format!(
            "Dex Challenge ({selection}): {} caught, {} remaining",
            self.view.count, self.view.remaining
        )
    }

    /// Entered list in order, the latest match marked with `*`.
    #[must_use]
    pub fn entered_lines(&self) -> Vec<String> {
        let highlighted = self.view.highlighted_order();
        self.view
            .entered
            .iter()
            .map(|entry| {
                let marker = if Some(entry.order) == highlighted { '*' } else { ' ' };
                format!("{marker} {}", entry_label(entry))
            })
            .collect()
    }

    #[must_use]
    pub fn suggestion_line(&self) -> Option<String> {
        self.view
            .suggestion
            .as_ref()
            .map(|name| format!("  suggestion: {name} (press enter on the same text to take it)"))
    }

    #[must_use]
    pub fn submit_line(&self, result: &SubmitResult) -> String {
        match (&result.matched, result.validity) {
            (Some(entry), _) => format!(
                "✓ {}  [{}/{}]",
                entry_label(entry),
                self.view.count,
                self.view.total
            ),
            (None, Validity::Invalid) => format!(
                "✗ {:?} is not a remaining entry",
                self.view.input_text
            ),
            (None, _) => "challenge already complete".to_owned(),
        }
    }

    #[must_use]
    pub fn complete_line(&self) -> Option<String> {
        self.view
            .complete
            .then(|| format!("Complete! All {} caught.", self.view.total))
    }
}

fn entry_label(entry: &EnteredEntry) -> String {
    format!("#{:03} {}", entry.order.value(), entry.display_name)
}
