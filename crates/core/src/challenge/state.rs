use std::collections::BTreeMap;
use std::sync::Arc;

use crate::challenge::progress::{Progress, ProgressError};
use crate::challenge::view::ChallengeView;
use crate::model::{Dataset, EnteredEntry, Entry, EntryKey, Order};
use crate::normalize::normalize_name;
use crate::suggest::suggest;

//
// ─── EVENTS & EFFECTS ──────────────────────────────────────────────────────────
//

/// Input events a rendering layer feeds into the challenge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChallengeEvent {
    InputChanged(String),
    Submitted,
    Reset,
}

/// What the persistence collaborator must do after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Save(Progress),
    Clear,
}

/// Outcome of the most recent submit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Validity {
    #[default]
    Unknown,
    Valid,
    Invalid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingInput,
    Valid,
    Invalid,
    Complete,
}

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

/// Session state of one play-through.
///
/// `remaining` and `entered` always partition the initial working set, and
/// `entered` stays sorted by order. The count is derived from `entered`, so
/// it cannot drift from either collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeState {
    initial: Arc<Dataset>,
    remaining: BTreeMap<EntryKey, Entry>,
    entered: Vec<EnteredEntry>,
    last_matched_order: Option<Order>,
    input_text: String,
    validity: Validity,
    suggestion: Option<String>,
}

impl ChallengeState {
    /// Starts a fresh session over the whole working set.
    #[must_use]
    pub fn new(dataset: impl Into<Arc<Dataset>>) -> Self {
        let initial = dataset.into();
        Self {
            remaining: initial.as_map().clone(),
            initial,
            entered: Vec::new(),
            last_matched_order: None,
            input_text: String::new(),
            validity: Validity::Unknown,
            suggestion: None,
        }
    }

    /// Resumes a session from persisted progress.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError` if the progress does not describe a session over
    /// `dataset`; callers are expected to fall back to [`ChallengeState::new`].
    pub fn resume(
        dataset: impl Into<Arc<Dataset>>,
        progress: Progress,
    ) -> Result<Self, ProgressError> {
        let initial = dataset.into();
        progress.validate_against(&initial)?;

        let Progress {
            mut entered,
            remaining,
            ..
        } = progress;
        entered.sort_by_key(|entry| entry.order);

        Ok(Self {
            initial,
            remaining,
            entered,
            last_matched_order: None,
            input_text: String::new(),
            validity: Validity::Unknown,
            suggestion: None,
        })
    }

    /// Applies one event and reports the persistence side effect it requires.
    pub fn apply(&mut self, event: ChallengeEvent) -> Effect {
        match event {
            ChallengeEvent::InputChanged(text) => {
                self.input_changed(text);
                Effect::None
            }
            ChallengeEvent::Submitted => self.submit(),
            ChallengeEvent::Reset => self.reset(),
        }
    }

    /// Stores the raw text, recomputes the suggestion and clears validity.
    pub fn input_changed(&mut self, text: impl Into<String>) {
        self.input_text = text.into();
        self.suggestion =
            suggest(&normalize_name(&self.input_text), &self.remaining).map(str::to_owned);
        self.validity = Validity::Unknown;
    }

    /// Resolves the current input against the remaining set.
    ///
    /// Returns `Effect::Save` with the updated progress on a match. A miss
    /// marks the input invalid and keeps it for correction. Once the
    /// challenge is complete, submits are ignored.
    pub fn submit(&mut self) -> Effect {
        if self.is_complete() {
            return Effect::None;
        }

        let candidate = self.candidate_key();
        let Some(entry) = self.remaining.remove(candidate.as_str()) else {
            self.validity = Validity::Invalid;
            return Effect::None;
        };

        let order = entry.order();
        let position = self.entered.partition_point(|entered| entered.order < order);
        self.entered.insert(position, entry.snapshot());

        self.last_matched_order = Some(order);
        self.input_text.clear();
        self.suggestion = None;
        self.validity = Validity::Valid;

        Effect::Save(self.progress())
    }

    /// Restores the full working set and asks for persisted progress to be dropped.
    pub fn reset(&mut self) -> Effect {
        self.remaining = self.initial.as_map().clone();
        self.entered.clear();
        self.last_matched_order = None;
        self.input_text.clear();
        self.suggestion = None;
        self.validity = Validity::Unknown;
        Effect::Clear
    }

    // The longer normalized string wins; ties keep the typed input.
    fn candidate_key(&self) -> String {
        let input = normalize_name(&self.input_text);
        let suggestion = self
            .suggestion
            .as_deref()
            .map(normalize_name)
            .unwrap_or_default();

        if input.chars().count() >= suggestion.chars().count() {
            input
        } else {
            suggestion
        }
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.entered.len()
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.initial.len()
    }

    #[must_use]
    pub fn remaining(&self) -> &BTreeMap<EntryKey, Entry> {
        &self.remaining
    }

    #[must_use]
    pub fn entered(&self) -> &[EnteredEntry] {
        &self.entered
    }

    #[must_use]
    pub fn last_matched_order(&self) -> Option<Order> {
        self.last_matched_order
    }

    #[must_use]
    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    #[must_use]
    pub fn validity(&self) -> Validity {
        self.validity
    }

    #[must_use]
    pub fn suggestion(&self) -> Option<&str> {
        self.suggestion.as_deref()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.count() == self.total()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.is_complete() {
            return Phase::Complete;
        }
        match self.validity {
            Validity::Unknown => Phase::AwaitingInput,
            Validity::Valid => Phase::Valid,
            Validity::Invalid => Phase::Invalid,
        }
    }

    /// The persisted triple for the current state.
    #[must_use]
    pub fn progress(&self) -> Progress {
        Progress {
            count: self.count(),
            entered: self.entered.clone(),
            remaining: self.remaining.clone(),
        }
    }

    /// Read-only snapshot for rendering.
    #[must_use]
    pub fn view(&self) -> ChallengeView {
        ChallengeView {
            count: self.count(),
            total: self.total(),
            remaining: self.remaining.len(),
            entered: self.entered.clone(),
            validity: self.validity,
            suggestion: self.suggestion.clone(),
            input_text: self.input_text.clone(),
            last_matched_order: self.last_matched_order,
            complete: self.is_complete(),
        }
    }
}

/// Pure transition: consumes a state and an event, returns the next state
/// and the side effect to hand to persistence.
#[must_use]
pub fn transition(mut state: ChallengeState, event: ChallengeEvent) -> (ChallengeState, Effect) {
    let effect = state.apply(event);
    (state, effect)
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
