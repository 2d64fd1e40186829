use std::sync::Arc;

use dex_core::model::{Dataset, EnteredEntry};
use dex_core::{ChallengeEvent, ChallengeState, ChallengeView, Effect, Validity};
use storage::ProgressStore;
use tracing::{debug, info, warn};

/// Outcome of submitting the current input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitResult {
    pub validity: Validity,
    pub matched: Option<EnteredEntry>,
    pub is_complete: bool,
}

/// Drives a challenge and carries out its persistence side effects.
///
/// Transitions run synchronously on the state; the resulting `Effect` is then
/// applied to the progress store. Store failures are logged and absorbed, so
/// in-memory progress is never rolled back because of them.
#[derive(Clone)]
pub struct ChallengeLoopService {
    progress: ProgressStore,
}

impl ChallengeLoopService {
    #[must_use]
    pub fn new(progress: ProgressStore) -> Self {
        Self { progress }
    }

    /// Start a challenge over `working_set`, resuming saved progress when it
    /// still matches.
    ///
    /// Missing, malformed or mismatched progress starts a fresh session.
    pub async fn start(&self, working_set: Arc<Dataset>) -> ChallengeState {
        let total = working_set.len();
        match self.progress.load().await {
            Ok(Some(progress)) => match ChallengeState::resume(Arc::clone(&working_set), progress)
            {
                Ok(state) => {
                    info!(count = state.count(), total, "resumed challenge");
                    state
                }
                Err(err) => {
                    warn!(%err, "saved progress does not match the dataset, starting fresh");
                    ChallengeState::new(working_set)
                }
            },
            Ok(None) => {
                info!(total, "starting new challenge");
                ChallengeState::new(working_set)
            }
            Err(err) => {
                warn!(%err, "could not load saved progress, starting fresh");
                ChallengeState::new(working_set)
            }
        }
    }

    /// Apply any event and persist whatever it changed.
    pub async fn dispatch(&self, state: &mut ChallengeState, event: ChallengeEvent) -> ChallengeView {
        let effect = state.apply(event);
        self.persist(effect).await;
        state.view()
    }

    /// Record new input text; returns the refreshed snapshot.
    pub fn input_changed(&self, state: &mut ChallengeState, text: impl Into<String>) -> ChallengeView {
        state.input_changed(text);
        state.view()
    }

    /// Submit the current input, saving progress on a match.
    pub async fn submit(&self, state: &mut ChallengeState) -> SubmitResult {
        let effect = state.submit();
        let matched = match &effect {
            Effect::Save(_) => state
                .last_matched_order()
                .and_then(|order| state.entered().iter().find(|e| e.order == order))
                .cloned(),
            _ => None,
        };

        match &matched {
            Some(entry) => debug!(key = %entry.key, count = state.count(), "entry accepted"),
            None => debug!(input = state.input_text(), "entry rejected"),
        }
        self.persist(effect).await;

        if state.is_complete() && matched.is_some() {
            info!(total = state.total(), "challenge complete");
        }

        SubmitResult {
            validity: state.validity(),
            matched,
            is_complete: state.is_complete(),
        }
    }

    /// Start over and delete saved progress.
    pub async fn reset(&self, state: &mut ChallengeState) -> ChallengeView {
        let view = self.dispatch(state, ChallengeEvent::Reset).await;
        info!(total = view.total, "challenge reset");
        view
    }

    async fn persist(&self, effect: Effect) {
        let result = match effect {
            Effect::None => return,
            Effect::Save(progress) => self.progress.save(&progress).await,
            Effect::Clear => self.progress.clear().await,
        };
        if let Err(err) = result {
            warn!(%err, "failed to persist challenge progress");
        }
    }
}

impl std::fmt::Debug for ChallengeLoopService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChallengeLoopService").finish_non_exhaustive()
    }
}
