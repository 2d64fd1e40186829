mod progress;
mod state;
mod view;

pub use progress::{Progress, ProgressError};
pub use state::{ChallengeEvent, ChallengeState, Effect, Phase, Validity, transition};
pub use view::ChallengeView;
