#![forbid(unsafe_code)]

pub mod challenge;
pub mod error;
pub mod model;
pub mod normalize;
pub mod suggest;

pub use challenge::{
    ChallengeEvent, ChallengeState, ChallengeView, Effect, Phase, Progress, ProgressError,
    Validity, transition,
};
pub use error::Error;
pub use normalize::normalize_name;
pub use suggest::{MIN_SUGGESTION_CHARS, suggest};
