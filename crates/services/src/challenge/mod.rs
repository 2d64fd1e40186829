mod options;
mod service;

pub use options::ChallengeOptions;
pub use service::{ChallengeLoopService, SubmitResult};
