#![forbid(unsafe_code)]

pub mod app_services;
pub mod challenge;
pub mod error;

pub use app_services::AppServices;
pub use challenge::{ChallengeLoopService, ChallengeOptions, SubmitResult};
pub use error::ChallengeError;
