//! The exam-take API: the engine's only server contract.
//!
//! The original workflows all talk to a single exam-take URL with a `task`
//! discriminator (`start`, `snapshot`, `submit`, `anomaly`); [`TakeApi`]
//! unifies them behind one trait so the coordinators are transport-agnostic
//! and tests can substitute an in-memory implementation.

pub mod http;
pub mod types;

use async_trait::async_trait;

pub use http::HttpTakeApi;
pub use types::{SaveResult, StartContents, StartResponse, SubmitResult, WireTimeInfo};

use crate::error::ApiError;
use crate::exam::AnswersState;

/// The four tasks of the exam-take endpoint.
#[async_trait]
pub trait TakeApi: Send + Sync {
    /// Begin (or resume) the exam attempt and fetch its contents.
    async fn start(&self) -> Result<StartResponse, ApiError>;

    /// Persist the current answers as a snapshot.
    async fn save_snapshot(&self, answers: &AnswersState) -> Result<SaveResult, ApiError>;

    /// Submit the exam for grading.
    async fn submit(&self, answers: &AnswersState) -> Result<SubmitResult, ApiError>;

    /// Report a lockdown violation. Callers never gate the lockout decision
    /// on this result.
    async fn report_anomaly(&self, reason: &str) -> Result<(), ApiError>;
}
