//! Exam-taking session engine.
//!
//! Everything a proctored-exam client needs between "open the exam" and
//! "submit": loading contents from the exam-take endpoint, a single-writer
//! state store with pure reducers, background autosave with debounced edit
//! detection, and browser lockdown (preconditions, anomaly monitoring,
//! lockout).
//!
//! The embedding shell implements [`lockdown::host::Host`] for its
//! environment and drives one [`session::Session`] per attempt; everything
//! else is internal wiring.

pub mod api;
pub mod autosave;
pub mod config;
pub mod error;
pub mod exam;
pub mod lockdown;
pub mod session;
pub mod store;
pub mod telemetry;
pub mod util;

pub use config::SessionConfig;
pub use error::Error;
pub use session::Session;
pub use store::{Action, SessionStore};
