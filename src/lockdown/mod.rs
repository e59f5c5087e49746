//! Exam-integrity monitoring.
//!
//! Before the exam starts, [`monitor::lock`] verifies the host satisfies the
//! configured policy's preconditions (supported browser, fullscreen). While
//! the exam runs, a [`monitor::LockdownMonitor`] watches host events for
//! policy violations; each violation is reported to the server
//! fire-and-forget and then forces lockout regardless of whether the report
//! lands.

pub mod host;
pub mod listeners;
pub mod monitor;
pub mod policy;

pub use host::{BrowserFamily, Host, HostCapabilities, HostEvent, WindowGeometry};
pub use monitor::{AnomalyAlert, LockdownMonitor, lock};
pub use policy::{Policy, PolicySet};
