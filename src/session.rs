//! The exam session façade.
//!
//! [`Session::begin`] wires the whole engine together for one attempt:
//! lockdown preconditions, the `start` call, the lockdown monitor, and the
//! autosave loop. Outcomes land in the store rather than in return values,
//! because the UI renders session state either way; `begin` itself only
//! fails on problems the student cannot see or fix (none today).

use std::sync::Arc;

use chrono::Utc;

use crate::api::{StartResponse, TakeApi};
use crate::autosave::AutosaveHandle;
use crate::config::SessionConfig;
use crate::error::ApiError;
use crate::lockdown::host::Host;
use crate::lockdown::monitor::{self, AnomalyAlert, LockdownMonitor};
use crate::lockdown::policy::Policy;
use crate::store::{Action, SessionStore};

/// A running exam attempt.
///
/// Owns the store and both background coordinators. End it with
/// [`finish`](Self::finish) (submit) or [`shutdown`](Self::shutdown)
/// (abandon without submitting, e.g. on navigation away).
pub struct Session {
    store: Arc<SessionStore>,
    monitor: Option<LockdownMonitor>,
    autosave: Option<AutosaveHandle>,
}

impl Session {
    /// Lock down, start the exam, and spawn the coordinators.
    ///
    /// Always returns a session; a failed lockdown or start leaves the
    /// failure in the lockdown slice and spawns nothing.
    pub async fn begin(
        config: &SessionConfig,
        api: Arc<dyn TakeApi>,
        host: Arc<dyn Host>,
        alert: Option<AnomalyAlert>,
    ) -> Session {
        let store = Arc::new(SessionStore::new());
        let policies = config.policies();

        if policies.permits(Policy::IgnoreLockdown) {
            store.dispatch(Action::LockdownIgnored);
        } else {
            match monitor::lock(host.as_ref(), policies).await {
                Ok(()) => store.dispatch(Action::LockedDown),
                Err(e) => {
                    store.dispatch(Action::LockdownFailed {
                        message: e.to_string(),
                    });
                    return Session {
                        store,
                        monitor: None,
                        autosave: None,
                    };
                }
            }
        }

        match api.start().await {
            Ok(StartResponse::Contents(contents)) => {
                let time = contents.time.corrected(Utc::now());
                store.dispatch(Action::LoadExam {
                    exam: Box::new(contents.exam),
                    time,
                    answers: contents.answers,
                    messages: contents.messages,
                });
            }
            Ok(StartResponse::Anomalous) => {
                tracing::warn!("start refused: registration already anomalous");
                store.dispatch(Action::LockdownFailed {
                    message: "You have been locked out. Please see an instructor.".to_string(),
                });
                return Session {
                    store,
                    monitor: None,
                    autosave: None,
                };
            }
            Err(e) => {
                tracing::error!(error = %e, "start request failed");
                store.dispatch(Action::LockdownFailed {
                    message: format!("Error starting exam: {e}"),
                });
                return Session {
                    store,
                    monitor: None,
                    autosave: None,
                };
            }
        }

        let monitor = LockdownMonitor::install(Arc::clone(&api), Arc::clone(&host), policies, alert);
        let autosave = AutosaveHandle::spawn(
            Arc::clone(&store),
            api,
            host,
            config.autosave_interval(),
            config.debounce(),
        );

        Session {
            store,
            monitor: Some(monitor),
            autosave: Some(autosave),
        }
    }

    /// The session's store. Dispatch answer edits and navigation here.
    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    /// Number of currently armed lockdown listener rules.
    pub fn active_listeners(&self) -> usize {
        self.monitor.as_ref().map_or(0, |m| m.active_listeners())
    }

    /// Submit the exam and end the session.
    ///
    /// The monitor comes down before the submit goes out, so the post-submit
    /// navigation is not itself flagged as an anomaly. On a failed submit the
    /// error is returned and also visible in the snapshot slice; the caller
    /// may retry by submitting through a fresh session.
    pub async fn finish(mut self) -> Result<(), ApiError> {
        if let Some(monitor) = self.monitor.take() {
            monitor.teardown().await;
        }
        match self.autosave.take() {
            Some(autosave) => autosave.submit().await,
            None => Ok(()),
        }
    }

    /// End the session without submitting.
    pub async fn shutdown(mut self) {
        if let Some(monitor) = self.monitor.take() {
            monitor.teardown().await;
        }
        if let Some(autosave) = self.autosave.take() {
            autosave.shutdown().await;
        }
    }
}
