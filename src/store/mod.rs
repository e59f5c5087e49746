//! Single-writer session store.
//!
//! One [`SessionStore`] owns the state for an exam attempt. Dispatch runs
//! the pure reducer under a mutex and bumps a revision counter on a watch
//! channel so coordinators can wake without polling state.

pub mod action;
pub mod reducer;
pub mod state;

use std::sync::Mutex;

use tokio::sync::watch;

pub use action::Action;
pub use state::SessionState;

use crate::exam::AnswersState;

/// Monotone counters describing how far the state has advanced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Revision {
    /// Bumped on every dispatch.
    pub dispatch: u64,
    /// Bumped only when the answers slice changed, so autosave can tell
    /// edits apart from status churn.
    pub answers: u64,
}

/// Owns the session state and the revision channel.
///
/// Cheap to share behind an `Arc`; dispatches serialize on the internal
/// mutex, which is held only for the duration of a pure reduction.
pub struct SessionStore {
    state: Mutex<SessionState>,
    rev_tx: watch::Sender<Revision>,
}

impl SessionStore {
    pub fn new() -> Self {
        SessionStore {
            state: Mutex::new(SessionState::default()),
            rev_tx: watch::Sender::new(Revision::default()),
        }
    }

    /// Apply one action and notify revision subscribers.
    pub fn dispatch(&self, action: Action) {
        let answers_edit = matches!(
            action,
            Action::LoadExam { .. } | Action::UpdateAnswer { .. } | Action::UpdateScratch { .. }
        );

        {
            let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
            let current = std::mem::take(&mut *state);
            *state = reducer::reduce(current, action);
        }

        self.rev_tx.send_modify(|rev| {
            rev.dispatch += 1;
            if answers_edit {
                rev.answers += 1;
            }
        });
    }

    /// Run `f` against the current state.
    pub fn read<R>(&self, f: impl FnOnce(&SessionState) -> R) -> R {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        f(&state)
    }

    /// Clone the full state. Prefer [`read`](Self::read) for one field.
    pub fn snapshot(&self) -> SessionState {
        self.read(|s| s.clone())
    }

    /// Clone the answers slice, if an exam is loaded.
    pub fn snapshot_answers(&self) -> Option<AnswersState> {
        self.read(|s| s.contents.answers.clone())
    }

    pub fn revision(&self) -> Revision {
        *self.rev_tx.borrow()
    }

    /// Subscribe to revision bumps. The receiver starts already marked
    /// changed for the current value.
    pub fn subscribe(&self) -> watch::Receiver<Revision> {
        self.rev_tx.subscribe()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::store::state::SnapshotStatus;

    #[test]
    fn dispatch_bumps_dispatch_revision() {
        let store = SessionStore::new();
        assert_eq!(store.revision().dispatch, 0);

        store.dispatch(Action::SnapshotSaving);
        let rev = store.revision();
        assert_eq!(rev.dispatch, 1);
        assert_eq!(rev.answers, 0);
        assert_eq!(
            store.read(|s| s.snapshot.status),
            SnapshotStatus::Loading
        );
    }

    #[test]
    fn answers_revision_tracks_only_answer_edits() {
        let store = SessionStore::new();
        store.dispatch(Action::UpdateScratch {
            value: "notes".to_string(),
        });
        store.dispatch(Action::SnapshotSuccess);
        store.dispatch(Action::NextQuestion);

        let rev = store.revision();
        assert_eq!(rev.dispatch, 3);
        assert_eq!(rev.answers, 1);
    }

    #[tokio::test]
    async fn subscribers_wake_on_dispatch() {
        let store = SessionStore::new();
        let mut rx = store.subscribe();
        // Drain the initial marker.
        rx.borrow_and_update();

        store.dispatch(Action::SnapshotSaving);
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().dispatch, 1);
    }
}
