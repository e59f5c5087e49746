//! Background answer persistence.
//!
//! One autosave task per session. It saves on a fixed interval and shortly
//! after answer edits, with at most one snapshot request in flight; edits
//! that land mid-save collapse into exactly one follow-up save. The task
//! stops itself once the session finishes.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::api::{SaveResult, SubmitResult, TakeApi};
use crate::error::ApiError;
use crate::lockdown::host::Host;
use crate::store::state::SnapshotStatus;
use crate::store::{Action, SessionStore};
use crate::util::describe_since;

/// What a single save attempt means for the loop.
enum SaveOutcome {
    /// The snapshot landed; the saved revision is now durable.
    Saved,
    /// The attempt failed; retry on the next interval tick.
    Failed,
    /// The session is over (submitted elsewhere or locked out).
    Stop,
}

struct AutosaveCtx {
    store: Arc<SessionStore>,
    api: Arc<dyn TakeApi>,
    host: Arc<dyn Host>,
    interval: Duration,
    debounce: Duration,
    cancel: CancellationToken,
}

/// Handle to a running autosave task.
///
/// Dropping the handle without calling [`shutdown`](Self::shutdown) or
/// [`submit`](Self::submit) detaches the task; it still stops at the next
/// wakeup after its store observes a finished session.
pub struct AutosaveHandle {
    store: Arc<SessionStore>,
    api: Arc<dyn TakeApi>,
    host: Arc<dyn Host>,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl AutosaveHandle {
    /// Spawn the autosave loop for `store`.
    pub fn spawn(
        store: Arc<SessionStore>,
        api: Arc<dyn TakeApi>,
        host: Arc<dyn Host>,
        interval: Duration,
        debounce: Duration,
    ) -> Self {
        let cancel = CancellationToken::new();
        let task = tokio::spawn(run_autosave(AutosaveCtx {
            store: Arc::clone(&store),
            api: Arc::clone(&api),
            host: Arc::clone(&host),
            interval,
            debounce,
            cancel: cancel.clone(),
        }));
        AutosaveHandle {
            store,
            api,
            host,
            cancel,
            task: Some(task),
        }
    }

    /// Stop the loop without saving or submitting.
    pub async fn shutdown(mut self) {
        self.stop_loop().await;
    }

    /// Stop the loop and submit the exam for grading.
    ///
    /// On success the session transitions to its terminal finished state.
    /// On failure the error is surfaced both in the snapshot slice and to
    /// the caller, and the session stays live so the student can retry.
    pub async fn submit(mut self) -> Result<(), ApiError> {
        self.stop_loop().await;

        let Some(answers) = self.store.snapshot_answers() else {
            return Ok(());
        };
        let status = self.store.read(|s| s.snapshot.status);
        if status == SnapshotStatus::Finished {
            return Ok(());
        }

        // Same protocol as periodic saves: an existing failure banner stays
        // up until the submit resolves.
        if status == SnapshotStatus::Success {
            self.store.dispatch(Action::SnapshotSaving);
        }
        match self.api.submit(&answers).await {
            Ok(SubmitResult { lockout: true }) => {
                tracing::warn!("submission rejected with a lockout");
                self.store.dispatch(Action::SnapshotFailure {
                    message: "Locked out of exam.".to_string(),
                });
                self.host.lock_out().await;
                Ok(())
            }
            Ok(SubmitResult { lockout: false }) => {
                self.store.dispatch(Action::SnapshotFinished {
                    message: "Exam submitted.".to_string(),
                });
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "submission failed");
                self.store.dispatch(Action::SnapshotFailure {
                    message: format!("Error submitting exam: {e}"),
                });
                Err(e)
            }
        }
    }

    async fn stop_loop(&mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            // The loop holds no locks across await points; join errors only
            // surface if the task panicked.
            if task.await.is_err() {
                tracing::error!("autosave task panicked");
            }
        }
    }
}

async fn run_autosave(ctx: AutosaveCtx) {
    let mut rev_rx = ctx.store.subscribe();
    let mut saved_rev = rev_rx.borrow_and_update().answers;

    let mut ticker = tokio::time::interval(ctx.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // interval() yields its first tick immediately; the first save should
    // wait out a full period.
    ticker.reset();

    loop {
        tokio::select! {
            _ = ctx.cancel.cancelled() => break,
            _ = ticker.tick() => {
                if rev_rx.borrow_and_update().answers == saved_rev {
                    continue;
                }
            }
            changed = rev_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                if rev_rx.borrow_and_update().answers == saved_rev {
                    continue;
                }
                // Quiet window so a burst of keystrokes becomes one save.
                tokio::select! {
                    _ = ctx.cancel.cancelled() => break,
                    _ = tokio::time::sleep(ctx.debounce) => {}
                }
            }
        }

        // Single flight: edits arriving while a save is on the wire are
        // folded into one follow-up save.
        loop {
            let target = rev_rx.borrow_and_update().answers;
            match save_once(&ctx).await {
                SaveOutcome::Saved => {
                    saved_rev = target;
                    ticker.reset();
                    if rev_rx.borrow_and_update().answers == target {
                        break;
                    }
                }
                SaveOutcome::Failed => {
                    ticker.reset();
                    break;
                }
                SaveOutcome::Stop => return,
            }
        }
    }
}

async fn save_once(ctx: &AutosaveCtx) -> SaveOutcome {
    let (status, answers) =
        ctx.store
            .read(|s| (s.snapshot.status, s.contents.answers.clone()));
    if status == SnapshotStatus::Finished {
        return SaveOutcome::Stop;
    }
    let Some(answers) = answers else {
        return SaveOutcome::Saved;
    };

    // Keep an existing failure banner up while retrying; only a healthy
    // session shows the transient saving state.
    if status == SnapshotStatus::Success {
        ctx.store.dispatch(Action::SnapshotSaving);
    }

    match ctx.api.save_snapshot(&answers).await {
        Ok(SaveResult::Active { lockout: true, .. }) => {
            tracing::warn!("snapshot response revoked the attempt");
            ctx.store.dispatch(Action::SnapshotFailure {
                message: "Locked out of exam.".to_string(),
            });
            ctx.host.lock_out().await;
            SaveOutcome::Stop
        }
        Ok(SaveResult::Active {
            lockout: false,
            messages,
        }) => {
            ctx.store.dispatch(Action::SnapshotSuccess);
            for message in messages {
                ctx.store.dispatch(Action::MessageReceived { message });
            }
            SaveOutcome::Saved
        }
        Ok(SaveResult::Finished {
            message,
            last_saved,
            ..
        }) => {
            let message = match last_saved {
                Some(at) => {
                    format!("{message} Last saved {}.", describe_since(at, Utc::now()))
                }
                None => message,
            };
            ctx.store.dispatch(Action::SnapshotFinished { message });
            SaveOutcome::Stop
        }
        Err(e) => {
            tracing::warn!(error = %e, "snapshot save failed");
            ctx.store.dispatch(Action::SnapshotFailure {
                message: format!("Error saving snapshot to server: {e}"),
            });
            SaveOutcome::Failed
        }
    }
}
