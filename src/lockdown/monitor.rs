//! Lockdown precondition check and the anomaly monitor.
//!
//! [`lock`] runs once before the exam starts. [`LockdownMonitor`] runs for
//! the life of the session: it watches host events against the listener
//! table, reports violations fire-and-forget, and forces lockout
//! unconditionally — a failed report must never keep a violation
//! consequence-free.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::api::TakeApi;
use crate::error::LockdownError;
use crate::lockdown::host::{BrowserFamily, Host};
use crate::lockdown::listeners::RULES;
use crate::lockdown::policy::{Policy, PolicySet};

/// Callback for surfacing anomalies locally under `MockLockdown`.
pub type AnomalyAlert = Arc<dyn Fn(&str) + Send + Sync>;

/// Verify lockdown preconditions before the exam starts.
///
/// With `TolerateWindowed` in effect this is a no-op. Otherwise: clear the
/// clipboard (best effort), require a Chromium- or Firefox-family browser,
/// enter fullscreen if not already there, and confirm the final geometry.
///
/// The returned error's `Display` text is user-facing.
pub async fn lock(host: &dyn Host, policies: &PolicySet) -> Result<(), LockdownError> {
    if policies.permits(Policy::TolerateWindowed) {
        return Ok(());
    }

    if let Err(e) = host.clear_clipboard().await {
        // Best effort only; an unclearable clipboard is not grounds to
        // block the exam.
        tracing::warn!(error = %e, "could not clear clipboard before lockdown");
    }

    let caps = host.capabilities();
    match caps.browser {
        BrowserFamily::Chromium | BrowserFamily::Firefox => {}
        BrowserFamily::Other => return Err(LockdownError::UnsupportedBrowser),
    }

    if !caps.geometry.is_fullscreen() {
        host.enter_fullscreen()
            .await
            .map_err(|_| LockdownError::FullscreenDenied)?;
    }

    let geometry = host.capabilities().geometry;
    if !geometry.is_fullscreen() {
        return Err(LockdownError::FullscreenUnconfirmed { geometry });
    }

    tracing::info!("lockdown preconditions satisfied");
    Ok(())
}

/// Watches host events for lockdown violations.
///
/// Listener installation and removal are symmetric: every rule armed by
/// [`install`](Self::install) is disarmed by [`teardown`](Self::teardown),
/// and events arriving after teardown are dropped. The armed count is
/// observable for leak tests.
pub struct LockdownMonitor {
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
    armed: Arc<AtomicUsize>,
}

impl LockdownMonitor {
    /// Install anomaly listeners per the policy set.
    ///
    /// Under `IgnoreLockdown` nothing is installed. Under `MockLockdown`
    /// anomalies go to `alert` instead of the server, never lock out, and
    /// one-shot rules stay armed so practice runs can trip them repeatedly.
    pub fn install(
        api: Arc<dyn TakeApi>,
        host: Arc<dyn Host>,
        policies: &PolicySet,
        alert: Option<AnomalyAlert>,
    ) -> Self {
        let cancel = CancellationToken::new();
        let armed = Arc::new(AtomicUsize::new(0));

        if policies.permits(Policy::IgnoreLockdown) {
            tracing::info!("lockdown ignored by policy; no listeners installed");
            return LockdownMonitor {
                cancel,
                task: None,
                armed,
            };
        }

        let mock = policies.permits(Policy::MockLockdown);
        armed.store(RULES.len(), Ordering::SeqCst);

        let task = tokio::spawn(run_monitor(
            api,
            host,
            mock,
            alert,
            cancel.clone(),
            Arc::clone(&armed),
        ));

        LockdownMonitor {
            cancel,
            task: Some(task),
            armed,
        }
    }

    /// Number of currently armed listener rules.
    pub fn active_listeners(&self) -> usize {
        self.armed.load(Ordering::SeqCst)
    }

    /// Disarm every listener and stop the monitor task.
    pub async fn teardown(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take()
            && let Err(e) = task.await
        {
            tracing::warn!(error = %e, "lockdown monitor task panicked");
        }
        self.armed.store(0, Ordering::SeqCst);
    }
}

async fn run_monitor(
    api: Arc<dyn TakeApi>,
    host: Arc<dyn Host>,
    mock: bool,
    alert: Option<AnomalyAlert>,
    cancel: CancellationToken,
    armed: Arc<AtomicUsize>,
) {
    let mut rx = host.events();
    let mut rule_armed = vec![true; RULES.len()];
    let mut locked_out = false;

    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => break,
            received = rx.recv() => match received {
                Ok(event) => event,
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "lockdown monitor lagged behind host events");
                    continue;
                }
                Err(RecvError::Closed) => break,
            },
        };

        let caps = host.capabilities();
        for (idx, rule) in RULES.iter().enumerate() {
            if !rule_armed[idx] || !(rule.matches)(&event) {
                continue;
            }

            // One-shot rules disarm on first delivery, anomalous or not,
            // matching the browser listener behavior. Mock mode keeps them
            // armed so practice runs can trip the same rule repeatedly.
            if !mock && !rule.repeated {
                rule_armed[idx] = false;
                armed.fetch_sub(1, Ordering::SeqCst);
            }

            let Some(reason) = (rule.reason)(&caps, &event) else {
                continue;
            };

            if let Err(e) = host.clear_clipboard().await {
                tracing::debug!(error = %e, "could not clear clipboard on anomaly");
            }

            if mock {
                tracing::info!(rule = rule.name, reason, "mock lockdown anomaly");
                if let Some(alert) = &alert {
                    alert(reason);
                }
                continue;
            }

            tracing::warn!(rule = rule.name, reason, "lockdown anomaly detected");

            // Fire-and-forget: the lockout below must not wait on (or be
            // bypassed by) the report's outcome.
            let api = Arc::clone(&api);
            let owned_reason = reason.to_string();
            tokio::spawn(async move {
                match api.report_anomaly(&owned_reason).await {
                    Ok(()) => tracing::debug!(reason = %owned_reason, "anomaly reported"),
                    Err(e) => {
                        tracing::warn!(reason = %owned_reason, error = %e, "anomaly report failed")
                    }
                }
            });

            if !locked_out {
                locked_out = true;
                host.lock_out().await;
            }
        }
    }

    armed.store(0, Ordering::SeqCst);
}
