use crate::signal::{RSVP_UPDATED, RsvpUpdates};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

/// Turns `rsvpUpdated` signals into delayed re-fetches.
///
/// Each signal schedules its own re-fetch `settle_delay` later; signals are not
/// coalesced. Deactivating stops listening but leaves already scheduled timers
/// running, so whatever `refetch` does must tolerate firing after teardown.
///
/// Must be activated from within a tokio runtime.
pub struct RefreshScheduler {
    listener: Option<JoinHandle<()>>,
    settle_delay: Duration,
}

impl std::fmt::Debug for RefreshScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshScheduler")
            .field("active", &self.is_active())
            .field("settle_delay", &self.settle_delay)
            .finish()
    }
}

impl RefreshScheduler {
    /// Subscribe to `updates` and start listening.
    ///
    /// The subscription is taken before this returns, so a signal published
    /// right after activation is never missed.
    pub fn activate<F, Fut>(updates: &RsvpUpdates, settle_delay: Duration, refetch: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let mut rx = updates.subscribe();
        let refetch = Arc::new(refetch);

        let listener = tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(_) => on_external_update_signal(&refetch, settle_delay),
                    Err(RecvError::Lagged(missed)) => {
                        for _ in 0..missed {
                            on_external_update_signal(&refetch, settle_delay);
                        }
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });

        RefreshScheduler {
            listener: Some(listener),
            settle_delay,
        }
    }

    /// Stop listening for signals. Idempotent.
    pub fn deactivate(&mut self) {
        if let Some(listener) = self.listener.take() {
            listener.abort();
            log::debug!("stopped listening for {RSVP_UPDATED}");
        }
    }

    pub fn is_active(&self) -> bool {
        self.listener.is_some()
    }

    pub fn settle_delay(&self) -> Duration {
        self.settle_delay
    }
}

impl Drop for RefreshScheduler {
    fn drop(&mut self) {
        self.deactivate();
    }
}

/// Schedule exactly one re-fetch, `settle_delay` from now.
fn on_external_update_signal<F, Fut>(refetch: &Arc<F>, settle_delay: Duration)
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    log::debug!("{RSVP_UPDATED}: re-fetching in {settle_delay:?}");
    let refetch = Arc::clone(refetch);
    tokio::spawn(async move {
        tokio::time::sleep(settle_delay).await;
        refetch().await;
    });
}
