use crate::client::GuestSource;
use crate::config::{Config, DEFAULT_SETTLE_DELAY};
use crate::scheduler::RefreshScheduler;
use crate::signal::RsvpUpdates;
use crate::state::{ApplyOutcome, StatsHolder, StatsSnapshot};
use crate::stats::compute_stats;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Runs fetch cycles against one source and one holder.
///
/// Cheap to clone; clones can run cycles from any task.
#[derive(Clone)]
pub struct Refresher {
    source: Arc<dyn GuestSource>,
    holder: Arc<StatsHolder>,
}

impl Refresher {
    /// One fetch cycle: `Loading`, fetch, fold, land the result.
    ///
    /// Never fails. Fetch errors become `Failed` state. If the holder is
    /// already disposed no request is sent.
    pub async fn run(&self) -> ApplyOutcome {
        let Some(ticket) = self.holder.begin_fetch() else {
            log::debug!("skipping guest fetch: view was unmounted");
            return ApplyOutcome::Disposed;
        };

        let result = self
            .source
            .fetch_guests()
            .await
            .map(|guests| compute_stats(&guests));
        if let Err(e) = &result {
            log::error!("failed to load guests: {e}");
        }

        self.holder.apply(ticket, result)
    }
}

/// The guest attendance panel's data side: initial fetch on mount,
/// delayed re-fetch on every `rsvpUpdated`, teardown on unmount.
pub struct GuestStatsView {
    refresher: Refresher,
    settle_delay: Duration,
    scheduler: Option<RefreshScheduler>,
}

impl std::fmt::Debug for GuestStatsView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GuestStatsView")
            .field("holder", &self.refresher.holder)
            .field("settle_delay", &self.settle_delay)
            .field("scheduler", &self.scheduler)
            .finish()
    }
}

impl GuestStatsView {
    pub fn new(source: Arc<dyn GuestSource>) -> Self {
        GuestStatsView {
            refresher: Refresher {
                source,
                holder: Arc::new(StatsHolder::new()),
            },
            settle_delay: DEFAULT_SETTLE_DELAY,
            scheduler: None,
        }
    }

    /// A view whose settle delay comes from `config`, so environment
    /// overrides reach the scheduler.
    pub fn from_config(source: Arc<dyn GuestSource>, config: &Config) -> Self {
        Self::new(source).with_settle_delay(config.settle_delay)
    }

    pub fn settle_delay(&self) -> Duration {
        self.settle_delay
    }

    /// Override the wait between an `rsvpUpdated` signal and its re-fetch.
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// Start listening for `rsvpUpdated` and kick off the initial fetch.
    ///
    /// The returned handle resolves when the initial fetch has landed (or was
    /// dropped). Mounting twice replaces the earlier subscription. An
    /// unmounted view stays frozen; re-opening the panel means a new view.
    pub fn mount(&mut self, updates: &RsvpUpdates) -> JoinHandle<ApplyOutcome> {
        let refresher = self.refresher.clone();
        self.scheduler = Some(RefreshScheduler::activate(
            updates,
            self.settle_delay,
            move || {
                let refresher = refresher.clone();
                async move {
                    refresher.run().await;
                }
            },
        ));

        let refresher = self.refresher.clone();
        tokio::spawn(async move { refresher.run().await })
    }

    /// Stop listening and freeze the state. Pending re-fetches still fire but
    /// send no request and change nothing.
    pub fn unmount(&mut self) {
        if let Some(mut scheduler) = self.scheduler.take() {
            scheduler.deactivate();
        }
        self.refresher.holder.dispose();
    }

    /// Run one fetch cycle now.
    pub async fn refresh(&self) -> ApplyOutcome {
        self.refresher.run().await
    }

    pub fn refresher(&self) -> Refresher {
        self.refresher.clone()
    }

    pub fn is_mounted(&self) -> bool {
        self.scheduler.as_ref().is_some_and(RefreshScheduler::is_active)
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        self.refresher.holder.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<StatsSnapshot> {
        self.refresher.holder.subscribe()
    }
}

impl Drop for GuestStatsView {
    fn drop(&mut self) {
        self.unmount();
    }
}
