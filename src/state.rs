use crate::error::FetchError;
use crate::stats::AggregateStats;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;

/// Where the stats panel is in its fetch cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed,
}

/// Everything presentation needs to draw the stats panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub phase: Phase,
    pub error: Option<String>,
    pub stats: AggregateStats,
}

/// Message shown in place of, or below, the stats grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Loading,
    Error(String),
    NoGuests,
}

impl StatsSnapshot {
    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    /// Loading wins over an error, and an error wins over an empty list.
    pub fn notice(&self) -> Option<Notice> {
        if self.is_loading() {
            Some(Notice::Loading)
        } else if let Some(message) = &self.error {
            Some(Notice::Error(message.clone()))
        } else if self.stats.total == 0 {
            Some(Notice::NoGuests)
        } else {
            None
        }
    }
}

/// Proof that a fetch was started; only the newest ticket may land.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
}

impl FetchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What [`StatsHolder::apply`] did with a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    /// A newer fetch was started after this one; the result was dropped.
    Stale,
    /// The holder was disposed; the result was dropped.
    Disposed,
}

struct Inner {
    snapshot: StatsSnapshot,
    generation: u64,
    disposed: bool,
}

/// Sole owner of the panel's loading flag, error and stats.
///
/// Results are applied only if they belong to the most recently started fetch,
/// so a slow older request can never overwrite a newer one. After
/// [`dispose`](Self::dispose) the holder is frozen.
pub struct StatsHolder {
    inner: Mutex<Inner>,
    tx: watch::Sender<StatsSnapshot>,
}

impl Default for StatsHolder {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StatsHolder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.lock();
        f.debug_struct("StatsHolder")
            .field("snapshot", &inner.snapshot)
            .field("generation", &inner.generation)
            .field("disposed", &inner.disposed)
            .finish()
    }
}

impl StatsHolder {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(StatsSnapshot::default());
        StatsHolder {
            inner: Mutex::new(Inner {
                snapshot: StatsSnapshot::default(),
                generation: 0,
                disposed: false,
            }),
            tx,
        }
    }

    /// Enter `Loading` and hand out a ticket for the new fetch.
    ///
    /// Returns `None` once disposed; callers should then skip the request.
    pub fn begin_fetch(&self) -> Option<FetchTicket> {
        let mut inner = self.lock();
        if inner.disposed {
            return None;
        }
        inner.generation += 1;
        inner.snapshot.phase = Phase::Loading;
        inner.snapshot.error = None;
        self.tx.send_replace(inner.snapshot.clone());
        Some(FetchTicket {
            generation: inner.generation,
        })
    }

    /// Land the result of the fetch identified by `ticket`.
    ///
    /// Success replaces the stats and enters `Ready`. Failure enters `Failed`
    /// with the error text and keeps the last known stats.
    pub fn apply(
        &self,
        ticket: FetchTicket,
        result: Result<AggregateStats, FetchError>,
    ) -> ApplyOutcome {
        let mut inner = self.lock();
        if inner.disposed {
            log::warn!(
                "dropping result of fetch #{}: view was unmounted",
                ticket.generation
            );
            return ApplyOutcome::Disposed;
        }
        if ticket.generation != inner.generation {
            log::warn!(
                "dropping result of fetch #{}: fetch #{} started later",
                ticket.generation,
                inner.generation
            );
            return ApplyOutcome::Stale;
        }

        match result {
            Ok(stats) => {
                inner.snapshot.phase = Phase::Ready;
                inner.snapshot.error = None;
                inner.snapshot.stats = stats;
            }
            Err(e) => {
                inner.snapshot.phase = Phase::Failed;
                inner.snapshot.error = Some(e.to_string());
            }
        }
        self.tx.send_replace(inner.snapshot.clone());
        ApplyOutcome::Applied
    }

    /// Freeze the holder. Later tickets are refused and late results dropped.
    pub fn dispose(&self) {
        self.lock().disposed = true;
    }

    pub fn is_disposed(&self) -> bool {
        self.lock().disposed
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        self.lock().snapshot.clone()
    }

    /// Observe every state change from now on.
    pub fn subscribe(&self) -> watch::Receiver<StatsSnapshot> {
        self.tx.subscribe()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
