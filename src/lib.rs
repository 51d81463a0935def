mod client;
pub mod config;
mod error;
mod guest;
mod scheduler;
mod signal;
mod sponsor;
mod state;
mod stats;
mod view;

pub use client::{GuestDataClient, GuestSource};
pub use config::{Config, DEFAULT_REQUEST_TIMEOUT, DEFAULT_SETTLE_DELAY};
pub use error::{ConfigError, FetchError};
pub use guest::{GuestRecord, RsvpStatus};
pub use scheduler::RefreshScheduler;
pub use signal::{RSVP_UPDATED, RsvpUpdated, RsvpUpdates};
pub use sponsor::{PrincipalSponsor, sponsor_pairs};
pub use state::{ApplyOutcome, FetchTicket, Notice, Phase, StatsHolder, StatsSnapshot};
pub use stats::{AggregateStats, ReduceFn, compute_stats, fold, stats_reducer};
pub use view::{GuestStatsView, Refresher};
