use crate::guest::{GuestRecord, RsvpStatus};
use serde::{Deserialize, Serialize};

/// A pure function that folds one guest record into state.
///
/// Reducers receive owned state and return owned state. They should be pure
/// (no I/O, no side effects) so that folding the same guest list twice always
/// yields the same result.
///
/// # Examples
///
/// ```
/// use rsvpfold::{GuestRecord, ReduceFn};
///
/// fn with_messages(state: u64, guest: &GuestRecord) -> u64 {
///     state + u64::from(!guest.message.trim().is_empty())
/// }
///
/// let reducer: ReduceFn<u64> = with_messages;
/// ```
pub type ReduceFn<S> = fn(S, &GuestRecord) -> S;

/// Fold a guest list into a fresh `S::default()`.
///
/// State is always rebuilt from scratch; there is no incremental update
/// against a previous snapshot of the list.
pub fn fold<S: Default>(records: &[GuestRecord], reducer: ReduceFn<S>) -> S {
    records.iter().fold(S::default(), reducer)
}

/// Attendance counts derived from one guest-list snapshot.
///
/// `attending + not_attending + pending == total` always holds for values
/// produced by [`compute_stats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateStats {
    pub total: u64,
    pub attending: u64,
    pub not_attending: u64,
    pub pending: u64,
}

impl AggregateStats {
    /// Whether the three buckets add up to the total.
    pub fn is_partitioned(&self) -> bool {
        self.attending + self.not_attending + self.pending == self.total
    }
}

/// Count one guest into its RSVP bucket.
pub fn stats_reducer(mut state: AggregateStats, guest: &GuestRecord) -> AggregateStats {
    state.total += 1;
    match guest.status() {
        RsvpStatus::Attending => state.attending += 1,
        RsvpStatus::NotAttending => state.not_attending += 1,
        RsvpStatus::Pending => state.pending += 1,
    }
    state
}

/// Compute aggregate stats for a guest list.
///
/// # Examples
///
/// ```
/// use rsvpfold::{compute_stats, GuestRecord};
///
/// let guests = vec![
///     GuestRecord::new("A", Some("Yes")),
///     GuestRecord::new("B", Some("No")),
///     GuestRecord::new("C", Some("")),
///     GuestRecord::new("D", Some("Yes")),
/// ];
/// let stats = compute_stats(&guests);
/// assert_eq!((stats.total, stats.attending, stats.not_attending, stats.pending), (4, 2, 1, 1));
/// ```
pub fn compute_stats(records: &[GuestRecord]) -> AggregateStats {
    let stats = fold(records, stats_reducer);
    debug_assert!(stats.is_partitioned());
    stats
}
