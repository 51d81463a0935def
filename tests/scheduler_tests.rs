mod common;

use common::settle;
use rsvpfold::{DEFAULT_SETTLE_DELAY, RefreshScheduler, RsvpUpdates};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

fn counting_scheduler(updates: &RsvpUpdates, delay: Duration) -> (RefreshScheduler, Arc<AtomicUsize>) {
    let fired = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&fired);
    let scheduler = RefreshScheduler::activate(updates, delay, move || {
        let counter = Arc::clone(&counter);
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    });
    (scheduler, fired)
}

#[tokio::test(start_paused = true)]
async fn test_refetch_waits_for_settle_delay() {
    let updates = RsvpUpdates::new();
    let (_scheduler, fired) = counting_scheduler(&updates, DEFAULT_SETTLE_DELAY);

    updates.publish();
    settle().await;

    tokio::time::advance(Duration::from_millis(1999)).await;
    settle().await;
    assert_eq!(fired.load(Ordering::SeqCst), 0, "fired before the settle delay");

    tokio::time::advance(Duration::from_millis(1)).await;
    settle().await;
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_signals_are_not_coalesced() {
    let updates = RsvpUpdates::new();
    let (_scheduler, fired) = counting_scheduler(&updates, Duration::from_millis(2000));

    updates.publish();
    settle().await;
    tokio::time::advance(Duration::from_millis(500)).await;
    updates.publish();
    settle().await;

    tokio::time::advance(Duration::from_millis(1500)).await;
    settle().await;
    assert_eq!(fired.load(Ordering::SeqCst), 1);

    tokio::time::advance(Duration::from_millis(500)).await;
    settle().await;
    assert_eq!(fired.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn test_subscribes_on_activation() {
    let updates = RsvpUpdates::new();
    assert_eq!(updates.subscriber_count(), 0);

    let (scheduler, _fired) = counting_scheduler(&updates, DEFAULT_SETTLE_DELAY);
    assert!(scheduler.is_active());
    assert_eq!(updates.subscriber_count(), 1);
    assert_eq!(updates.publish(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_deactivate_stops_listening() {
    let updates = RsvpUpdates::new();
    let (mut scheduler, fired) = counting_scheduler(&updates, Duration::from_millis(100));

    scheduler.deactivate();
    assert!(!scheduler.is_active());
    settle().await;
    assert_eq!(updates.subscriber_count(), 0);

    updates.publish();
    tokio::time::advance(Duration::from_millis(1000)).await;
    settle().await;
    assert_eq!(fired.load(Ordering::SeqCst), 0);

    // Idempotent.
    scheduler.deactivate();
}

#[tokio::test(start_paused = true)]
async fn test_pending_timer_survives_deactivation() {
    let updates = RsvpUpdates::new();
    let (mut scheduler, fired) = counting_scheduler(&updates, Duration::from_millis(100));

    updates.publish();
    settle().await;
    scheduler.deactivate();

    tokio::time::advance(Duration::from_millis(100)).await;
    settle().await;
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_drop_deactivates() {
    let updates = RsvpUpdates::new();
    let (scheduler, _fired) = counting_scheduler(&updates, DEFAULT_SETTLE_DELAY);
    drop(scheduler);
    settle().await;
    assert_eq!(updates.subscriber_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_lagged_signals_each_schedule_refetch() {
    let updates = RsvpUpdates::new();
    let (_scheduler, fired) = counting_scheduler(&updates, Duration::from_millis(100));

    // More signals than the channel buffers, with no yield in between, so
    // the listener wakes up lagged.
    let published = 70;
    for _ in 0..published {
        updates.publish();
    }
    settle().await;

    tokio::time::advance(Duration::from_millis(100)).await;
    settle().await;
    assert_eq!(fired.load(Ordering::SeqCst), published);
}
