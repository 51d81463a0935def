use tokio::sync::broadcast;

/// Name of the signal the RSVP form raises after a successful submission.
pub const RSVP_UPDATED: &str = "rsvpUpdated";

const CHANNEL_CAPACITY: usize = 64;

/// Payload of an `rsvpUpdated` broadcast. The signal carries no data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RsvpUpdated;

/// Publish/subscribe handle for the `rsvpUpdated` signal.
///
/// The submission flow holds a clone and calls [`publish`](Self::publish);
/// views subscribe while mounted. Clones share one channel.
#[derive(Debug, Clone)]
pub struct RsvpUpdates {
    tx: broadcast::Sender<RsvpUpdated>,
}

impl Default for RsvpUpdates {
    fn default() -> Self {
        Self::new()
    }
}

impl RsvpUpdates {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        RsvpUpdates { tx }
    }

    /// Broadcast the signal. Returns how many subscribers were notified;
    /// publishing with nobody listening is not an error.
    pub fn publish(&self) -> usize {
        let delivered = self.tx.send(RsvpUpdated).unwrap_or(0);
        log::debug!("{RSVP_UPDATED} published to {delivered} subscriber(s)");
        delivered
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RsvpUpdated> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}
