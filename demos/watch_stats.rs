//! Watch the guest attendance panel's data against a live `/api/guests`.
//!
//! Reads `RSVPFOLD_BASE_URL` (and friends) from the environment, mounts a
//! stats view, and prints every state change. Each line typed on stdin
//! publishes `rsvpUpdated`, as the RSVP form does after a submission.
//! Ctrl-C unmounts and exits.
//!
//! ```text
//! RUST_LOG=rsvpfold=debug RSVPFOLD_BASE_URL=http://localhost:3000 \
//!     cargo run --example watch_stats
//! ```

use rsvpfold::{Config, GuestDataClient, GuestStatsView, Notice, RsvpUpdates};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = Config::from_env()?;
    let client = GuestDataClient::new(&config)?;
    let updates = RsvpUpdates::new();

    let mut view = GuestStatsView::from_config(Arc::new(client), &config);
    let mut changes = view.subscribe();
    let _initial_fetch = view.mount(&updates);

    // Stand-in for the RSVP form: every line on stdin is a submission.
    let publisher = updates.clone();
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(_)) = lines.next_line().await {
            publisher.publish();
            println!("[form] rsvpUpdated");
        }
    });

    loop {
        tokio::select! {
            changed = changes.changed() => {
                if changed.is_err() {
                    break;
                }
                let snap = changes.borrow_and_update().clone();
                let s = snap.stats;
                match snap.notice() {
                    Some(Notice::Loading) => println!("Loading guests..."),
                    Some(Notice::Error(message)) => println!("error: {message}"),
                    Some(Notice::NoGuests) => println!("No guests have RSVP'd yet"),
                    None => println!(
                        "total {}  attending {}  not attending {}  pending {}",
                        s.total, s.attending, s.not_attending, s.pending
                    ),
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    view.unmount();
    Ok(())
}
