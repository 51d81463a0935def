#![allow(dead_code)]

use async_trait::async_trait;
use rsvpfold::{FetchError, GuestRecord, GuestSource};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

pub fn guest(name: &str, rsvp: Option<&str>) -> GuestRecord {
    GuestRecord::new(name, rsvp)
}

/// One guest per RSVP value, named `guest_0`, `guest_1`, ...
pub fn guests(rsvps: &[Option<&str>]) -> Vec<GuestRecord> {
    rsvps
        .iter()
        .enumerate()
        .map(|(i, rsvp)| guest(&format!("guest_{i}"), *rsvp))
        .collect()
}

/// Let spawned tasks run without moving the (possibly paused) clock.
pub async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}

struct Step {
    delay: Duration,
    outcome: Result<Vec<GuestRecord>, u16>,
}

/// In-memory guest source that plays back a script of responses, then keeps
/// answering with `fallback` immediately.
pub struct FakeSource {
    script: Mutex<VecDeque<Step>>,
    fallback: Vec<GuestRecord>,
    calls: Mutex<Vec<Instant>>,
}

impl FakeSource {
    pub fn new(fallback: Vec<GuestRecord>) -> Self {
        FakeSource {
            script: Mutex::new(VecDeque::new()),
            fallback,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn then_ok(self, delay: Duration, guests: Vec<GuestRecord>) -> Self {
        self.script.lock().unwrap().push_back(Step {
            delay,
            outcome: Ok(guests),
        });
        self
    }

    pub fn then_status(self, delay: Duration, status: u16) -> Self {
        self.script.lock().unwrap().push_back(Step {
            delay,
            outcome: Err(status),
        });
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn call_times(&self) -> Vec<Instant> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl GuestSource for FakeSource {
    async fn fetch_guests(&self) -> Result<Vec<GuestRecord>, FetchError> {
        self.calls.lock().unwrap().push(Instant::now());
        let step = self.script.lock().unwrap().pop_front();
        match step {
            Some(step) => {
                tokio::time::sleep(step.delay).await;
                step.outcome.map_err(|status| FetchError::Status {
                    resource: "guest list",
                    status,
                })
            }
            None => Ok(self.fallback.clone()),
        }
    }
}

/// Serve `app` on an ephemeral local port and return its base URL.
pub async fn serve(app: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move { axum::serve(listener, app).await.expect("serve app") });
    format!("http://{addr}")
}
