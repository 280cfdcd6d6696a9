//! Shared test helpers for integration tests.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use boarding_core::error::AppError;
use boarding_realtime::notification::scenario::{default_scenarios, TokenRanges};
use boarding_realtime::{listener, Listener, NotificationBus, NotificationEvent, ScenarioGenerator};

/// Default cadence used by the timer scenarios.
pub const INTERVAL: Duration = Duration::from_secs(8);

/// Listener that records every event it receives.
#[derive(Clone)]
pub struct Spy {
    /// The handle to subscribe and unsubscribe
    pub listener: Listener,
    /// Received events, in order
    received: Arc<Mutex<Vec<NotificationEvent>>>,
}

impl Spy {
    /// Create a recording listener
    pub fn new() -> Self {
        let received = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&received);
        let listener = listener(move |event: NotificationEvent| {
            sink.lock().expect("spy lock").push(event);
            Ok(())
        });
        Self { listener, received }
    }

    /// Number of events received
    pub fn count(&self) -> usize {
        self.received.lock().expect("spy lock").len()
    }

    /// Copy of received events
    pub fn events(&self) -> Vec<NotificationEvent> {
        self.received.lock().expect("spy lock").clone()
    }
}

/// Listener that always fails.
pub fn failing() -> Listener {
    listener(|_event: NotificationEvent| Err(AppError::listener("simulated failure")))
}

/// Bus with a seeded generator and the default cadence.
pub fn seeded_bus(seed: u64) -> NotificationBus {
    let generator = ScenarioGenerator::with_seed(default_scenarios(), TokenRanges::default(), seed)
        .expect("generator");
    NotificationBus::new(generator, INTERVAL).expect("bus")
}

/// Let spawned tasks run after a clock advance.
pub async fn settle() {
    for _ in 0..5 {
        tokio::task::yield_now().await;
    }
}
