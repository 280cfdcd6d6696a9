//! Notification bus — in-process fan-out plus a timer-driven generator.
//!
//! Delivery takes a snapshot of the subscriber list at the start of each
//! pass, so listeners may subscribe, unsubscribe, or stop the generator
//! from inside a callback. Such changes apply from the next pass.
//!
//! Delivery passes are serialized: a listener never sees two passes at once,
//! even when the timer task and other threads publish concurrently. A
//! listener that publishes from its own callback re-enters on the same thread.

use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use parking_lot::ReentrantMutex;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing;

use boarding_core::config::notifications::MAX_INTERVAL_SECONDS;
use boarding_core::config::NotificationsConfig;
use boarding_core::error::{AppError, ErrorKind};
use boarding_core::types::id::SubscriptionId;

use crate::metrics::deliveries;
use crate::metrics::{BusMetrics, BusMetricsSnapshot};

use super::event::NotificationEvent;
use super::generator::ScenarioGenerator;
use super::listener::{same_listener, Listener};

/// Default time between generator ticks.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(8);

/// A registered listener.
#[derive(Clone)]
struct Subscription {
    /// Handle returned to the subscriber
    id: SubscriptionId,
    /// The callback
    listener: Listener,
}

/// State shared with the generator task.
struct BusShared {
    /// Ordered subscriber list
    subscribers: Mutex<Vec<Subscription>>,
    /// Held for a whole delivery pass
    delivery: ReentrantMutex<()>,
    /// Synthetic event source
    generator: ScenarioGenerator,
    /// Counters
    metrics: BusMetrics,
}

/// The running generator task.
struct GeneratorTask {
    /// Cancels the tick loop
    cancel: CancellationToken,
    /// Task handle, used to detect a loop that has exited
    handle: JoinHandle<()>,
}

/// Publish/subscribe registry with a synthetic event generator.
///
/// Construct one per application and share it as `Arc<NotificationBus>`.
/// Dropping the bus stops its generator.
pub struct NotificationBus {
    /// Subscribers, generator, and metrics
    shared: Arc<BusShared>,
    /// Active generator task, if any
    task: Mutex<Option<GeneratorTask>>,
    /// Time between ticks
    interval: Duration,
}

impl std::fmt::Debug for NotificationBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationBus")
            .field("interval", &self.interval)
            .field("subscribers", &self.subscriber_count())
            .field("generating", &self.is_generating())
            .finish()
    }
}

impl NotificationBus {
    /// Create a bus around the given generator.
    pub fn new(generator: ScenarioGenerator, interval: Duration) -> Result<Self, AppError> {
        if interval.is_zero() {
            return Err(AppError::validation("Generator interval must be non-zero"));
        }
        if interval > Duration::from_secs(MAX_INTERVAL_SECONDS) {
            return Err(AppError::validation(format!(
                "Generator interval {interval:?} exceeds {MAX_INTERVAL_SECONDS}s"
            )));
        }
        Ok(Self {
            shared: Arc::new(BusShared {
                subscribers: Mutex::new(Vec::new()),
                delivery: ReentrantMutex::new(()),
                generator,
                metrics: BusMetrics::new(),
            }),
            task: Mutex::new(None),
            interval,
        })
    }

    /// Create a bus from the notifications config section.
    pub fn from_config(config: &NotificationsConfig) -> Result<Self, AppError> {
        Self::new(
            ScenarioGenerator::from_config(config)?,
            Duration::from_secs(config.interval_seconds),
        )
    }

    /// Register a listener. Keep the `Listener` handle to unsubscribe later.
    pub fn subscribe(&self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId::new();
        let mut subs = self.shared.lock_subscribers();
        subs.push(Subscription { id, listener });
        deliveries::record_subscribed(&self.shared.metrics);
        tracing::trace!(subscription = %id, total = subs.len(), "Listener subscribed");
        id
    }

    /// Remove a listener by handle identity.
    ///
    /// Returns `false` if it was not subscribed.
    pub fn unsubscribe(&self, listener: &Listener) -> bool {
        self.shared
            .remove_where(|sub| same_listener(&sub.listener, listener))
    }

    /// Remove a listener by the id returned from [`subscribe`](Self::subscribe).
    pub fn unsubscribe_id(&self, id: SubscriptionId) -> bool {
        self.shared.remove_where(|sub| sub.id == id)
    }

    /// Number of registered listeners.
    pub fn subscriber_count(&self) -> usize {
        self.shared.lock_subscribers().len()
    }

    /// Deliver an event to every current subscriber.
    ///
    /// This is the entry point for event sources other than the built-in
    /// generator. Returns the number of listeners that accepted the event.
    pub fn publish(&self, event: NotificationEvent) -> usize {
        self.shared.publish(event)
    }

    /// Run one generator tick synchronously and return the emitted event.
    pub fn tick(&self) -> NotificationEvent {
        self.shared.tick()
    }

    /// Start periodic generation on the current Tokio runtime.
    ///
    /// The first tick fires one interval after this call. Returns
    /// `Ok(false)` if the generator is already running.
    pub fn start_generating(&self) -> Result<bool, AppError> {
        let mut task = self.lock_task();
        if task.as_ref().is_some_and(|t| !t.handle.is_finished()) {
            tracing::debug!("Notification generator already running");
            return Ok(false);
        }

        let runtime = tokio::runtime::Handle::try_current().map_err(|e| {
            AppError::with_source(
                ErrorKind::ServiceUnavailable,
                "Notification generator requires a Tokio runtime",
                e,
            )
        })?;

        let cancel = CancellationToken::new();
        let first_tick = time::Instant::now()
            .checked_add(self.interval)
            .ok_or_else(|| AppError::validation("Generator interval overflows the clock"))?;
        let handle = runtime.spawn(run_generator(
            Arc::clone(&self.shared),
            first_tick,
            self.interval,
            cancel.clone(),
        ));
        *task = Some(GeneratorTask { cancel, handle });

        tracing::info!("Notification generator started (interval: {:?})", self.interval);
        Ok(true)
    }

    /// Stop periodic generation.
    ///
    /// Safe to call from inside a listener. Returns `false` if the generator
    /// was not running.
    pub fn stop_generating(&self) -> bool {
        let Some(task) = self.lock_task().take() else {
            return false;
        };
        task.cancel.cancel();
        let was_running = !task.handle.is_finished();
        if was_running {
            tracing::info!("Notification generator stopped");
        }
        was_running
    }

    /// Whether the generator task is active.
    pub fn is_generating(&self) -> bool {
        self.lock_task()
            .as_ref()
            .is_some_and(|t| !t.cancel.is_cancelled() && !t.handle.is_finished())
    }

    /// Configured time between ticks.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Snapshot of the bus counters.
    pub fn metrics(&self) -> BusMetricsSnapshot {
        self.shared.metrics.snapshot()
    }

    fn lock_task(&self) -> std::sync::MutexGuard<'_, Option<GeneratorTask>> {
        self.task.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Drop for NotificationBus {
    fn drop(&mut self) {
        self.stop_generating();
    }
}

impl BusShared {
    fn lock_subscribers(&self) -> std::sync::MutexGuard<'_, Vec<Subscription>> {
        self.subscribers.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn remove_where(&self, matches: impl Fn(&Subscription) -> bool) -> bool {
        let mut subs = self.lock_subscribers();
        let Some(pos) = subs.iter().position(matches) else {
            return false;
        };
        let removed = subs.remove(pos);
        tracing::trace!(subscription = %removed.id, total = subs.len(), "Listener unsubscribed");
        true
    }

    fn tick(&self) -> NotificationEvent {
        let event = self.generator.next_event();
        deliveries::record_generated(&self.metrics);
        tracing::debug!(
            id = %event.id,
            category = %event.category(),
            title = %event.title,
            "Generated notification"
        );
        self.publish(event.clone());
        event
    }

    fn publish(&self, event: NotificationEvent) -> usize {
        let _pass = self.delivery.lock();
        let snapshot: Vec<Subscription> = self.lock_subscribers().clone();
        deliveries::record_published(&self.metrics);

        let mut delivered = 0;
        for sub in &snapshot {
            let copy = event.clone();
            match panic::catch_unwind(AssertUnwindSafe(|| sub.listener.on_notification(copy))) {
                Ok(Ok(())) => {
                    delivered += 1;
                    deliveries::record_delivered(&self.metrics);
                }
                Ok(Err(e)) => {
                    deliveries::record_failure(&self.metrics);
                    tracing::warn!(
                        subscription = %sub.id,
                        notification = %event.id,
                        "Listener failed: {}",
                        e
                    );
                }
                Err(payload) => {
                    deliveries::record_failure(&self.metrics);
                    tracing::warn!(
                        subscription = %sub.id,
                        notification = %event.id,
                        "Listener panicked: {}",
                        panic_message(payload.as_ref())
                    );
                }
            }
        }
        delivered
    }
}

/// Tick loop. Exits when `cancel` fires; a tick already in progress completes.
async fn run_generator(
    shared: Arc<BusShared>,
    first_tick: time::Instant,
    period: Duration,
    cancel: CancellationToken,
) {
    let mut interval = time::interval_at(first_tick, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = interval.tick() => {
                shared.tick();
            }
        }
    }

    tracing::debug!("Notification generator loop ended");
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "non-string panic payload"
    }
}
