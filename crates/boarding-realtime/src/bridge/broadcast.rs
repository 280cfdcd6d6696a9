//! Forwards bus deliveries into a `tokio::sync::broadcast` channel.
//!
//! Async consumers (a WebSocket push loop, a log shipper) hold a
//! `Receiver` instead of registering a synchronous callback. A slow
//! receiver lags and skips old notifications; it never blocks the bus.

use tokio::sync::broadcast;

use boarding_core::types::id::SubscriptionId;

use crate::notification::bus::NotificationBus;
use crate::notification::event::NotificationEvent;
use crate::notification::listener::{listener, Listener};

/// Broadcast channel attached to a bus as a single listener.
#[derive(Debug)]
pub struct BroadcastBridge {
    /// Channel sender
    tx: broadcast::Sender<NotificationEvent>,
    /// Subscription on the bus
    subscription: SubscriptionId,
}

impl BroadcastBridge {
    /// Subscribe a forwarding listener to `bus`.
    pub fn attach(bus: &NotificationBus, buffer_size: usize) -> Self {
        let (tx, _) = broadcast::channel(buffer_size.max(1));
        let subscription = bus.subscribe(forwarder(tx.clone()));
        tracing::debug!(subscription = %subscription, buffer_size, "Broadcast bridge attached");
        Self { tx, subscription }
    }

    /// Receive every notification delivered after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<NotificationEvent> {
        self.tx.subscribe()
    }

    /// Number of live receivers.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Unsubscribe from `bus`. Existing receivers see the channel close once
    /// the bridge is dropped.
    pub fn detach(self, bus: &NotificationBus) -> bool {
        bus.unsubscribe_id(self.subscription)
    }
}

fn forwarder(tx: broadcast::Sender<NotificationEvent>) -> Listener {
    listener(move |event: NotificationEvent| {
        // No receivers is not a failure; the event is simply dropped.
        let _ = tx.send(event);
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::sync::broadcast::error::TryRecvError;

    use super::*;
    use crate::notification::generator::ScenarioGenerator;

    fn make_bus() -> NotificationBus {
        NotificationBus::new(ScenarioGenerator::default(), Duration::from_secs(1)).unwrap()
    }

    #[tokio::test]
    async fn test_receivers_get_published_events() {
        let bus = make_bus();
        let bridge = BroadcastBridge::attach(&bus, 16);
        let mut rx1 = bridge.subscribe();
        let mut rx2 = bridge.subscribe();
        assert_eq!(bridge.receiver_count(), 2);

        let sent = bus.tick();
        let got1 = rx1.recv().await.unwrap();
        let got2 = rx2.recv().await.unwrap();
        assert_eq!(got1.id, sent.id);
        assert_eq!(got2, got1);
    }

    #[tokio::test]
    async fn test_no_receivers_is_not_a_failure() {
        let bus = make_bus();
        let _bridge = BroadcastBridge::attach(&bus, 4);
        assert!(!bus.tick().title.is_empty());
        assert_eq!(bus.metrics().listener_failures, 0);
        assert_eq!(bus.metrics().deliveries, 1);
    }

    #[tokio::test]
    async fn test_detach_stops_forwarding() {
        let bus = make_bus();
        let bridge = BroadcastBridge::attach(&bus, 4);
        let mut rx = bridge.subscribe();
        assert_eq!(bus.subscriber_count(), 1);

        assert!(bridge.detach(&bus));
        assert_eq!(bus.subscriber_count(), 0);

        bus.tick();
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Closed)));
    }
}
