//! Inbox and broadcast bridge wired to a live bus.

use std::sync::Arc;

use tokio::time;

use boarding_core::config::AppConfig;
use boarding_realtime::{
    BroadcastBridge, NotificationBus, NotificationCategory, NotificationInbox, ReadState,
};

use crate::helpers::{seeded_bus, settle, Spy, INTERVAL};

#[test]
fn test_inbox_read_state_is_private_to_inbox() {
    let bus = seeded_bus(20);
    let inbox = Arc::new(NotificationInbox::new(50));
    bus.subscribe(inbox.as_listener());
    let spy = Spy::new();
    bus.subscribe(Arc::clone(&spy.listener));

    let emitted = bus.tick();
    inbox.mark_read(emitted.id).expect("mark read");
    inbox.remove(emitted.id).expect("remove");

    let got = spy.events();
    assert_eq!(got[0].read_state, ReadState::Unread);
    assert!(inbox.is_empty());
}

#[test]
fn test_inbox_filters_generated_events() {
    let bus = seeded_bus(21);
    let inbox = Arc::new(NotificationInbox::new(1_000));
    bus.subscribe(inbox.as_listener());

    for _ in 0..400 {
        bus.tick();
    }

    let total: usize = NotificationCategory::ALL
        .iter()
        .map(|c| {
            let entries = inbox.list(Some(*c));
            assert!(entries.iter().all(|e| e.category() == *c));
            entries.len()
        })
        .sum();
    assert_eq!(total, 400);
    assert_eq!(inbox.unread_count(), 400);
    assert_eq!(inbox.mark_all_read(), 400);
}

#[tokio::test(start_paused = true)]
async fn test_bridge_and_inbox_from_config() {
    let config = AppConfig::from_toml(
        r#"
        [notifications]
        interval_seconds = 8
        inbox_max_stored = 2
        bridge_buffer_size = 8
        "#,
    )
    .expect("config");
    let notifications = &config.notifications;

    let bus = NotificationBus::from_config(notifications).expect("bus");
    let inbox = Arc::new(NotificationInbox::new(notifications.inbox_max_stored));
    bus.subscribe(inbox.as_listener());
    let bridge = BroadcastBridge::attach(&bus, notifications.bridge_buffer_size);
    let mut rx = bridge.subscribe();

    bus.start_generating().expect("start");
    for _ in 0..3 {
        time::advance(INTERVAL).await;
        settle().await;
    }
    bus.stop_generating();

    assert_eq!(inbox.len(), 2);
    let newest = inbox.list(None)[0].clone();

    let mut forwarded = Vec::new();
    while let Ok(event) = rx.try_recv() {
        forwarded.push(event);
    }
    assert_eq!(forwarded.len(), 3);
    assert_eq!(forwarded[2].id, newest.id);
}
