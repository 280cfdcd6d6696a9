//! Fan-out, lifecycle, and generator properties of the notification bus.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tokio::time;

use boarding_realtime::NotificationCategory;

use crate::helpers::{failing, seeded_bus, settle, Spy, INTERVAL};

#[test]
fn test_fan_out_reaches_every_listener_once() {
    for n in [0usize, 1, 2, 7] {
        let bus = seeded_bus(1);
        let spies: Vec<Spy> = (0..n).map(|_| Spy::new()).collect();
        for spy in &spies {
            bus.subscribe(Arc::clone(&spy.listener));
        }
        let gone = Spy::new();
        bus.subscribe(Arc::clone(&gone.listener));
        bus.unsubscribe(&gone.listener);

        bus.tick();

        for spy in &spies {
            assert_eq!(spy.count(), 1, "n = {n}");
        }
        assert_eq!(gone.count(), 0);
    }
}

#[test]
fn test_multi_subscriber_share_one_event() {
    let bus = seeded_bus(2);
    let spies = [Spy::new(), Spy::new(), Spy::new()];
    for spy in &spies {
        bus.subscribe(Arc::clone(&spy.listener));
    }

    let emitted = bus.tick();

    for spy in &spies {
        let got = spy.events();
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].id, emitted.id);
        assert_eq!(got[0].category(), emitted.category());
        assert_eq!(got[0].title, emitted.title);
    }
}

#[test]
fn test_listener_failure_does_not_block_later_listeners() {
    let bus = seeded_bus(3);
    bus.subscribe(failing());
    let after = Spy::new();
    bus.subscribe(Arc::clone(&after.listener));

    bus.tick();

    assert_eq!(after.count(), 1);
    assert_eq!(bus.subscriber_count(), 2);
    assert_eq!(bus.metrics().listener_failures, 1);
}

#[tokio::test(start_paused = true)]
async fn test_listener_failure_keeps_generator_running() {
    let bus = seeded_bus(4);
    bus.subscribe(failing());
    let after = Spy::new();
    bus.subscribe(Arc::clone(&after.listener));
    bus.start_generating().expect("start");

    time::advance(INTERVAL).await;
    settle().await;

    assert_eq!(after.count(), 1);
    assert!(bus.is_generating());
    bus.stop_generating();
}

#[test]
fn test_ids_unique_across_ten_thousand_ticks() {
    let bus = seeded_bus(5);
    let spy = Spy::new();
    bus.subscribe(Arc::clone(&spy.listener));

    for _ in 0..10_000 {
        bus.tick();
    }

    let events = spy.events();
    assert_eq!(events.len(), 10_000);
    let ids: HashSet<_> = events.iter().map(|e| e.id).collect();
    assert_eq!(ids.len(), 10_000);
}

#[test]
fn test_categories_closed_across_ten_thousand_ticks() {
    let bus = seeded_bus(6);
    let mut seen = HashSet::new();

    for _ in 0..10_000 {
        let event = bus.tick();
        assert!(NotificationCategory::ALL.contains(&event.category()));
        assert!(event.is_unread());
        seen.insert(event.category());
    }

    assert_eq!(seen.len(), NotificationCategory::ALL.len());
}

#[test]
fn test_unsubscribe_takes_effect() {
    let bus = seeded_bus(7);
    let spy = Spy::new();
    bus.subscribe(Arc::clone(&spy.listener));

    bus.tick();
    assert_eq!(spy.count(), 1);

    assert!(bus.unsubscribe(&spy.listener));
    for _ in 0..10 {
        bus.tick();
    }
    assert_eq!(spy.count(), 1);
}

#[test]
fn test_late_subscriber_gets_no_replay() {
    let bus = seeded_bus(8);
    let first = bus.tick();

    let spy = Spy::new();
    bus.subscribe(Arc::clone(&spy.listener));
    let second = bus.tick();

    let got = spy.events();
    assert_eq!(got.len(), 1);
    assert_eq!(got[0].id, second.id);
    assert_ne!(got[0].id, first.id);
}

#[test]
fn test_listener_mutation_does_not_leak() {
    let bus = seeded_bus(9);
    let mutator = boarding_realtime::listener(|mut event: boarding_realtime::NotificationEvent| {
        event.title.push_str(" (seen)");
        event.read_state = boarding_realtime::ReadState::Read;
        Ok(())
    });
    bus.subscribe(mutator);
    let spy = Spy::new();
    bus.subscribe(Arc::clone(&spy.listener));

    let emitted = bus.tick();

    let got = &spy.events()[0];
    assert_eq!(got.title, emitted.title);
    assert!(got.is_unread());
}

#[tokio::test(start_paused = true)]
async fn test_start_stop_cycle() {
    let bus = seeded_bus(10);
    let spy = Spy::new();
    bus.subscribe(Arc::clone(&spy.listener));

    bus.start_generating().expect("start");
    time::advance(INTERVAL).await;
    settle().await;
    assert_eq!(spy.count(), 1);

    bus.stop_generating();
    time::advance(INTERVAL).await;
    settle().await;
    assert_eq!(spy.count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_double_start_does_not_double_rate() {
    let bus = seeded_bus(11);
    let spy = Spy::new();
    bus.subscribe(Arc::clone(&spy.listener));

    assert!(bus.start_generating().expect("start"));
    assert!(!bus.start_generating().expect("second start"));

    for expected in 1..=4 {
        time::advance(INTERVAL).await;
        settle().await;
        assert_eq!(spy.count(), expected);
    }

    bus.stop_generating();
}

#[tokio::test(start_paused = true)]
async fn test_stop_when_never_started() {
    let bus = seeded_bus(12);
    let spy = Spy::new();
    bus.subscribe(Arc::clone(&spy.listener));

    assert!(!bus.stop_generating());
    assert!(!bus.stop_generating());
    assert!(!bus.is_generating());

    time::advance(Duration::from_secs(60)).await;
    settle().await;
    assert_eq!(spy.count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_configurable_interval() {
    let generator = boarding_realtime::ScenarioGenerator::default();
    let bus = boarding_realtime::NotificationBus::new(generator, Duration::from_millis(250))
        .expect("bus");
    let spy = Spy::new();
    bus.subscribe(Arc::clone(&spy.listener));
    bus.start_generating().expect("start");

    for expected in 1..=4 {
        time::advance(Duration::from_millis(250)).await;
        settle().await;
        assert_eq!(spy.count(), expected);
    }
    bus.stop_generating();
}
