//! Delivery metrics helpers.

use std::sync::atomic::Ordering;

use super::BusMetrics;

/// Record an event produced by the generator
pub fn record_generated(metrics: &BusMetrics) {
    metrics.events_generated.fetch_add(1, Ordering::Relaxed);
}

/// Record an event entering a delivery pass
pub fn record_published(metrics: &BusMetrics) {
    metrics.events_published.fetch_add(1, Ordering::Relaxed);
}

/// Record a successful delivery to one listener
pub fn record_delivered(metrics: &BusMetrics) {
    metrics.deliveries.fetch_add(1, Ordering::Relaxed);
}

/// Record a listener that returned an error or panicked
pub fn record_failure(metrics: &BusMetrics) {
    metrics.listener_failures.fetch_add(1, Ordering::Relaxed);
}

/// Record a subscribe operation
pub fn record_subscribed(metrics: &BusMetrics) {
    metrics.subscriptions_total.fetch_add(1, Ordering::Relaxed);
}
