//! Notification bus metrics.

pub mod deliveries;

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Bus-level metrics counters.
#[derive(Debug)]
pub struct BusMetrics {
    /// Total events produced by the synthetic generator
    pub events_generated: AtomicU64,
    /// Total events passed to `publish`
    pub events_published: AtomicU64,
    /// Total successful per-listener deliveries
    pub deliveries: AtomicU64,
    /// Total listener errors and panics
    pub listener_failures: AtomicU64,
    /// Total subscribe operations
    pub subscriptions_total: AtomicU64,
}

impl BusMetrics {
    /// Create new zeroed metrics
    pub fn new() -> Self {
        Self {
            events_generated: AtomicU64::new(0),
            events_published: AtomicU64::new(0),
            deliveries: AtomicU64::new(0),
            listener_failures: AtomicU64::new(0),
            subscriptions_total: AtomicU64::new(0),
        }
    }

    /// Get a snapshot of all metrics
    pub fn snapshot(&self) -> BusMetricsSnapshot {
        BusMetricsSnapshot {
            events_generated: self.events_generated.load(Ordering::Relaxed),
            events_published: self.events_published.load(Ordering::Relaxed),
            deliveries: self.deliveries.load(Ordering::Relaxed),
            listener_failures: self.listener_failures.load(Ordering::Relaxed),
            subscriptions_total: self.subscriptions_total.load(Ordering::Relaxed),
        }
    }
}

impl Default for BusMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializable metrics snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BusMetricsSnapshot {
    /// Total events produced by the synthetic generator
    pub events_generated: u64,
    /// Total events passed to `publish`
    pub events_published: u64,
    /// Total successful per-listener deliveries
    pub deliveries: u64,
    /// Total listener errors and panics
    pub listener_failures: u64,
    /// Total subscribe operations
    pub subscriptions_total: u64,
}
