//! Bridges between the notification bus and async consumers.

pub mod broadcast;

pub use broadcast::BroadcastBridge;
