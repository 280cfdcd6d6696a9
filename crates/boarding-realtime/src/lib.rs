//! # boarding-realtime
//!
//! Real-time notification plumbing for the Boardinghouse Console. Provides:
//!
//! - A typed notification model keyed on category (booking, payment, room, system)
//! - An in-process publish/subscribe bus with per-listener failure isolation
//! - A timer-driven synthetic generator for demo and offline operation
//! - An inbox that owns the displayed list, read state, and deletion
//! - A bridge into `tokio::sync::broadcast` for async consumers

pub mod bridge;
pub mod metrics;
pub mod notification;

pub use bridge::BroadcastBridge;
pub use notification::bus::NotificationBus;
pub use notification::event::{
    NotificationCategory, NotificationDetail, NotificationEvent, ReadState,
};
pub use notification::generator::ScenarioGenerator;
pub use notification::inbox::NotificationInbox;
pub use notification::listener::{listener, Listener, NotificationListener};
