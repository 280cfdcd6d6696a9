//! Notification model, scenario table, generator, bus, and inbox.

pub mod bus;
pub mod event;
pub mod generator;
pub mod inbox;
pub mod listener;
pub mod scenario;

pub use bus::NotificationBus;
