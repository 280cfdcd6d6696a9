//! Notification bus and demo generator configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Longest accepted generator interval, one day.
pub const MAX_INTERVAL_SECONDS: u64 = 86_400;

/// Settings for the notification bus, its synthetic generator, and the
/// in-memory inbox.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    /// Start the synthetic generator when the console boots.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Seconds between generator ticks.
    #[serde(default = "default_interval")]
    pub interval_seconds: u64,
    /// Lowest room number embedded in generated messages.
    #[serde(default = "default_room_min")]
    pub room_numbers_min: u32,
    /// Highest room number embedded in generated messages.
    #[serde(default = "default_room_max")]
    pub room_numbers_max: u32,
    /// Smallest peso amount embedded in generated payment messages.
    #[serde(default = "default_amount_min")]
    pub amount_min: u32,
    /// Largest peso amount embedded in generated payment messages.
    #[serde(default = "default_amount_max")]
    pub amount_max: u32,
    /// Maximum notifications kept by the inbox before the oldest is evicted.
    #[serde(default = "default_inbox_max")]
    pub inbox_max_stored: usize,
    /// Buffer size of the broadcast bridge channel.
    #[serde(default = "default_bridge_buffer")]
    pub bridge_buffer_size: usize,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_seconds: default_interval(),
            room_numbers_min: default_room_min(),
            room_numbers_max: default_room_max(),
            amount_min: default_amount_min(),
            amount_max: default_amount_max(),
            inbox_max_stored: default_inbox_max(),
            bridge_buffer_size: default_bridge_buffer(),
        }
    }
}

impl NotificationsConfig {
    /// Reject settings the generator or inbox cannot work with.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.interval_seconds == 0 {
            return Err(AppError::configuration(
                "notifications.interval_seconds must be greater than zero",
            ));
        }
        if self.interval_seconds > MAX_INTERVAL_SECONDS {
            return Err(AppError::configuration(format!(
                "notifications.interval_seconds ({}) exceeds {MAX_INTERVAL_SECONDS}",
                self.interval_seconds
            )));
        }
        if self.room_numbers_min > self.room_numbers_max {
            return Err(AppError::configuration(format!(
                "notifications.room_numbers_min ({}) exceeds room_numbers_max ({})",
                self.room_numbers_min, self.room_numbers_max
            )));
        }
        if self.amount_min > self.amount_max {
            return Err(AppError::configuration(format!(
                "notifications.amount_min ({}) exceeds amount_max ({})",
                self.amount_min, self.amount_max
            )));
        }
        if self.inbox_max_stored == 0 {
            return Err(AppError::configuration(
                "notifications.inbox_max_stored must be greater than zero",
            ));
        }
        if self.bridge_buffer_size == 0 {
            return Err(AppError::configuration(
                "notifications.bridge_buffer_size must be greater than zero",
            ));
        }
        Ok(())
    }
}

fn default_true() -> bool {
    true
}

fn default_interval() -> u64 {
    8
}

fn default_room_min() -> u32 {
    1
}

fn default_room_max() -> u32 {
    20
}

fn default_amount_min() -> u32 {
    1_500
}

fn default_amount_max() -> u32 {
    8_000
}

fn default_inbox_max() -> usize {
    100
}

fn default_bridge_buffer() -> usize {
    64
}
