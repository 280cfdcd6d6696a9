//! Notification event model.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use boarding_core::error::AppError;
use boarding_core::types::id::NotificationId;

/// Category of a notification for filtering on the notifications page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationCategory {
    /// Booking requests and cancellations.
    Booking,
    /// Rent payments received or overdue.
    Payment,
    /// Room availability and maintenance.
    Room,
    /// Console housekeeping (backups, updates).
    System,
}

impl NotificationCategory {
    /// Every category, in display order.
    pub const ALL: [Self; 4] = [Self::Booking, Self::Payment, Self::Room, Self::System];

    /// Return the category as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Booking => "booking",
            Self::Payment => "payment",
            Self::Room => "room",
            Self::System => "system",
        }
    }
}

impl fmt::Display for NotificationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NotificationCategory {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "booking" => Ok(Self::Booking),
            "payment" => Ok(Self::Payment),
            "room" => Ok(Self::Room),
            "system" => Ok(Self::System),
            other => Err(AppError::validation(format!(
                "Unknown notification category '{other}'"
            ))),
        }
    }
}

/// Whether the reader has seen a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadState {
    /// Not yet seen.
    #[default]
    Unread,
    /// Seen.
    Read,
}

/// Category-specific fields of a notification.
///
/// The variant determines [`NotificationEvent::category`], so a category
/// outside the closed set cannot be constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "lowercase")]
pub enum NotificationDetail {
    /// A booking event for a tenant and room.
    Booking {
        /// Tenant name.
        tenant: String,
        /// Room number.
        room: u32,
    },
    /// A payment event for a tenant.
    Payment {
        /// Tenant name.
        tenant: String,
        /// Amount in whole pesos.
        amount: u32,
    },
    /// A room status event.
    Room {
        /// Room number.
        room: u32,
    },
    /// A system event.
    System {
        /// Subsystem that produced the event.
        component: String,
    },
}

impl NotificationDetail {
    /// Category implied by this variant.
    pub fn category(&self) -> NotificationCategory {
        match self {
            Self::Booking { .. } => NotificationCategory::Booking,
            Self::Payment { .. } => NotificationCategory::Payment,
            Self::Room { .. } => NotificationCategory::Room,
            Self::System { .. } => NotificationCategory::System,
        }
    }
}

/// A single notification emitted by the bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationEvent {
    /// Unique notification identifier.
    pub id: NotificationId,
    /// Short headline.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Label of the room or person the event concerns.
    pub subject: String,
    /// When the event was generated.
    pub created_at: DateTime<Utc>,
    /// Read state, owned by whoever holds this copy.
    pub read_state: ReadState,
    /// Category and category-specific fields.
    #[serde(flatten)]
    pub detail: NotificationDetail,
}

impl NotificationEvent {
    /// Create a fresh unread event stamped with the current time.
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        subject: impl Into<String>,
        detail: NotificationDetail,
    ) -> Self {
        Self {
            id: NotificationId::new(),
            title: title.into(),
            message: message.into(),
            subject: subject.into(),
            created_at: Utc::now(),
            read_state: ReadState::Unread,
            detail,
        }
    }

    /// Category of this event.
    pub fn category(&self) -> NotificationCategory {
        self.detail.category()
    }

    /// Check if the event has not been read.
    pub fn is_unread(&self) -> bool {
        self.read_state == ReadState::Unread
    }
}
