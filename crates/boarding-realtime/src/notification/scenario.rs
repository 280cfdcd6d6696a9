//! Static scenario table for the synthetic generator.
//!
//! Room numbers, peso amounts, and names embedded in messages are
//! placeholder content for demo mode. They carry no business meaning.

use std::ops::RangeInclusive;

use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

use boarding_core::config::NotificationsConfig;
use boarding_core::error::AppError;

use super::event::{NotificationCategory, NotificationDetail};

/// Tenant names drawn for person tokens.
const TENANT_NAMES: &[&str] = &[
    "Maria Santos",
    "Juan Dela Cruz",
    "Ana Reyes",
    "Jose Garcia",
    "Liza Mendoza",
    "Paolo Ramos",
    "Carla Villanueva",
    "Miguel Torres",
];

/// Bounds for randomized tokens embedded in messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRanges {
    /// Room numbers.
    pub rooms: RangeInclusive<u32>,
    /// Peso amounts.
    pub amounts: RangeInclusive<u32>,
}

impl TokenRanges {
    /// Create ranges, rejecting empty ones.
    pub fn new(rooms: RangeInclusive<u32>, amounts: RangeInclusive<u32>) -> Result<Self, AppError> {
        if rooms.is_empty() {
            return Err(AppError::validation(format!("Empty room range {rooms:?}")));
        }
        if amounts.is_empty() {
            return Err(AppError::validation(format!("Empty amount range {amounts:?}")));
        }
        Ok(Self { rooms, amounts })
    }

    /// Ranges taken from the notifications config section.
    pub fn from_config(config: &NotificationsConfig) -> Result<Self, AppError> {
        Self::new(
            config.room_numbers_min..=config.room_numbers_max,
            config.amount_min..=config.amount_max,
        )
    }

    fn room(&self, rng: &mut dyn RngCore) -> u32 {
        rng.gen_range(self.rooms.clone())
    }

    fn amount(&self, rng: &mut dyn RngCore) -> u32 {
        rng.gen_range(self.amounts.clone())
    }
}

impl Default for TokenRanges {
    fn default() -> Self {
        Self {
            rooms: 1..=20,
            amounts: 1_500..=8_000,
        }
    }
}

/// Output of a scenario builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioDraft {
    /// Body text.
    pub message: String,
    /// Room or person label.
    pub subject: String,
    /// Category-specific fields.
    pub detail: NotificationDetail,
}

/// Builds the variable part of a notification from fresh randomness.
pub type ScenarioBuilder = fn(&mut dyn RngCore, &TokenRanges) -> ScenarioDraft;

/// Template used by the generator to synthesize one notification.
#[derive(Debug, Clone, Copy)]
pub struct Scenario {
    /// Category the builder produces.
    pub category: NotificationCategory,
    /// Fixed headline.
    pub title: &'static str,
    /// Message builder.
    pub build: ScenarioBuilder,
}

/// The built-in scenario table: two scenarios per category.
pub fn default_scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            category: NotificationCategory::Booking,
            title: "New Booking Request",
            build: booking_request,
        },
        Scenario {
            category: NotificationCategory::Booking,
            title: "Booking Cancelled",
            build: booking_cancelled,
        },
        Scenario {
            category: NotificationCategory::Payment,
            title: "Payment Received",
            build: payment_received,
        },
        Scenario {
            category: NotificationCategory::Payment,
            title: "Payment Overdue",
            build: payment_overdue,
        },
        Scenario {
            category: NotificationCategory::Room,
            title: "Room Vacated",
            build: room_vacated,
        },
        Scenario {
            category: NotificationCategory::Room,
            title: "Maintenance Request",
            build: maintenance_request,
        },
        Scenario {
            category: NotificationCategory::System,
            title: "Backup Completed",
            build: backup_completed,
        },
        Scenario {
            category: NotificationCategory::System,
            title: "System Update",
            build: system_update,
        },
    ]
}

/// Format whole pesos with thousands separators, e.g. `₱3,200`.
pub fn format_pesos(amount: u32) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    out.push('₱');
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn room_label(room: u32) -> String {
    format!("Room {room}")
}

fn tenant(rng: &mut dyn RngCore) -> String {
    TENANT_NAMES
        .choose(rng)
        .copied()
        .unwrap_or("A tenant")
        .to_string()
}

fn booking_request(rng: &mut dyn RngCore, ranges: &TokenRanges) -> ScenarioDraft {
    let tenant = tenant(rng);
    let room = ranges.room(rng);
    ScenarioDraft {
        message: format!("{tenant} requested to book {}", room_label(room)),
        subject: room_label(room),
        detail: NotificationDetail::Booking { tenant, room },
    }
}

fn booking_cancelled(rng: &mut dyn RngCore, ranges: &TokenRanges) -> ScenarioDraft {
    let tenant = tenant(rng);
    let room = ranges.room(rng);
    ScenarioDraft {
        message: format!("{tenant} cancelled the booking for {}", room_label(room)),
        subject: tenant.clone(),
        detail: NotificationDetail::Booking { tenant, room },
    }
}

fn payment_received(rng: &mut dyn RngCore, ranges: &TokenRanges) -> ScenarioDraft {
    let tenant = tenant(rng);
    let amount = ranges.amount(rng);
    ScenarioDraft {
        message: format!("{} received from {tenant}", format_pesos(amount)),
        subject: tenant.clone(),
        detail: NotificationDetail::Payment { tenant, amount },
    }
}

fn payment_overdue(rng: &mut dyn RngCore, ranges: &TokenRanges) -> ScenarioDraft {
    let tenant = tenant(rng);
    let amount = ranges.amount(rng);
    ScenarioDraft {
        message: format!("{tenant} has an overdue balance of {}", format_pesos(amount)),
        subject: tenant.clone(),
        detail: NotificationDetail::Payment { tenant, amount },
    }
}

fn room_vacated(rng: &mut dyn RngCore, ranges: &TokenRanges) -> ScenarioDraft {
    let room = ranges.room(rng);
    ScenarioDraft {
        message: format!("{} is now available", room_label(room)),
        subject: room_label(room),
        detail: NotificationDetail::Room { room },
    }
}

fn maintenance_request(rng: &mut dyn RngCore, ranges: &TokenRanges) -> ScenarioDraft {
    let room = ranges.room(rng);
    ScenarioDraft {
        message: format!("Maintenance was requested for {}", room_label(room)),
        subject: room_label(room),
        detail: NotificationDetail::Room { room },
    }
}

fn backup_completed(_rng: &mut dyn RngCore, _ranges: &TokenRanges) -> ScenarioDraft {
    ScenarioDraft {
        message: "Nightly backup of tenant records completed".to_string(),
        subject: "System".to_string(),
        detail: NotificationDetail::System {
            component: "backup".to_string(),
        },
    }
}

fn system_update(_rng: &mut dyn RngCore, _ranges: &TokenRanges) -> ScenarioDraft {
    ScenarioDraft {
        message: "A new console version is available".to_string(),
        subject: "System".to_string(),
        detail: NotificationDetail::System {
            component: "updater".to_string(),
        },
    }
}
