//! Reservation contracts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body for `POST /reservations`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservation {
    pub event_id: String,
    pub zone_id: String,
    pub quantity: u32,
}

/// Tickets held for one zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservedTickets {
    pub zone_id: String,
    pub zone_name: String,
    pub quantity: u32,
    pub unit_price: f64,
}

impl ReservedTickets {
    pub fn subtotal(&self) -> f64 {
        self.unit_price * f64::from(self.quantity)
    }
}

/// A time-boxed hold on ticket inventory preceding payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub reservation_id: String,
    pub expires_at: DateTime<Utc>,
    #[serde(default)]
    pub tickets: Vec<ReservedTickets>,
    pub total_amount: f64,
}

impl Reservation {
    /// Returns true once the hold has lapsed.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Time left on the hold, zero once expired.
    pub fn remaining_at(&self, now: DateTime<Utc>) -> chrono::Duration {
        (self.expires_at - now).max(chrono::Duration::zero())
    }

    /// Total number of tickets held.
    pub fn ticket_count(&self) -> u32 {
        self.tickets.iter().map(|t| t.quantity).sum()
    }
}
