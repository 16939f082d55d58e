//! Purchase and ticket contracts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle of a purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PurchaseStatus {
    Pending,
    Approved,
    Completed,
    Rejected,
    Failed,
    Refunded,
}

impl PurchaseStatus {
    /// Payment confirmed and tickets issued.
    pub fn is_approved(&self) -> bool {
        matches!(self, PurchaseStatus::Approved | PurchaseStatus::Completed)
    }

    /// Settled without the buyer ending up holding tickets.
    pub fn is_declined(&self) -> bool {
        matches!(
            self,
            PurchaseStatus::Rejected | PurchaseStatus::Failed | PurchaseStatus::Refunded
        )
    }
}

/// Lifecycle of a single ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    Reserved,
    Purchased,
    Validated,
    Transferred,
    Refunded,
}

/// Permission flags computed by the server for a ticket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketActions {
    pub can_transfer: bool,
    pub can_refund: bool,
    pub can_download: bool,
    #[serde(rename = "canViewQR")]
    pub can_view_qr: bool,
}

/// Permission flags computed by the server for a purchase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseActions {
    pub can_refund: bool,
    pub can_export: bool,
    pub can_cancel: bool,
}

/// A ticket as seen by its owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: String,
    pub event_id: String,
    pub event_title: String,
    pub event_date: DateTime<Utc>,
    pub zone_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qr_code: Option<String>,
    pub status: TicketStatus,
    pub price: f64,
    pub purchase_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub owner_name: String,
    #[serde(default)]
    pub actions: TicketActions,
}

/// Response from `GET /purchases/:id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Purchase {
    pub id: String,
    pub event_id: String,
    pub event_title: String,
    pub event_date: DateTime<Utc>,
    pub total_amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<DateTime<Utc>>,
    pub status: PurchaseStatus,
    #[serde(default)]
    pub payment_method: String,
    #[serde(default)]
    pub tickets: Vec<Ticket>,
    #[serde(default)]
    pub actions: PurchaseActions,
}
