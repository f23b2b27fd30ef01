//! Order Model
//!
//! The persisted shipment order. `status` and `history` are mutated only by
//! the OrderManager; every other field is immutable after creation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;
use shared::models::{HistoryEntry, OrderStatus, PackageType, PaymentType};

/// Shipment order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    /// Public tracking ID (BDX...), unique across all orders for all time
    pub tracking_id: String,
    /// Reference to the sender identity (external collaborator)
    pub sender_id: String,
    pub receiver_name: String,
    pub receiver_address: String,
    pub receiver_phone: String,
    pub package_type: PackageType,
    /// Kilograms, > 0
    pub weight: f64,
    /// Cost in currency units, computed once at creation
    pub delivery_cost: f64,
    pub payment_type: PaymentType,
    pub status: OrderStatus,
    /// Append-only status ledger; entry #1 is written at creation
    pub history: Vec<HistoryEntry>,
    pub date_created: DateTime<Utc>,
}

/// Admin listing row: order plus read-time sender enrichment
///
/// The sender name/address are joined at read time, never stored on the
/// order, so a profile update is reflected on the next read.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderWithSender {
    #[serde(flatten)]
    pub order: Order,
    pub sender_name: String,
    pub sender_address: String,
}
