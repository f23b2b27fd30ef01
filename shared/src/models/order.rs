//! Order domain types
//!
//! Wire strings are authoritative here: the public API speaks
//! `"In Transit"` / `"Out for Delivery"` / `"COD"`, so the serde renames on
//! these enums define the JSON contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Raised when a request carries a string that is not a recognized variant
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unrecognized {kind}: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariant {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

// =============================================================================
// OrderStatus
// =============================================================================

/// Shipment status
///
/// Delivery path: Pending → In Transit → Out for Delivery → Delivered.
/// Cancelled is reachable from any non-terminal status; Delivered and
/// Cancelled are terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum OrderStatus {
    #[default]
    Pending,
    #[serde(rename = "In Transit")]
    InTransit,
    #[serde(rename = "Out for Delivery")]
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// All recognized statuses, in delivery-path order
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::InTransit,
        OrderStatus::OutForDelivery,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::InTransit => "In Transit",
            OrderStatus::OutForDelivery => "Out for Delivery",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    /// Terminal statuses accept no further transition
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// The next step on the delivery path, if any
    pub fn next(&self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::InTransit),
            OrderStatus::InTransit => Some(OrderStatus::OutForDelivery),
            OrderStatus::OutForDelivery => Some(OrderStatus::Delivered),
            OrderStatus::Delivered | OrderStatus::Cancelled => None,
        }
    }

    /// Transition legality, enforced by the lifecycle engine.
    ///
    /// From a non-terminal status the legal targets are the same status
    /// (location-only update), the immediate next status, or Cancelled.
    pub fn can_transition_to(&self, target: OrderStatus) -> bool {
        if self.is_terminal() {
            return false;
        }
        target == *self || Some(target) == self.next() || target == OrderStatus::Cancelled
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(OrderStatus::Pending),
            "In Transit" => Ok(OrderStatus::InTransit),
            "Out for Delivery" => Ok(OrderStatus::OutForDelivery),
            "Delivered" => Ok(OrderStatus::Delivered),
            "Cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(UnknownVariant::new("order status", other)),
        }
    }
}

// =============================================================================
// PackageType / PaymentType
// =============================================================================

/// Package category; Fragile carries a flat handling surcharge
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PackageType {
    Parcel,
    Document,
    Fragile,
    Pallet,
}

impl PackageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageType::Parcel => "Parcel",
            PackageType::Document => "Document",
            PackageType::Fragile => "Fragile",
            PackageType::Pallet => "Pallet",
        }
    }

    pub fn is_fragile(&self) -> bool {
        matches!(self, PackageType::Fragile)
    }
}

impl fmt::Display for PackageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackageType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Parcel" => Ok(PackageType::Parcel),
            "Document" => Ok(PackageType::Document),
            "Fragile" => Ok(PackageType::Fragile),
            "Pallet" => Ok(PackageType::Pallet),
            other => Err(UnknownVariant::new("package type", other)),
        }
    }
}

/// Payment label recorded on the order; no processing happens here
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PaymentType {
    #[serde(rename = "COD")]
    Cod,
    Prepaid,
}

impl PaymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentType::Cod => "COD",
            PaymentType::Prepaid => "Prepaid",
        }
    }
}

impl fmt::Display for PaymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "COD" => Ok(PaymentType::Cod),
            "Prepaid" => Ok(PaymentType::Prepaid),
            other => Err(UnknownVariant::new("payment type", other)),
        }
    }
}

// =============================================================================
// History ledger / stats
// =============================================================================

/// One entry in an order's append-only history ledger
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    pub status: OrderStatus,
    pub location: String,
    pub timestamp: DateTime<Utc>,
}

/// Status counts for the admin dashboard
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrderStats {
    pub total_orders: i64,
    pub pending: i64,
    pub in_transit: i64,
    pub delivered: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_wire_strings_round_trip() {
        for status in OrderStatus::ALL {
            let json = serde_json::to_string(&status).expect("serialize status");
            assert_eq!(json, format!("\"{}\"", status.as_str()));
            let parsed: OrderStatus = serde_json::from_str(&json).expect("deserialize status");
            assert_eq!(parsed, status);
            assert_eq!(status.as_str().parse::<OrderStatus>(), Ok(status));
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        let err = "Bogus".parse::<OrderStatus>().unwrap_err();
        assert_eq!(err.value, "Bogus");
        assert!("pending".parse::<OrderStatus>().is_err(), "case sensitive");
    }

    #[test]
    fn forward_transitions_are_legal() {
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::InTransit));
        assert!(OrderStatus::InTransit.can_transition_to(OrderStatus::OutForDelivery));
        assert!(OrderStatus::OutForDelivery.can_transition_to(OrderStatus::Delivered));
    }

    #[test]
    fn same_status_is_a_location_update() {
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Pending));
        assert!(OrderStatus::InTransit.can_transition_to(OrderStatus::InTransit));
    }

    #[test]
    fn cancel_is_legal_from_any_non_terminal_status() {
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Cancelled));
        assert!(OrderStatus::InTransit.can_transition_to(OrderStatus::Cancelled));
        assert!(OrderStatus::OutForDelivery.can_transition_to(OrderStatus::Cancelled));
    }

    #[test]
    fn backward_and_skipping_transitions_are_illegal() {
        assert!(!OrderStatus::InTransit.can_transition_to(OrderStatus::Pending));
        assert!(!OrderStatus::OutForDelivery.can_transition_to(OrderStatus::InTransit));
        assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::OutForDelivery));
        assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Delivered));
    }

    #[test]
    fn terminal_statuses_accept_nothing() {
        for target in OrderStatus::ALL {
            assert!(!OrderStatus::Delivered.can_transition_to(target));
            assert!(!OrderStatus::Cancelled.can_transition_to(target));
        }
    }

    #[test]
    fn payment_type_wire_strings() {
        assert_eq!(
            serde_json::to_string(&PaymentType::Cod).expect("serialize"),
            "\"COD\""
        );
        assert_eq!("Prepaid".parse::<PaymentType>(), Ok(PaymentType::Prepaid));
        assert!("Cash".parse::<PaymentType>().is_err());
    }

    #[test]
    fn stats_serialize_with_dashboard_field_names() {
        let stats = OrderStats {
            total_orders: 3,
            pending: 1,
            in_transit: 1,
            delivered: 1,
        };
        let json = serde_json::to_value(&stats).expect("serialize stats");
        assert_eq!(json["totalOrders"], 3);
        assert_eq!(json["inTransit"], 1);
    }
}
