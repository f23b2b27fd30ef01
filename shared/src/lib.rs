//! Shared types for the courier platform
//!
//! Domain types used by the server and any client-facing tooling: order
//! status/package/payment enums, the history ledger entry, and the delivery
//! cost calculator. Pricing lives here so a client-side cost preview and the
//! server's authoritative computation can never disagree.

pub mod models;
pub mod pricing;

// Re-exports
pub use models::{HistoryEntry, OrderStats, OrderStatus, PackageType, PaymentType};
pub use pricing::delivery_cost;
