//! Domain Models

pub mod order;

pub use order::{
    HistoryEntry, OrderStats, OrderStatus, PackageType, PaymentType, UnknownVariant,
};
