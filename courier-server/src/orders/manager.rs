//! OrderManager - the order lifecycle engine
//!
//! The only component allowed to mutate an order's `status` and `history`.
//! Creation writes history entry #1; `advance` appends every later entry
//! under a per-tracking-ID lock so concurrent updates land in arrival order.
//!
//! # Status flow
//!
//! ```text
//! Pending ──► In Transit ──► Out for Delivery ──► Delivered
//!    │             │                 │
//!    └─────────────┴─────────────────┴──────► Cancelled
//! ```

use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::db::models::Order;
use crate::db::repository::{OrderRepository, RepoError, SenderRepository};
use crate::orders::tracking::{TrackingIdError, TrackingIdGenerator};
use crate::utils::AppError;
use shared::models::{HistoryEntry, OrderStatus, PackageType, PaymentType};
use shared::pricing;

/// Location written when a status change carries no explicit location
const SYSTEM_LOCATION: &str = "System";

/// First-entry location when the sender has no stored address
const UNKNOWN_SENDER_ADDRESS: &str = "Sender Address Unknown";

/// Lifecycle errors
#[derive(Debug, Error)]
pub enum ManagerError {
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error("Invalid or missing status: {0}")]
    InvalidStatus(String),

    #[error("Cannot move from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error(transparent)]
    TrackingId(#[from] TrackingIdError),

    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl From<ManagerError> for AppError {
    fn from(err: ManagerError) -> Self {
        match err {
            ManagerError::OrderNotFound(id) => {
                AppError::not_found(format!("Order not found: {id}"))
            }
            ManagerError::InvalidStatus(status) => {
                AppError::validation(format!("Invalid or missing status: {status}"))
            }
            e @ ManagerError::InvalidTransition { .. } => AppError::business_rule(e.to_string()),
            ManagerError::TrackingId(e) => match e {
                TrackingIdError::Store(repo) => repo.into(),
                e @ TrackingIdError::Exhausted(_) => AppError::internal(e.to_string()),
            },
            ManagerError::Repo(e) => e.into(),
        }
    }
}

/// Verified identity of the order creator (supplied by the auth layer)
#[derive(Debug, Clone)]
pub struct SenderIdentity {
    pub id: String,
    pub name: String,
    pub address: Option<String>,
}

/// Validated creation input (the API layer has already checked the fields)
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub receiver_name: String,
    pub receiver_address: String,
    pub receiver_phone: String,
    pub package_type: PackageType,
    pub weight: f64,
    pub payment_type: PaymentType,
}

/// The order lifecycle engine
#[derive(Debug)]
pub struct OrderManager {
    orders: OrderRepository,
    senders: SenderRepository,
    tracking: TrackingIdGenerator,
    /// Per-tracking-ID mutation locks; concurrent `advance` calls on one
    /// order serialize here so history stays in arrival order.
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl OrderManager {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            orders: OrderRepository::new(db.clone()),
            senders: SenderRepository::new(db),
            tracking: TrackingIdGenerator::new(),
            locks: DashMap::new(),
        }
    }

    /// Create an order: refresh the sender profile, allocate a tracking ID,
    /// price the shipment and write the document with history entry #1.
    pub async fn create(
        &self,
        sender: &SenderIdentity,
        input: NewOrder,
    ) -> Result<Order, ManagerError> {
        self.senders
            .upsert(&sender.id, &sender.name, sender.address.as_deref())
            .await?;

        let tracking_id = self.tracking.generate(&self.orders).await?;
        let delivery_cost = pricing::delivery_cost(input.weight, input.package_type);

        let now = Utc::now();
        let first_location = sender
            .address
            .clone()
            .filter(|a| !a.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_SENDER_ADDRESS.to_string());

        let order = Order {
            id: None,
            tracking_id,
            sender_id: sender.id.clone(),
            receiver_name: input.receiver_name,
            receiver_address: input.receiver_address,
            receiver_phone: input.receiver_phone,
            package_type: input.package_type,
            weight: input.weight,
            delivery_cost,
            payment_type: input.payment_type,
            status: OrderStatus::Pending,
            history: vec![HistoryEntry {
                status: OrderStatus::Pending,
                location: first_location,
                timestamp: now,
            }],
            date_created: now,
        };

        let created = self.orders.create(order).await?;
        tracing::info!(
            tracking_id = %created.tracking_id,
            sender_id = %created.sender_id,
            delivery_cost = created.delivery_cost,
            "Order created"
        );
        Ok(created)
    }

    /// Advance an order to a new status, appending to its history ledger.
    ///
    /// `status` arrives as the raw request string; unrecognized values are
    /// rejected before any store access. Transition legality is enforced
    /// here, server-side: same status (location update), the immediate next
    /// status, or Cancelled from any non-terminal status.
    pub async fn advance(
        &self,
        tracking_id: &str,
        status: &str,
        location: Option<String>,
    ) -> Result<Order, ManagerError> {
        let new_status: OrderStatus = status
            .parse()
            .map_err(|_| ManagerError::InvalidStatus(status.to_string()))?;

        let lock = self.lock_for(tracking_id);
        let _guard = lock.lock().await;

        let mut order = self
            .orders
            .find_by_tracking_id(tracking_id)
            .await?
            .ok_or_else(|| ManagerError::OrderNotFound(tracking_id.to_string()))?;

        if !order.status.can_transition_to(new_status) {
            return Err(ManagerError::InvalidTransition {
                from: order.status,
                to: new_status,
            });
        }

        // Clamp so ledger timestamps never decrease under clock adjustment
        let mut timestamp = Utc::now();
        if let Some(last) = order.history.last()
            && timestamp < last.timestamp
        {
            timestamp = last.timestamp;
        }

        order.history.push(HistoryEntry {
            status: new_status,
            location: location
                .filter(|l| !l.trim().is_empty())
                .unwrap_or_else(|| SYSTEM_LOCATION.to_string()),
            timestamp,
        });
        order.status = new_status;

        let updated = self.orders.update(order).await?;
        tracing::info!(
            tracking_id = %updated.tracking_id,
            status = %updated.status,
            "Order status updated"
        );
        Ok(updated)
    }

    /// Hard delete by internal record id. History is discarded; the tracking
    /// ID is never handed out again (the generator only draws fresh random
    /// candidates).
    pub async fn delete(&self, id: &str) -> Result<(), ManagerError> {
        if self.orders.delete_by_id(id).await? {
            tracing::info!(order_id = %id, "Order deleted");
            Ok(())
        } else {
            Err(ManagerError::OrderNotFound(id.to_string()))
        }
    }

    fn lock_for(&self, tracking_id: &str) -> Arc<Mutex<()>> {
        self.locks
            .entry(tracking_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
