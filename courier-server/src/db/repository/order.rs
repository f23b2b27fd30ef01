//! Order Repository
//!
//! Single-document reads and writes for shipment orders. Status and history
//! mutations go through the OrderManager, which persists via [`OrderRepository::update`].

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::Order;
use shared::models::{OrderStats, OrderStatus};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "order";

#[derive(Clone, Debug)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// True if a tracking ID is already taken
    pub async fn tracking_id_exists(&self, tracking_id: &str) -> RepoResult<bool> {
        Ok(self.find_by_tracking_id(tracking_id).await?.is_some())
    }

    /// Find order by its public tracking ID
    pub async fn find_by_tracking_id(&self, tracking_id: &str) -> RepoResult<Option<Order>> {
        let tracking_id = tracking_id.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM order WHERE trackingId = $trackingId LIMIT 1")
            .bind(("trackingId", tracking_id))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        Ok(orders.into_iter().next())
    }

    /// Find order by internal record id ("order:key" or bare key)
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let key = id.strip_prefix("order:").unwrap_or(id);
        let order: Option<Order> = self.base.db().select((TABLE, key)).await?;
        Ok(order)
    }

    /// All orders for one sender, newest first
    pub async fn find_by_sender(&self, sender_id: &str) -> RepoResult<Vec<Order>> {
        let sender_id = sender_id.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM order WHERE senderId = $senderId ORDER BY dateCreated DESC")
            .bind(("senderId", sender_id))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        Ok(orders)
    }

    /// All orders, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM order ORDER BY dateCreated DESC")
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Count orders currently in a given status
    pub async fn count_by_status(&self, status: OrderStatus) -> RepoResult<i64> {
        let mut result = self
            .base
            .db()
            .query("LET $matching = (SELECT status FROM order WHERE status = $status)")
            .query("RETURN count($matching)")
            .bind(("status", status.as_str()))
            .await?;
        let count: Option<i64> = result.take(1)?;
        Ok(count.unwrap_or(0))
    }

    /// Status counts for the dashboard — computed at call time, no caching
    pub async fn stats(&self) -> RepoResult<OrderStats> {
        let mut result = self
            .base
            .db()
            .query(
                r#"
                LET $all = (SELECT status FROM order);
                LET $pending = (SELECT * FROM $all WHERE status = 'Pending');
                LET $in_transit = (SELECT * FROM $all WHERE status = 'In Transit');
                LET $delivered = (SELECT * FROM $all WHERE status = 'Delivered');
                RETURN {
                    totalOrders: count($all),
                    pending: count($pending),
                    inTransit: count($in_transit),
                    delivered: count($delivered)
                }
                "#,
            )
            .await?;
        let stats: Option<OrderStats> = result.take(4)?;
        Ok(stats.unwrap_or_default())
    }

    /// Persist a new order.
    ///
    /// The UNIQUE trackingId index rejects duplicates at write time even if
    /// two generators raced past the existence check.
    pub async fn create(&self, order: Order) -> RepoResult<Order> {
        let created: Option<Order> = self.base.db().create(TABLE).content(order).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    /// Replace the full order document (lifecycle engine only)
    pub async fn update(&self, order: Order) -> RepoResult<Order> {
        let mut order = order;
        let record_id = order
            .id
            .take()
            .ok_or_else(|| RepoError::Database("Order has no record id".to_string()))?;
        let key = record_id.key().to_string();

        let updated: Option<Order> = self.base.db().update((TABLE, key)).content(order).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Order {} not found", record_id)))
    }

    /// Hard delete by internal record id; Ok(false) when nothing existed
    pub async fn delete_by_id(&self, id: &str) -> RepoResult<bool> {
        let key = id.strip_prefix("order:").unwrap_or(id);
        let deleted: Option<Order> = self.base.db().delete((TABLE, key)).await?;
        Ok(deleted.is_some())
    }
}
