//! Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Order, OrderWithSender};
use crate::db::repository::{OrderRepository, SenderRepository};
use crate::orders::{NewOrder, SenderIdentity};
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text,
    validate_required_text, validate_weight,
};
use crate::utils::{AppError, AppResult};
use shared::models::{OrderStats, PackageType, PaymentType};

/// Creation request body
///
/// Every field is optional at the serde level so missing values answer 400
/// with a field-specific message rather than a deserialization rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub receiver_name: Option<String>,
    #[serde(default)]
    pub receiver_address: Option<String>,
    #[serde(default)]
    pub receiver_phone: Option<String>,
    #[serde(default)]
    pub package_type: Option<String>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub payment_type: Option<String>,
}

/// Status update request body
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    /// Raw status string; recognized values are validated by the engine
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

fn required_field(
    value: Option<String>,
    field: &str,
    max_len: usize,
) -> Result<String, AppError> {
    let value = value.unwrap_or_default();
    validate_required_text(&value, field, max_len)?;
    Ok(value)
}

/// POST /api/orders - create a shipment order
///
/// The sender is always the verified caller; the request body can never
/// choose a different sender.
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<CreateOrderRequest>,
) -> AppResult<(StatusCode, Json<Order>)> {
    let receiver_name = required_field(payload.receiver_name, "receiverName", MAX_NAME_LEN)?;
    let receiver_address =
        required_field(payload.receiver_address, "receiverAddress", MAX_ADDRESS_LEN)?;
    let receiver_phone =
        required_field(payload.receiver_phone, "receiverPhone", MAX_SHORT_TEXT_LEN)?;

    let package_type: PackageType = payload
        .package_type
        .as_deref()
        .unwrap_or_default()
        .parse()
        .map_err(|_| AppError::validation("Invalid or missing packageType."))?;
    let payment_type: PaymentType = payload
        .payment_type
        .as_deref()
        .unwrap_or_default()
        .parse()
        .map_err(|_| AppError::validation("Invalid or missing paymentType."))?;

    let weight = payload.weight.unwrap_or(0.0);
    validate_weight(weight)?;

    let sender = SenderIdentity {
        id: user.id,
        name: user.name,
        address: user.address,
    };

    let order = state
        .order_manager()
        .create(
            &sender,
            NewOrder {
                receiver_name,
                receiver_address,
                receiver_phone,
                package_type,
                weight,
                payment_type,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(order)))
}

/// GET /api/orders/{id} - public tracking lookup by tracking ID
pub async fn track(
    State(state): State<ServerState>,
    Path(tracking_id): Path<String>,
) -> AppResult<Json<Order>> {
    let repo = OrderRepository::new(state.db.clone());
    let order = repo
        .find_by_tracking_id(&tracking_id)
        .await?
        .ok_or_else(|| AppError::not_found("Order not found"))?;
    Ok(Json(order))
}

/// GET /api/orders - admin listing, newest first, sender-enriched
pub async fn list_all(State(state): State<ServerState>) -> AppResult<Json<Vec<OrderWithSender>>> {
    let orders = OrderRepository::new(state.db.clone()).find_all().await?;

    // Read-time join: collect distinct sender ids, then enrich in memory
    let mut sender_ids: Vec<String> = orders.iter().map(|o| o.sender_id.clone()).collect();
    sender_ids.sort();
    sender_ids.dedup();
    let senders = SenderRepository::new(state.db.clone())
        .find_by_ids(&sender_ids)
        .await?;

    let enriched = orders
        .into_iter()
        .map(|order| {
            let profile = senders.get(&order.sender_id);
            OrderWithSender {
                sender_name: profile
                    .map(|s| s.name.clone())
                    .unwrap_or_else(|| "Unknown".to_string()),
                sender_address: profile
                    .and_then(|s| s.address.clone())
                    .unwrap_or_else(|| "Unknown".to_string()),
                order,
            }
        })
        .collect();

    Ok(Json(enriched))
}

/// GET /api/orders/stats - dashboard counters
pub async fn stats(State(state): State<ServerState>) -> AppResult<Json<OrderStats>> {
    let stats = OrderRepository::new(state.db.clone()).stats().await?;
    Ok(Json(stats))
}

/// GET /api/orders/user/orders - caller's own orders, newest first
pub async fn list_own(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<Order>>> {
    let orders = OrderRepository::new(state.db.clone())
        .find_by_sender(&user.id)
        .await?;
    Ok(Json(orders))
}

/// PUT /api/orders/{id}/status - admin status advance (by tracking ID)
pub async fn update_status(
    State(state): State<ServerState>,
    Path(tracking_id): Path<String>,
    Json(payload): Json<UpdateStatusRequest>,
) -> AppResult<Json<Order>> {
    validate_optional_text(&payload.location, "location", MAX_ADDRESS_LEN)?;

    let status = payload.status.as_deref().unwrap_or_default();
    let order = state
        .order_manager()
        .advance(&tracking_id, status, payload.location)
        .await?;
    Ok(Json(order))
}

/// DELETE /api/orders/{id} - admin hard delete by internal record id
pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    state.order_manager().delete(&id).await?;
    Ok(Json(MessageResponse {
        message: "Order deleted successfully.".to_string(),
    }))
}
