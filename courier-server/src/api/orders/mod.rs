//! Order API Module
//!
//! Public tracking lookup, sender-scoped listing and admin operations.
//! All status/history mutations go through the OrderManager.

mod handler;

use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

use crate::auth::require_admin;
use crate::core::ServerState;

/// Order router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        // Create: any authenticated sender
        .route("/", post(handler::create))
        // Caller's own orders
        .route("/user/orders", get(handler::list_own))
        // Public tracking lookup (the auth middleware lets this one through)
        .route("/{id}", get(handler::track))
        .merge(admin_routes())
}

fn admin_routes() -> Router<ServerState> {
    // 仪表盘查询与生命周期变更：仅管理员
    Router::new()
        .route("/", get(handler::list_all))
        .route("/stats", get(handler::stats))
        .route("/{id}/status", put(handler::update_status))
        .route("/{id}", delete(handler::remove))
        .layer(middleware::from_fn(require_admin))
}
