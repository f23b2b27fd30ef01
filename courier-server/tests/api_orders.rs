//! HTTP-level tests: authorization table and response shapes
//!
//! Drives the full router in-process (middleware included) with oneshot
//! requests against a throwaway embedded database.

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use courier_server::api;
use courier_server::core::{Config, ServerState};

async fn test_app() -> (tempfile::TempDir, ServerState, Router) {
    let tmp = tempfile::tempdir().expect("tempdir");
    let config = Config::with_overrides(tmp.path().to_string_lossy(), 0);
    let state = ServerState::initialize(&config).await.expect("state");
    let app = api::build_app(&state).with_state(state.clone());
    (tmp, state, app)
}

fn bearer(state: &ServerState, id: &str, name: &str, role: &str, address: Option<&str>) -> String {
    let token = state
        .jwt_service
        .generate_token(id, name, role, address)
        .expect("token");
    format!("Bearer {token}")
}

fn order_body() -> Value {
    json!({
        "receiverName": "Bob",
        "receiverAddress": "34 Lake View, Dhaka",
        "receiverPhone": "+8801700000000",
        "packageType": "Parcel",
        "weight": 2.5,
        "paymentType": "COD"
    })
}

fn request(method: &str, uri: &str, auth: Option<&str>, body: Option<&Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(body).expect("encode body")))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    }
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.expect("infallible");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, value)
}

#[tokio::test]
async fn create_requires_authentication() {
    let (_tmp, _state, app) = test_app().await;

    let (status, body) = send(&app, request("POST", "/api/orders", None, Some(&order_body()))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "E3001");
}

#[tokio::test]
async fn garbage_token_is_rejected() {
    let (_tmp, _state, app) = test_app().await;

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/api/orders",
            Some("Bearer not-a-jwt"),
            Some(&order_body()),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "E3002");
}

#[tokio::test]
async fn create_then_public_tracking_lookup() {
    let (_tmp, state, app) = test_app().await;
    let user = bearer(&state, "user-alice", "Alice", "user", Some("12 Hill Road"));

    let (status, created) = send(
        &app,
        request("POST", "/api/orders", Some(&user), Some(&order_body())),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let tracking_id = created["trackingId"].as_str().expect("trackingId");
    assert!(tracking_id.starts_with("BDX"));
    assert_eq!(created["status"], "Pending");
    assert_eq!(created["deliveryCost"], 80.0); // 50 + 1.5 kg * 20
    assert_eq!(created["senderId"], "user-alice");
    assert_eq!(created["history"].as_array().expect("history").len(), 1);
    assert_eq!(created["history"][0]["location"], "12 Hill Road");

    // Public lookup needs no token
    let (status, fetched) = send(
        &app,
        request("GET", &format!("/api/orders/{tracking_id}"), None, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["trackingId"], tracking_id);
}

#[tokio::test]
async fn tracking_lookup_of_unknown_id_is_404() {
    let (_tmp, _state, app) = test_app().await;

    let (status, body) = send(
        &app,
        request("GET", "/api/orders/BDX20240101-ZZZZ", None, None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "E0003");
}

#[tokio::test]
async fn create_with_missing_or_invalid_fields_is_400() {
    let (_tmp, state, app) = test_app().await;
    let user = bearer(&state, "user-alice", "Alice", "user", None);

    let mut missing_name = order_body();
    missing_name.as_object_mut().expect("object").remove("receiverName");
    let (status, _) = send(
        &app,
        request("POST", "/api/orders", Some(&user), Some(&missing_name)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut bad_weight = order_body();
    bad_weight["weight"] = json!(0);
    let (status, body) = send(
        &app,
        request("POST", "/api/orders", Some(&user), Some(&bad_weight)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid weight value.");

    let mut bad_package = order_body();
    bad_package["packageType"] = json!("Envelope");
    let (status, _) = send(
        &app,
        request("POST", "/api/orders", Some(&user), Some(&bad_package)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn admin_routes_reject_missing_and_non_admin_callers() {
    let (_tmp, state, app) = test_app().await;
    let user = bearer(&state, "user-alice", "Alice", "user", None);

    for (method, uri) in [
        ("GET", "/api/orders"),
        ("GET", "/api/orders/stats"),
        ("PUT", "/api/orders/BDX20240101-AAAA/status"),
        ("DELETE", "/api/orders/xyz"),
    ] {
        let body = json!({"status": "In Transit"});
        let payload = (method == "PUT").then_some(&body);

        let (status, _) = send(&app, request(method, uri, None, payload)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{method} {uri} without token");

        let (status, response) = send(&app, request(method, uri, Some(&user), payload)).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{method} {uri} as plain user");
        assert_eq!(response["code"], "E2001");
    }
}

#[tokio::test]
async fn status_update_flow_over_http() {
    let (_tmp, state, app) = test_app().await;
    let user = bearer(&state, "user-alice", "Alice", "user", None);
    let admin = bearer(&state, "admin-1", "Root", "admin", None);

    let (_, created) = send(
        &app,
        request("POST", "/api/orders", Some(&user), Some(&order_body())),
    )
    .await;
    let tracking_id = created["trackingId"].as_str().expect("trackingId").to_string();
    let status_uri = format!("/api/orders/{tracking_id}/status");

    let (status, updated) = send(
        &app,
        request(
            "PUT",
            &status_uri,
            Some(&admin),
            Some(&json!({"status": "In Transit", "location": "Hub A"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "In Transit");
    let history = updated["history"].as_array().expect("history");
    assert_eq!(history.len(), 2);
    assert_eq!(history[1]["location"], "Hub A");

    // Unrecognized status: 400, ledger untouched
    let (status, _) = send(
        &app,
        request("PUT", &status_uri, Some(&admin), Some(&json!({"status": "Bogus"}))),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Backward move: rejected as a rule violation, ledger untouched
    let (status, _) = send(
        &app,
        request("PUT", &status_uri, Some(&admin), Some(&json!({"status": "Pending"}))),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, fetched) = send(
        &app,
        request("GET", &format!("/api/orders/{tracking_id}"), None, None),
    )
    .await;
    assert_eq!(fetched["history"].as_array().expect("history").len(), 2);

    // Unknown tracking id: 404
    let (status, _) = send(
        &app,
        request(
            "PUT",
            "/api/orders/BDX20240101-ZZZZ/status",
            Some(&admin),
            Some(&json!({"status": "In Transit"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn listing_stats_and_delete_for_admins() {
    let (_tmp, state, app) = test_app().await;
    let alice = bearer(&state, "user-alice", "Alice", "user", Some("12 Hill Road"));
    let bob = bearer(&state, "user-bob", "Bob", "user", None);
    let admin = bearer(&state, "admin-1", "Root", "admin", None);

    let (_, first) = send(
        &app,
        request("POST", "/api/orders", Some(&alice), Some(&order_body())),
    )
    .await;
    let (_, _second) = send(
        &app,
        request("POST", "/api/orders", Some(&bob), Some(&order_body())),
    )
    .await;

    // Own orders are scoped to the caller
    let (status, own) = send(
        &app,
        request("GET", "/api/orders/user/orders", Some(&alice), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let own = own.as_array().expect("array");
    assert_eq!(own.len(), 1);
    assert_eq!(own[0]["senderId"], "user-alice");

    // Admin listing carries the sender join
    let (status, listed) = send(&app, request("GET", "/api/orders", Some(&admin), None)).await;
    assert_eq!(status, StatusCode::OK);
    let listed = listed.as_array().expect("array");
    assert_eq!(listed.len(), 2);
    let alice_row = listed
        .iter()
        .find(|o| o["senderId"] == "user-alice")
        .expect("alice's order listed");
    assert_eq!(alice_row["senderName"], "Alice");
    assert_eq!(alice_row["senderAddress"], "12 Hill Road");
    let bob_row = listed
        .iter()
        .find(|o| o["senderId"] == "user-bob")
        .expect("bob's order listed");
    assert_eq!(bob_row["senderAddress"], "Unknown");

    let (status, stats) = send(&app, request("GET", "/api/orders/stats", Some(&admin), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["totalOrders"], 2);
    assert_eq!(stats["pending"], 2);
    assert_eq!(stats["inTransit"], 0);
    assert_eq!(stats["delivered"], 0);

    // Delete by internal id, then the order is gone everywhere
    let internal_id = first["id"].as_str().expect("record id").to_string();
    let (status, deleted) = send(
        &app,
        request("DELETE", &format!("/api/orders/{internal_id}"), Some(&admin), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["message"], "Order deleted successfully.");

    let (status, _) = send(
        &app,
        request("DELETE", &format!("/api/orders/{internal_id}"), Some(&admin), None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, stats) = send(&app, request("GET", "/api/orders/stats", Some(&admin), None)).await;
    assert_eq!(stats["totalOrders"], 1);
}

#[tokio::test]
async fn health_is_public() {
    let (_tmp, _state, app) = test_app().await;

    let (status, body) = send(&app, request("GET", "/health", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = send(&app, request("GET", "/health/detailed", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["checks"]["database"]["status"], "ok");
}
