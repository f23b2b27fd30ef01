//! Health check handlers

use std::time::Instant;

use axum::{Json, extract::State};
use serde::Serialize;

use crate::core::ServerState;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 简单健康检查响应
#[derive(Serialize)]
pub struct HealthResponse {
    /// 状态 (ok | error)
    status: &'static str,
    /// 版本号
    version: &'static str,
}

/// 详细健康检查响应
#[derive(Serialize)]
pub struct DetailedHealthResponse {
    status: &'static str,
    version: &'static str,
    /// 运行时间 (秒)
    uptime_seconds: i64,
    /// 各组件检查结果
    checks: HealthChecks,
}

/// 健康检查详情
#[derive(Serialize)]
pub struct HealthChecks {
    /// 数据库检查
    database: CheckResult,
}

/// 单项检查结果
#[derive(Serialize)]
pub struct CheckResult {
    /// 状态 (ok | error)
    status: &'static str,
    /// 延迟 (毫秒)
    #[serde(skip_serializing_if = "Option::is_none")]
    latency_ms: Option<u128>,
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: VERSION,
    })
}

/// GET /health/detailed
pub async fn detailed_health(State(state): State<ServerState>) -> Json<DetailedHealthResponse> {
    let started = Instant::now();
    let database = match state.db.query("RETURN 1").await {
        Ok(_) => CheckResult {
            status: "ok",
            latency_ms: Some(started.elapsed().as_millis()),
        },
        Err(e) => {
            tracing::warn!(error = %e, "Health check: database ping failed");
            CheckResult {
                status: "error",
                latency_ms: None,
            }
        }
    };

    let status = if database.status == "ok" { "ok" } else { "error" };

    Json(DetailedHealthResponse {
        status,
        version: VERSION,
        uptime_seconds: (chrono::Utc::now() - state.started_at).num_seconds(),
        checks: HealthChecks { database },
    })
}
