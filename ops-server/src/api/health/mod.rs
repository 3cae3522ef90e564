//! 健康检查路由
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /health | GET | 健康检查 (含数据库探测) |

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use std::sync::OnceLock;
use std::time::Instant;

use crate::core::ServerState;

static STARTED_AT: OnceLock<Instant> = OnceLock::new();

pub fn router() -> Router<ServerState> {
    // First router build marks process start for the uptime counter
    STARTED_AT.get_or_init(Instant::now);
    Router::new().route("/health", get(health))
}

/// 健康检查响应
#[derive(Serialize)]
pub struct HealthResponse {
    /// 状态 (ok | degraded)
    status: &'static str,
    /// 版本号
    version: &'static str,
    /// 运行时间 (秒)
    uptime_secs: u64,
    /// 数据库可达性 (ok | error)
    database: &'static str,
}

async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    let database = match state.db.query("RETURN 1").await {
        Ok(_) => "ok",
        Err(e) => {
            tracing::error!("health probe failed: {e}");
            "error"
        }
    };

    Json(HealthResponse {
        status: if database == "ok" { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: STARTED_AT
            .get()
            .map(|t| t.elapsed().as_secs())
            .unwrap_or(0),
        database,
    })
}
