//! 헬스 체크 endpoint.
//!
//! 로드밸런서나 오케스트레이션 시스템에서 사용하는 상태 확인
//! 엔드포인트를 제공합니다.

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::state::AppState;

/// 상세 헬스 체크 응답.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// 전체 서비스 상태 ("healthy" | "degraded")
    pub status: String,
    /// 현재 시간 (ISO 8601)
    pub timestamp: String,
    /// upstream API 키 설정 여부.
    ///
    /// 미설정이어도 서비스는 합성 데이터로 응답하므로 degraded이지
    /// unhealthy는 아닙니다.
    pub upstream_configured: bool,
}

/// 간단한 헬스 체크 (liveness probe용).
///
/// GET /health
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// 상세 헬스 체크 (readiness probe용).
///
/// GET /health/ready
pub async fn health_ready(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let upstream_configured = state.config.rapidapi_key.is_some();
    let status = if upstream_configured {
        "healthy"
    } else {
        "degraded"
    };

    (
        StatusCode::OK,
        Json(HealthResponse {
            status: status.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            upstream_configured,
        }),
    )
}

/// 헬스 체크 라우터 생성.
pub fn health_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(health_check))
        .route("/ready", get(health_ready))
}
