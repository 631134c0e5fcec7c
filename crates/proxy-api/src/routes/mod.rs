//! API 라우트.
//!
//! # 라우트 구조
//!
//! - `/health` - 헬스 체크 (liveness)
//! - `/health/ready` - 상세 헬스 체크 (readiness)
//! - `/finnhub-proxy/stock/candle` - 일봉 캔들 시리즈
//! - `/finnhub-proxy/stock/profile2` - 기업 프로필

pub mod candle;
pub mod health;
pub mod profile;

pub use candle::{candle_router, CandleQuery};
pub use health::{health_router, HealthResponse};
pub use profile::{profile_router, ProfileQuery};

use axum::http::StatusCode;
use axum::{Json, Router};
use std::sync::Arc;
use tracing::{error, warn};

use crate::error::{ApiErrorResponse, ApiResult};
use crate::state::AppState;
use proxy_upstream::UpstreamError;

/// 전체 API 라우터 생성.
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .nest("/health", health_router())
        .nest("/finnhub-proxy/stock", candle_router().merge(profile_router()))
}

/// 필수 쿼리 파라미터 누락 에러 (400).
pub(crate) fn missing_parameter(name: &str) -> (StatusCode, Json<ApiErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiErrorResponse::new(
            "MISSING_PARAMETER",
            format!("Missing required parameter: {}", name),
        )),
    )
}

/// upstream 실패를 정책에 따라 흡수하거나 전파.
///
/// - `Http`: 흡수 불가, upstream 상태 코드를 그대로 전파
/// - 그 외 (스로틀링/전송/사용 불가): 정책이 허용하면 합성 데이터 200,
///   아니면 502
pub(crate) fn recover_with_fallback<T>(
    state: &AppState,
    symbol: &str,
    err: UpstreamError,
    fallback: impl FnOnce() -> T,
) -> ApiResult<Json<T>> {
    match err {
        UpstreamError::Http { status } => {
            error!(symbol = %symbol, status = status, "upstream HTTP 에러 전파");
            Err((
                StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                Json(ApiErrorResponse::new(
                    "UPSTREAM_ERROR",
                    format!("Upstream provider returned HTTP {}", status),
                )),
            ))
        }
        err if err.is_absorbable() && state.config.fallback_policy.masks_upstream_failures() => {
            warn!(symbol = %symbol, error = %err, "upstream 실패, 합성 데이터로 대체");
            Ok(Json(fallback()))
        }
        err => {
            error!(symbol = %symbol, error = %err, "upstream 실패 (폴백 비활성화)");
            Err((
                StatusCode::BAD_GATEWAY,
                Json(ApiErrorResponse::new("UPSTREAM_UNAVAILABLE", err.to_string())),
            ))
        }
    }
}
