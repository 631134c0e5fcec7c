//! 기업 프로필 endpoint.
//!
//! upstream 통계/프로필 데이터를 Finnhub 프로필 형식으로 정규화해
//! 반환합니다. 캔들 엔드포인트와 동일한 폴백 사다리를 따릅니다.
//!
//! # 엔드포인트
//!
//! - `GET /finnhub-proxy/stock/profile2?symbol=`

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info};

use super::{missing_parameter, recover_with_fallback};
use crate::error::ApiResult;
use crate::state::AppState;
use proxy_core::{synthetic_profile, CompanyProfile};
use proxy_upstream::normalize_profile;

/// 기업 프로필 쿼리.
#[derive(Debug, Deserialize)]
pub struct ProfileQuery {
    /// 심볼 (예: AAPL)
    pub symbol: Option<String>,
}

/// 기업 프로필 조회.
///
/// GET /finnhub-proxy/stock/profile2
pub async fn get_stock_profile(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ProfileQuery>,
) -> ApiResult<Json<CompanyProfile>> {
    let symbol = query
        .symbol
        .filter(|s| !s.is_empty())
        .ok_or_else(|| missing_parameter("symbol"))?;

    debug!(symbol = %symbol, "프로필 데이터 조회 시작");

    let normalized = match state.upstream.get_profile(&symbol).await {
        Ok(payload) => normalize_profile(payload, &symbol),
        Err(err) => Err(err),
    };

    match normalized {
        Ok(profile) => {
            info!(symbol = %symbol, name = %profile.name, "프로필 데이터 조회 성공");
            Ok(Json(profile))
        }
        Err(err) => {
            let symbol_for_fallback = symbol.clone();
            recover_with_fallback(&state, &symbol, err, move || {
                synthetic_profile(&symbol_for_fallback)
            })
        }
    }
}

/// 프로필 라우터 생성.
pub fn profile_router() -> Router<Arc<AppState>> {
    Router::new().route("/profile2", get(get_stock_profile))
}
