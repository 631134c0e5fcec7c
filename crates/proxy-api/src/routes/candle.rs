//! 캔들 시리즈 endpoint.
//!
//! upstream 과거 데이터를 Finnhub 캔들 형식으로 정규화해 반환합니다.
//! upstream이 스로틀링되거나 실패하면 (정책이 허용하는 한) 합성
//! 시리즈를 200으로 반환해 차트 가용성을 유지합니다.
//!
//! # 엔드포인트
//!
//! - `GET /finnhub-proxy/stock/candle?symbol=&resolution=&from=&to=`

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info};

use super::{missing_parameter, recover_with_fallback};
use crate::error::{ApiErrorResponse, ApiResult};
use crate::state::AppState;
use proxy_core::{synthetic_candles, CandleSeries};
use proxy_upstream::normalize_candles;

/// 캔들 시리즈 쿼리.
///
/// 네 파라미터 모두 필수이며 누락 시 400을 반환합니다.
#[derive(Debug, Deserialize)]
pub struct CandleQuery {
    /// 심볼 (예: AAPL)
    pub symbol: Option<String>,
    /// 해상도 (D = 일봉, 현재 유일하게 지원)
    pub resolution: Option<String>,
    /// 범위 시작 (Unix 초)
    pub from: Option<String>,
    /// 범위 끝 (Unix 초)
    pub to: Option<String>,
}

/// 초 단위 타임스탬프 파라미터 파싱 (실패 시 400).
fn parse_timestamp(
    name: &str,
    value: &str,
) -> Result<i64, (axum::http::StatusCode, Json<ApiErrorResponse>)> {
    value.parse::<i64>().map_err(|_| {
        (
            axum::http::StatusCode::BAD_REQUEST,
            Json(ApiErrorResponse::new(
                "INVALID_PARAMETER",
                format!("Parameter '{}' must be a Unix timestamp in seconds", name),
            )),
        )
    })
}

/// 캔들 시리즈 조회.
///
/// GET /finnhub-proxy/stock/candle
///
/// upstream은 30일/일봉 고정 창으로 조회하며, `from`/`to` 범위
/// (포함) 밖의 레코드는 정규화 후 제거됩니다.
pub async fn get_stock_candle(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CandleQuery>,
) -> ApiResult<Json<CandleSeries>> {
    let symbol = query
        .symbol
        .filter(|s| !s.is_empty())
        .ok_or_else(|| missing_parameter("symbol"))?;
    let _resolution = query
        .resolution
        .filter(|r| !r.is_empty())
        .ok_or_else(|| missing_parameter("resolution"))?;
    let from_raw = query.from.ok_or_else(|| missing_parameter("from"))?;
    let to_raw = query.to.ok_or_else(|| missing_parameter("to"))?;

    let from = parse_timestamp("from", &from_raw)?;
    let to = parse_timestamp("to", &to_raw)?;

    debug!(symbol = %symbol, from = from, to = to, "캔들 데이터 조회 시작");

    let normalized = match state.upstream.get_candles(&symbol).await {
        Ok(payload) => normalize_candles(payload, Some((from, to))),
        Err(err) => Err(err),
    };

    match normalized {
        Ok(series) => {
            info!(symbol = %symbol, count = series.len(), "캔들 데이터 조회 성공");
            Ok(Json(series))
        }
        Err(err) => recover_with_fallback(&state, &symbol, err, synthetic_candles),
    }
}

/// 캔들 라우터 생성.
pub fn candle_router() -> Router<Arc<AppState>> {
    Router::new().route("/candle", get(get_stock_candle))
}
