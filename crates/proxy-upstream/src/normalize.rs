//! 응답 정규화기.
//!
//! upstream 페이로드를 호출자 대면 스키마로 변환하고, 페이로드가
//! 정규화할 가치가 있는지("사용 가능") 판정합니다. 사용 불가 판정은
//! 호출자 대면 에러가 아니라 폴백 생성기의 트리거입니다.

use serde_json::Value;
use tracing::debug;

use crate::error::UpstreamError;
use crate::shapes::{CandlePayload, ProfilePayload};
use proxy_core::{CandleSeries, CompanyProfile};

/// 백만 단위 환산 계수 (통계 형태의 시가총액/발행주식수).
const MILLION: f64 = 1_000_000.0;

/// 캔들 페이로드 정규화.
///
/// 형태를 감지해 사용 가능한 레코드만 초 단위 타임스탬프의 bar로
/// 변환합니다 (upstream 순서 유지). `window`가 주어지면 정규화 후,
/// 사용성 판정 전에 `[from, to]` 범위(포함) 밖의 bar를 제거합니다.
/// 남는 bar가 없으면 [`UpstreamError::Unusable`]을 반환합니다.
pub fn normalize_candles(
    payload: Value,
    window: Option<(i64, i64)>,
) -> Result<CandleSeries, UpstreamError> {
    let payload: CandlePayload = serde_json::from_value(payload)
        .map_err(|e| UpstreamError::Unusable(format!("Unrecognized candle payload shape: {}", e)))?;

    let mut bars = payload.bars();
    let total = bars.len();

    if let Some((from, to)) = window {
        bars.retain(|bar| bar.ts >= from && bar.ts <= to);
    }

    debug!(
        usable = total,
        in_window = bars.len(),
        "candle records normalized"
    );

    if bars.is_empty() {
        return Err(UpstreamError::Unusable(
            "no usable price records in range".to_string(),
        ));
    }

    Ok(CandleSeries::from_bars(&bars, false))
}

/// 프로필 페이로드 정규화.
///
/// 사용성 기준: 프로필 객체가 존재하고 비어 있지 않아야 합니다.
/// 요청된 심볼은 `ticker`로 그대로 반영됩니다.
pub fn normalize_profile(payload: Value, symbol: &str) -> Result<CompanyProfile, UpstreamError> {
    let payload: ProfilePayload = serde_json::from_value(payload).map_err(|e| {
        UpstreamError::Unusable(format!("Unrecognized profile payload shape: {}", e))
    })?;

    match payload {
        ProfilePayload::Statistics(modules) => {
            // 빈 quoteType 모듈은 사용 불가 (폴백 트리거)
            if modules.quote_type.is_empty() {
                return Err(UpstreamError::Unusable(
                    "quoteType module is empty".to_string(),
                ));
            }

            let mut profile = CompanyProfile::for_symbol(symbol);

            // 첫 번째 비어 있지 않은 이름 후보를 채택
            profile.name = modules
                .quote_type
                .long_name
                .filter(|n| !n.is_empty())
                .or(modules.quote_type.short_name.filter(|n| !n.is_empty()))
                .unwrap_or_else(|| symbol.to_string());
            if let Some(exchange) = modules.quote_type.exchange {
                profile.exchange = exchange;
            }

            if let Some(detail) = modules.summary_detail {
                // {raw} 래핑 해제 후 백만 단위로 환산
                profile.market_capitalization = detail
                    .market_cap
                    .map(|m| m.value() / MILLION)
                    .unwrap_or(0.0);
                profile.pe_ratio = detail.trailing_pe.map(|p| p.value());
                if let Some(currency) = detail.currency {
                    profile.currency = currency;
                }
            }

            if let Some(stats) = modules.key_statistics {
                profile.share_outstanding =
                    stats.shares_outstanding.map(|s| s.value() / MILLION);
            }

            if let Some(summary) = modules.summary_profile {
                profile.country = summary.country.unwrap_or_default();
                profile.finnhub_industry = summary.industry.unwrap_or_default();
                profile.phone = summary.phone.unwrap_or_default();
                profile.weburl = summary.website.unwrap_or_default();
            }

            Ok(profile)
        }
        ProfilePayload::Flat(flat) => {
            if flat.is_empty() {
                return Err(UpstreamError::Unusable(
                    "profile object is empty".to_string(),
                ));
            }

            let mut profile = CompanyProfile::for_symbol(symbol);
            profile.country = flat.country.unwrap_or_default();
            profile.currency = flat.currency.unwrap_or_default();
            profile.exchange = flat.exchange.unwrap_or_default();
            profile.finnhub_industry = flat.industry.unwrap_or_default();
            profile.ipo = flat.ipo_date.unwrap_or_default();
            if let Some(logo) = flat.logo_url.filter(|l| !l.is_empty()) {
                profile.logo = logo;
            }
            profile.market_capitalization = flat.market_cap.unwrap_or(0.0);
            profile.name = flat
                .long_name
                .filter(|n| !n.is_empty())
                .or(flat.short_name.filter(|n| !n.is_empty()))
                .unwrap_or_else(|| symbol.to_string());
            profile.phone = flat.phone.unwrap_or_default();
            profile.share_outstanding = flat.shares_outstanding;
            profile.weburl = flat.website.unwrap_or_default();
            // 평탄 형태에는 trailingPE가 없어 PER는 미설정으로 둠

            Ok(profile)
        }
    }
}
