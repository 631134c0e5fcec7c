//! 합성(폴백) 데이터 생성기.
//!
//! upstream 호출이 실패하거나 사용 불가능한 데이터를 반환했을 때
//! 스키마를 완전히 만족하는 대체 데이터를 생성합니다. 호출자는 항상
//! 올바른 형태의 응답을 받으며, `synthetic` 필드로 합성 여부를
//! 구분할 수 있습니다.
//!
//! 난수는 요청 로컬(`thread_rng`)이므로 동시 호출에 안전합니다.

use chrono::Utc;
use rand::Rng;

use crate::domain::{Bar, CandleSeries, CompanyProfile, PLACEHOLDER_LOGO_URL};

/// 폴백 시리즈의 데이터 포인트 수 (30일).
pub const FALLBACK_POINTS: usize = 30;

/// 랜덤 워크 스텝의 변동성 계수 (1.5%).
const VOLATILITY: f64 = 0.015;

/// 기준가 범위.
const BASE_PRICE_RANGE: std::ops::RangeInclusive<f64> = 50.0..=250.0;

/// 포인트당 거래량 범위.
const VOLUME_RANGE: std::ops::RangeInclusive<u64> = 100_000..=5_000_000;

/// 합성 캔들 시리즈 생성.
///
/// 기준가에서 시작하는 단일 랜덤 워크로 종가 시리즈를 만들고,
/// 시가/고가/저가는 같은 종가 시리즈에서 고정 배수(×1.01 / ×1.02 /
/// ×0.98)로 유도합니다. 가격이 0 이하로 내려가면 기준가의 절반으로
/// 재설정합니다. 타임스탬프는 현재 시각에서 끝나는 24시간 간격의
/// 직전 30일입니다.
pub fn synthetic_candles() -> CandleSeries {
    synthetic_candles_at(Utc::now().timestamp())
}

/// 종료 시각을 지정한 합성 캔들 시리즈 생성 (테스트용 분리).
pub fn synthetic_candles_at(now: i64) -> CandleSeries {
    let mut rng = rand::thread_rng();

    let base_price: f64 = rng.gen_range(BASE_PRICE_RANGE);
    let mut price = base_price;
    let mut bars = Vec::with_capacity(FALLBACK_POINTS);

    for i in 0..FALLBACK_POINTS {
        let step: f64 = rng.gen_range(-1.0..=1.0);
        price += VOLATILITY * price * step;
        if price <= 0.0 {
            // 바닥 보호: 비양수 가격은 기준가의 절반으로 재설정
            price = base_price / 2.0;
        }

        bars.push(Bar {
            ts: now - (FALLBACK_POINTS as i64 - 1 - i as i64) * 86_400,
            open: price * 1.01,
            high: price * 1.02,
            low: price * 0.98,
            close: price,
            volume: rng.gen_range(VOLUME_RANGE),
        });
    }

    CandleSeries::from_bars(&bars, true)
}

/// 합성 기업 프로필 생성.
///
/// 국가/통화/거래소/업종은 고정 상수, 수치 필드는 균등 분포 난수입니다.
/// 이름은 "{symbol} Corp (Mock)" 형태로 명확히 합성임을 드러냅니다.
pub fn synthetic_profile(symbol: &str) -> CompanyProfile {
    let mut rng = rand::thread_rng();

    let mut profile = CompanyProfile::for_symbol(symbol);
    profile.country = "US".to_string();
    profile.currency = "USD".to_string();
    profile.exchange = "NASDAQ".to_string();
    profile.finnhub_industry = "Technology".to_string();
    profile.logo = PLACEHOLDER_LOGO_URL.to_string();
    profile.name = format!("{} Corp (Mock)", symbol);
    profile.market_capitalization = rng.gen_range(10_000.0..=1_000_000.0);
    profile.share_outstanding = Some(rng.gen_range(100.0..=1_000.0));
    profile.pe_ratio = Some(rng.gen_range(10.0..=40.0));
    profile.synthetic = true;
    profile
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candle_series_shape() {
        let series = synthetic_candles();

        assert_eq!(series.len(), FALLBACK_POINTS);
        assert_eq!(series.c.len(), series.h.len());
        assert_eq!(series.h.len(), series.l.len());
        assert_eq!(series.l.len(), series.o.len());
        assert_eq!(series.o.len(), series.v.len());
        assert_eq!(series.v.len(), series.t.len());
        assert_eq!(series.s, "ok");
        assert!(series.synthetic);
    }

    #[test]
    fn test_close_prices_strictly_positive_over_many_runs() {
        for _ in 0..1_000 {
            let series = synthetic_candles();
            assert!(series.c.iter().all(|&c| c > 0.0));
        }
    }

    #[test]
    fn test_ohlc_derived_from_same_walk() {
        let series = synthetic_candles();

        for i in 0..series.len() {
            let close = series.c[i];
            assert!((series.o[i] - close * 1.01).abs() < 1e-9);
            assert!((series.h[i] - close * 1.02).abs() < 1e-9);
            assert!((series.l[i] - close * 0.98).abs() < 1e-9);
            // 고가 >= 시가/종가 >= 저가
            assert!(series.h[i] >= series.o[i]);
            assert!(series.o[i] >= series.l[i]);
        }
    }

    #[test]
    fn test_timestamps_daily_spacing_ending_now() {
        let now = 1_700_000_000;
        let series = synthetic_candles_at(now);

        assert_eq!(series.t[FALLBACK_POINTS - 1], now);
        for pair in series.t.windows(2) {
            assert_eq!(pair[1] - pair[0], 86_400);
        }
    }

    #[test]
    fn test_volume_within_range() {
        let series = synthetic_candles();
        assert!(series
            .v
            .iter()
            .all(|&v| (100_000..=5_000_000).contains(&v)));
    }

    #[test]
    fn test_profile_fields() {
        let profile = synthetic_profile("TSLA");

        assert_eq!(profile.ticker, "TSLA");
        assert_eq!(profile.name, "TSLA Corp (Mock)");
        assert_eq!(profile.country, "US");
        assert_eq!(profile.currency, "USD");
        assert!(profile.synthetic);
        assert!((10_000.0..=1_000_000.0).contains(&profile.market_capitalization));
        assert!((100.0..=1_000.0).contains(&profile.share_outstanding.unwrap()));
        assert!((10.0..=40.0).contains(&profile.pe_ratio.unwrap()));
    }
}
