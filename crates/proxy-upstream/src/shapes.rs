//! 알려진 upstream 페이로드 형태.
//!
//! 관찰된 제공자 응답 형태를 태그드 유니언으로 모델링하고 형태마다
//! 전용 어댑터를 둡니다. 제공자 포맷 변동은 이 모듈 안에서만
//! 흡수됩니다.
//!
//! # 캔들 형태
//!
//! - [`HistoricalData`]: `prices` 배열, `date`가 **밀리초** 단위,
//!   `type` 마커 포함 (정규장 여부)
//! - [`HistoryItems`]: `items` 배열, `date_utc`가 이미 **초** 단위,
//!   `type` 마커 없음
//!
//! # 프로필 형태
//!
//! - [`StatisticsModules`]: `quoteType`/`summaryDetail` 등 중첩 모듈,
//!   수치가 `{ raw: number }`로 감싸져 있으며 시가총액·발행주식수는
//!   백만 단위로 환산 필요
//! - [`FlatProfile`]: 평탄한 프로필 필드, 수치는 이미 백만 단위

use serde::Deserialize;

use proxy_core::Bar;

// ==================== 공통 ====================

/// 평탄한 숫자 또는 `{ raw: number }` 래핑을 모두 수용하는 헬퍼.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    /// 평탄한 숫자
    Plain(f64),
    /// `{ "raw": 123.0, "fmt": "123" }` 형태의 래핑
    Wrapped { raw: f64 },
}

impl RawNumber {
    /// 래핑을 풀어 값을 반환.
    pub fn value(&self) -> f64 {
        match self {
            RawNumber::Plain(v) => *v,
            RawNumber::Wrapped { raw } => *raw,
        }
    }
}

// ==================== 캔들 형태 ====================

/// 캔들 응답의 알려진 형태들.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CandlePayload {
    /// get-historical-data 형태 (밀리초 타임스탬프)
    HistoricalData(HistoricalData),
    /// history 아이템 형태 (초 타임스탬프)
    HistoryItems(HistoryItems),
}

/// `prices` 배열 기반 과거 데이터 응답.
#[derive(Debug, Deserialize)]
pub struct HistoricalData {
    pub prices: Vec<HistoricalRow>,
}

/// 일별 가격 레코드 (밀리초 `date`, `type` 마커).
#[derive(Debug, Deserialize)]
pub struct HistoricalRow {
    /// 밀리초 단위 타임스탬프
    #[serde(default)]
    pub date: Option<i64>,
    /// 레코드 종류 ("regularMarket"만 정규장 데이터)
    #[serde(default, rename = "type")]
    pub row_type: Option<String>,
    #[serde(default)]
    pub open: Option<f64>,
    #[serde(default)]
    pub high: Option<f64>,
    #[serde(default)]
    pub low: Option<f64>,
    #[serde(default)]
    pub close: Option<f64>,
    #[serde(default)]
    pub volume: Option<u64>,
}

/// `items` 배열 기반 히스토리 응답.
#[derive(Debug, Deserialize)]
pub struct HistoryItems {
    pub items: Vec<HistoryItem>,
}

/// 일별 가격 레코드 (초 단위 `date_utc`, 마커 없음).
#[derive(Debug, Deserialize)]
pub struct HistoryItem {
    /// 초 단위 타임스탬프
    #[serde(default)]
    pub date_utc: Option<i64>,
    #[serde(default)]
    pub open: Option<f64>,
    #[serde(default)]
    pub high: Option<f64>,
    #[serde(default)]
    pub low: Option<f64>,
    #[serde(default)]
    pub close: Option<f64>,
    #[serde(default)]
    pub volume: Option<u64>,
}

impl CandlePayload {
    /// 사용 가능한 레코드만 정규화된 bar로 변환.
    ///
    /// upstream이 전달한 순서를 보존합니다 (재정렬 없음).
    pub fn bars(&self) -> Vec<Bar> {
        match self {
            CandlePayload::HistoricalData(data) => data.bars(),
            CandlePayload::HistoryItems(data) => data.bars(),
        }
    }
}

impl HistoricalData {
    /// 엄격한 사용성 규칙: 정규장(`type == "regularMarket"`) 레코드 중
    /// `open`과 `close`가 모두 non-null인 것만 채택. 밀리초 타임스탬프는
    /// 1000으로 내림 나눗셈하여 초로 변환합니다.
    fn bars(&self) -> Vec<Bar> {
        self.prices
            .iter()
            .filter(|row| {
                row.row_type.as_deref() == Some("regularMarket")
                    && row.open.is_some()
                    && row.close.is_some()
                    && row.date.is_some()
            })
            .map(|row| {
                let close = row.close.unwrap_or_default();
                Bar {
                    ts: row.date.unwrap_or_default().div_euclid(1000),
                    open: row.open.unwrap_or_default(),
                    high: row.high.unwrap_or(close),
                    low: row.low.unwrap_or(close),
                    close,
                    volume: row.volume.unwrap_or(0),
                }
            })
            .collect()
    }
}

impl HistoryItems {
    /// 기본 사용성 규칙: `close`가 non-null인 레코드만 채택.
    /// 타임스탬프는 이미 초 단위이므로 변환하지 않습니다.
    fn bars(&self) -> Vec<Bar> {
        self.items
            .iter()
            .filter(|item| item.close.is_some() && item.date_utc.is_some())
            .map(|item| {
                let close = item.close.unwrap_or_default();
                Bar {
                    ts: item.date_utc.unwrap_or_default(),
                    open: item.open.unwrap_or(close),
                    high: item.high.unwrap_or(close),
                    low: item.low.unwrap_or(close),
                    close,
                    volume: item.volume.unwrap_or(0),
                }
            })
            .collect()
    }
}

// ==================== 프로필 형태 ====================

/// 프로필 응답의 알려진 형태들.
///
/// `quoteType` 모듈 존재 여부가 두 형태를 구분합니다.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ProfilePayload {
    /// get-statistics 형태 (중첩 모듈, `{raw}` 래핑)
    Statistics(StatisticsModules),
    /// 평탄한 프로필 형태 (이미 백만 단위로 환산된 수치)
    Flat(FlatProfile),
}

/// 통계 응답의 중첩 모듈들.
#[derive(Debug, Deserialize)]
pub struct StatisticsModules {
    #[serde(rename = "quoteType")]
    pub quote_type: QuoteType,
    #[serde(default, rename = "summaryDetail")]
    pub summary_detail: Option<SummaryDetail>,
    #[serde(default, rename = "defaultKeyStatistics")]
    pub key_statistics: Option<KeyStatistics>,
    #[serde(default, rename = "summaryProfile")]
    pub summary_profile: Option<SummaryProfile>,
}

#[derive(Debug, Deserialize)]
pub struct QuoteType {
    #[serde(default, rename = "longName")]
    pub long_name: Option<String>,
    #[serde(default, rename = "shortName")]
    pub short_name: Option<String>,
    #[serde(default)]
    pub exchange: Option<String>,
}

impl QuoteType {
    /// 채워진 필드가 하나도 없는지 확인 (사용성 판정에 사용).
    pub fn is_empty(&self) -> bool {
        self.long_name.is_none() && self.short_name.is_none() && self.exchange.is_none()
    }
}

#[derive(Debug, Deserialize)]
pub struct SummaryDetail {
    #[serde(default, rename = "marketCap")]
    pub market_cap: Option<RawNumber>,
    #[serde(default, rename = "trailingPE")]
    pub trailing_pe: Option<RawNumber>,
    #[serde(default)]
    pub currency: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct KeyStatistics {
    #[serde(default, rename = "sharesOutstanding")]
    pub shares_outstanding: Option<RawNumber>,
}

#[derive(Debug, Deserialize)]
pub struct SummaryProfile {
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

/// 평탄한 프로필 형태.
///
/// 모든 필드가 선택적이므로 untagged 매칭에서 항상 성공합니다.
/// 비어 있는 경우 정규화기가 사용 불가로 판정합니다.
#[derive(Debug, Deserialize)]
pub struct FlatProfile {
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub exchange: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default, rename = "ipoDate")]
    pub ipo_date: Option<String>,
    #[serde(default, rename = "logo_url")]
    pub logo_url: Option<String>,
    /// 시가총액, 이미 백만 단위
    #[serde(default, rename = "marketCap")]
    pub market_cap: Option<f64>,
    #[serde(default, rename = "longName")]
    pub long_name: Option<String>,
    #[serde(default, rename = "shortName")]
    pub short_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    /// 발행주식수, 이미 백만 단위
    #[serde(default, rename = "sharesOutstanding")]
    pub shares_outstanding: Option<f64>,
}

impl FlatProfile {
    /// 채워진 필드가 하나도 없는지 확인 (사용성 판정에 사용).
    pub fn is_empty(&self) -> bool {
        self.country.is_none()
            && self.currency.is_none()
            && self.exchange.is_none()
            && self.industry.is_none()
            && self.ipo_date.is_none()
            && self.logo_url.is_none()
            && self.market_cap.is_none()
            && self.long_name.is_none()
            && self.short_name.is_none()
            && self.phone.is_none()
            && self.website.is_none()
            && self.shares_outstanding.is_none()
    }
}
