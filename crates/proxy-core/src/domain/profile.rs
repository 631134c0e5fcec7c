//! 기업 프로필 타입.

use serde::{Deserialize, Serialize};

/// upstream에 로고가 없을 때 사용하는 플레이스홀더 이미지 URL.
pub const PLACEHOLDER_LOGO_URL: &str = "https://via.placeholder.com/128";

/// Finnhub 호환 기업 프로필 응답.
///
/// upstream에 해당 필드가 없어도 모든 필드가 출력에 포함됩니다
/// (기본값 또는 JSON null). 요청마다 새로 생성되며 저장되지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyProfile {
    /// 국가 코드
    pub country: String,
    /// 통화 코드
    pub currency: String,
    /// 거래소 이름
    pub exchange: String,
    /// 업종 분류
    #[serde(rename = "finnhubIndustry")]
    pub finnhub_industry: String,
    /// IPO 일자 (YYYY-MM-DD)
    pub ipo: String,
    /// 로고 이미지 URL
    pub logo: String,
    /// 시가총액 (백만 단위)
    #[serde(rename = "marketCapitalization")]
    pub market_capitalization: f64,
    /// 기업명
    pub name: String,
    /// 전화번호
    pub phone: String,
    /// 발행주식수 (백만 단위)
    #[serde(rename = "shareOutstanding")]
    pub share_outstanding: Option<f64>,
    /// 요청된 심볼 (그대로 반영)
    pub ticker: String,
    /// 웹사이트 URL
    pub weburl: String,
    /// 주가수익비율 (PER)
    #[serde(rename = "peRatio")]
    pub pe_ratio: Option<f64>,
    /// 합성(폴백) 데이터 여부
    pub synthetic: bool,
}

impl CompanyProfile {
    /// 요청 심볼만 채워진 기본 프로필.
    ///
    /// 정규화기와 합성 생성기는 이 값을 시작점으로 필드를 채웁니다.
    pub fn for_symbol(symbol: &str) -> Self {
        Self {
            country: String::new(),
            currency: String::new(),
            exchange: String::new(),
            finnhub_industry: String::new(),
            ipo: String::new(),
            logo: PLACEHOLDER_LOGO_URL.to_string(),
            market_capitalization: 0.0,
            name: symbol.to_string(),
            phone: String::new(),
            share_outstanding: None,
            ticker: symbol.to_string(),
            weburl: String::new(),
            pe_ratio: None,
            synthetic: false,
        }
    }
}
