//! 캔들(OHLCV) 시리즈 타입.

use serde::{Deserialize, Serialize};

/// 정규화된 일봉 하나.
///
/// upstream 응답 형태와 무관하게 타임스탬프는 항상 초 단위입니다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    /// Unix 타임스탬프 (초)
    pub ts: i64,
    /// 시가
    pub open: f64,
    /// 고가
    pub high: f64,
    /// 저가
    pub low: f64,
    /// 종가
    pub close: f64,
    /// 거래량
    pub volume: u64,
}

/// Finnhub 호환 캔들 시리즈 응답.
///
/// 여섯 시퀀스는 항상 같은 길이이며 i번째 요소는 모두 같은 거래일을
/// 나타냅니다. [`CandleSeries::from_bars`]로만 생성하므로 정렬 불변식은
/// 구성 시점에 보장됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandleSeries {
    /// 종가
    pub c: Vec<f64>,
    /// 고가
    pub h: Vec<f64>,
    /// 저가
    pub l: Vec<f64>,
    /// 시가
    pub o: Vec<f64>,
    /// 거래량
    pub v: Vec<u64>,
    /// Unix 타임스탬프 (초)
    pub t: Vec<i64>,
    /// 상태 태그 ("ok")
    pub s: String,
    /// 합성(폴백) 데이터 여부
    pub synthetic: bool,
}

impl CandleSeries {
    /// 정규화된 bar 목록에서 시리즈를 조립합니다.
    ///
    /// bar의 순서를 그대로 유지합니다 (재정렬 없음).
    pub fn from_bars(bars: &[Bar], synthetic: bool) -> Self {
        let mut series = Self {
            c: Vec::with_capacity(bars.len()),
            h: Vec::with_capacity(bars.len()),
            l: Vec::with_capacity(bars.len()),
            o: Vec::with_capacity(bars.len()),
            v: Vec::with_capacity(bars.len()),
            t: Vec::with_capacity(bars.len()),
            s: "ok".to_string(),
            synthetic,
        };

        for bar in bars {
            series.c.push(bar.close);
            series.h.push(bar.high);
            series.l.push(bar.low);
            series.o.push(bar.open);
            series.v.push(bar.volume);
            series.t.push(bar.ts);
        }

        series
    }

    /// 시리즈의 데이터 포인트 수.
    pub fn len(&self) -> usize {
        self.t.len()
    }

    /// 데이터 포인트가 없는지 확인.
    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }
}
