//! 프록시 엔드포인트 통합 테스트.
//!
//! mockito로 upstream 제공자를 흉내 내고 tower의 `oneshot`으로
//! 라우터에 요청을 보내 폴백 사다리 전체를 검증합니다.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use mockito::Matcher;
use serde_json::{json, Value};
use tower::ServiceExt;

use proxy_api::{create_api_router, AppState};
use proxy_core::{CandleSeries, CompanyProfile, FallbackPolicy, ProxyConfig};

/// mock upstream을 가리키는 앱 생성.
fn app_with_upstream(base_url: &str) -> Router {
    app_with_policy(base_url, FallbackPolicy::FallbackOnUpstreamFailure)
}

fn app_with_policy(base_url: &str, policy: FallbackPolicy) -> Router {
    let config = ProxyConfig {
        upstream_base_url: base_url.to_string(),
        rapidapi_key: Some("test-key".to_string()),
        fallback_policy: policy,
        ..Default::default()
    };
    create_api_router().with_state(Arc::new(AppState::new(config).unwrap()))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, value)
}

/// 밀리초 타임스탬프 일별 레코드 생성 헬퍼.
fn price_row(ts_sec: i64, close: Option<f64>) -> Value {
    json!({
        "date": ts_sec * 1000,
        "type": "regularMarket",
        "open": close.map(|c| c - 1.0),
        "high": close.map(|c| c + 2.0),
        "low": close.map(|c| c - 2.0),
        "close": close,
        "volume": 500_000
    })
}

fn assert_aligned(series: &CandleSeries) {
    assert_eq!(series.c.len(), series.h.len());
    assert_eq!(series.h.len(), series.l.len());
    assert_eq!(series.l.len(), series.o.len());
    assert_eq!(series.o.len(), series.v.len());
    assert_eq!(series.v.len(), series.t.len());
}

// ==================== 입력 검증 ====================

#[tokio::test]
async fn missing_candle_parameters_return_400_with_error_code() {
    // 네 파라미터 각각 하나씩 누락
    let cases = [
        "/finnhub-proxy/stock/candle?resolution=D&from=1&to=2",
        "/finnhub-proxy/stock/candle?symbol=AAPL&from=1&to=2",
        "/finnhub-proxy/stock/candle?symbol=AAPL&resolution=D&to=2",
        "/finnhub-proxy/stock/candle?symbol=AAPL&resolution=D&from=1",
    ];

    for uri in cases {
        let (status, body) = get(app_with_upstream("http://127.0.0.1:1"), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "uri: {}", uri);
        assert_eq!(body["code"], "MISSING_PARAMETER");
    }
}

#[tokio::test]
async fn non_numeric_timestamp_returns_400() {
    let (status, body) = get(
        app_with_upstream("http://127.0.0.1:1"),
        "/finnhub-proxy/stock/candle?symbol=AAPL&resolution=D&from=abc&to=2",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_PARAMETER");
}

#[tokio::test]
async fn missing_profile_symbol_returns_400() {
    let (status, body) = get(
        app_with_upstream("http://127.0.0.1:1"),
        "/finnhub-proxy/stock/profile2",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MISSING_PARAMETER");
}

// ==================== 캔들: 정상 경로 ====================

#[tokio::test]
async fn candle_success_filters_window_and_aligns_sequences() {
    let t0: i64 = 1_700_000_000;
    let t1: i64 = 1_702_592_000;

    // 45개 레코드, 그중 40개만 non-null close
    let rows: Vec<Value> = (0..45)
        .map(|i| {
            let close = if i % 9 == 8 { None } else { Some(150.0 + i as f64) };
            price_row(t0 - 5 * 86_400 + i * 86_400, close)
        })
        .collect();

    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/stock/v2/get-historical-data")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"prices": rows}).to_string())
        .create_async()
        .await;

    let uri = format!(
        "/finnhub-proxy/stock/candle?symbol=AAPL&resolution=D&from={}&to={}",
        t0, t1
    );
    let (status, body) = get(app_with_upstream(&server.url()), &uri).await;

    assert_eq!(status, StatusCode::OK);
    let series: CandleSeries = serde_json::from_value(body).unwrap();

    assert_aligned(&series);
    assert_eq!(series.s, "ok");
    assert!(!series.synthetic);
    assert!(series.len() <= 40);
    assert!(!series.is_empty());
    // 타임스탬프는 모두 [from, to] 범위(포함) 안에 있어야 함
    assert!(series.t.iter().all(|&t| t >= t0 && t <= t1));
}

// ==================== 캔들: 폴백 사다리 ====================

#[tokio::test]
async fn throttled_upstream_returns_synthetic_200() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/stock/v2/get-historical-data")
        .match_query(Matcher::Any)
        .with_status(429)
        .create_async()
        .await;

    let (status, body) = get(
        app_with_upstream(&server.url()),
        "/finnhub-proxy/stock/candle?symbol=AAPL&resolution=D&from=1700000000&to=1702592000",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let series: CandleSeries = serde_json::from_value(body).unwrap();

    assert_eq!(series.len(), 30);
    assert_eq!(series.s, "ok");
    assert!(series.synthetic);
    assert_aligned(&series);
}

#[tokio::test]
async fn zero_usable_records_returns_synthetic_not_error() {
    let rows: Vec<Value> = (0..5)
        .map(|i| price_row(1_700_000_000 + i * 86_400, None))
        .collect();

    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/stock/v2/get-historical-data")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"prices": rows}).to_string())
        .create_async()
        .await;

    let (status, body) = get(
        app_with_upstream(&server.url()),
        "/finnhub-proxy/stock/candle?symbol=AAPL&resolution=D&from=1700000000&to=1702592000",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let series: CandleSeries = serde_json::from_value(body).unwrap();
    assert_eq!(series.len(), 30);
    assert!(series.synthetic);
}

#[tokio::test]
async fn other_upstream_http_error_is_propagated() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/stock/v2/get-historical-data")
        .match_query(Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let (status, body) = get(
        app_with_upstream(&server.url()),
        "/finnhub-proxy/stock/candle?symbol=AAPL&resolution=D&from=1700000000&to=1702592000",
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "UPSTREAM_ERROR");
}

#[tokio::test]
async fn transport_failure_returns_synthetic_200() {
    // 아무것도 listen하지 않는 주소로 연결 오류 유도
    let (status, body) = get(
        app_with_upstream("http://127.0.0.1:1"),
        "/finnhub-proxy/stock/candle?symbol=AAPL&resolution=D&from=1700000000&to=1702592000",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let series: CandleSeries = serde_json::from_value(body).unwrap();
    assert!(series.synthetic);
    assert_eq!(series.len(), 30);
}

#[tokio::test]
async fn propagate_policy_surfaces_absorbed_failures_as_502() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/stock/v2/get-historical-data")
        .match_query(Matcher::Any)
        .with_status(429)
        .create_async()
        .await;

    let (status, body) = get(
        app_with_policy(&server.url(), FallbackPolicy::PropagateUpstreamFailure),
        "/finnhub-proxy/stock/candle?symbol=AAPL&resolution=D&from=1700000000&to=1702592000",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], "UPSTREAM_UNAVAILABLE");
}

// ==================== 프로필 ====================

#[tokio::test]
async fn profile_success_maps_statistics_shape() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/stock/v2/get-statistics")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "quoteType": {"longName": "Apple Inc.", "exchange": "NMS"},
                "summaryDetail": {
                    "marketCap": {"raw": 3_000_000_000_000.0},
                    "trailingPE": {"raw": 31.5},
                    "currency": "USD"
                },
                "defaultKeyStatistics": {
                    "sharesOutstanding": {"raw": 15_500_000_000.0}
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let (status, body) = get(
        app_with_upstream(&server.url()),
        "/finnhub-proxy/stock/profile2?symbol=AAPL",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let profile: CompanyProfile = serde_json::from_value(body).unwrap();

    assert_eq!(profile.name, "Apple Inc.");
    assert_eq!(profile.ticker, "AAPL");
    assert_eq!(profile.market_capitalization, 3_000_000.0);
    assert_eq!(profile.pe_ratio, Some(31.5));
    assert!(!profile.synthetic);
}

#[tokio::test]
async fn profile_throttled_returns_synthetic_200() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/stock/v2/get-statistics")
        .match_query(Matcher::Any)
        .with_status(403)
        .create_async()
        .await;

    let (status, body) = get(
        app_with_upstream(&server.url()),
        "/finnhub-proxy/stock/profile2?symbol=TSLA",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let profile: CompanyProfile = serde_json::from_value(body).unwrap();

    assert_eq!(profile.name, "TSLA Corp (Mock)");
    assert_eq!(profile.ticker, "TSLA");
    assert!(profile.synthetic);
    assert!(profile.pe_ratio.is_some());
}

#[tokio::test]
async fn profile_empty_payload_returns_synthetic_200() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/stock/v2/get-statistics")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("{}")
        .create_async()
        .await;

    let (status, body) = get(
        app_with_upstream(&server.url()),
        "/finnhub-proxy/stock/profile2?symbol=NVDA",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let profile: CompanyProfile = serde_json::from_value(body).unwrap();
    assert!(profile.synthetic);
}

#[tokio::test]
async fn profile_other_http_error_is_propagated() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/stock/v2/get-statistics")
        .match_query(Matcher::Any)
        .with_status(404)
        .create_async()
        .await;

    let (status, body) = get(
        app_with_upstream(&server.url()),
        "/finnhub-proxy/stock/profile2?symbol=NOPE",
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "UPSTREAM_ERROR");
}
