//! upstream HTTP 클라이언트.
//!
//! 인바운드 요청당 upstream 호출 한 번을 수행합니다. 배치, 캐시,
//! 재시도는 없습니다. 모든 요청에 두 개의 고정 헤더
//! (`X-RapidAPI-Key`, `X-RapidAPI-Host`)를 전달합니다.

use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use crate::error::UpstreamError;
use proxy_core::ProxyConfig;

/// upstream 제공자 클라이언트.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: reqwest::Client,
    base_url: String,
    host_header: String,
    api_key: Option<String>,
}

impl UpstreamClient {
    /// 설정에서 클라이언트 생성.
    ///
    /// upstream 무응답이 핸들러를 무한정 붙잡지 않도록 유한한
    /// 타임아웃을 강제합니다.
    ///
    /// # Errors
    /// HTTP 클라이언트 생성에 실패하면 `UpstreamError::Transport`를
    /// 반환합니다.
    pub fn new(config: &ProxyConfig) -> Result<Self, UpstreamError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.upstream_timeout_secs))
            .build()
            .map_err(|e| {
                UpstreamError::Transport(format!("HTTP 클라이언트 생성 실패: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: config.upstream_base_url.clone(),
            host_header: config.upstream_host.clone(),
            api_key: config.rapidapi_key.clone(),
        })
    }

    /// 일봉 캔들 데이터 조회.
    ///
    /// 30일/일봉 고정 창이므로 range=1mo, interval=1d로 요청합니다.
    pub async fn get_candles(&self, symbol: &str) -> Result<Value, UpstreamError> {
        let url = format!(
            "{}/stock/v2/get-historical-data?symbol={}&region=US&range=1mo&interval=1d",
            self.base_url, symbol
        );
        self.request(&url).await
    }

    /// 기업 프로필(통계) 데이터 조회.
    pub async fn get_profile(&self, symbol: &str) -> Result<Value, UpstreamError> {
        let url = format!(
            "{}/stock/v2/get-statistics?symbol={}&region=US",
            self.base_url, symbol
        );
        self.request(&url).await
    }

    /// GET 요청 실행 및 상태별 에러 분류.
    ///
    /// - 403/429 → [`UpstreamError::Throttled`]
    /// - 그 외 non-2xx → [`UpstreamError::Http`]
    /// - 전송/본문 파싱 실패 → [`UpstreamError::Transport`]
    async fn request(&self, url: &str) -> Result<Value, UpstreamError> {
        debug!(url = %url, "upstream 요청");

        let mut request = self
            .client
            .get(url)
            .header("X-RapidAPI-Host", &self.host_header);
        if let Some(key) = &self.api_key {
            request = request.header("X-RapidAPI-Key", key);
        }

        let response = request.send().await?;

        let status = response.status();
        if status.as_u16() == 403 || status.as_u16() == 429 {
            return Err(UpstreamError::Throttled {
                status: status.as_u16(),
            });
        }
        if !status.is_success() {
            return Err(UpstreamError::Http {
                status: status.as_u16(),
            });
        }

        let payload = response
            .json::<Value>()
            .await
            .map_err(|e| UpstreamError::Transport(format!("Malformed response body: {}", e)))?;

        Ok(payload)
    }
}
