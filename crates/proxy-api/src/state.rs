//! 애플리케이션 공유 상태.
//!
//! 설정은 프로세스 시작 시 한 번 구성되어 핸들러에 참조로 전달됩니다.
//! 요청 간 공유되는 가변 상태는 없습니다.

use proxy_core::ProxyConfig;
use proxy_upstream::{UpstreamClient, UpstreamError};

/// 전체 핸들러가 공유하는 애플리케이션 상태.
#[derive(Debug, Clone)]
pub struct AppState {
    /// 프로세스 시작 시 로드된 설정
    pub config: ProxyConfig,
    /// upstream 제공자 클라이언트
    pub upstream: UpstreamClient,
}

impl AppState {
    /// 설정에서 상태 생성.
    ///
    /// # Errors
    /// upstream HTTP 클라이언트 생성에 실패하면 에러를 반환합니다.
    pub fn new(config: ProxyConfig) -> Result<Self, UpstreamError> {
        let upstream = UpstreamClient::new(&config)?;
        Ok(Self { config, upstream })
    }
}

#[cfg(test)]
pub(crate) fn create_test_state(upstream_base_url: &str) -> AppState {
    let config = ProxyConfig {
        upstream_base_url: upstream_base_url.to_string(),
        rapidapi_key: Some("test-key".to_string()),
        ..Default::default()
    };
    AppState::new(config).unwrap()
}
