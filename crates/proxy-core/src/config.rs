//! 설정 관리.
//!
//! 설정은 프로세스 시작 시 환경 변수에서 한 번 구성되어 이후 참조로
//! 전달됩니다. 전역 가변 상태는 없습니다.

use std::net::SocketAddr;

use crate::policy::FallbackPolicy;

/// upstream 제공자 고정 호스트.
pub const DEFAULT_UPSTREAM_HOST: &str = "yahoo-finance15.p.rapidapi.com";

/// upstream 제공자 기본 base URL.
pub const DEFAULT_UPSTREAM_BASE_URL: &str = "https://yahoo-finance15.p.rapidapi.com";

/// 프록시 서버 설정.
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// 바인딩할 호스트
    pub host: String,
    /// 리스닝할 포트
    pub port: u16,
    /// RapidAPI 키. 미설정 시 upstream 호출은 실패하지만 프로세스는
    /// 기동하며 합성 데이터를 제공합니다.
    pub rapidapi_key: Option<String>,
    /// upstream base URL (테스트에서 mock 서버로 교체 가능)
    pub upstream_base_url: String,
    /// X-RapidAPI-Host 헤더 값
    pub upstream_host: String,
    /// upstream 요청 타임아웃 (초)
    pub upstream_timeout_secs: u64,
    /// upstream 실패 시 응답 전략
    pub fallback_policy: FallbackPolicy,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            rapidapi_key: None,
            upstream_base_url: DEFAULT_UPSTREAM_BASE_URL.to_string(),
            upstream_host: DEFAULT_UPSTREAM_HOST.to_string(),
            upstream_timeout_secs: 10,
            fallback_policy: FallbackPolicy::default(),
        }
    }
}

impl ProxyConfig {
    /// 환경 변수에서 설정 로드.
    ///
    /// # 환경변수
    ///
    /// - `API_HOST`: 바인딩 호스트 (기본값: 127.0.0.1)
    /// - `API_PORT`: 바인딩 포트 (기본값: 5000)
    /// - `RAPIDAPI_KEY_YAHOO_FINANCE`: upstream API 키
    /// - `UPSTREAM_BASE_URL`: upstream base URL 오버라이드
    /// - `UPSTREAM_TIMEOUT_SECS`: upstream 타임아웃 (기본값: 10)
    /// - `FALLBACK_POLICY`: "fallback" | "propagate" (기본값: fallback)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            host: std::env::var("API_HOST").unwrap_or(defaults.host),
            port: std::env::var("API_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            rapidapi_key: std::env::var("RAPIDAPI_KEY_YAHOO_FINANCE")
                .ok()
                .filter(|k| !k.is_empty()),
            upstream_base_url: std::env::var("UPSTREAM_BASE_URL")
                .unwrap_or(defaults.upstream_base_url),
            upstream_host: defaults.upstream_host,
            upstream_timeout_secs: std::env::var("UPSTREAM_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.upstream_timeout_secs),
            fallback_policy: std::env::var("FALLBACK_POLICY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_default(),
        }
    }

    /// 소켓 주소 반환.
    ///
    /// # Errors
    /// `host:port` 형식이 유효하지 않으면 `AddrParseError`를 반환합니다.
    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ProxyConfig::default();

        assert_eq!(config.port, 5000);
        assert!(config.rapidapi_key.is_none());
        assert_eq!(config.upstream_base_url, DEFAULT_UPSTREAM_BASE_URL);
        assert_eq!(config.upstream_timeout_secs, 10);
        assert!(config.fallback_policy.masks_upstream_failures());
    }

    #[test]
    fn test_socket_addr() {
        let config = ProxyConfig::default();
        let addr = config.socket_addr().unwrap();

        assert_eq!(addr.port(), 5000);
    }

    #[test]
    fn test_socket_addr_invalid_host() {
        let config = ProxyConfig {
            host: "not a host".to_string(),
            ..Default::default()
        };
        assert!(config.socket_addr().is_err());
    }
}
