//! upstream 에러 타입.
//!
//! 실패를 두 부류로 분류합니다: 합성 데이터로 흡수하는 부류
//! (스로틀링, 전송 오류, 사용 불가 페이로드)와 호출자에게 그대로
//! 전파하는 부류 (그 외 HTTP 에러).

use thiserror::Error;

/// upstream 관련 에러.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// 요청 한도 초과 시그널 (HTTP 403/429)
    #[error("Upstream throttled (HTTP {status})")]
    Throttled { status: u16 },

    /// 전송 계층 실패 (연결 오류, 타임아웃, 본문 파싱 실패)
    #[error("Transport error: {0}")]
    Transport(String),

    /// 스로틀링 외의 non-2xx 상태 (호출자에게 전파)
    #[error("Upstream HTTP error {status}")]
    Http { status: u16 },

    /// 2xx 응답이지만 사용성 검사를 통과하지 못한 페이로드
    #[error("Unusable payload: {0}")]
    Unusable(String),
}

impl UpstreamError {
    /// 합성 데이터로 흡수 가능한 에러인지 확인.
    ///
    /// `Http`만 흡수 불가이며 상태 코드를 그대로 호출자에게 전파합니다.
    pub fn is_absorbable(&self) -> bool {
        !matches!(self, UpstreamError::Http { .. })
    }

    /// 스로틀링 시그널인지 확인.
    pub fn is_throttled(&self) -> bool {
        matches!(self, UpstreamError::Throttled { .. })
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            UpstreamError::Transport(format!("Request timeout: {}", err))
        } else if err.is_connect() {
            UpstreamError::Transport(format!("Connection error: {}", err))
        } else if err.is_decode() {
            UpstreamError::Transport(format!("Malformed response body: {}", err))
        } else {
            UpstreamError::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absorbable_classes() {
        assert!(UpstreamError::Throttled { status: 429 }.is_absorbable());
        assert!(UpstreamError::Transport("timeout".to_string()).is_absorbable());
        assert!(UpstreamError::Unusable("no records".to_string()).is_absorbable());
        assert!(!UpstreamError::Http { status: 500 }.is_absorbable());
    }

    #[test]
    fn test_throttled_detection() {
        assert!(UpstreamError::Throttled { status: 403 }.is_throttled());
        assert!(!UpstreamError::Http { status: 404 }.is_throttled());
    }
}
