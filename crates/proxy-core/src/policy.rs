//! 폴백 정책.
//!
//! "가용성 우선" 동작(upstream 실패를 합성 데이터로 가리는 것)을
//! 암묵 규칙이 아닌 이름 있는 교체 가능한 전략으로 명시합니다.

/// upstream 실패 시 응답 전략.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// 스로틀링/전송 오류/사용 불가 페이로드를 합성 데이터 200으로 흡수.
    ///
    /// 차트 가용성을 우선하는 기본 동작입니다. 호출자는 응답의
    /// `synthetic` 필드로 합성 여부를 구분합니다.
    FallbackOnUpstreamFailure,
    /// 흡수 대신 502로 upstream 실패를 그대로 드러냄.
    PropagateUpstreamFailure,
}

impl Default for FallbackPolicy {
    fn default() -> Self {
        Self::FallbackOnUpstreamFailure
    }
}

impl std::str::FromStr for FallbackPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fallback" => Ok(Self::FallbackOnUpstreamFailure),
            "propagate" => Ok(Self::PropagateUpstreamFailure),
            _ => Err(format!("Unknown fallback policy: {}", s)),
        }
    }
}

impl FallbackPolicy {
    /// 흡수 가능한 upstream 실패를 합성 데이터로 가리는지 여부.
    pub fn masks_upstream_failures(&self) -> bool {
        matches!(self, Self::FallbackOnUpstreamFailure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_from_str() {
        assert_eq!(
            "fallback".parse::<FallbackPolicy>().unwrap(),
            FallbackPolicy::FallbackOnUpstreamFailure
        );
        assert_eq!(
            "PROPAGATE".parse::<FallbackPolicy>().unwrap(),
            FallbackPolicy::PropagateUpstreamFailure
        );
        assert!("invalid".parse::<FallbackPolicy>().is_err());
    }

    #[test]
    fn test_default_masks_failures() {
        assert!(FallbackPolicy::default().masks_upstream_failures());
        assert!(!FallbackPolicy::PropagateUpstreamFailure.masks_upstream_failures());
    }
}
