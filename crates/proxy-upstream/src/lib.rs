//! upstream 제공자 연동 크레이트.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - upstream 과거 데이터/프로필 엔드포인트 호출 클라이언트
//! - 관찰된 upstream 응답 형태의 태그드 유니언과 형태별 어댑터
//! - upstream 페이로드를 호출자 대면 스키마로 변환하는 정규화기
//! - upstream 실패 분류 (흡수 대상 vs 전파 대상)
//!
//! # 모듈 구성
//!
//! - [`client`]: reqwest 기반 upstream HTTP 클라이언트
//! - [`shapes`]: 알려진 upstream 페이로드 형태
//! - [`normalize`]: 응답 정규화기 (캔들 시리즈, 기업 프로필)
//! - [`error`]: upstream 에러 분류

pub mod client;
pub mod error;
pub mod normalize;
pub mod shapes;

pub use client::UpstreamClient;
pub use error::UpstreamError;
pub use normalize::{normalize_candles, normalize_profile};
