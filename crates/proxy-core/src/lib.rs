//! 프록시 핵심 크레이트.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - 호출자 대면 출력 스키마 (캔들 시리즈, 기업 프로필)
//! - 프로세스 시작 시 한 번 구성되는 설정 값
//! - upstream 실패 시 반환할 합성(폴백) 데이터 생성기
//! - 폴백 동작을 제어하는 명시적 정책
//!
//! # 모듈 구성
//!
//! - [`domain`]: 출력 스키마 타입 (CandleSeries, CompanyProfile)
//! - [`config`]: 환경 변수 기반 설정 (ProxyConfig)
//! - [`policy`]: 폴백 정책 (FallbackPolicy)
//! - [`synthetic`]: 합성 데이터 생성기
//! - [`logging`]: tracing 기반 로깅 초기화

pub mod config;
pub mod domain;
pub mod logging;
pub mod policy;
pub mod synthetic;

pub use config::ProxyConfig;
pub use domain::{Bar, CandleSeries, CompanyProfile, PLACEHOLDER_LOGO_URL};
pub use logging::{init_logging, init_logging_from_env, LogConfig, LogFormat};
pub use policy::FallbackPolicy;
pub use synthetic::{synthetic_candles, synthetic_profile, FALLBACK_POINTS};
