//! 호출자 대면 출력 스키마.
//!
//! 모든 타입은 요청마다 새로 생성되며 응답 전송 후 폐기됩니다.
//! 요청 간 공유되는 가변 상태는 없습니다.

pub mod candle;
pub mod profile;

pub use candle::{Bar, CandleSeries};
pub use profile::{CompanyProfile, PLACEHOLDER_LOGO_URL};
