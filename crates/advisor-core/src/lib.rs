//! # Advisor Core
//!
//! 하이브리드 주식 어드바이저의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 어드바이저 시스템 전반에서 사용되는 기본 타입을 제공합니다:
//! - OHLCV 바 데이터 구조체
//! - 심볼 정의
//! - 의사결정 결과 타입 (DecisionResult, ScoreComponent)
//! - 설정 관리
//! - 로깅 인프라
//! - 에러 타입

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod types;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
pub use types::*;
