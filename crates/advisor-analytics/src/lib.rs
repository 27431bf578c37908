//! # Advisor Analytics
//!
//! 시그널 스코어링과 하이브리드 의사결정 파이프라인의 핵심 크레이트입니다.
//!
//! 데이터는 엄격히 아래 방향으로만 흐릅니다:
//!
//! ```text
//! OHLCV 바 → 피처 테이블 → {5개 스코어링 컴포넌트} ∥ {추세 확률 오라클}
//!          → 하이브리드 결합기 → DecisionResult
//! ```
//!
//! # 모듈 구성
//!
//! - [`indicators`] - 기술적 지표 라이브러리 (RSI, EMA, MACD, ATR 등)
//! - [`features`] - 지표를 적용해 피처 테이블을 만드는 빌더
//! - [`scoring`] - 기술/추세/심리/패턴/리스크 스코어링 컴포넌트
//! - [`oracle`] - 추세 확률 오라클 어댑터 (LSTM, 중립 폴백)
//! - [`decision`] - 하이브리드/심플 의사결정 엔진
//! - [`service`] - 저장소와 오라클을 묶는 어드바이저리 서비스

pub mod decision;
pub mod features;
pub mod indicators;
pub mod oracle;
pub mod scoring;
pub mod service;

pub use decision::{ComponentWeights, HybridEngine, ScoringStrategy, SimpleEngine};
pub use features::{FeatureBuilder, FeatureConfig, FeatureRow};
pub use indicators::{IndicatorEngine, IndicatorError, IndicatorResult};
pub use oracle::{MockOracle, NeutralOracle, TrendOracle, SEQUENCE_LENGTH};
#[cfg(feature = "ml")]
pub use oracle::{OnnxOracle, OracleConfig};
pub use scoring::ComponentScore;
pub use service::AdvisorService;
