//! 도메인 모델.
//!
//! 어드바이저 파이프라인의 입출력 타입을 정의합니다:
//! - `Bar` - OHLCV 가격 바
//! - `Decision`, `DecisionResult`, `ScoreComponent` - 의사결정 결과

pub mod bar;
pub mod decision;

pub use bar::Bar;
pub use decision::{
    ConfidenceLevel, Decision, DecisionResult, QuickReport, ScoreComponent,
};
