//! 시그널 스코어링 컴포넌트.
//!
//! 다섯 개의 독립적인 컴포넌트가 각각 최신 피처 행(패턴은 원시 바의
//! 최근 3개)을 제한된 raw 점수와 사람이 읽을 수 있는 근거 목록으로
//! 매핑합니다. 모두 순수 함수이며 부수효과가 없고 평가 순서와
//! 무관합니다.
//!
//! | 컴포넌트 | 입력 | raw 범위 |
//! |---|---|---|
//! | technical | 최신 피처 행 | 대략 [-35, +35] |
//! | trend | 최신 피처 행 | 대략 [-10, +35] |
//! | sentiment | 최신 피처 행 | [-21, +23] |
//! | pattern | 원시 바 최근 3개 | [-15, +50] |
//! | risk | 최신 피처 행 | [-5, +10] |
//!
//! raw 점수의 정규화(+50 오프셋, [0,100] 클램프)는 결합기의 책임입니다.

pub mod pattern;
pub mod risk;
pub mod sentiment;
pub mod technical;
pub mod trend;

use serde::{Deserialize, Serialize};

/// 단일 컴포넌트의 스코어링 결과.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentScore {
    /// 부호 있는 raw 점수.
    pub raw: f64,
    /// 사람이 읽을 수 있는 근거 목록 (순서 보존).
    pub reasons: Vec<String>,
}

impl ComponentScore {
    /// 새 스코어링 결과 생성.
    pub fn new(raw: f64, reasons: Vec<String>) -> Self {
        Self { raw, reasons }
    }

    /// 단일 근거를 가진 중립(0점) 결과.
    pub fn neutral(reason: impl Into<String>) -> Self {
        Self {
            raw: 0.0,
            reasons: vec![reason.into()],
        }
    }
}
