//! 의사결정 결과 타입.
//!
//! 하이브리드 의사결정 파이프라인의 유일한 출력물인 [`DecisionResult`]와
//! 그 구성 요소를 정의합니다. 결과는 반환 즉시 호출자에게 소유권이
//! 넘어가며, 코어는 이를 보관하지 않습니다.

use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::Symbol;

/// 매매 추천 등급.
///
/// 파생된 `Ord`는 Avoid < Hold < Buy < StrongBuy 순서이며,
/// 최종 점수에 대한 단조성 검증에 사용됩니다.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Decision {
    /// 회피 (final_score < 40)
    Avoid,
    /// 보유 (40 <= final_score < 60)
    Hold,
    /// 매수 (60 <= final_score < 75)
    Buy,
    /// 강력 매수 (final_score >= 75)
    StrongBuy,
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::StrongBuy => write!(f, "Strong Buy"),
            Decision::Buy => write!(f, "Buy"),
            Decision::Hold => write!(f, "Hold"),
            Decision::Avoid => write!(f, "Avoid"),
        }
    }
}

/// 의사결정에 대한 신뢰도 수준 라벨.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ConfidenceLevel {
    /// 매우 낮은 신뢰도 (< 20%)
    VeryLow,
    /// 낮은 신뢰도 (20% - 40%)
    Low,
    /// 중간 신뢰도 (40% - 60%)
    Medium,
    /// 높은 신뢰도 (60% - 80%)
    High,
    /// 매우 높은 신뢰도 (>= 80%)
    VeryHigh,
}

impl ConfidenceLevel {
    /// 신뢰도 퍼센트(0 ~ 100)에서 변환.
    pub fn from_pct(pct: f64) -> Self {
        match pct {
            p if p >= 80.0 => ConfidenceLevel::VeryHigh,
            p if p >= 60.0 => ConfidenceLevel::High,
            p if p >= 40.0 => ConfidenceLevel::Medium,
            p if p >= 20.0 => ConfidenceLevel::Low,
            _ => ConfidenceLevel::VeryLow,
        }
    }
}

/// 개별 스코어링 컴포넌트의 결과.
///
/// 요청마다 새로 생성되며 코어에 의해 영속화되지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreComponent {
    /// 컴포넌트 이름 (technical, trend, sentiment, pattern, lstm, risk)
    pub name: String,
    /// 정규화 이전의 원시 점수
    pub raw_score: f64,
    /// 0 ~ 100 범위로 정규화된 점수
    pub normalized_score: f64,
    /// 합성 점수에서의 가중치 (0 ~ 1, risk는 0)
    pub weight: f64,
    /// 사람이 읽을 수 있는 근거 목록 (순서 고정)
    pub reasons: Vec<String>,
}

impl ScoreComponent {
    /// 새 컴포넌트 결과를 생성합니다.
    pub fn new(
        name: impl Into<String>,
        raw_score: f64,
        normalized_score: f64,
        weight: f64,
        reasons: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            raw_score,
            normalized_score,
            weight,
            reasons,
        }
    }
}

/// 하이브리드 의사결정 파이프라인의 최종 결과.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionResult {
    /// 추천 등급
    pub decision: Decision,
    /// 합성 점수 (0 ~ 100, 소수점 2자리)
    pub final_score: f64,
    /// 확신 정도 (0 ~ 100, 소수점 2자리)
    pub confidence: f64,
    /// 신뢰도 라벨
    pub confidence_level: ConfidenceLevel,
    /// 컴포넌트별 점수 (이름 → 컴포넌트, 순서 보장을 위해 BTreeMap)
    pub components: BTreeMap<String, ScoreComponent>,
    /// 고정된 순서의 설명 목록
    pub explanation: Vec<String>,
}

impl DecisionResult {
    /// 점수 한도 불변성을 확인합니다 (디버그/테스트용).
    pub fn scores_in_bounds(&self) -> bool {
        (0.0..=100.0).contains(&self.final_score)
            && (0.0..=100.0).contains(&self.confidence)
            && self
                .components
                .values()
                .all(|c| (0.0..=100.0).contains(&c.normalized_score))
    }
}

/// 단순화된 요약 리포트 (단일 호출 경로에서 사용되는 축약 변형).
///
/// 목표가와 손절가는 변동성과 무관하게 종가 기준 고정 ±5% 밴드입니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuickReport {
    /// 요청된 심볼
    pub symbol: Symbol,
    /// 추천 등급
    pub decision: Decision,
    /// 혼합 점수 (0 ~ 100)
    pub score: f64,
    /// 기술적 3-시그널 점수 (0 ~ 100)
    pub technical_score: f64,
    /// 오라클 확률 × 100
    pub lstm_probability: f64,
    /// 최신 종가
    pub latest_price: Decimal,
    /// 목표가 (종가 × 1.05)
    pub target: Decimal,
    /// 손절가 (종가 × 0.95)
    pub stop: Decimal,
    /// 설명 목록
    pub explanation: Vec<String>,
}
