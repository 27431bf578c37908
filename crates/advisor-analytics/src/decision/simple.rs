//! 3-시그널 단순 합산기 (Simple Combiner).
//!
//! technical, trend, risk의 raw 점수를 그대로 합산한 뒤 +50 오프셋으로
//! 정규화합니다. 하이브리드 결합기와 임계값이 다릅니다(75/60/45) —
//! 이는 관찰된 시스템의 의도된 비일관성이며 병합하지 않습니다.

use advisor_core::Decision;

use crate::features::FeatureRow;
use crate::scoring;

/// 단순 합산기의 결과.
#[derive(Debug, Clone)]
pub struct SimpleScore {
    /// 정규화된 점수 (0 ~ 100).
    pub score: f64,
    /// 추천 등급.
    pub decision: Decision,
    /// technical, trend, risk 순서의 근거 목록.
    pub explanation: Vec<String>,
}

/// 3-시그널 단순 의사결정 엔진.
#[derive(Debug, Default)]
pub struct SimpleEngine;

impl SimpleEngine {
    /// 새 엔진 생성.
    pub fn new() -> Self {
        Self
    }

    /// 점수에서 추천 등급 결정 (포함 하한, 하이브리드와 다른 임계값).
    pub fn decision_from_score(score: f64) -> Decision {
        if score >= 75.0 {
            Decision::StrongBuy
        } else if score >= 60.0 {
            Decision::Buy
        } else if score >= 45.0 {
            Decision::Hold
        } else {
            Decision::Avoid
        }
    }

    /// 최신 피처 행에서 단순 점수를 계산합니다.
    pub fn evaluate(&self, latest: &FeatureRow) -> SimpleScore {
        let technical = scoring::technical::score(latest);
        let trend = scoring::trend::score(latest);
        let risk = scoring::risk::score(latest);

        let total = technical.raw + trend.raw + risk.raw;
        let score = (50.0 + total).clamp(0.0, 100.0);

        let mut explanation = Vec::new();
        explanation.extend(technical.reasons);
        explanation.extend(trend.reasons);
        explanation.extend(risk.reasons);

        SimpleScore {
            score,
            decision: Self::decision_from_score(score),
            explanation,
        }
    }
}
