//! 하이브리드 결합기 (Hybrid Combiner).
//!
//! 다섯 개의 스코어링 컴포넌트와 오라클 확률을 고정 가중치로 결합해
//! 합성 점수, 추천 등급, 신뢰도를 계산합니다.
//!
//! # 알고리즘
//!
//! 1. 각 raw 점수를 `clamp(50 + raw, 0, 100)`으로 정규화
//! 2. 오라클 확률은 `100 × p` (없으면 50)
//! 3. 합성 점수 = Σ 가중치 × 정규화 점수 (risk 제외)
//! 4. risk_adj = (risk_normalized - 50) / 50
//! 5. 신뢰도 = clamp(|합성 - 50| × 1.5 + 25) × (1 + risk_adj × 0.3), 클램프
//! 6. 임계값: ≥75 Strong Buy, ≥60 Buy, ≥40 Hold, 그 외 Avoid
//!
//! 개별 컴포넌트가 계산 불가능해도 전체 의사결정은 중단되지 않습니다.
//! 해당 컴포넌트는 raw 0(정규화 50)과 설명 근거로 축퇴합니다.

use std::collections::BTreeMap;

use advisor_core::{Bar, ConfidenceLevel, Decision, DecisionResult, ScoreComponent};

use crate::features::FeatureRow;
use crate::scoring::{self, ComponentScore};

use super::{normalize_raw, round2, ComponentWeights};

/// 5-시그널 하이브리드 의사결정 엔진.
#[derive(Debug, Default)]
pub struct HybridEngine {
    weights: ComponentWeights,
}

impl HybridEngine {
    /// 기본 가중치로 엔진 생성.
    pub fn new() -> Self {
        Self::default()
    }

    /// 검증된 가중치로 엔진 생성.
    pub fn with_weights(weights: ComponentWeights) -> advisor_core::AdvisorResult<Self> {
        weights.validate()?;
        Ok(Self { weights })
    }

    /// 현재 가중치 참조.
    pub fn weights(&self) -> &ComponentWeights {
        &self.weights
    }

    /// 합성 점수에서 추천 등급 결정 (포함 하한).
    pub fn decision_from_score(final_score: f64) -> Decision {
        if final_score >= 75.0 {
            Decision::StrongBuy
        } else if final_score >= 60.0 {
            Decision::Buy
        } else if final_score >= 40.0 {
            Decision::Hold
        } else {
            Decision::Avoid
        }
    }

    /// 최신 피처 행과 원시 바, 오라클 확률에서 의사결정을 계산합니다.
    ///
    /// `lstm_prob`가 None이면 오라클이 사용 불가였다는 뜻이며, 중립
    /// 정규화 점수 50과 불확실성 근거가 lstm 컴포넌트에 붙습니다.
    pub fn decide(
        &self,
        latest: &FeatureRow,
        bars: &[Bar],
        lstm_prob: Option<f64>,
    ) -> DecisionResult {
        let technical = scoring::technical::score(latest);
        let trend = scoring::trend::score(latest);
        let sentiment = scoring::sentiment::score(latest);
        let pattern = scoring::pattern::score(bars);
        let risk = scoring::risk::score(latest);

        let tech_normalized = normalize_raw(technical.raw);
        let trend_normalized = normalize_raw(trend.raw);
        let sentiment_normalized = normalize_raw(sentiment.raw);
        let pattern_normalized = normalize_raw(pattern.raw);
        let risk_normalized = normalize_raw(risk.raw);

        let (lstm_normalized, lstm_reasons) = match lstm_prob {
            Some(p) => {
                let reason = if p > 0.55 {
                    "LSTM model predicts upward trend"
                } else if p < 0.45 {
                    "LSTM model predicts downward trend"
                } else {
                    "LSTM model shows uncertainty"
                };
                (100.0 * p, vec![reason.to_string()])
            }
            None => (
                50.0,
                vec!["LSTM model unavailable (neutral probability applied)".to_string()],
            ),
        };

        let w = &self.weights;
        let final_score = w.technical * tech_normalized
            + w.trend * trend_normalized
            + w.sentiment * sentiment_normalized
            + w.pattern * pattern_normalized
            + w.lstm * lstm_normalized;

        // risk는 합성 점수가 아니라 신뢰도를 조정
        let risk_adjustment = (risk_normalized - 50.0) / 50.0;
        let confidence = ((final_score - 50.0).abs() * 1.5 + 25.0).clamp(0.0, 100.0);
        let confidence = (confidence * (1.0 + risk_adjustment * 0.3)).clamp(0.0, 100.0);

        let decision = Self::decision_from_score(final_score);

        let explanation = aggregate_explanations(
            [&technical, &trend, &sentiment, &pattern, &risk],
            decision,
        );

        let mut components = BTreeMap::new();
        let mut insert = |name: &str, comp: ComponentScore, normalized: f64, weight: f64| {
            components.insert(
                name.to_string(),
                ScoreComponent::new(name, comp.raw, round2(normalized), weight, comp.reasons),
            );
        };

        insert("technical", technical, tech_normalized, w.technical);
        insert("trend", trend, trend_normalized, w.trend);
        insert("sentiment", sentiment, sentiment_normalized, w.sentiment);
        insert("pattern", pattern, pattern_normalized, w.pattern);
        insert(
            "lstm",
            ComponentScore::new(lstm_prob.unwrap_or(0.5), lstm_reasons),
            lstm_normalized,
            w.lstm,
        );
        insert("risk", risk, risk_normalized, 0.0);

        let confidence = round2(confidence);

        DecisionResult {
            decision,
            final_score: round2(final_score),
            confidence,
            confidence_level: ConfidenceLevel::from_pct(confidence),
            components,
            explanation,
        }
    }
}

/// 설명 집계기 (Explanation Aggregator).
///
/// technical, trend, sentiment, pattern, risk의 고정 순서로 각
/// 컴포넌트의 근거 목록을 이어 붙이고, 추천 등급을 담은 마지막 줄을
/// 덧붙입니다. 순서는 결정론적이며 재현 가능해야 합니다.
fn aggregate_explanations(components: [&ComponentScore; 5], decision: Decision) -> Vec<String> {
    let mut explanation = Vec::new();
    for component in components {
        explanation.extend(component.reasons.iter().cloned());
    }
    explanation.push(format!("Final Decision: {decision}"));
    explanation
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FeatureBuilder;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn uptrend_bars(count: usize) -> Vec<Bar> {
        (0..count)
            .map(|i| {
                let c = Decimal::from(100 + i as i64);
                Bar::new(
                    NaiveDate::from_ymd_opt(2024, 1, 1)
                        .unwrap()
                        .checked_add_days(chrono::Days::new(i as u64))
                        .unwrap(),
                    c - dec!(0.5),
                    c + dec!(1),
                    c - dec!(1),
                    c,
                    dec!(10000),
                )
            })
            .collect()
    }

    fn latest_row(bars: &[Bar]) -> FeatureRow {
        FeatureBuilder::new().build(bars).unwrap().pop().unwrap()
    }

    #[test]
    fn test_decision_thresholds_inclusive() {
        assert_eq!(HybridEngine::decision_from_score(75.0), Decision::StrongBuy);
        assert_eq!(HybridEngine::decision_from_score(60.0), Decision::Buy);
        assert_eq!(HybridEngine::decision_from_score(40.0), Decision::Hold);
        assert_eq!(HybridEngine::decision_from_score(39.99), Decision::Avoid);
    }

    #[test]
    fn test_uptrend_with_bullish_oracle() {
        let bars = uptrend_bars(60);
        let row = latest_row(&bars);
        let engine = HybridEngine::new();

        let result = engine.decide(&row, &bars, Some(0.9));

        assert!(result.scores_in_bounds());
        assert!(result.final_score > 60.0);
        assert_eq!(result.components.len(), 6);
        assert_eq!(result.components["lstm"].normalized_score, 90.0);
    }

    #[test]
    fn test_missing_oracle_degrades_to_neutral() {
        let bars = uptrend_bars(60);
        let row = latest_row(&bars);
        let engine = HybridEngine::new();

        let with_oracle = engine.decide(&row, &bars, Some(0.5));
        let without_oracle = engine.decide(&row, &bars, None);

        // 중립 확률 0.5와 오라클 부재는 같은 합성 점수를 냄
        assert_eq!(with_oracle.final_score, without_oracle.final_score);
        assert!(without_oracle.components["lstm"]
            .reasons
            .iter()
            .any(|r| r.contains("unavailable")));
    }

    #[test]
    fn test_explanation_order_and_final_line() {
        let bars = uptrend_bars(60);
        let row = latest_row(&bars);
        let engine = HybridEngine::new();

        let result = engine.decide(&row, &bars, Some(0.7));

        let last = result.explanation.last().unwrap();
        assert!(last.starts_with("Final Decision: "));

        // lstm 근거는 explanation에 포함되지 않음
        assert!(!result
            .explanation
            .iter()
            .any(|line| line.contains("LSTM")));
    }

    #[test]
    fn test_determinism() {
        let bars = uptrend_bars(60);
        let row = latest_row(&bars);
        let engine = HybridEngine::new();

        let a = engine.decide(&row, &bars, Some(0.7));
        let b = engine.decide(&row, &bars, Some(0.7));

        assert_eq!(a.final_score, b.final_score);
        assert_eq!(a.confidence, b.confidence);
        assert_eq!(a.explanation, b.explanation);
    }

    #[test]
    fn test_risk_modulates_confidence() {
        let bars = uptrend_bars(60);
        let mut row = latest_row(&bars);
        let engine = HybridEngine::new();

        row.atr = dec!(1); // 낮은 변동성
        let stable = engine.decide(&row, &bars, Some(0.7));

        row.atr = dec!(50); // 높은 변동성
        let risky = engine.decide(&row, &bars, Some(0.7));

        // 합성 점수는 같지만 신뢰도는 위험할수록 낮음
        assert_eq!(stable.final_score, risky.final_score);
        assert!(stable.confidence > risky.confidence);
    }
}
