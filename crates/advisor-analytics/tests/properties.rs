//! 결합기 속성 테스트.
//!
//! 임의의 피처 값에 대해 점수 한도, 단조성, 결정론을 검증합니다.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use advisor_analytics::decision::{ComponentWeights, HybridEngine, SimpleEngine};
use advisor_analytics::{FeatureBuilder, FeatureRow};
use advisor_core::{Bar, Decision};

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

fn base_row(bars: &[Bar]) -> FeatureRow {
    FeatureBuilder::new().build(bars).unwrap().pop().unwrap()
}

fn decimal(v: f64) -> Decimal {
    Decimal::from_f64(v).unwrap_or(Decimal::ZERO)
}

proptest! {
    // 모든 피처 조합에서 점수와 신뢰도는 [0,100]에 머문다
    #[test]
    fn scores_always_in_bounds(
        rsi in 0.0_f64..100.0,
        ema_diff in -50.0_f64..50.0,
        macd in -20.0_f64..20.0,
        slope in -5.0_f64..5.0,
        momentum in -0.5_f64..0.5,
        atr in 0.0_f64..20.0,
        volume_ratio in 0.0_f64..3.0,
        volatility in 0.0_f64..0.1,
        prob in 0.0_f64..1.0,
    ) {
        let bars = uptrend_bars(60);
        let mut row = base_row(&bars);
        row.rsi = decimal(rsi);
        row.ema_diff = decimal(ema_diff);
        row.macd = decimal(macd);
        row.trend_slope = decimal(slope);
        row.momentum_20 = decimal(momentum);
        row.atr = decimal(atr);
        row.volume_ma_ratio = Some(decimal(volume_ratio));
        row.volatility = Some(decimal(volatility));

        let result = HybridEngine::new().decide(&row, &bars, Some(prob));

        prop_assert!(result.scores_in_bounds());
        prop_assert!(!result.explanation.is_empty());
    }

    // 추천 등급은 합성 점수에 대해 단조: 점수를 올리면 약한 등급으로 내려가지 않음
    #[test]
    fn decision_monotonic_in_score(a in 0.0_f64..100.0, b in 0.0_f64..100.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(HybridEngine::decision_from_score(lo) <= HybridEngine::decision_from_score(hi));
        prop_assert!(SimpleEngine::decision_from_score(lo) <= SimpleEngine::decision_from_score(hi));
    }

    // 오라클 확률 단조성: 확률을 올리면 합성 점수도 내려가지 않음
    #[test]
    fn final_score_monotonic_in_probability(p1 in 0.0_f64..1.0, p2 in 0.0_f64..1.0) {
        let (lo, hi) = if p1 <= p2 { (p1, p2) } else { (p2, p1) };
        let bars = uptrend_bars(60);
        let row = base_row(&bars);
        let engine = HybridEngine::new();

        let low = engine.decide(&row, &bars, Some(lo));
        let high = engine.decide(&row, &bars, Some(hi));

        prop_assert!(low.final_score <= high.final_score);
        prop_assert!(low.decision <= high.decision);
    }

    // 결정론: 동일 입력은 항상 동일 결과
    #[test]
    fn pipeline_is_deterministic(prob in 0.0_f64..1.0) {
        let bars = uptrend_bars(60);
        let row = base_row(&bars);
        let engine = HybridEngine::new();

        let a = engine.decide(&row, &bars, Some(prob));
        let b = engine.decide(&row, &bars, Some(prob));

        prop_assert_eq!(a.final_score, b.final_score);
        prop_assert_eq!(a.confidence, b.confidence);
        prop_assert_eq!(a.decision, b.decision);
        prop_assert_eq!(a.explanation, b.explanation);
    }
}

#[test]
fn default_weights_sum_to_one() {
    let w = ComponentWeights::default();
    let sum = w.technical + w.trend + w.sentiment + w.pattern + w.lstm;
    assert!((sum - 1.0).abs() < 1e-9);
    assert!(w.validate().is_ok());
}

#[test]
fn extreme_scores_still_bounded() {
    // 모든 시그널이 최대로 강세일 때도 클램프가 지켜짐
    let bars = uptrend_bars(60);
    let mut row = base_row(&bars);
    row.rsi = dec!(10);
    row.ema_diff = dec!(100);
    row.macd = dec!(100);
    row.trend_slope = dec!(100);
    row.momentum_20 = dec!(1);
    row.atr = Decimal::ZERO;

    let result = HybridEngine::new().decide(&row, &bars, Some(1.0));

    assert!(result.scores_in_bounds());
    assert_eq!(result.decision, Decision::StrongBuy);
}
