//! 추세 스코어링.
//!
//! 회귀 기울기와 장기 모멘텀의 두 가지 시그널을 합산합니다.

use rust_decimal::Decimal;

use crate::features::FeatureRow;

use super::ComponentScore;

/// 최신 피처 행의 추세 시그널을 점수화합니다.
///
/// - trend_slope > 0: +20, 아니면 -10
/// - momentum_20 > 0: +15
pub fn score(row: &FeatureRow) -> ComponentScore {
    let mut raw = 0.0;
    let mut reasons = Vec::new();

    if row.trend_slope > Decimal::ZERO {
        raw += 20.0;
        reasons.push("Trend slope positive".to_string());
    } else {
        raw -= 10.0;
        reasons.push("Trend slope negative".to_string());
    }

    if row.momentum_20 > Decimal::ZERO {
        raw += 15.0;
        reasons.push("20-day momentum positive".to_string());
    }

    ComponentScore::new(raw, reasons)
}
