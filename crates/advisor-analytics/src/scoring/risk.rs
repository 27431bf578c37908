//! 리스크 스코어링.
//!
//! ATR 대비 가격 비율로 변동성 리스크를 평가합니다. 이 컴포넌트의
//! 점수는 최종 점수 합산에서 제외되고 신뢰도 조정에만 쓰입니다.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::features::FeatureRow;

use super::ComponentScore;

/// 최신 피처 행의 변동성 리스크를 점수화합니다.
///
/// - atr / close < 0.03: +10 (낮은 변동성, 안정)
/// - 그 외: -5 (높은 변동성 리스크)
pub fn score(row: &FeatureRow) -> ComponentScore {
    let low_volatility = row.bar.close > Decimal::ZERO && row.atr / row.bar.close < dec!(0.03);

    if low_volatility {
        ComponentScore::new(10.0, vec!["Low volatility (stable)".to_string()])
    } else {
        ComponentScore::new(-5.0, vec!["High volatility risk".to_string()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FeatureBuilder;
    use advisor_core::Bar;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn base_row() -> FeatureRow {
        let builder = FeatureBuilder::new();
        let bars: Vec<Bar> = (0..60)
            .map(|i| {
                let c = Decimal::from(100 + i as i64);
                Bar::new(
                    NaiveDate::from_ymd_opt(2024, 1, 1)
                        .unwrap()
                        .checked_add_days(chrono::Days::new(i as u64))
                        .unwrap(),
                    c,
                    c + dec!(1),
                    c - dec!(1),
                    c,
                    dec!(1000),
                )
            })
            .collect();
        builder.build(&bars).unwrap().pop().unwrap()
    }

    #[test]
    fn test_low_volatility_stable() {
        let mut row = base_row();
        row.atr = dec!(1);

        let result = score(&row);

        assert_eq!(result.raw, 10.0);
        assert_eq!(result.reasons, vec!["Low volatility (stable)".to_string()]);
    }

    #[test]
    fn test_high_volatility_risk() {
        let mut row = base_row();
        row.atr = dec!(10);

        let result = score(&row);

        assert_eq!(result.raw, -5.0);
        assert_eq!(result.reasons, vec!["High volatility risk".to_string()]);
    }
}
