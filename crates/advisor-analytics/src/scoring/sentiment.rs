//! 심리(센티먼트) 스코어링.
//!
//! 거래량, 변동성, RSI 극단값을 시장 심리의 프록시로 사용합니다.
//! 뉴스 기반 텍스트 분류는 이 코어의 범위 밖이므로 여기서는
//! 가격/거래량에서 유도 가능한 심리 시그널만 다룹니다.

use rust_decimal_macros::dec;

use crate::features::FeatureRow;

use super::ComponentScore;

/// 최신 피처 행의 심리 시그널을 점수화합니다.
///
/// - 거래량 비율 > 1.3: +10 / < 0.7: -8
/// - 변동성 < 0.015: +5 / > 0.04: -5
/// - RSI > 80: -8 / < 20: +8
///
/// 어떤 규칙도 발화하지 않으면 "Neutral sentiment" 근거를 남깁니다.
pub fn score(row: &FeatureRow) -> ComponentScore {
    let mut raw = 0.0;
    let mut reasons = Vec::new();

    if let Some(ratio) = row.volume_ma_ratio {
        if ratio > dec!(1.3) {
            raw += 10.0;
            reasons.push("Strong volume (bullish sentiment)".to_string());
        } else if ratio < dec!(0.7) {
            raw -= 8.0;
            reasons.push("Weak volume (bearish sentiment)".to_string());
        }
    }

    if let Some(volatility) = row.volatility {
        if volatility < dec!(0.015) {
            raw += 5.0;
            reasons.push("Low volatility (stable sentiment)".to_string());
        } else if volatility > dec!(0.04) {
            raw -= 5.0;
            reasons.push("High volatility (uncertain sentiment)".to_string());
        }
    }

    if row.rsi > dec!(80) {
        raw -= 8.0;
        reasons.push("Oversold extreme (bearish reversal risk)".to_string());
    } else if row.rsi < dec!(20) {
        raw += 8.0;
        reasons.push("Underbought extreme (bullish reversal potential)".to_string());
    }

    if reasons.is_empty() {
        return ComponentScore::neutral("Neutral sentiment");
    }

    ComponentScore::new(raw, reasons)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FeatureBuilder;
    use advisor_core::Bar;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
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
    fn test_strong_volume_low_volatility() {
        let mut row = base_row();
        row.volume_ma_ratio = Some(dec!(1.5));
        row.volatility = Some(dec!(0.01));
        row.rsi = dec!(50);

        let result = score(&row);

        assert_eq!(result.raw, 15.0);
        assert_eq!(result.reasons[0], "Strong volume (bullish sentiment)");
        assert_eq!(result.reasons[1], "Low volatility (stable sentiment)");
    }

    #[test]
    fn test_absent_fields_neutral() {
        let mut row = base_row();
        row.volume_ma_ratio = None;
        row.volatility = None;
        row.rsi = dec!(50);

        let result = score(&row);

        assert_eq!(result.raw, 0.0);
        assert_eq!(result.reasons, vec!["Neutral sentiment".to_string()]);
    }

    #[test]
    fn test_rsi_extremes() {
        let mut row = base_row();
        row.volume_ma_ratio = None;
        row.volatility = None;

        row.rsi = dec!(85);
        let result = score(&row);
        assert_eq!(result.raw, -8.0);
        assert_eq!(result.reasons[0], "Oversold extreme (bearish reversal risk)");

        row.rsi = dec!(15);
        let result = score(&row);
        assert_eq!(result.raw, 8.0);
        assert_eq!(
            result.reasons[0],
            "Underbought extreme (bullish reversal potential)"
        );
    }

    #[test]
    fn test_weak_volume_high_volatility() {
        let mut row = base_row();
        row.volume_ma_ratio = Some(dec!(0.5));
        row.volatility = Some(dec!(0.08));
        row.rsi = dec!(50);

        let result = score(&row);

        assert_eq!(result.raw, -13.0);
    }
}
