//! 기술적 지표 스코어링.
//!
//! RSI, EMA 교차, MACD의 세 가지 시그널을 합산합니다.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::features::FeatureRow;

use super::ComponentScore;

/// 최신 피처 행의 기술적 지표를 점수화합니다.
///
/// - RSI < 30: +20 (과매도), RSI > 70: -15 (과매수), 그 외 +5 (중립)
/// - ema_diff > 0: +20, 아니면 -10
/// - macd > 0: +15, 아니면 -10
pub fn score(row: &FeatureRow) -> ComponentScore {
    let mut raw = 0.0;
    let mut reasons = Vec::new();

    if row.rsi < dec!(30) {
        raw += 20.0;
        reasons.push("RSI indicates oversold (bullish)".to_string());
    } else if row.rsi > dec!(70) {
        raw -= 15.0;
        reasons.push("RSI indicates overbought (bearish)".to_string());
    } else {
        raw += 5.0;
    }

    if row.ema_diff > Decimal::ZERO {
        raw += 20.0;
        reasons.push("EMA20 above EMA50 (uptrend)".to_string());
    } else {
        raw -= 10.0;
        reasons.push("EMA20 below EMA50 (downtrend)".to_string());
    }

    if row.macd > Decimal::ZERO {
        raw += 15.0;
        reasons.push("MACD positive (momentum bullish)".to_string());
    } else {
        raw -= 10.0;
        reasons.push("MACD negative".to_string());
    }

    ComponentScore::new(raw, reasons)
}
