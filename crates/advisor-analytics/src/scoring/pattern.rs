//! 캔들 패턴 스코어링.
//!
//! 원시 바 시퀀스의 마지막 3개 캔들에서 반전/지속 패턴을 탐지합니다.
//! 탐지된 패턴의 점수는 가산적으로 누적됩니다.
//!
//! # 탐지 패턴
//! - 해머 (Hammer): 긴 아래꼬리 반전 시그널, +20
//! - 상승/하락 장악형 (Engulfing): ±15
//! - 도지 (Doji): 관망 시그널, +10
//! - 적삼병 (Three White Soldiers): 강한 상승 지속, +20

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use advisor_core::Bar;

use super::ComponentScore;

/// 0으로 나누기 방지용 epsilon.
const EPSILON: Decimal = dec!(0.0000000001);

/// 바의 최근 3개 캔들에서 패턴을 점수화합니다.
///
/// 3개 미만이면 raw 0과 "Insufficient data for pattern analysis" 근거를
/// 반환합니다. 아무 패턴도 없으면 "No significant patterns detected".
pub fn score(bars: &[Bar]) -> ComponentScore {
    if bars.len() < 3 {
        return ComponentScore::neutral("Insufficient data for pattern analysis");
    }

    let window = &bars[bars.len() - 3..];
    let (first, prev, last) = (&window[0], &window[1], &window[2]);

    let mut raw = 0.0;
    let mut reasons = Vec::new();

    let range = last.range() + EPSILON;
    let body_ratio = last.body_size() / range;
    let lower_wick_ratio = last.lower_shadow() / range;

    // 해머: 긴 아래꼬리 + 작은 몸통 + 전일 대비 상승 마감
    if lower_wick_ratio > dec!(0.6) && body_ratio < dec!(0.3) && last.close > prev.close {
        raw += 20.0;
        reasons.push("Hammer pattern (potential reversal)".to_string());
    }

    // 장악형: 부호 있는 몸통이 전일 몸통의 1.3배를 넘고 전일 시가를 돌파
    let signed_body = last.signed_body();
    let prev_body = prev.body_size();
    if signed_body > dec!(1.3) * prev_body && last.close > prev.open {
        raw += 15.0;
        reasons.push("Bullish engulfing pattern".to_string());
    } else if signed_body < dec!(-1.3) * prev_body && last.close < prev.open {
        raw -= 15.0;
        reasons.push("Bearish engulfing pattern".to_string());
    }

    // 도지: 작은 몸통 + 위아래 꼬리 길이가 거의 같음
    let wick_diff = (last.upper_shadow() - last.lower_shadow()).abs();
    if body_ratio < dec!(0.15) && wick_diff < dec!(0.005) * last.close {
        raw += 10.0;
        reasons.push("Doji pattern (indecision)".to_string());
    }

    // 적삼병: 양봉 3개 연속 + 종가 단조 증가
    if first.is_bullish()
        && prev.is_bullish()
        && last.is_bullish()
        && first.close < prev.close
        && prev.close < last.close
    {
        raw += 20.0;
        reasons.push("Three white soldiers (strong uptrend)".to_string());
    }

    if reasons.is_empty() {
        return ComponentScore::neutral("No significant patterns detected");
    }

    ComponentScore::new(raw, reasons)
}
