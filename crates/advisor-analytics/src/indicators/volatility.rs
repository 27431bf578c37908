//! 변동성 지표 (Volatility Indicators).
//!
//! 가격 변동성을 측정하는 지표들을 제공합니다.
//! - ATR (Average True Range, 평균 실제 범위)
//! - Bollinger Bands (볼린저 밴드)

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::{validate_period, IndicatorResult};

/// ATR 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AtrParams {
    /// ATR 기간 (기본: 14).
    pub period: usize,
}

impl Default for AtrParams {
    fn default() -> Self {
        Self { period: 14 }
    }
}

/// 볼린저 밴드 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BollingerBandsParams {
    /// 이동평균 기간 (기본: 20).
    pub period: usize,
    /// 표준편차 배수 (기본: 2.0).
    pub std_dev_multiplier: Decimal,
}

impl Default for BollingerBandsParams {
    fn default() -> Self {
        Self {
            period: 20,
            std_dev_multiplier: dec!(2.0),
        }
    }
}

/// 볼린저 밴드 결과.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BollingerBandsResult {
    /// 상단 밴드 (MA + k × σ).
    pub upper: Option<Decimal>,
    /// 중간 밴드 (이동평균).
    pub middle: Option<Decimal>,
    /// 하단 밴드 (MA - k × σ).
    pub lower: Option<Decimal>,
}

/// 변동성 지표 계산기.
#[derive(Debug, Default)]
pub struct VolatilityIndicators;

impl VolatilityIndicators {
    /// 새로운 변동성 지표 계산기 생성.
    pub fn new() -> Self {
        Self
    }

    /// ATR (Average True Range) 계산.
    ///
    /// True Range = max(고가 - 저가, |고가 - 전일종가|, |저가 - 전일종가|)
    /// ATR = True Range의 롤링 단순 평균
    ///
    /// 첫 번째 TR은 전일 종가가 없으므로 당일 고가 - 저가입니다.
    ///
    /// # 반환
    /// ATR 값들 (처음 period-1개는 None)
    pub fn atr(
        &self,
        high: &[Decimal],
        low: &[Decimal],
        close: &[Decimal],
        params: AtrParams,
    ) -> IndicatorResult<Vec<Option<Decimal>>> {
        let period = params.period;
        validate_period(period)?;

        let len = high.len().min(low.len()).min(close.len());
        if len < period {
            return Ok(vec![None; len]);
        }

        // True Range 계산
        let mut true_ranges = Vec::with_capacity(len);
        true_ranges.push(high[0] - low[0]);

        for i in 1..len {
            let hl = high[i] - low[i];
            let hc = (high[i] - close[i - 1]).abs();
            let lc = (low[i] - close[i - 1]).abs();
            true_ranges.push(hl.max(hc).max(lc));
        }

        let period_decimal = Decimal::from(period);
        let mut result = Vec::with_capacity(len);

        for i in 0..len {
            if i < period - 1 {
                result.push(None);
            } else {
                let sum: Decimal = true_ranges[i + 1 - period..=i].iter().sum();
                result.push(Some(sum / period_decimal));
            }
        }

        Ok(result)
    }

    /// 볼린저 밴드 계산.
    ///
    /// 상단 밴드 = MA + (k × σ)
    /// 중간 밴드 = MA (이동평균)
    /// 하단 밴드 = MA - (k × σ)
    ///
    /// 표준편차는 표본 표준편차(n-1 분모)를 사용합니다.
    pub fn bollinger_bands(
        &self,
        prices: &[Decimal],
        params: BollingerBandsParams,
    ) -> IndicatorResult<Vec<BollingerBandsResult>> {
        let period = params.period;
        validate_period(period)?;

        if period < 2 {
            return Err(super::IndicatorError::InvalidParameter(
                "볼린저 밴드 기간은 2 이상이어야 합니다".to_string(),
            ));
        }

        let empty = BollingerBandsResult {
            upper: None,
            middle: None,
            lower: None,
        };

        if prices.len() < period {
            return Ok(vec![empty; prices.len()]);
        }

        let mut result = Vec::with_capacity(prices.len());
        let period_decimal = Decimal::from(period);
        let sample_denom = Decimal::from(period - 1);

        for i in 0..prices.len() {
            if i < period - 1 {
                result.push(empty);
                continue;
            }

            let window = &prices[i + 1 - period..=i];
            let sum: Decimal = window.iter().sum();
            let ma = sum / period_decimal;

            let variance: Decimal = window
                .iter()
                .map(|&p| {
                    let diff = p - ma;
                    diff * diff
                })
                .sum::<Decimal>()
                / sample_denom;

            let std_dev = sqrt_decimal(variance);
            let deviation = params.std_dev_multiplier * std_dev;

            result.push(BollingerBandsResult {
                upper: Some(ma + deviation),
                middle: Some(ma),
                lower: Some(ma - deviation),
            });
        }

        Ok(result)
    }
}

/// Decimal 제곱근 계산 (Newton-Raphson 방법).
///
/// Decimal 타입은 기본 제곱근 함수가 없으므로 직접 구현합니다.
pub(crate) fn sqrt_decimal(value: Decimal) -> Decimal {
    if value <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let mut x = value;
    let two = dec!(2);

    // 10회 반복이면 충분한 정밀도
    for _ in 0..10 {
        x = (x + value / x) / two;
    }

    x
}
