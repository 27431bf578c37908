//! 추세 지표 (Trend Indicators).
//!
//! 이동평균과 회귀 기반의 추세 지표들을 제공합니다.
//! - SMA (Simple Moving Average)
//! - EMA (Exponential Moving Average)
//! - MACD 라인 (EMA12 - EMA26)
//! - 추세 기울기 (최소제곱 1차 회귀)

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::{validate_period, IndicatorResult};

/// SMA 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SmaParams {
    /// 이동평균 기간.
    pub period: usize,
}

impl Default for SmaParams {
    fn default() -> Self {
        Self { period: 20 }
    }
}

/// EMA 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EmaParams {
    /// 이동평균 기간.
    pub period: usize,
}

impl Default for EmaParams {
    fn default() -> Self {
        Self { period: 20 }
    }
}

/// MACD 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MacdParams {
    /// 단기 EMA 기간 (기본: 12).
    pub fast_period: usize,
    /// 장기 EMA 기간 (기본: 26).
    pub slow_period: usize,
}

impl Default for MacdParams {
    fn default() -> Self {
        Self {
            fast_period: 12,
            slow_period: 26,
        }
    }
}

/// 추세 기울기 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SlopeParams {
    /// 회귀 윈도우 크기 (기본: 10).
    pub window: usize,
}

impl Default for SlopeParams {
    fn default() -> Self {
        Self { window: 10 }
    }
}

/// 추세 지표 계산기.
#[derive(Debug, Default)]
pub struct TrendIndicators;

impl TrendIndicators {
    /// 새로운 추세 지표 계산기 생성.
    pub fn new() -> Self {
        Self
    }

    /// 단순 이동평균 (SMA) 계산.
    ///
    /// SMA = (P1 + P2 + ... + Pn) / n
    ///
    /// # 반환
    /// 각 시점의 SMA 값 (처음 period-1개는 None)
    pub fn sma(
        &self,
        prices: &[Decimal],
        params: SmaParams,
    ) -> IndicatorResult<Vec<Option<Decimal>>> {
        let period = params.period;
        validate_period(period)?;

        if prices.len() < period {
            return Ok(vec![None; prices.len()]);
        }

        let mut result = Vec::with_capacity(prices.len());
        let period_decimal = Decimal::from(period);

        for i in 0..prices.len() {
            if i < period - 1 {
                result.push(None);
            } else {
                let sum: Decimal = prices[i + 1 - period..=i].iter().sum();
                result.push(Some(sum / period_decimal));
            }
        }

        Ok(result)
    }

    /// 지수 이동평균 (EMA) 계산.
    ///
    /// EMA = (현재가 × k) + (이전 EMA × (1 - k))
    /// k = 2 / (period + 1)
    ///
    /// 첫 EMA는 SMA로 시드되므로 처음 period-1개는 None입니다.
    pub fn ema(
        &self,
        prices: &[Decimal],
        params: EmaParams,
    ) -> IndicatorResult<Vec<Option<Decimal>>> {
        let period = params.period;
        validate_period(period)?;

        if prices.len() < period {
            return Ok(vec![None; prices.len()]);
        }

        let mut result = Vec::with_capacity(prices.len());
        let multiplier = dec!(2) / Decimal::from(period + 1);

        for _ in 0..period - 1 {
            result.push(None);
        }

        // 첫 EMA는 SMA로 시작
        let initial_sma: Decimal = prices[..period].iter().sum::<Decimal>() / Decimal::from(period);
        result.push(Some(initial_sma));

        let mut prev_ema = initial_sma;
        for price in prices.iter().skip(period) {
            let ema = (*price * multiplier) + (prev_ema * (Decimal::ONE - multiplier));
            result.push(Some(ema));
            prev_ema = ema;
        }

        Ok(result)
    }

    /// MACD 라인 계산.
    ///
    /// MACD = 단기 EMA - 장기 EMA
    ///
    /// 시그널/히스토그램 없이 라인만 반환합니다. 장기 EMA가
    /// 워밍업 중인 구간은 None입니다.
    pub fn macd(
        &self,
        prices: &[Decimal],
        params: MacdParams,
    ) -> IndicatorResult<Vec<Option<Decimal>>> {
        let fast_ema = self.ema(
            prices,
            EmaParams {
                period: params.fast_period,
            },
        )?;
        let slow_ema = self.ema(
            prices,
            EmaParams {
                period: params.slow_period,
            },
        )?;

        let mut result = Vec::with_capacity(prices.len());
        for i in 0..prices.len() {
            match (fast_ema[i], slow_ema[i]) {
                (Some(fast), Some(slow)) => result.push(Some(fast - slow)),
                _ => result.push(None),
            }
        }

        Ok(result)
    }

    /// 추세 기울기 계산.
    ///
    /// 각 시점에서 트레일링 윈도우에 대한 1차 최소제곱 회귀의
    /// 기울기를 구합니다. x축은 0..window-1 인덱스입니다.
    ///
    /// slope = (n·Σxy - Σx·Σy) / (n·Σx² - (Σx)²)
    pub fn trend_slope(
        &self,
        prices: &[Decimal],
        params: SlopeParams,
    ) -> IndicatorResult<Vec<Option<Decimal>>> {
        let window = params.window;
        validate_period(window)?;

        if prices.len() < window {
            return Ok(vec![None; prices.len()]);
        }

        let n = Decimal::from(window);
        // x = 0..window-1 에 대한 고정 합
        let sum_x: Decimal = (0..window).map(Decimal::from).sum();
        let sum_x2: Decimal = (0..window).map(|x| Decimal::from(x * x)).sum();
        let denominator = n * sum_x2 - sum_x * sum_x;

        let mut result = Vec::with_capacity(prices.len());

        for i in 0..prices.len() {
            if i < window - 1 {
                result.push(None);
                continue;
            }

            let ys = &prices[i + 1 - window..=i];
            let sum_y: Decimal = ys.iter().sum();
            let sum_xy: Decimal = ys
                .iter()
                .enumerate()
                .map(|(x, y)| Decimal::from(x) * *y)
                .sum();

            if denominator == Decimal::ZERO {
                result.push(None);
            } else {
                result.push(Some((n * sum_xy - sum_x * sum_y) / denominator));
            }
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn linear_prices(start: i64, step: i64, count: usize) -> Vec<Decimal> {
        (0..count)
            .map(|i| Decimal::from(start + step * i as i64))
            .collect()
    }

    #[test]
    fn test_ema_seeded_with_sma() {
        let trend = TrendIndicators::new();
        let prices = linear_prices(100, 1, 10);

        let ema = trend.ema(&prices, EmaParams { period: 5 }).unwrap();

        // 처음 4개는 None
        assert!(ema[3].is_none());

        // 인덱스 4의 값은 처음 5개의 SMA
        assert_eq!(ema[4], Some(dec!(102)));
    }

    #[test]
    fn test_macd_positive_in_uptrend() {
        let trend = TrendIndicators::new();
        let prices = linear_prices(100, 2, 40);

        let macd = trend
            .macd(&prices, MacdParams::default())
            .unwrap();

        // 장기 EMA 워밍업 이전은 None
        assert!(macd[24].is_none());
        // 꾸준한 상승 추세에서 MACD 라인은 양수
        let last = macd.last().copied().flatten().unwrap();
        assert!(last > Decimal::ZERO);
    }

    #[test]
    fn test_trend_slope_matches_line() {
        let trend = TrendIndicators::new();
        // 기울기 3인 직선
        let prices = linear_prices(50, 3, 15);

        let slopes = trend
            .trend_slope(&prices, SlopeParams { window: 10 })
            .unwrap();

        assert!(slopes[8].is_none());
        let slope = slopes[9].unwrap();
        assert_eq!(slope, dec!(3));
    }

    #[test]
    fn test_trend_slope_negative_in_downtrend() {
        let trend = TrendIndicators::new();
        let prices = linear_prices(100, -1, 15);

        let slopes = trend
            .trend_slope(&prices, SlopeParams::default())
            .unwrap();

        let slope = slopes.last().copied().flatten().unwrap();
        assert!(slope < Decimal::ZERO);
    }
}
