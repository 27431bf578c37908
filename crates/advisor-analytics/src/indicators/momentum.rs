//! 모멘텀 지표 (Momentum Indicators).
//!
//! 가격 변화의 속도와 강도를 측정하는 지표들을 제공합니다.
//! - RSI (Relative Strength Index)
//! - n일 모멘텀 (% 변화)
//! - Stochastic Oscillator

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::{validate_period, IndicatorResult};

/// RSI 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RsiParams {
    /// RSI 기간 (기본: 14).
    pub period: usize,
}

impl Default for RsiParams {
    fn default() -> Self {
        Self { period: 14 }
    }
}

/// 모멘텀 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MomentumParams {
    /// 참조 기간 (기본: 20).
    pub period: usize,
}

impl Default for MomentumParams {
    fn default() -> Self {
        Self { period: 20 }
    }
}

/// 스토캐스틱 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StochasticParams {
    /// %K 기간 (기본: 14).
    pub k_period: usize,
    /// %D 기간 (%K의 SMA, 기본: 3).
    pub d_period: usize,
}

impl Default for StochasticParams {
    fn default() -> Self {
        Self {
            k_period: 14,
            d_period: 3,
        }
    }
}

/// 스토캐스틱 결과.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StochasticResult {
    /// %K 값.
    pub k: Option<Decimal>,
    /// %D 값 (%K의 이동평균).
    pub d: Option<Decimal>,
}

/// 0으로 나누기 방지용 epsilon.
const EPSILON: Decimal = dec!(0.0000000001);

/// 모멘텀 지표 계산기.
#[derive(Debug, Default)]
pub struct MomentumCalculator;

impl MomentumCalculator {
    /// 새로운 모멘텀 지표 계산기 생성.
    pub fn new() -> Self {
        Self
    }

    /// RSI (Relative Strength Index) 계산.
    ///
    /// 전일 대비 상승폭/하락폭의 롤링 평균 비율로 계산합니다:
    ///
    /// RS = 평균 상승폭 / (평균 하락폭 + ε)
    /// RSI = 100 - 100 / (1 + RS)
    ///
    /// 첫 델타가 하나를 소비하므로 워밍업은 period개입니다.
    ///
    /// # 반환
    /// 0-100 사이의 RSI 값 (처음 period개는 None)
    pub fn rsi(
        &self,
        prices: &[Decimal],
        params: RsiParams,
    ) -> IndicatorResult<Vec<Option<Decimal>>> {
        let period = params.period;
        validate_period(period)?;

        if prices.len() <= period {
            return Ok(vec![None; prices.len()]);
        }

        // 전일 대비 상승폭/하락폭
        let mut gains = Vec::with_capacity(prices.len() - 1);
        let mut losses = Vec::with_capacity(prices.len() - 1);
        for i in 1..prices.len() {
            let delta = prices[i] - prices[i - 1];
            if delta > Decimal::ZERO {
                gains.push(delta);
                losses.push(Decimal::ZERO);
            } else {
                gains.push(Decimal::ZERO);
                losses.push(-delta);
            }
        }

        let period_decimal = Decimal::from(period);
        let hundred = dec!(100);
        let mut result = vec![None; prices.len()];

        // 델타 인덱스 d는 가격 인덱스 d+1에 대응
        for d in (period - 1)..gains.len() {
            let avg_gain: Decimal =
                gains[d + 1 - period..=d].iter().sum::<Decimal>() / period_decimal;
            let avg_loss: Decimal =
                losses[d + 1 - period..=d].iter().sum::<Decimal>() / period_decimal;

            let rs = avg_gain / (avg_loss + EPSILON);
            result[d + 1] = Some(hundred - hundred / (Decimal::ONE + rs));
        }

        Ok(result)
    }

    /// n일 모멘텀 계산.
    ///
    /// momentum[i] = (price[i] - price[i-n]) / price[i-n]
    ///
    /// 기준 가격이 0이면 해당 시점은 None입니다.
    pub fn momentum(
        &self,
        prices: &[Decimal],
        params: MomentumParams,
    ) -> IndicatorResult<Vec<Option<Decimal>>> {
        let period = params.period;
        validate_period(period)?;

        let mut result = vec![None; prices.len()];

        for i in period..prices.len() {
            let base = prices[i - period];
            if base != Decimal::ZERO {
                result[i] = Some((prices[i] - base) / base);
            }
        }

        Ok(result)
    }

    /// 스토캐스틱 오실레이터 계산.
    ///
    /// %K = 100 × (종가 - 최저가) / (최고가 - 최저가)
    /// %D = %K의 d_period SMA
    ///
    /// 윈도우 내 고가와 저가가 같으면 중립값 50을 사용합니다.
    pub fn stochastic(
        &self,
        high: &[Decimal],
        low: &[Decimal],
        close: &[Decimal],
        params: StochasticParams,
    ) -> IndicatorResult<Vec<StochasticResult>> {
        validate_period(params.k_period)?;
        validate_period(params.d_period)?;

        let len = high.len().min(low.len()).min(close.len());
        let k_period = params.k_period;
        let hundred = dec!(100);

        let mut k_values: Vec<Option<Decimal>> = vec![None; len];

        for i in (k_period - 1)..len {
            let window = i + 1 - k_period..=i;
            let highest = high[window.clone()].iter().copied().max();
            let lowest = low[window].iter().copied().min();

            if let (Some(highest), Some(lowest)) = (highest, lowest) {
                let range = highest - lowest;
                let k = if range == Decimal::ZERO {
                    dec!(50)
                } else {
                    hundred * (close[i] - lowest) / range
                };
                k_values[i] = Some(k);
            }
        }

        // %D: %K의 롤링 SMA
        let d_period = params.d_period;
        let d_decimal = Decimal::from(d_period);
        let mut result = Vec::with_capacity(len);

        for i in 0..len {
            let d = if i + 1 >= k_period + d_period - 1 {
                let window: Vec<Decimal> = k_values[i + 1 - d_period..=i]
                    .iter()
                    .copied()
                    .flatten()
                    .collect();
                if window.len() == d_period {
                    Some(window.iter().sum::<Decimal>() / d_decimal)
                } else {
                    None
                }
            } else {
                None
            };

            result.push(StochasticResult { k: k_values[i], d });
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_prices() -> Vec<Decimal> {
        vec![
            dec!(100.0),
            dec!(102.0),
            dec!(101.0),
            dec!(103.0),
            dec!(105.0),
            dec!(104.0),
            dec!(106.0),
            dec!(108.0),
            dec!(107.0),
            dec!(109.0),
            dec!(111.0),
            dec!(110.0),
            dec!(112.0),
            dec!(114.0),
            dec!(113.0),
            dec!(115.0),
            dec!(117.0),
        ]
    }

    #[test]
    fn test_rsi_warmup_is_period() {
        let momentum = MomentumCalculator::new();
        let prices = sample_prices();

        let rsi = momentum.rsi(&prices, RsiParams { period: 14 }).unwrap();

        // 델타가 하나를 소비하므로 인덱스 14부터 값이 있음
        assert!(rsi[13].is_none());
        assert!(rsi[14].is_some());
    }

    #[test]
    fn test_rsi_all_gains_near_hundred() {
        let momentum = MomentumCalculator::new();
        // 단조 상승 시계열
        let prices: Vec<Decimal> = (0..20).map(|i| Decimal::from(100 + i)).collect();

        let rsi = momentum.rsi(&prices, RsiParams { period: 14 }).unwrap();
        let last = rsi.last().copied().flatten().unwrap();

        // 하락이 전혀 없으면 RSI는 100에 근접
        assert!(last > dec!(99));
        assert!(last <= dec!(100));
    }

    #[test]
    fn test_momentum_sign() {
        let momentum = MomentumCalculator::new();
        let prices = sample_prices();

        let result = momentum
            .momentum(&prices, MomentumParams { period: 5 })
            .unwrap();

        assert!(result[4].is_none());
        // 상승 시계열에서 모멘텀은 양수
        assert!(result[16].unwrap() > Decimal::ZERO);
    }

    #[test]
    fn test_stochastic_in_bounds() {
        let momentum = MomentumCalculator::new();
        let close = sample_prices();
        let high: Vec<Decimal> = close.iter().map(|c| c + dec!(1)).collect();
        let low: Vec<Decimal> = close.iter().map(|c| c - dec!(1)).collect();

        let stoch = momentum
            .stochastic(&high, &low, &close, StochasticParams::default())
            .unwrap();

        for s in stoch.iter() {
            if let Some(k) = s.k {
                assert!(k >= Decimal::ZERO && k <= dec!(100));
            }
        }
        // %K 이후 %D도 채워짐
        assert!(stoch.last().unwrap().d.is_some());
    }
}
