//! 피처 빌더 (Feature Builder).
//!
//! 원시 OHLCV 바 시퀀스에 지표 라이브러리를 적용해 바별 피처 테이블을
//! 만듭니다. 워밍업 구간에 걸려 파생값이 하나라도 해소되지 않은 행은
//! 테이블에서 제외됩니다. 따라서 기본 설정에서 사용 가능한 첫 행은
//! 입력 기준 인덱스 49(EMA50 워밍업)입니다.
//!
//! 입력이 워밍업보다 짧으면 **빈 테이블**을 반환합니다 — 호출자는 이를
//! "데이터 부족"으로 취급해야 하며 에러가 아닙니다.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use advisor_core::Bar;

use crate::indicators::volatility::sqrt_decimal;
use crate::indicators::{
    AtrParams, EmaParams, IndicatorEngine, IndicatorResult, MacdParams, MomentumParams,
    RsiParams, SlopeParams, SmaParams,
};

/// 피처 빌더 설정.
///
/// 파이프라인의 고정 기본 기간들을 담습니다.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FeatureConfig {
    /// RSI 기간.
    pub rsi_period: usize,
    /// 단기 EMA 기간.
    pub ema_short: usize,
    /// 장기 EMA 기간.
    pub ema_long: usize,
    /// MACD 단기 EMA 기간.
    pub macd_fast: usize,
    /// MACD 장기 EMA 기간.
    pub macd_slow: usize,
    /// ATR 기간.
    pub atr_period: usize,
    /// 단기 모멘텀 기간.
    pub momentum_short: usize,
    /// 장기 모멘텀 기간.
    pub momentum_long: usize,
    /// 추세 기울기 윈도우.
    pub slope_window: usize,
    /// 거래량 이동평균 기간 (volume_ma_ratio용).
    pub volume_ma_period: usize,
    /// 수익률 변동성 윈도우 (volatility용).
    pub volatility_window: usize,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            ema_short: 20,
            ema_long: 50,
            macd_fast: 12,
            macd_slow: 26,
            atr_period: 14,
            momentum_short: 5,
            momentum_long: 20,
            slope_window: 10,
            volume_ma_period: 20,
            volatility_window: 20,
        }
    }
}

impl FeatureConfig {
    /// 하나 이상의 사용 가능한 행을 얻는 데 필요한 최소 바 개수.
    ///
    /// 가장 긴 워밍업(장기 EMA)이 지배합니다.
    pub fn min_bars_required(&self) -> usize {
        self.ema_long
    }
}

/// 파생 피처가 모두 해소된 단일 바.
///
/// 필수 파생 필드는 행이 존재한다는 것 자체가 값의 존재를 보장하므로
/// `Option`이 아닙니다. 심리 스코어링에만 쓰이는 보조 필드
/// (`volume_ma_ratio`, `volatility`)만 부재가 타입으로 표현됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureRow {
    /// 원본 바.
    pub bar: Bar,
    /// RSI (0-100).
    pub rsi: Decimal,
    /// 단기 EMA.
    pub ema20: Decimal,
    /// 장기 EMA.
    pub ema50: Decimal,
    /// EMA 차이 (ema20 - ema50).
    pub ema_diff: Decimal,
    /// MACD 라인.
    pub macd: Decimal,
    /// ATR.
    pub atr: Decimal,
    /// 5일 모멘텀 (비율).
    pub momentum_5: Decimal,
    /// 20일 모멘텀 (비율).
    pub momentum_20: Decimal,
    /// 추세 기울기.
    pub trend_slope: Decimal,
    /// 거래량 변화율 (비율).
    pub volume_change: Decimal,
    /// 거래량 / 거래량 이동평균. 평균이 0이면 None.
    pub volume_ma_ratio: Option<Decimal>,
    /// 수익률의 롤링 표준편차.
    pub volatility: Option<Decimal>,
}

/// 피처 빌더.
#[derive(Debug, Default)]
pub struct FeatureBuilder {
    config: FeatureConfig,
    engine: IndicatorEngine,
}

impl FeatureBuilder {
    /// 기본 설정으로 피처 빌더 생성.
    pub fn new() -> Self {
        Self::default()
    }

    /// 설정을 지정해 피처 빌더 생성.
    pub fn with_config(config: FeatureConfig) -> Self {
        Self {
            config,
            engine: IndicatorEngine::new(),
        }
    }

    /// 현재 설정 참조.
    pub fn config(&self) -> &FeatureConfig {
        &self.config
    }

    /// 바 시퀀스에서 피처 테이블을 생성합니다.
    ///
    /// 파생값이 하나라도 해소되지 않은 행은 제외합니다. 입력이
    /// 워밍업보다 짧으면 빈 테이블을 반환합니다 (에러 아님).
    pub fn build(&self, bars: &[Bar]) -> IndicatorResult<Vec<FeatureRow>> {
        if bars.is_empty() {
            return Ok(Vec::new());
        }

        let cfg = &self.config;
        let close: Vec<Decimal> = bars.iter().map(|b| b.close).collect();
        let high: Vec<Decimal> = bars.iter().map(|b| b.high).collect();
        let low: Vec<Decimal> = bars.iter().map(|b| b.low).collect();
        let volume: Vec<Decimal> = bars.iter().map(|b| b.volume).collect();

        let rsi = self.engine.rsi(&close, RsiParams { period: cfg.rsi_period })?;
        let ema20 = self.engine.ema(&close, EmaParams { period: cfg.ema_short })?;
        let ema50 = self.engine.ema(&close, EmaParams { period: cfg.ema_long })?;
        let macd = self.engine.macd(
            &close,
            MacdParams {
                fast_period: cfg.macd_fast,
                slow_period: cfg.macd_slow,
            },
        )?;
        let atr = self.engine.atr(&high, &low, &close, AtrParams { period: cfg.atr_period })?;
        let momentum_5 = self
            .engine
            .momentum(&close, MomentumParams { period: cfg.momentum_short })?;
        let momentum_20 = self
            .engine
            .momentum(&close, MomentumParams { period: cfg.momentum_long })?;
        let trend_slope = self
            .engine
            .trend_slope(&close, SlopeParams { window: cfg.slope_window })?;
        let volume_change = self.engine.momentum(&volume, MomentumParams { period: 1 })?;

        let volume_ma = self
            .engine
            .sma(&volume, SmaParams { period: cfg.volume_ma_period })?;
        let volatility = rolling_return_std(&close, cfg.volatility_window);

        let mut rows = Vec::new();

        for i in 0..bars.len() {
            // 필수 파생값이 모두 해소된 행만 채택
            let (
                Some(rsi),
                Some(ema20),
                Some(ema50),
                Some(macd),
                Some(atr),
                Some(momentum_5),
                Some(momentum_20),
                Some(trend_slope),
                Some(volume_change),
            ) = (
                rsi[i],
                ema20[i],
                ema50[i],
                macd[i],
                atr[i],
                momentum_5[i],
                momentum_20[i],
                trend_slope[i],
                volume_change[i],
            )
            else {
                continue;
            };

            let volume_ma_ratio = match volume_ma[i] {
                Some(ma) if ma != Decimal::ZERO => Some(bars[i].volume / ma),
                _ => None,
            };

            rows.push(FeatureRow {
                bar: bars[i].clone(),
                rsi,
                ema20,
                ema50,
                ema_diff: ema20 - ema50,
                macd,
                atr,
                momentum_5,
                momentum_20,
                trend_slope,
                volume_change,
                volume_ma_ratio,
                volatility: volatility[i],
            });
        }

        Ok(rows)
    }
}

/// 종가 수익률의 롤링 표본 표준편차.
///
/// 수익률 자체가 한 바를 소비하므로 워밍업은 window개입니다.
fn rolling_return_std(close: &[Decimal], window: usize) -> Vec<Option<Decimal>> {
    let mut result = vec![None; close.len()];
    if window < 2 || close.len() <= window {
        return result;
    }

    // 전일 대비 수익률 (인덱스 i의 수익률은 close[i]/close[i-1] - 1)
    let mut returns: Vec<Option<Decimal>> = vec![None; close.len()];
    for i in 1..close.len() {
        if close[i - 1] != Decimal::ZERO {
            returns[i] = Some((close[i] - close[i - 1]) / close[i - 1]);
        }
    }

    let n = Decimal::from(window);
    let sample_denom = Decimal::from(window - 1);

    for i in window..close.len() {
        let slice: Vec<Decimal> = returns[i + 1 - window..=i].iter().copied().flatten().collect();
        if slice.len() != window {
            continue;
        }

        let mean: Decimal = slice.iter().sum::<Decimal>() / n;
        let variance: Decimal = slice
            .iter()
            .map(|r| {
                let diff = *r - mean;
                diff * diff
            })
            .sum::<Decimal>()
            / sample_denom;

        result[i] = Some(sqrt_decimal(variance));
    }

    result
}
