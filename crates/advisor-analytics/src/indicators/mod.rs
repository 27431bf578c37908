//! 기술적 지표 모듈.
//!
//! 가격 시계열 위에서 동작하는 순수 함수들을 제공합니다.
//! 모든 지표는 입력과 같은 길이의 `Vec<Option<Decimal>>`을 반환하며,
//! 워밍업 구간은 `None`입니다. **짧은 입력은 에러가 아니라 전부 `None`인
//! 결과를 냅니다** — 에러는 잘못된 파라미터(기간 0 등)에만 사용됩니다.
//!
//! # 지원 지표
//!
//! ## 추세 지표 (Trend Indicators)
//! - **SMA**: 단순 이동평균 (Simple Moving Average)
//! - **EMA**: 지수 이동평균 (Exponential Moving Average)
//! - **MACD**: 이동평균 수렴/확산 (EMA12 - EMA26 라인)
//! - **추세 기울기**: 최소제곱 1차 회귀 기울기
//!
//! ## 모멘텀 지표 (Momentum Indicators)
//! - **RSI**: 상대강도지수 (Relative Strength Index)
//! - **Stochastic**: 스토캐스틱 오실레이터
//! - **모멘텀**: n일 수익률 (% 변화)
//!
//! ## 변동성 지표 (Volatility Indicators)
//! - **ATR**: 평균 실제 범위 (Average True Range)
//! - **Bollinger Bands**: 볼린저 밴드
//!
//! # 사용 예시
//!
//! ```ignore
//! use advisor_analytics::indicators::{IndicatorEngine, RsiParams, EmaParams};
//!
//! let engine = IndicatorEngine::new();
//! let rsi = engine.rsi(&prices, RsiParams { period: 14 })?;
//! let ema20 = engine.ema(&prices, EmaParams { period: 20 })?;
//! ```

pub mod momentum;
pub mod trend;
pub mod volatility;

use rust_decimal::Decimal;
use thiserror::Error;

pub use momentum::{MomentumCalculator, MomentumParams, RsiParams, StochasticParams, StochasticResult};
pub use trend::{EmaParams, MacdParams, SlopeParams, SmaParams, TrendIndicators};
pub use volatility::{AtrParams, BollingerBandsParams, BollingerBandsResult, VolatilityIndicators};

/// 지표 계산 오류.
#[derive(Debug, Error)]
pub enum IndicatorError {
    /// 잘못된 파라미터
    #[error("잘못된 파라미터: {0}")]
    InvalidParameter(String),

    /// 계산 오류
    #[error("계산 오류: {0}")]
    CalculationError(String),
}

/// 지표 계산 결과 타입.
pub type IndicatorResult<T> = Result<T, IndicatorError>;

/// 기간 파라미터 공통 검증.
fn validate_period(period: usize) -> IndicatorResult<()> {
    if period == 0 {
        return Err(IndicatorError::InvalidParameter(
            "기간은 0보다 커야 합니다".to_string(),
        ));
    }
    Ok(())
}

/// 통합 지표 엔진.
///
/// 모든 기술적 지표 계산을 위한 통합 인터페이스를 제공합니다.
#[derive(Debug, Default)]
pub struct IndicatorEngine {
    trend: TrendIndicators,
    momentum: MomentumCalculator,
    volatility: VolatilityIndicators,
}

impl IndicatorEngine {
    /// 새로운 지표 엔진 생성.
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== 추세 지표 ====================

    /// 단순 이동평균 (SMA) 계산.
    pub fn sma(&self, prices: &[Decimal], params: SmaParams) -> IndicatorResult<Vec<Option<Decimal>>> {
        self.trend.sma(prices, params)
    }

    /// 지수 이동평균 (EMA) 계산.
    ///
    /// 처음 period-1개는 None, 첫 값은 SMA로 시드됩니다.
    pub fn ema(&self, prices: &[Decimal], params: EmaParams) -> IndicatorResult<Vec<Option<Decimal>>> {
        self.trend.ema(prices, params)
    }

    /// MACD 라인 계산 (EMA12 - EMA26).
    pub fn macd(&self, prices: &[Decimal], params: MacdParams) -> IndicatorResult<Vec<Option<Decimal>>> {
        self.trend.macd(prices, params)
    }

    /// 추세 기울기 계산 (트레일링 윈도우 최소제곱 회귀).
    pub fn trend_slope(
        &self,
        prices: &[Decimal],
        params: SlopeParams,
    ) -> IndicatorResult<Vec<Option<Decimal>>> {
        self.trend.trend_slope(prices, params)
    }

    // ==================== 모멘텀 지표 ====================

    /// RSI (Relative Strength Index) 계산.
    ///
    /// 0-100 범위. 손실 분모에 epsilon 가드를 적용합니다.
    pub fn rsi(&self, prices: &[Decimal], params: RsiParams) -> IndicatorResult<Vec<Option<Decimal>>> {
        self.momentum.rsi(prices, params)
    }

    /// n일 모멘텀 (% 변화) 계산.
    pub fn momentum(
        &self,
        prices: &[Decimal],
        params: MomentumParams,
    ) -> IndicatorResult<Vec<Option<Decimal>>> {
        self.momentum.momentum(prices, params)
    }

    /// 스토캐스틱 오실레이터 계산.
    pub fn stochastic(
        &self,
        high: &[Decimal],
        low: &[Decimal],
        close: &[Decimal],
        params: StochasticParams,
    ) -> IndicatorResult<Vec<StochasticResult>> {
        self.momentum.stochastic(high, low, close, params)
    }

    // ==================== 변동성 지표 ====================

    /// ATR (Average True Range) 계산.
    ///
    /// True Range의 롤링 단순 평균. 첫 TR은 당일 고가-저가.
    pub fn atr(
        &self,
        high: &[Decimal],
        low: &[Decimal],
        close: &[Decimal],
        params: AtrParams,
    ) -> IndicatorResult<Vec<Option<Decimal>>> {
        self.volatility.atr(high, low, close, params)
    }

    /// 볼린저 밴드 계산.
    pub fn bollinger_bands(
        &self,
        prices: &[Decimal],
        params: BollingerBandsParams,
    ) -> IndicatorResult<Vec<BollingerBandsResult>> {
        self.volatility.bollinger_bands(prices, params)
    }
}
