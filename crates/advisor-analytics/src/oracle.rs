//! 추세 확률 오라클 (Trend-Probability Oracle).
//!
//! 피처화 이전의 원시 바 시퀀스를 받아 추세가 상방일 확률 [0,1]을
//! 돌려주는 외부 협력자 어댑터입니다. 계약은 단순합니다:
//!
//! - 바가 [`SEQUENCE_LENGTH`]개 미만이면 중립값 0.5
//! - 모델 부재, 로드 실패, 추론 실패 모두 중립값 0.5
//! - **절대 에러를 반환하지 않음**
//!
//! 시간 제한은 호출자(서비스)가 `tokio::time::timeout`으로 감쌉니다.
//! 재시도는 없습니다. 한 번의 실패는 해당 요청에 대해 "사용 불가"로
//! 취급됩니다.

use async_trait::async_trait;
use rust_decimal::prelude::ToPrimitive;

use advisor_core::Bar;

/// LSTM 시퀀스 길이. 이보다 짧은 입력은 중립 확률을 받습니다.
pub const SEQUENCE_LENGTH: usize = 60;

/// 모델을 사용할 수 없을 때의 중립 확률.
pub const NEUTRAL_PROBABILITY: f64 = 0.5;

/// 추세 확률 추정기.
///
/// 구현체는 어떤 상황에서도 에러 대신 중립값으로 축퇴해야 합니다.
/// 동시 읽기에 안전해야 합니다 (load-once, many-readers).
#[async_trait]
pub trait TrendOracle: Send + Sync {
    /// 추세가 상방일 확률을 [0,1]로 반환합니다.
    async fn probability(&self, bars: &[Bar]) -> f64;

    /// 로깅/식별용 이름.
    fn name(&self) -> &str {
        "oracle"
    }
}

/// 항상 중립 확률을 반환하는 오라클.
///
/// 모델이 배포되지 않은 환경의 기본 협력자입니다.
#[derive(Debug, Default)]
pub struct NeutralOracle;

impl NeutralOracle {
    /// 새 중립 오라클 생성.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TrendOracle for NeutralOracle {
    async fn probability(&self, _bars: &[Bar]) -> f64 {
        NEUTRAL_PROBABILITY
    }

    fn name(&self) -> &str {
        "neutral"
    }
}

/// 실제 모델 파일 없이 테스트하기 위한 mock 오라클.
///
/// 고정 확률을 지정하거나, 시퀀스의 평균 수익률에서 결정론적으로
/// 확률을 유도합니다.
#[derive(Debug, Default)]
pub struct MockOracle {
    /// 항상 반환할 고정 확률.
    pub fixed_probability: Option<f64>,
}

impl MockOracle {
    /// 휴리스틱 기반 mock 오라클 생성.
    pub fn new() -> Self {
        Self::default()
    }

    /// 항상 고정 확률을 반환하는 mock 오라클 생성.
    pub fn with_probability(probability: f64) -> Self {
        Self {
            fixed_probability: Some(probability.clamp(0.0, 1.0)),
        }
    }
}

#[async_trait]
impl TrendOracle for MockOracle {
    async fn probability(&self, bars: &[Bar]) -> f64 {
        if let Some(p) = self.fixed_probability {
            return p;
        }

        if bars.len() < SEQUENCE_LENGTH {
            return NEUTRAL_PROBABILITY;
        }

        // 간단한 휴리스틱: 마지막 시퀀스의 평균 수익률로 확률 결정
        let window = &bars[bars.len() - SEQUENCE_LENGTH..];
        let mut sum = 0.0;
        let mut count = 0usize;

        for pair in window.windows(2) {
            let prev = pair[0].close.to_f64().unwrap_or(0.0);
            let curr = pair[1].close.to_f64().unwrap_or(0.0);
            if prev > 0.0 {
                sum += (curr - prev) / prev;
                count += 1;
            }
        }

        if count == 0 {
            return NEUTRAL_PROBABILITY;
        }

        let mean_return = sum / count as f64;
        // 평균 수익률을 [0,1]로 스쿼시 (±2% 수익률이 양 끝에 수렴)
        (0.5 + mean_return * 25.0).clamp(0.0, 1.0)
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(feature = "ml")]
pub use self::onnx::{OnnxOracle, OracleConfig};

#[cfg(feature = "ml")]
mod onnx {
    use std::path::PathBuf;

    use async_trait::async_trait;
    use ort::session::Session;
    use rust_decimal::prelude::ToPrimitive;
    use serde::{Deserialize, Serialize};
    use tokio::sync::RwLock;
    use tracing::{info, warn};

    use advisor_core::Bar;

    use super::{TrendOracle, NEUTRAL_PROBABILITY, SEQUENCE_LENGTH};

    /// 바당 입력 feature 수 (OHLCV).
    const FEATURES_PER_BAR: usize = 5;

    /// ONNX 오라클 설정.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct OracleConfig {
        /// ONNX 모델 파일 경로
        pub model_path: PathBuf,
        /// 로깅/식별용 모델 이름
        pub model_name: String,
    }

    impl Default for OracleConfig {
        fn default() -> Self {
            Self {
                model_path: PathBuf::from("models/lstm_trend_model.onnx"),
                model_name: "lstm_trend".to_string(),
            }
        }
    }

    impl OracleConfig {
        /// 주어진 모델 경로로 새 설정 생성.
        pub fn new(model_path: impl Into<PathBuf>) -> Self {
            Self {
                model_path: model_path.into(),
                ..Default::default()
            }
        }
    }

    /// 모델 lifecycle 상태.
    ///
    /// 첫 사용 시 로드하고, 실패하면 명시적 Unavailable 상태로
    /// 고정되어 이후 호출이 즉시 중립값으로 축퇴합니다.
    enum ModelState {
        Unloaded,
        Ready(Box<Session>),
        Unavailable,
    }

    /// ONNX LSTM 기반 추세 확률 오라클.
    ///
    /// 모델은 다음을 가져야 합니다:
    /// - 입력: [1, 60, 5] 형태의 float32 텐서 (min-max 스케일된 OHLCV)
    /// - 출력: [1, 1] 형태의 float32 텐서 (상방 확률, sigmoid)
    pub struct OnnxOracle {
        config: OracleConfig,
        state: RwLock<ModelState>,
    }

    impl OnnxOracle {
        /// 지연 로드 오라클 생성. 모델은 첫 호출 때 로드됩니다.
        pub fn new(config: OracleConfig) -> Self {
            Self {
                config,
                state: RwLock::new(ModelState::Unloaded),
            }
        }

        fn load_session(&self) -> Option<Session> {
            let path = &self.config.model_path;

            if !path.exists() {
                warn!("모델 파일 없음: {}", path.display());
                return None;
            }

            let session = Session::builder()
                .and_then(|b| {
                    b.with_optimization_level(
                        ort::session::builder::GraphOptimizationLevel::Level3,
                    )
                })
                .and_then(|b| b.commit_from_file(path));

            match session {
                Ok(session) => {
                    info!("ONNX 모델 로드 완료: {}", self.config.model_name);
                    Some(session)
                }
                Err(e) => {
                    warn!("ONNX 모델 로드 실패: {}", e);
                    None
                }
            }
        }

        /// 마지막 시퀀스를 컬럼별 min-max 스케일해 [1, 60, 5] 텐서 데이터로 변환.
        fn scale_input(bars: &[Bar]) -> Vec<f32> {
            let window = &bars[bars.len() - SEQUENCE_LENGTH..];

            let columns: Vec<Vec<f64>> = (0..FEATURES_PER_BAR)
                .map(|c| {
                    window
                        .iter()
                        .map(|b| {
                            let v = match c {
                                0 => b.open,
                                1 => b.high,
                                2 => b.low,
                                3 => b.close,
                                _ => b.volume,
                            };
                            v.to_f64().unwrap_or(0.0)
                        })
                        .collect()
                })
                .collect();

            let bounds: Vec<(f64, f64)> = columns
                .iter()
                .map(|column| {
                    let min = column.iter().cloned().fold(f64::INFINITY, f64::min);
                    let max = column.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
                    (min, max)
                })
                .collect();

            let mut data = Vec::with_capacity(SEQUENCE_LENGTH * FEATURES_PER_BAR);
            for row in 0..SEQUENCE_LENGTH {
                for (column, (min, max)) in columns.iter().zip(bounds.iter()) {
                    let span = max - min;
                    let scaled = if span > 0.0 {
                        (column[row] - min) / span
                    } else {
                        0.0
                    };
                    data.push(scaled as f32);
                }
            }

            data
        }

        fn run_inference(session: &mut Session, bars: &[Bar]) -> Option<f64> {
            let input_data = Self::scale_input(bars);
            let input_shape = [1i64, SEQUENCE_LENGTH as i64, FEATURES_PER_BAR as i64];

            let input_tensor =
                ort::value::Tensor::from_array((input_shape, input_data.into_boxed_slice()))
                    .ok()?;

            let outputs = session.run(ort::inputs!["input" => input_tensor]).ok()?;

            let output_name = outputs.iter().next().map(|(name, _)| name.to_string())?;
            let output = outputs.get(&output_name)?;
            let (_, output_slice) = output.try_extract_tensor::<f32>().ok()?;

            output_slice
                .first()
                .map(|p| (*p as f64).clamp(0.0, 1.0))
        }
    }

    #[async_trait]
    impl TrendOracle for OnnxOracle {
        async fn probability(&self, bars: &[Bar]) -> f64 {
            if bars.len() < SEQUENCE_LENGTH {
                return NEUTRAL_PROBABILITY;
            }

            // load-once: 첫 호출에서만 쓰기 잠금으로 로드 시도
            {
                let state = self.state.read().await;
                if matches!(*state, ModelState::Unavailable) {
                    return NEUTRAL_PROBABILITY;
                }
            }

            let mut state = self.state.write().await;

            if matches!(*state, ModelState::Unloaded) {
                *state = match self.load_session() {
                    Some(session) => ModelState::Ready(Box::new(session)),
                    None => ModelState::Unavailable,
                };
            }

            match &mut *state {
                ModelState::Ready(session) => match Self::run_inference(session, bars) {
                    Some(p) => p,
                    None => {
                        warn!("추론 실패, 중립 확률로 축퇴");
                        NEUTRAL_PROBABILITY
                    }
                },
                _ => NEUTRAL_PROBABILITY,
            }
        }

        fn name(&self) -> &str {
            &self.config.model_name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn make_bars(count: usize, step: i64) -> Vec<Bar> {
        (0..count)
            .map(|i| {
                let c = Decimal::from(100 + step * i as i64);
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
            .collect()
    }

    #[tokio::test]
    async fn test_neutral_oracle() {
        let oracle = NeutralOracle::new();
        let bars = make_bars(60, 1);

        assert_eq!(oracle.probability(&bars).await, 0.5);
    }

    #[tokio::test]
    async fn test_mock_oracle_short_input_is_neutral() {
        let oracle = MockOracle::new();
        let bars = make_bars(30, 1);

        assert_eq!(oracle.probability(&bars).await, 0.5);
    }

    #[tokio::test]
    async fn test_mock_oracle_uptrend_above_neutral() {
        let oracle = MockOracle::new();
        let bars = make_bars(60, 2);

        let p = oracle.probability(&bars).await;
        assert!(p > 0.5);
        assert!(p <= 1.0);
    }

    #[tokio::test]
    async fn test_mock_oracle_downtrend_below_neutral() {
        let oracle = MockOracle::new();
        let bars = make_bars(60, -1);

        let p = oracle.probability(&bars).await;
        assert!(p < 0.5);
        assert!(p >= 0.0);
    }

    #[tokio::test]
    async fn test_mock_oracle_fixed_probability() {
        let oracle = MockOracle::with_probability(0.9);
        let bars = make_bars(60, 1);

        assert_eq!(oracle.probability(&bars).await, 0.9);
    }

    #[tokio::test]
    async fn test_mock_oracle_probability_clamped() {
        let oracle = MockOracle::with_probability(1.5);
        let bars = make_bars(60, 1);

        assert_eq!(oracle.probability(&bars).await, 1.0);
    }
}
