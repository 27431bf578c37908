//! 의사결정 엔진.
//!
//! 관찰된 시스템에는 서로 다른 두 결합 알고리즘이 공존합니다:
//!
//! - [`HybridEngine`] - 5-시그널 가중 결합기 (임계값 75/60/40)
//! - [`SimpleEngine`] - 3-시그널 단순 합산기 (임계값 75/60/45)
//!
//! 가중치와 임계값이 서로 다른 것은 의도된 비일관성이므로 병합하지
//! 않고 [`ScoringStrategy`]로 이름을 붙여 하나의 인터페이스 뒤에
//! 둡니다.

pub mod hybrid;
pub mod simple;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use advisor_core::{AdvisorError, AdvisorResult};

pub use hybrid::HybridEngine;
pub use simple::{SimpleEngine, SimpleScore};

/// 의사결정 전략 선택자.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringStrategy {
    /// 3-시그널 단순 합산기.
    Simple,
    /// 5-시그널 하이브리드 결합기.
    Hybrid,
}

impl Default for ScoringStrategy {
    fn default() -> Self {
        Self::Hybrid
    }
}

impl fmt::Display for ScoringStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simple => write!(f, "simple"),
            Self::Hybrid => write!(f, "hybrid"),
        }
    }
}

impl FromStr for ScoringStrategy {
    type Err = AdvisorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "simple" => Ok(Self::Simple),
            "hybrid" => Ok(Self::Hybrid),
            other => Err(AdvisorError::InvalidInput(format!(
                "알 수 없는 전략: {other}"
            ))),
        }
    }
}

/// 하이브리드 결합기의 컴포넌트 가중치.
///
/// {technical, trend, sentiment, pattern, lstm}의 합은 1.0이어야
/// 합니다. risk는 합성 점수에서 제외되고 신뢰도만 조정하므로
/// 가중치를 갖지 않습니다.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ComponentWeights {
    /// 기술적 지표 가중치.
    pub technical: f64,
    /// 추세 가중치.
    pub trend: f64,
    /// 심리 가중치.
    pub sentiment: f64,
    /// 패턴 가중치.
    pub pattern: f64,
    /// 오라클(LSTM) 확률 가중치.
    pub lstm: f64,
}

impl Default for ComponentWeights {
    fn default() -> Self {
        Self {
            technical: 0.35,
            trend: 0.25,
            sentiment: 0.10,
            pattern: 0.15,
            lstm: 0.15,
        }
    }
}

impl ComponentWeights {
    /// 가중치 합이 1.0인지 검증합니다.
    pub fn validate(&self) -> AdvisorResult<()> {
        let sum = self.technical + self.trend + self.sentiment + self.pattern + self.lstm;
        if (sum - 1.0).abs() > 1e-9 {
            return Err(AdvisorError::InvalidInput(format!(
                "가중치 합이 1.0이 아닙니다: {sum}"
            )));
        }
        Ok(())
    }
}

/// raw 점수를 +50 오프셋과 [0,100] 클램프로 정규화합니다.
pub(crate) fn normalize_raw(raw: f64) -> f64 {
    (50.0 + raw).clamp(0.0, 100.0)
}

/// 소수점 2자리 반올림.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
