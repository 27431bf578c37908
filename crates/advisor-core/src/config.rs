//! 설정 관리.
//!
//! 이 모듈은 어드바이저 애플리케이션 설정을 정의하고 관리합니다.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// 가격 데이터 설정
    #[serde(default)]
    pub data: DataConfig,
    /// 추세 확률 오라클 설정
    #[serde(default)]
    pub oracle: OracleSettings,
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
    /// 의사결정 전략 설정
    #[serde(default)]
    pub strategy: StrategyConfig,
}

/// 가격 데이터 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataConfig {
    /// 심볼별 CSV 파일이 위치한 디렉터리
    pub prices_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            prices_dir: PathBuf::from("data/prices"),
        }
    }
}

/// 추세 확률 오라클 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OracleSettings {
    /// ONNX 모델 파일 경로
    pub model_path: PathBuf,
    /// 모델 입력 시퀀스 길이 (바 개수)
    pub sequence_length: usize,
    /// 오라클 호출 타임아웃 (초)
    pub timeout_secs: u64,
    /// 오라클 사용 여부 (false면 중립 확률 0.5 고정)
    pub enabled: bool,
}

impl Default for OracleSettings {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("models/lstm_trend_model.onnx"),
            sequence_length: 60,
            timeout_secs: 5,
            enabled: false,
        }
    }
}

/// 로깅 설정 (파일 기반).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// 의사결정 전략 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StrategyConfig {
    /// 기본 전략 이름 (simple, hybrid)
    pub default_strategy: String,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            default_strategy: "hybrid".to_string(),
        }
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            // 기본값으로 시작
            .set_default("data.prices_dir", "data/prices")?
            .set_default("strategy.default_strategy", "hybrid")?
            // 파일에서 로드
            .add_source(config::File::from(path.as_ref()))
            // 환경 변수로 오버라이드
            .add_source(
                config::Environment::with_prefix("ADVISOR")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// 기본 경로에서 설정을 로드합니다.
    pub fn load_default() -> Result<Self, config::ConfigError> {
        Self::load("config/default.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.oracle.sequence_length, 60);
        assert_eq!(config.oracle.timeout_secs, 5);
        assert!(!config.oracle.enabled);
        assert_eq!(config.strategy.default_strategy, "hybrid");
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = AppConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.data.prices_dir, config.data.prices_dir);
    }
}
