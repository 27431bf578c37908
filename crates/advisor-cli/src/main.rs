//! 주식 추천 어드바이저 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # 하이브리드 전략으로 추천 생성 (삼성전자)
//! advisor recommend -s 005930
//!
//! # 심플 전략으로 추천 생성
//! advisor recommend -s AAPL --strategy simple
//!
//! # 빠른 리포트 (혼합 점수 + 목표가/손절가)
//! advisor report -s SPY
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{error, info, warn};

#[cfg(feature = "ml")]
use advisor_analytics::{OnnxOracle, OracleConfig};
use advisor_analytics::{AdvisorService, NeutralOracle, ScoringStrategy, TrendOracle};
use advisor_core::logging::{init_logging, LogConfig};
use advisor_core::{AppConfig, Symbol};
use advisor_data::CsvPriceStore;

#[derive(Parser)]
#[command(name = "advisor")]
#[command(about = "Stock advisor CLI - 시그널 스코어링 기반 추천 시스템", long_about = None)]
#[command(version)]
struct Cli {
    /// 설정 파일 경로
    #[arg(short, long, default_value = "config/default.toml", global = true)]
    config: String,

    /// 가격 CSV 디렉터리 (설정 파일보다 우선)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 종목 추천 생성 (전체 스코어링 파이프라인)
    Recommend {
        /// 종목 코드/심볼 (예: 005930, SPY)
        #[arg(short, long)]
        symbol: String,

        /// 의사결정 전략 (simple, hybrid). 기본값은 설정 파일을 따름
        #[arg(long)]
        strategy: Option<String>,
    },

    /// 빠른 리포트 생성 (혼합 점수 + ±5% 목표가/손절가)
    Report {
        /// 종목 코드/심볼 (예: 005930, SPY)
        #[arg(short, long)]
        symbol: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 로드 (없으면 무시)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = load_config(&cli.config)?;

    init_logging(
        LogConfig::new(config.logging.level.clone())
            .with_format(config.logging.format.parse().unwrap_or_default()),
    )
    .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    let prices_dir = cli
        .data_dir
        .clone()
        .unwrap_or_else(|| config.data.prices_dir.clone());
    let store = Arc::new(CsvPriceStore::new(prices_dir));
    let oracle = build_oracle(&config);

    let service = AdvisorService::new(store, oracle)
        .with_oracle_timeout(std::time::Duration::from_secs(config.oracle.timeout_secs));

    match cli.command {
        Commands::Recommend { symbol, strategy } => {
            let strategy: ScoringStrategy = strategy
                .as_deref()
                .unwrap_or(&config.strategy.default_strategy)
                .parse()?;

            let symbol = Symbol::new(symbol);
            info!(symbol = %symbol, strategy = %strategy, "Generating recommendation");

            match service.recommend(&symbol, strategy).await? {
                Some(result) => {
                    println!("{}", serde_json::to_string_pretty(&result)?);
                }
                None => {
                    error!(symbol = %symbol, "No price data available");
                    println!("\n데이터를 찾을 수 없습니다: {}", symbol);
                    std::process::exit(1);
                }
            }
        }

        Commands::Report { symbol } => {
            let symbol = Symbol::new(symbol);
            info!(symbol = %symbol, "Generating quick report");

            match service.quick_report(&symbol).await? {
                Some(report) => {
                    println!("{}", serde_json::to_string_pretty(&report)?);
                }
                None => {
                    error!(symbol = %symbol, "No price data available");
                    println!("\n데이터를 찾을 수 없습니다: {}", symbol);
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}

/// 설정 파일이 있으면 로드하고, 없으면 기본값을 사용합니다.
fn load_config(path: &str) -> anyhow::Result<AppConfig> {
    if Path::new(path).exists() {
        Ok(AppConfig::load(path)?)
    } else {
        warn!("설정 파일 없음, 기본값 사용: {}", path);
        Ok(AppConfig::default())
    }
}

/// 설정에 따라 추세 확률 오라클을 생성합니다.
///
/// `ml` feature 없이 빌드되면 oracle.enabled 설정과 무관하게
/// 중립 오라클로 축퇴합니다.
fn build_oracle(config: &AppConfig) -> Arc<dyn TrendOracle> {
    #[cfg(feature = "ml")]
    if config.oracle.enabled {
        info!(
            model = %config.oracle.model_path.display(),
            "Using ONNX trend oracle"
        );
        return Arc::new(OnnxOracle::new(OracleConfig::new(
            config.oracle.model_path.clone(),
        )));
    }

    if config.oracle.enabled {
        warn!("oracle.enabled 설정이 켜져 있지만 ml feature 없이 빌드됨, 중립 오라클 사용");
    }
    Arc::new(NeutralOracle::new())
}
