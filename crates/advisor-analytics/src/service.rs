//! 어드바이저리 서비스.
//!
//! 가격 저장소, 피처 빌더, 오라클, 의사결정 엔진을 하나로 묶는
//! 파이프라인의 진입점입니다.
//!
//! # 부재 데이터 계약
//!
//! 심볼의 시계열이 없거나 피처 테이블이 비면 `Ok(None)` 센티널을
//! 반환합니다 — 에러가 아니며, 호출자가 not-found 응답으로 변환해야
//! 합니다. 코어 내부에는 치명적 에러가 없습니다. 데이터 형태 문제로
//! 처리되지 않은 예외가 표면화되는 일은 없어야 합니다.

use std::sync::Arc;
use std::time::Duration;

use rust_decimal_macros::dec;
use tracing::{debug, info, warn};

use advisor_core::{
    AdvisorError, AdvisorResult, Bar, ConfidenceLevel, DecisionResult, QuickReport,
    ScoreComponent, Symbol,
};
use advisor_data::PriceStore;

use crate::decision::{normalize_raw, round2, HybridEngine, ScoringStrategy, SimpleEngine};
use crate::features::FeatureBuilder;
use crate::oracle::{TrendOracle, NEUTRAL_PROBABILITY, SEQUENCE_LENGTH};

/// 오라클 호출 기본 타임아웃.
const DEFAULT_ORACLE_TIMEOUT: Duration = Duration::from_secs(5);

/// 어드바이저리 서비스.
///
/// 저장소와 오라클은 공유 가능한 trait 객체로 주입됩니다.
pub struct AdvisorService {
    store: Arc<dyn PriceStore>,
    oracle: Arc<dyn TrendOracle>,
    builder: FeatureBuilder,
    hybrid: HybridEngine,
    simple: SimpleEngine,
    oracle_timeout: Duration,
}

impl AdvisorService {
    /// 저장소와 오라클로 서비스 생성.
    pub fn new(store: Arc<dyn PriceStore>, oracle: Arc<dyn TrendOracle>) -> Self {
        Self {
            store,
            oracle,
            builder: FeatureBuilder::new(),
            hybrid: HybridEngine::new(),
            simple: SimpleEngine::new(),
            oracle_timeout: DEFAULT_ORACLE_TIMEOUT,
        }
    }

    /// 오라클 타임아웃 설정.
    pub fn with_oracle_timeout(mut self, timeout: Duration) -> Self {
        self.oracle_timeout = timeout;
        self
    }

    /// 심볼에 대한 매매 추천을 계산합니다.
    ///
    /// 시계열 부재 또는 워밍업 미달 → `Ok(None)`.
    pub async fn recommend(
        &self,
        symbol: &Symbol,
        strategy: ScoringStrategy,
    ) -> AdvisorResult<Option<DecisionResult>> {
        let Some(bars) = self.store.load(symbol).await? else {
            debug!(%symbol, "가격 시계열 없음");
            return Ok(None);
        };

        let rows = self
            .builder
            .build(&bars)
            .map_err(|e| AdvisorError::Internal(e.to_string()))?;

        let Some(latest) = rows.last() else {
            debug!(%symbol, bars = bars.len(), "피처 테이블이 비어 있음 (워밍업 미달)");
            return Ok(None);
        };

        let result = match strategy {
            ScoringStrategy::Hybrid => {
                let lstm_prob = self.oracle_probability(&bars).await;
                self.hybrid.decide(latest, &bars, lstm_prob)
            }
            ScoringStrategy::Simple => self.simple_decision(latest),
        };

        info!(
            %symbol,
            %strategy,
            decision = %result.decision,
            final_score = result.final_score,
            confidence = result.confidence,
            "추천 계산 완료"
        );

        Ok(Some(result))
    }

    /// 축약된 요약 리포트를 계산합니다.
    ///
    /// 3-시그널 점수와 오라클 확률을 60/40으로 혼합하고 고정 ±5%
    /// 목표가/손절가 밴드를 붙입니다. 임계값은 75/50/25입니다.
    pub async fn quick_report(&self, symbol: &Symbol) -> AdvisorResult<Option<QuickReport>> {
        let Some(bars) = self.store.load(symbol).await? else {
            return Ok(None);
        };

        let rows = self
            .builder
            .build(&bars)
            .map_err(|e| AdvisorError::Internal(e.to_string()))?;

        let Some(latest) = rows.last() else {
            return Ok(None);
        };

        let simple = self.simple.evaluate(latest);

        let lstm_prob = self
            .oracle_probability(&bars)
            .await
            .unwrap_or(NEUTRAL_PROBABILITY);
        let lstm_score = lstm_prob * 100.0;

        // 60% 기술적 점수 + 40% 오라클 확률 혼합
        let score = simple.score * 0.6 + lstm_score * 0.4;

        let decision = if score >= 75.0 {
            advisor_core::Decision::StrongBuy
        } else if score >= 50.0 {
            advisor_core::Decision::Buy
        } else if score >= 25.0 {
            advisor_core::Decision::Hold
        } else {
            advisor_core::Decision::Avoid
        };

        let latest_price = latest.bar.close;

        Ok(Some(QuickReport {
            symbol: symbol.clone(),
            decision,
            score: round2(score),
            technical_score: round2(simple.score),
            lstm_probability: round2(lstm_score),
            latest_price,
            target: latest_price * dec!(1.05),
            stop: latest_price * dec!(0.95),
            explanation: simple.explanation,
        }))
    }

    /// 타임아웃을 적용해 오라클 확률을 얻습니다.
    ///
    /// 타임아웃은 "사용 불가"(None)로 취급되며 재시도하지 않습니다.
    /// 시퀀스 길이 미달은 오라클 계약에 따라 중립 확률이 됩니다.
    async fn oracle_probability(&self, bars: &[Bar]) -> Option<f64> {
        if bars.len() < SEQUENCE_LENGTH {
            return Some(NEUTRAL_PROBABILITY);
        }

        match tokio::time::timeout(self.oracle_timeout, self.oracle.probability(bars)).await {
            Ok(p) => Some(p.clamp(0.0, 1.0)),
            Err(_) => {
                warn!(
                    oracle = self.oracle.name(),
                    timeout_ms = self.oracle_timeout.as_millis() as u64,
                    "오라클 타임아웃, 중립 확률로 축퇴"
                );
                None
            }
        }
    }

    /// 단순 전략의 결과를 DecisionResult 형태로 맞춥니다.
    ///
    /// 단순 합산기는 신뢰도 개념이 없으므로 하이브리드의 기본 신뢰도
    /// 공식(리스크 조정 없음)을 재사용합니다.
    fn simple_decision(&self, latest: &crate::features::FeatureRow) -> DecisionResult {
        let technical = crate::scoring::technical::score(latest);
        let trend = crate::scoring::trend::score(latest);
        let risk = crate::scoring::risk::score(latest);

        let simple = self.simple.evaluate(latest);
        let confidence = round2(((simple.score - 50.0).abs() * 1.5 + 25.0).clamp(0.0, 100.0));

        let mut components = std::collections::BTreeMap::new();
        for (name, comp) in [
            ("technical", technical),
            ("trend", trend),
            ("risk", risk),
        ] {
            components.insert(
                name.to_string(),
                ScoreComponent::new(name, comp.raw, round2(normalize_raw(comp.raw)), 0.0, comp.reasons),
            );
        }

        let mut explanation = simple.explanation.clone();
        explanation.push(format!("Final Decision: {}", simple.decision));

        DecisionResult {
            decision: simple.decision,
            final_score: round2(simple.score),
            confidence,
            confidence_level: ConfidenceLevel::from_pct(confidence),
            components,
            explanation,
        }
    }
}
