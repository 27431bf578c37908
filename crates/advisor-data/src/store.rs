//! 가격 시계열 저장소.
//!
//! 원본 데이터 파이프라인이 내려받은 심볼별 CSV 파일
//! (`<DIR>/<CLEAN_SYMBOL>.csv`, 컬럼: Date,Open,High,Low,Close,Volume)을
//! 읽어 검증된 [`Bar`] 시퀀스로 변환합니다.
//!
//! # 손상 행 처리
//!
//! 숫자로 강제 변환할 수 없거나 형태 불변성(`high >= low`, 비음수)을
//! 위반하는 행은 에러 없이 버려집니다. 모든 행이 버려지면 빈 시퀀스가
//! 되고, 이는 하류에서 "데이터 없음" 센티널로 수렴합니다.

use std::collections::HashMap;
use std::io::Read;
use std::path::PathBuf;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use advisor_core::{AdvisorError, AdvisorResult, Bar, Symbol};

/// 가격 시계열 제공자.
///
/// 구현체는 날짜 오름차순으로 정렬된 바를 반환해야 합니다.
#[async_trait]
pub trait PriceStore: Send + Sync {
    /// 심볼의 가격 시계열을 로드합니다.
    ///
    /// 시계열이 존재하지 않으면 `Ok(None)`을 반환합니다 (에러 아님).
    async fn load(&self, symbol: &Symbol) -> AdvisorResult<Option<Vec<Bar>>>;
}

/// CSV 파일 기반 가격 저장소.
pub struct CsvPriceStore {
    base_dir: PathBuf,
}

impl CsvPriceStore {
    /// 주어진 디렉터리를 사용하는 저장소를 생성합니다.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// 심볼에 대응하는 파일 경로를 반환합니다.
    ///
    /// 거래소 접미사는 제거됩니다: "RELIANCE.NS" → "RELIANCE.csv"
    fn csv_path(&self, symbol: &Symbol) -> PathBuf {
        self.base_dir.join(format!("{}.csv", symbol.code()))
    }

    /// CSV 리더에서 바 시퀀스를 파싱합니다.
    ///
    /// 파싱 불가능한 행은 버리고 계속 진행합니다. 날짜 오름차순으로
    /// 정렬하여 반환합니다.
    pub fn parse_bars<R: Read>(reader: R) -> AdvisorResult<Vec<Bar>> {
        let mut rdr = csv::Reader::from_reader(reader);
        let mut bars = Vec::new();
        let mut dropped = 0usize;

        for (line, result) in rdr.records().enumerate() {
            let record = match result {
                Ok(r) => r,
                Err(e) => {
                    debug!(line, error = %e, "CSV 레코드 파싱 실패, 행 무시");
                    dropped += 1;
                    continue;
                }
            };

            match Self::parse_record(&record) {
                Some(bar) => bars.push(bar),
                None => {
                    debug!(line, "숫자 강제 변환 실패 또는 불변성 위반, 행 무시");
                    dropped += 1;
                }
            }
        }

        if dropped > 0 {
            debug!(dropped, kept = bars.len(), "손상 행 제거 완료");
        }

        bars.sort_by_key(|b| b.date);
        Ok(bars)
    }

    /// 단일 레코드를 바로 변환합니다. 실패하면 None.
    fn parse_record(record: &csv::StringRecord) -> Option<Bar> {
        let date = NaiveDate::parse_from_str(record.get(0)?.trim(), "%Y-%m-%d").ok()?;
        let open: Decimal = record.get(1)?.trim().parse().ok()?;
        let high: Decimal = record.get(2)?.trim().parse().ok()?;
        let low: Decimal = record.get(3)?.trim().parse().ok()?;
        let close: Decimal = record.get(4)?.trim().parse().ok()?;
        let volume: Decimal = record.get(5)?.trim().parse().ok()?;

        let bar = Bar::new(date, open, high, low, close, volume);
        bar.validate().ok()?;
        Some(bar)
    }
}

#[async_trait]
impl PriceStore for CsvPriceStore {
    async fn load(&self, symbol: &Symbol) -> AdvisorResult<Option<Vec<Bar>>> {
        let path = self.csv_path(symbol);

        if !path.exists() {
            return Ok(None);
        }

        let file = std::fs::File::open(&path).map_err(|e| {
            AdvisorError::Data(format!("{} 열기 실패: {}", path.display(), e))
        })?;

        let bars = Self::parse_bars(file)?;
        Ok(Some(bars))
    }
}

/// 테스트용 인메모리 가격 저장소.
#[derive(Debug, Default)]
pub struct MemoryPriceStore {
    series: HashMap<Symbol, Vec<Bar>>,
}

impl MemoryPriceStore {
    /// 빈 저장소를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 심볼의 시계열을 등록합니다.
    pub fn insert(&mut self, symbol: Symbol, mut bars: Vec<Bar>) {
        bars.sort_by_key(|b| b.date);
        self.series.insert(symbol, bars);
    }

    /// 시계열 등록 빌더.
    pub fn with_series(mut self, symbol: Symbol, bars: Vec<Bar>) -> Self {
        self.insert(symbol, bars);
        self
    }
}

#[async_trait]
impl PriceStore for MemoryPriceStore {
    async fn load(&self, symbol: &Symbol) -> AdvisorResult<Option<Vec<Bar>>> {
        Ok(self.series.get(symbol).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const SAMPLE_CSV: &str = "\
Date,Open,High,Low,Close,Volume
2024-01-02,100.0,105.0,99.0,103.0,10000
2024-01-03,103.0,107.0,101.0,106.0,12000
";

    const DIRTY_CSV: &str = "\
Date,Open,High,Low,Close,Volume
2024-01-02,100.0,105.0,99.0,103.0,10000
2024-01-03,abc,107.0,101.0,106.0,12000
2024-01-04,104.0,102.0,103.0,104.0,9000
2024-01-05,104.0,108.0,102.0,107.0,11000
";

    #[test]
    fn test_parse_bars_basic() {
        let bars = CsvPriceStore::parse_bars(SAMPLE_CSV.as_bytes()).unwrap();

        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].close, dec!(103.0));
        assert_eq!(bars[1].volume, dec!(12000));
    }

    #[test]
    fn test_parse_bars_drops_malformed_rows() {
        // 2행: 숫자가 아닌 시가, 3행: 고가 < 저가 → 둘 다 제거
        let bars = CsvPriceStore::parse_bars(DIRTY_CSV.as_bytes()).unwrap();

        assert_eq!(bars.len(), 2);
        assert_eq!(
            bars[0].date,
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
        );
        assert_eq!(
            bars[1].date,
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
        );
    }

    #[test]
    fn test_parse_bars_sorted_ascending() {
        let csv = "\
Date,Open,High,Low,Close,Volume
2024-01-05,104.0,108.0,102.0,107.0,11000
2024-01-02,100.0,105.0,99.0,103.0,10000
";
        let bars = CsvPriceStore::parse_bars(csv.as_bytes()).unwrap();

        assert_eq!(bars.len(), 2);
        assert!(bars[0].date < bars[1].date);
    }

    #[tokio::test]
    async fn test_csv_store_missing_symbol_is_none() {
        let store = CsvPriceStore::new("nonexistent-dir");
        let result = store.load(&Symbol::new("NOPE")).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_memory_store_roundtrip() {
        let bars = CsvPriceStore::parse_bars(SAMPLE_CSV.as_bytes()).unwrap();
        let store = MemoryPriceStore::new().with_series(Symbol::new("TCS"), bars);

        let loaded = store.load(&Symbol::new("tcs")).await.unwrap().unwrap();
        assert_eq!(loaded.len(), 2);

        let missing = store.load(&Symbol::new("INFY")).await.unwrap();
        assert!(missing.is_none());
    }
}
