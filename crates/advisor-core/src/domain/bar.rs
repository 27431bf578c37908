//! OHLCV 바 데이터 타입.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{AdvisorError, AdvisorResult};

/// 하나의 OHLCV 관측값 (일반적으로 일봉).
///
/// 로드된 이후에는 불변입니다. 모든 숫자 필드는 0 이상이어야 하고
/// `high >= low`를 만족해야 합니다. 검증은 [`Bar::validate`]로 수행합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// 관측 날짜
    pub date: NaiveDate,
    /// 시가
    pub open: Decimal,
    /// 고가
    pub high: Decimal,
    /// 저가
    pub low: Decimal,
    /// 종가
    pub close: Decimal,
    /// 거래량
    pub volume: Decimal,
}

impl Bar {
    /// 새 바를 생성합니다.
    pub fn new(
        date: NaiveDate,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
        volume: Decimal,
    ) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// 바 데이터의 형태 불변성을 검증합니다.
    ///
    /// - 모든 필드 0 이상
    /// - `high >= low`
    pub fn validate(&self) -> AdvisorResult<()> {
        if self.open < Decimal::ZERO
            || self.high < Decimal::ZERO
            || self.low < Decimal::ZERO
            || self.close < Decimal::ZERO
            || self.volume < Decimal::ZERO
        {
            return Err(AdvisorError::InvalidInput(format!(
                "음수 OHLCV 필드: {}",
                self.date
            )));
        }

        if self.high < self.low {
            return Err(AdvisorError::InvalidInput(format!(
                "고가 < 저가: {}",
                self.date
            )));
        }

        Ok(())
    }

    /// 캔들 몸통 크기(절대값)를 반환합니다.
    pub fn body_size(&self) -> Decimal {
        (self.close - self.open).abs()
    }

    /// 부호 있는 몸통 크기(종가 - 시가)를 반환합니다.
    pub fn signed_body(&self) -> Decimal {
        self.close - self.open
    }

    /// 캔들 범위(고가 - 저가)를 반환합니다.
    pub fn range(&self) -> Decimal {
        self.high - self.low
    }

    /// 상단 그림자 크기를 반환합니다.
    pub fn upper_shadow(&self) -> Decimal {
        self.high - self.open.max(self.close)
    }

    /// 하단 그림자 크기를 반환합니다.
    pub fn lower_shadow(&self) -> Decimal {
        self.open.min(self.close) - self.low
    }

    /// 양봉(종가 > 시가)인지 확인합니다.
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    /// 음봉(종가 < 시가)인지 확인합니다.
    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn bar(open: Decimal, high: Decimal, low: Decimal, close: Decimal) -> Bar {
        Bar::new(
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            open,
            high,
            low,
            close,
            dec!(1000),
        )
    }

    #[test]
    fn test_bar_validate_ok() {
        let b = bar(dec!(100), dec!(105), dec!(99), dec!(103));
        assert!(b.validate().is_ok());
    }

    #[test]
    fn test_bar_validate_high_below_low() {
        let b = bar(dec!(100), dec!(98), dec!(99), dec!(100));
        assert!(b.validate().is_err());
    }

    #[test]
    fn test_bar_validate_negative() {
        let mut b = bar(dec!(100), dec!(105), dec!(99), dec!(103));
        b.volume = dec!(-1);
        assert!(b.validate().is_err());
    }

    #[test]
    fn test_bar_candle_geometry() {
        // 시가 100, 고가 110, 저가 90, 종가 104
        let b = bar(dec!(100), dec!(110), dec!(90), dec!(104));

        assert_eq!(b.body_size(), dec!(4));
        assert_eq!(b.signed_body(), dec!(4));
        assert_eq!(b.range(), dec!(20));
        assert_eq!(b.upper_shadow(), dec!(6));
        assert_eq!(b.lower_shadow(), dec!(10));
        assert!(b.is_bullish());
        assert!(!b.is_bearish());
    }
}
