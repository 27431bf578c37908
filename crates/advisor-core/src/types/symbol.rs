//! 심볼 정의.
//!
//! 종목 심볼은 대소문자를 구분하지 않는 식별자입니다.
//! 거래소 접미사(예: ".NS")가 붙은 형태도 허용하며,
//! 데이터 조회 시에는 접미사를 제거한 코드를 사용합니다.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 거래 가능한 종목을 나타내는 심볼.
///
/// 생성 시 대문자로 정규화되므로 `Symbol::new("reliance.ns")`와
/// `Symbol::new("RELIANCE.NS")`는 동일합니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// 새 심볼을 생성합니다. 입력은 대문자로 정규화됩니다.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().trim().to_uppercase())
    }

    /// 원본 심볼 문자열을 반환합니다 (접미사 포함).
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 거래소 접미사를 제거한 코드를 반환합니다.
    ///
    /// 예: "RELIANCE.NS" → "RELIANCE"
    pub fn code(&self) -> &str {
        match self.0.split_once('.') {
            Some((code, _suffix)) => code,
            None => &self.0,
        }
    }

    /// 심볼이 비어 있는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
