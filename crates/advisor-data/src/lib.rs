//! # Advisor Data
//!
//! 어드바이저 코어가 소비하는 가격 시계열 로딩 계층입니다.
//!
//! 이 크레이트는 데이터 협력자를 [`PriceStore`] 트레이트 뒤에 두어
//! 코어가 저장 방식과 무관하게 동작하도록 합니다:
//! - [`CsvPriceStore`] - 심볼별 CSV 파일 기반 저장소
//! - [`MemoryPriceStore`] - 테스트용 인메모리 저장소
//!
//! # 부재 데이터 규약
//!
//! 요청된 심볼의 시계열을 찾을 수 없으면 에러가 아니라 `Ok(None)`을
//! 반환합니다. 호출자는 이를 not-found 응답으로 변환해야 합니다.

pub mod store;

pub use store::{CsvPriceStore, MemoryPriceStore, PriceStore};
