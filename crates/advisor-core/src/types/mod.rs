//! 공용 타입 정의.

pub mod symbol;

pub use symbol::Symbol;
