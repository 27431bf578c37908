//! 어드바이저 시스템의 에러 타입.
//!
//! 이 모듈은 어드바이저 시스템 전반에서 사용되는 에러 타입을 정의합니다.
//! 코어 파이프라인 자체는 데이터 형태 문제로 에러를 내지 않습니다.
//! 데이터가 없거나 부족하면 "결과 없음" 센티널(`Ok(None)`)로 처리하고,
//! 에러는 설정 문제나 프로그래밍 결함 같은 예외적인 경우에만 발생합니다.

use thiserror::Error;

/// 핵심 어드바이저 에러.
#[derive(Debug, Error)]
pub enum AdvisorError {
    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 데이터 에러 (읽기 실패, 손상된 파일 등)
    #[error("데이터 에러: {0}")]
    Data(String),

    /// 찾을 수 없음
    #[error("찾을 수 없음: {0}")]
    NotFound(String),

    /// 잘못된 입력
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),

    /// 직렬화 에러
    #[error("직렬화 에러: {0}")]
    Serialization(String),

    /// 내부 에러 (프로그래밍 결함)
    #[error("내부 에러: {0}")]
    Internal(String),
}

/// 어드바이저 작업을 위한 Result 타입.
pub type AdvisorResult<T> = Result<T, AdvisorError>;

impl AdvisorError {
    /// 호출자가 not-found 응답으로 변환해야 하는 에러인지 확인합니다.
    pub fn is_not_found(&self) -> bool {
        matches!(self, AdvisorError::NotFound(_))
    }

    /// 내부 결함으로 hard failure 처리해야 하는 에러인지 확인합니다.
    pub fn is_internal(&self) -> bool {
        matches!(self, AdvisorError::Internal(_))
    }
}

impl From<serde_json::Error> for AdvisorError {
    fn from(err: serde_json::Error) -> Self {
        AdvisorError::Serialization(err.to_string())
    }
}
