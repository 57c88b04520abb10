//! 캐시 계층에서 사용하는 에러 시스템
//!
//! 캐시 파사드를 위한 통합 에러 처리 시스템입니다.
//! `thiserror`로 에러 분류를 정의하고, 파사드 경계에서는 [`Sentinel`] trait을 통해
//! 모든 에러를 로그로 남긴 뒤 타입별 기본값(센티널)으로 변환합니다.
//!
//! ## 에러 분류
//!
//! | 분류 | 변형 | 예시 |
//! |------|------|------|
//! | (a) 연결/풀 | `Connection`, `PoolTimeout`, `CommandTimeout` | 서버 다운, 풀 고갈 |
//! | (b) 직렬화 | `Codec` | 손상된 바이트, 타입 태그 불일치 |
//! | (c) 명령 | `Command` | `WRONGTYPE` 등 서버가 거부한 명령 |
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::errors::{CacheResult, Sentinel};
//!
//! async fn size(&self, key: &str) -> u64 {
//!     let result: CacheResult<u64> = self.store.scard(key).await;
//!     result.or_sentinel("scard", key) // 실패 시 로그 후 0 반환
//! }
//! ```

use thiserror::Error;

/// 코덱 에러
///
/// 값의 직렬화/역직렬화 과정에서 발생하는 에러입니다.
/// "키 없음"(`None`)과 구분되는 별도의 실패로 전달됩니다.
#[derive(Error, Debug)]
pub enum CodecError {
    /// 값을 바이트로 변환하지 못함
    #[error("Serialization failed: {0}")]
    Serialize(String),

    /// 페이로드를 대상 타입으로 변환하지 못함
    #[error("Deserialization failed: {0}")]
    Deserialize(String),

    /// 프레임 구조 자체가 손상됨 (길이 접두사, UTF-8 태그 등)
    #[error("Malformed payload: {0}")]
    Malformed(String),

    /// 저장된 타입 태그가 요청한 타입과 다름
    #[error("Type mismatch: expected `{expected}`, found `{found}`")]
    TypeMismatch { expected: String, found: String },
}

/// 캐시 계층 전역 에러 타입
///
/// 저장소 연결, 코덱, 서버 명령 실패를 모두 포괄합니다.
/// 파사드의 public 메서드는 이 에러를 밖으로 전파하지 않습니다.
#[derive(Error, Debug)]
pub enum CacheError {
    /// 연결 실패 / 네트워크 오류
    #[error("Connection error: {0}")]
    Connection(String),

    /// 풀에서 제한 시간 내에 연결을 빌리지 못함
    #[error("Timed out after {0}ms waiting for a pooled connection")]
    PoolTimeout(u64),

    /// 명령 응답이 제한 시간 내에 오지 않음
    #[error("Command timed out after {0}ms")]
    CommandTimeout(u64),

    /// 서버가 거부한 명령 (예: WRONGTYPE)
    #[error("Command error: {0}")]
    Command(String),

    /// 직렬화/역직렬화 실패
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// 잘못된 설정값
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<redis::RedisError> for CacheError {
    fn from(e: redis::RedisError) -> Self {
        if e.is_timeout() {
            CacheError::Connection(format!("timeout: {}", e))
        } else if e.is_connection_refusal() || e.is_connection_dropped() || e.is_io_error() {
            CacheError::Connection(e.to_string())
        } else {
            CacheError::Command(e.to_string())
        }
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type CacheResult<T> = Result<T, CacheError>;

/// 에러를 센티널 값으로 변환하는 경계 어댑터
///
/// 파사드의 모든 연산이 이 trait 하나를 재사용합니다. 실패 원인을
/// `error!` 로그로 남기고 `T::default()`를 반환합니다.
///
/// | 반환 타입 | 센티널 |
/// |-----------|--------|
/// | `bool` | `false` |
/// | `u64` / `i64` / `f64` | `0` / `0.0` |
/// | `Option<T>` | `None` |
/// | `Vec<T>` / `HashMap<K, V>` | 빈 컬렉션 |
pub trait Sentinel<T> {
    /// 실패 시 연산 이름과 키를 포함해 로그를 남기고 기본값을 반환합니다.
    fn or_sentinel(self, op: &str, key: &str) -> T;
}

impl<T: Default> Sentinel<T> for CacheResult<T> {
    fn or_sentinel(self, op: &str, key: &str) -> T {
        match self {
            Ok(value) => value,
            Err(e) => {
                log::error!("cache operation `{}` failed for key '{}': {}", op, key, e);
                T::default()
            }
        }
    }
}
