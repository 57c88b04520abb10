//! 캐시 계층 전역 에러 모듈
//!
//! - [`errors`] - `CacheError`, `CodecError`, 센티널 변환 trait

pub mod errors;

pub use errors::*;
