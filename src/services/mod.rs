//! 애플리케이션 서비스 계층 모듈
//!
//! 저장소 연결과 코덱을 조합해 호출자에게 실패하지 않는 API를 제공합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::cache::CacheService;
//!
//! let cache = CacheService::new(store);
//! cache.sadd("online", &["kim".to_string()]).await;
//! ```

pub mod cache;
