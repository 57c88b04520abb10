//! 캐싱 계층 모듈
//!
//! Redis를 백엔드로 하는 저장소 연결과 타입 태그 기반 객체 직렬화를 제공합니다.
//!
//! # 주요 기능
//!
//! - [`store`] - 파사드가 의존하는 바이트 단위 저장소 trait (`KeyValueStore`)
//! - [`redis`] - 풀 한도가 적용된 Redis 구현 (`RedisStore`)
//! - [`codec`] - 길이 접두사 + 타입 태그 직렬화 (`TaggedJsonCodec`)
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use crate::caching::redis::RedisStore;
//! use crate::config::RedisConfig;
//!
//! let store = Arc::new(RedisStore::connect(&RedisConfig::from_env()).await?);
//! store.ping().await?;
//! ```
//!
//! # 환경 설정
//!
//! ```bash
//! REDIS_HOST=127.0.0.1   # 기본값
//! REDIS_PORT=6379        # 기본값
//! ```

pub mod codec;
pub mod redis;
pub mod store;

#[cfg(test)]
pub(crate) mod memory;
