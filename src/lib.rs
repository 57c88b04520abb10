//! 캐시 파사드
//!
//! Redis 클라이언트를 감싸 문자열, 해시, 집합, 리스트, 정렬 집합 연산과
//! 만료 관리를 하나의 서비스로 제공합니다.
//! 모든 연산은 실패를 전파하지 않고 로그를 남긴 뒤 정해진 기본값을 반환합니다.
//!
//! # Features
//!
//! - **타입 태그 코덱**: 값과 함께 구체 타입 태그를 저장하여 읽을 때 타입을 검증
//! - **실패 안전 파사드**: 연결/직렬화/명령 에러를 `false`, `0`, `None`, 빈 컬렉션으로 변환
//! - **풀 한도**: 동시 요청 수, 대기 시간, 명령 타임아웃 제한
//! - **환경 변수 설정**: `.env` 프로필과 `REDIS_*` 변수
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  CacheService   │ ← 실패 안전 파사드 (services::cache)
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ TaggedJsonCodec │ ← 타입 태그 + JSON (caching::codec)
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ KeyValueStore   │ ← 바이트 단위 저장소 trait (caching::store)
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   RedisStore    │ ← ConnectionManager + 세마포어 (caching::redis)
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use cache_facade::caching::redis::RedisStore;
//! use cache_facade::config::RedisConfig;
//! use cache_facade::domain::User;
//! use cache_facade::services::cache::CacheService;
//!
//! let store = RedisStore::connect(&RedisConfig::from_env()).await?;
//! let cache = CacheService::new(Arc::new(store));
//!
//! cache.set_with_expiry("user:kim", &User::new("kim", 20, vec![90]), 60).await;
//! let user: Option<User> = cache.get("user:kim").await;
//! ```

pub mod config;
pub mod caching;
pub mod domain;
pub mod services;
pub mod errors;
