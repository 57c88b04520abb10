//! # 캐시 파사드 서비스
//!
//! Spring의 `RedisService` / `RedisTemplate` 조합과 같은 역할을 하는 파사드입니다.
//! 문자열, 해시, 집합, 리스트, 정렬 집합 연산과 만료 관리를 Redis 명령 단위로 제공합니다.
//!
//! ## 실패 처리 원칙
//!
//! 모든 public 연산은 에러를 전파하지 않습니다. 연결 실패, 직렬화 실패, 명령 에러 모두
//! [`Sentinel`] 어댑터에서 로그로 남긴 뒤 타입별 기본값으로 변환됩니다.
//!
//! | 반환 타입 | 실패 시 |
//! |-----------|---------|
//! | `bool` | `false` |
//! | `u64` / `i64` / `f64` | `0` / `0.0` |
//! | `Option<T>` | `None` |
//! | `Vec<T>` / `HashMap` | 빈 컬렉션 |
//!
//! 따라서 반환값만으로는 "키 없음", "서버 다운", "값 손상"을 구분할 수 없습니다.
//! 원인은 `error!` 로그로만 확인할 수 있습니다.
//!
//! ## 만료 정책
//!
//! 만료 시간(초)이 0 이하이면 "만료 없음"으로 취급합니다. 즉시 삭제로 해석하지 않습니다.
//!
//! - `expire(key, 0)` → 아무 것도 하지 않고 `false`
//! - `set_with_expiry(key, v, 0)` → 만료 없이 저장
//!
//! ## 모듈 구성
//!
//! - [`value_ops`] - 문자열 값 (`get`, `set`, `set_if_absent`, `incr_by` ...)
//! - [`hash_ops`] - 해시 (`hget`, `hset`, `hincr` ...)
//! - [`set_ops`] - 집합 (`sadd`, `smembers`, `smove` ...)
//! - [`list_ops`] - 리스트 (`lrange`, `rpush_all`, `ltrim` ...)
//! - [`zset_ops`] - 정렬 집합 (`zadd`, `zrange` ...)
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use cache_facade::caching::redis::RedisStore;
//! use cache_facade::services::cache::CacheService;
//!
//! let store = RedisStore::connect(&config).await?;
//! let cache = CacheService::new(Arc::new(store));
//!
//! cache.set_with_expiry("user:1", &user, 3600).await;
//! let cached: Option<User> = cache.get("user:1").await;
//! ```

pub mod hash_ops;
pub mod list_ops;
pub mod set_ops;
pub mod value_ops;
pub mod zset_ops;

use std::sync::Arc;
use std::time::Duration;

use log::debug;

use crate::caching::codec::{CacheValue, Codec, TaggedJsonCodec};
use crate::caching::store::KeyValueStore;
use crate::errors::{CacheResult, Sentinel};

/// 실패하지 않는 키-값 캐시 파사드
///
/// 저장소 연결과 코덱을 생성자로 주입받으며, 이후에는 변경되지 않습니다.
/// 내부 상태가 없으므로 `Clone` 하거나 `Arc`로 감싸 여러 태스크에서 공유할 수 있습니다.
#[derive(Clone)]
pub struct CacheService<C: Codec = TaggedJsonCodec> {
    store: Arc<dyn KeyValueStore>,
    codec: C,
}

impl CacheService<TaggedJsonCodec> {
    /// 기본 코덱(`TaggedJsonCodec`)으로 파사드를 생성합니다.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_codec(store, TaggedJsonCodec)
    }
}

/// 0 이하의 만료 시간은 "만료 없음"
fn positive_ttl(seconds: i64) -> Option<u64> {
    (seconds > 0).then_some(seconds as u64)
}

/// `Duration`을 초 단위로 변환합니다. 1초 미만은 0이 되어 "만료 없음"으로 처리됩니다.
fn duration_secs(ttl: Duration) -> i64 {
    i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX)
}

impl<C: Codec> CacheService<C> {
    /// 임의의 코덱으로 파사드를 생성합니다.
    pub fn with_codec(store: Arc<dyn KeyValueStore>, codec: C) -> Self {
        Self { store, codec }
    }

    fn encode<T: CacheValue>(&self, value: &T) -> CacheResult<Vec<u8>> {
        Ok(self.codec.encode(value)?)
    }

    fn encode_all<T: CacheValue>(&self, values: &[T]) -> CacheResult<Vec<Vec<u8>>> {
        values.iter().map(|v| self.encode(v)).collect()
    }

    fn decode<T: CacheValue>(&self, bytes: &[u8]) -> CacheResult<T> {
        Ok(self.codec.decode(bytes)?)
    }

    fn decode_opt<T: CacheValue>(&self, bytes: Option<Vec<u8>>) -> CacheResult<Option<T>> {
        bytes.map(|b| self.decode(&b)).transpose()
    }

    fn decode_all<T: CacheValue>(&self, items: Vec<Vec<u8>>) -> CacheResult<Vec<T>> {
        items.iter().map(|b| self.decode(b)).collect()
    }

    /// 쓰기 후 만료 시간을 적용합니다. `seconds <= 0`이면 아무 것도 하지 않습니다.
    async fn apply_ttl(&self, key: &str, seconds: i64) -> CacheResult<()> {
        if seconds > 0 {
            self.store.expire(key, seconds).await?;
        }
        Ok(())
    }

    // ===== 만료 / 키 관리 =====

    /// 키에 만료 시간(초)을 설정합니다.
    ///
    /// `seconds <= 0`이면 저장소를 호출하지 않고 `false`를 반환합니다.
    /// 즉시 만료로 해석하지 않습니다.
    pub async fn expire(&self, key: &str, seconds: i64) -> bool {
        if seconds <= 0 {
            debug!("expire skipped for '{}': non-positive ttl {}", key, seconds);
            return false;
        }
        self.store.expire(key, seconds).await.or_sentinel("expire", key)
    }

    /// [`expire`](Self::expire)의 `Duration` 버전
    pub async fn expire_for(&self, key: &str, ttl: Duration) -> bool {
        self.expire(key, duration_secs(ttl)).await
    }

    /// 남은 만료 시간(초)을 반환합니다.
    ///
    /// 만료가 설정되지 않은 키, 존재하지 않는 키, 조회 실패는 모두 `0`입니다.
    pub async fn get_expire(&self, key: &str) -> i64 {
        self.store
            .ttl(key)
            .await
            .map(|ttl| ttl.max(0))
            .or_sentinel("ttl", key)
    }

    pub async fn has_key(&self, key: &str) -> bool {
        self.store.exists(key).await.or_sentinel("exists", key)
    }

    /// 하나 이상의 키를 한 번의 `DEL` 명령으로 삭제하고 삭제된 개수를 반환합니다.
    pub async fn del(&self, keys: &[&str]) -> u64 {
        if keys.is_empty() {
            return 0;
        }
        let owned: Vec<String> = keys.iter().map(|k| k.to_string()).collect();
        self.store.del(&owned).await.or_sentinel("del", &keys.join(","))
    }

    /// 저장소 연결 상태를 확인합니다.
    pub async fn ping(&self) -> bool {
        self.store.ping().await.map(|_| true).or_sentinel("ping", "-")
    }
}
