//! 리스트 연산
//!
//! 인덱스는 Redis 규칙을 그대로 따릅니다. 0 이상은 앞에서부터, 음수는 뒤에서부터 셉니다.
//! `lrange(key, 0, -1)`은 리스트 전체입니다.

use super::CacheService;
use crate::caching::codec::{CacheValue, Codec};
use crate::errors::{CacheError, Sentinel};

impl<C: Codec> CacheService<C> {
    /// `start..=stop` 구간의 원소를 반환합니다. 범위를 벗어난 부분은 잘려 나갑니다.
    pub async fn lrange<T: CacheValue>(&self, key: &str, start: i64, stop: i64) -> Vec<T> {
        async {
            let raw = self.store.lrange(key, start, stop).await?;
            self.decode_all(raw)
        }
        .await
        .or_sentinel("lrange", key)
    }

    pub async fn llen(&self, key: &str) -> u64 {
        self.store.llen(key).await.or_sentinel("llen", key)
    }

    pub async fn lindex<T: CacheValue>(&self, key: &str, index: i64) -> Option<T> {
        async {
            let raw = self.store.lindex(key, index).await?;
            self.decode_opt(raw)
        }
        .await
        .or_sentinel("lindex", key)
    }

    /// 앞쪽에 추가하고 추가 후 길이를 반환합니다.
    pub async fn lpush<T: CacheValue>(&self, key: &str, value: &T) -> u64 {
        self.lpush_all(key, std::slice::from_ref(value)).await
    }

    /// 인자 순서대로 하나씩 앞쪽에 추가합니다. `[a, b]`를 넣으면 리스트는 `b, a, ...`가 됩니다.
    pub async fn lpush_all<T: CacheValue>(&self, key: &str, values: &[T]) -> u64 {
        async {
            let encoded = self.encode_all(values)?;
            self.store.lpush(key, encoded).await
        }
        .await
        .or_sentinel("lpush", key)
    }

    /// 뒤쪽에 추가하고 추가 후 길이를 반환합니다.
    pub async fn rpush<T: CacheValue>(&self, key: &str, value: &T) -> u64 {
        self.rpush_all(key, std::slice::from_ref(value)).await
    }

    pub async fn rpush_all<T: CacheValue>(&self, key: &str, values: &[T]) -> u64 {
        async {
            let encoded = self.encode_all(values)?;
            self.store.rpush(key, encoded).await
        }
        .await
        .or_sentinel("rpush", key)
    }

    /// `index` 위치의 원소를 교체합니다. 키가 없거나 범위를 벗어나면 `false`입니다.
    pub async fn lset<T: CacheValue>(&self, key: &str, index: i64, value: &T) -> bool {
        async {
            let bytes = self.encode(value)?;
            self.store.lset(key, index, bytes).await?;
            Ok::<_, CacheError>(true)
        }
        .await
        .or_sentinel("lset", key)
    }

    /// `value`와 같은 원소를 최대 `count`개 제거합니다.
    ///
    /// - `count > 0`: 앞에서부터
    /// - `count < 0`: 뒤에서부터
    /// - `count == 0`: 전부
    pub async fn lrem<T: CacheValue>(&self, key: &str, count: i64, value: &T) -> u64 {
        async {
            let bytes = self.encode(value)?;
            self.store.lrem(key, count, bytes).await
        }
        .await
        .or_sentinel("lrem", key)
    }

    /// `start..=stop` 구간만 남기고 나머지를 버립니다.
    pub async fn ltrim(&self, key: &str, start: i64, stop: i64) -> bool {
        self.store
            .ltrim(key, start, stop)
            .await
            .map(|_| true)
            .or_sentinel("ltrim", key)
    }
}
