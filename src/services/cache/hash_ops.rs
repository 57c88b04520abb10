//! 해시 연산
//!
//! 필드 값은 문자열 값과 같은 코덱으로 직렬화됩니다.
//! `hincr`는 `HINCRBYFLOAT`를 사용하므로 숫자 필드는 스칼라 타입으로 저장해야 합니다.

use std::collections::HashMap;

use super::CacheService;
use crate::caching::codec::{CacheValue, Codec, TypedValue};
use crate::errors::{CacheError, CacheResult, Sentinel};

impl<C: Codec> CacheService<C> {
    pub async fn hget<T: CacheValue>(&self, key: &str, field: &str) -> Option<T> {
        async {
            let raw = self.store.hget(key, field).await?;
            self.decode_opt(raw)
        }
        .await
        .or_sentinel("hget", key)
    }

    /// 해시 전체를 조회합니다. 모든 필드가 `T`로 저장되어 있어야 합니다.
    ///
    /// 필드 하나라도 역직렬화에 실패하면 빈 맵을 반환합니다.
    /// 타입이 섞인 해시는 [`hget_all_raw`](Self::hget_all_raw)를 사용합니다.
    pub async fn hget_all<T: CacheValue>(&self, key: &str) -> HashMap<String, T> {
        async {
            let raw = self.store.hgetall(key).await?;
            raw.into_iter()
                .map(|(field, bytes)| Ok((field, self.decode(&bytes)?)))
                .collect::<CacheResult<HashMap<_, _>>>()
        }
        .await
        .or_sentinel("hgetall", key)
    }

    /// 해시 전체를 필드별 [`TypedValue`]로 조회합니다.
    ///
    /// ```rust,ignore
    /// for (field, value) in cache.hget_all_raw("mixed").await {
    ///     if value.is::<User>() {
    ///         let user: User = value.downcast()?;
    ///     }
    /// }
    /// ```
    pub async fn hget_all_raw(&self, key: &str) -> HashMap<String, TypedValue> {
        async {
            let raw = self.store.hgetall(key).await?;
            raw.into_iter()
                .map(|(field, bytes)| Ok((field, self.codec.decode_any(&bytes)?)))
                .collect::<CacheResult<HashMap<_, _>>>()
        }
        .await
        .or_sentinel("hgetall", key)
    }

    pub async fn hset<T: CacheValue>(&self, key: &str, field: &str, value: &T) -> bool {
        self.hset_with_expiry(key, field, value, 0).await
    }

    /// 필드를 저장한 뒤 해시 키 전체에 만료 시간을 설정합니다.
    ///
    /// 필드 저장과 만료 설정은 별도 명령이므로, 두 명령 사이에 실패하면
    /// 필드는 만료 없이 남을 수 있습니다.
    pub async fn hset_with_expiry<T: CacheValue>(&self, key: &str, field: &str, value: &T, seconds: i64) -> bool {
        async {
            let bytes = self.encode(value)?;
            self.store.hset(key, field, bytes).await?;
            self.apply_ttl(key, seconds).await?;
            Ok::<_, CacheError>(true)
        }
        .await
        .or_sentinel("hset", key)
    }

    /// 여러 필드를 한 번의 `HSET`으로 저장합니다.
    pub async fn hset_all<T: CacheValue>(&self, key: &str, entries: &HashMap<String, T>) -> bool {
        self.hset_all_with_expiry(key, entries, 0).await
    }

    /// 빈 맵은 저장할 것이 없으므로 `true`를 반환합니다.
    pub async fn hset_all_with_expiry<T: CacheValue>(
        &self,
        key: &str,
        entries: &HashMap<String, T>,
        seconds: i64,
    ) -> bool {
        if entries.is_empty() {
            return true;
        }
        async {
            let encoded = entries
                .iter()
                .map(|(field, value)| Ok((field.clone(), self.encode(value)?)))
                .collect::<CacheResult<Vec<_>>>()?;
            self.store.hset_multiple(key, encoded).await?;
            self.apply_ttl(key, seconds).await?;
            Ok::<_, CacheError>(true)
        }
        .await
        .or_sentinel("hmset", key)
    }

    /// 하나 이상의 필드를 삭제하고 삭제된 개수를 반환합니다.
    pub async fn hdel(&self, key: &str, fields: &[&str]) -> u64 {
        if fields.is_empty() {
            return 0;
        }
        let owned: Vec<String> = fields.iter().map(|f| f.to_string()).collect();
        self.store.hdel(key, &owned).await.or_sentinel("hdel", key)
    }

    pub async fn hexists(&self, key: &str, field: &str) -> bool {
        self.store.hexists(key, field).await.or_sentinel("hexists", key)
    }

    /// 필드 값을 원자적으로 증가시키고 증가 후 값을 반환합니다.
    /// 필드가 없으면 0에서 시작합니다.
    pub async fn hincr(&self, key: &str, field: &str, delta: f64) -> f64 {
        self.store
            .hincr_by_float(key, field, delta)
            .await
            .or_sentinel("hincrbyfloat", key)
    }

    pub async fn hdecr(&self, key: &str, field: &str, delta: f64) -> f64 {
        self.hincr(key, field, -delta).await
    }
}
