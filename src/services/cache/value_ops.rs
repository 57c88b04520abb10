//! 문자열 값 연산
//!
//! `GET`, `SET [NX|XX] [EX]`, `GETSET`, `INCRBY`, `INCRBYFLOAT`에 대응합니다.
//! 조건부 저장과 증감은 모두 저장소의 원자적 명령 하나로 수행됩니다.

use std::time::Duration;

use log::error;

use super::{CacheService, duration_secs, positive_ttl};
use crate::caching::codec::{CacheValue, Codec};
use crate::errors::{CacheError, Sentinel};

impl<C: Codec> CacheService<C> {
    /// 값을 조회합니다. 키가 없거나 조회/역직렬화에 실패하면 `None`입니다.
    ///
    /// ```rust,ignore
    /// let user: Option<User> = cache.get("user:1").await;
    /// ```
    pub async fn get<T: CacheValue>(&self, key: &str) -> Option<T> {
        async {
            let raw = self.store.get(key).await?;
            self.decode_opt(raw)
        }
        .await
        .or_sentinel("get", key)
    }

    /// 만료 없이 값을 저장합니다.
    pub async fn set<T: CacheValue>(&self, key: &str, value: &T) -> bool {
        self.set_with_expiry(key, value, 0).await
    }

    /// 만료 시간(초)과 함께 값을 저장합니다. `seconds <= 0`이면 만료 없이 저장합니다.
    pub async fn set_with_expiry<T: CacheValue>(&self, key: &str, value: &T, seconds: i64) -> bool {
        async {
            let bytes = self.encode(value)?;
            self.store.set(key, bytes, positive_ttl(seconds)).await?;
            Ok::<_, CacheError>(true)
        }
        .await
        .or_sentinel("set", key)
    }

    /// [`set_with_expiry`](Self::set_with_expiry)의 `Duration` 버전
    pub async fn set_for<T: CacheValue>(&self, key: &str, value: &T, ttl: Duration) -> bool {
        self.set_with_expiry(key, value, duration_secs(ttl)).await
    }

    /// 키가 없을 때만 저장합니다 (`SET NX`).
    pub async fn set_if_absent<T: CacheValue>(&self, key: &str, value: &T) -> bool {
        self.set_if_absent_with_expiry(key, value, 0).await
    }

    /// 키가 없을 때만 만료 시간과 함께 저장합니다 (`SET NX EX`).
    ///
    /// 저장과 만료 설정이 한 명령으로 수행되므로 분산 락 용도로 사용할 수 있습니다.
    pub async fn set_if_absent_with_expiry<T: CacheValue>(&self, key: &str, value: &T, seconds: i64) -> bool {
        async {
            let bytes = self.encode(value)?;
            self.store.set_nx(key, bytes, positive_ttl(seconds)).await
        }
        .await
        .or_sentinel("setnx", key)
    }

    /// 키가 있을 때만 덮어씁니다 (`SET XX`).
    pub async fn set_if_present<T: CacheValue>(&self, key: &str, value: &T) -> bool {
        self.set_if_present_with_expiry(key, value, 0).await
    }

    /// 키가 있을 때만 만료 시간과 함께 덮어씁니다 (`SET XX EX`).
    pub async fn set_if_present_with_expiry<T: CacheValue>(&self, key: &str, value: &T, seconds: i64) -> bool {
        async {
            let bytes = self.encode(value)?;
            self.store.set_xx(key, bytes, positive_ttl(seconds)).await
        }
        .await
        .or_sentinel("setxx", key)
    }

    /// 새 값을 저장하고 이전 값을 반환합니다 (`GETSET`).
    pub async fn get_and_set<T: CacheValue>(&self, key: &str, value: &T) -> Option<T> {
        async {
            let bytes = self.encode(value)?;
            let previous = self.store.getset(key, bytes).await?;
            self.decode_opt(previous)
        }
        .await
        .or_sentinel("getset", key)
    }

    /// 정수 값을 원자적으로 증가시키고 증가 후 값을 반환합니다.
    /// 키가 없으면 0에서 시작합니다.
    pub async fn incr_by(&self, key: &str, delta: i64) -> i64 {
        self.store.incr_by(key, delta).await.or_sentinel("incrby", key)
    }

    /// `incr_by(key, -delta)`
    pub async fn decr_by(&self, key: &str, delta: i64) -> i64 {
        match delta.checked_neg() {
            Some(negated) => self.incr_by(key, negated).await,
            None => {
                error!("cache operation `decrby` failed for key '{}': delta {} cannot be negated", key, delta);
                0
            }
        }
    }

    pub async fn incr_by_float(&self, key: &str, delta: f64) -> f64 {
        self.store
            .incr_by_float(key, delta)
            .await
            .or_sentinel("incrbyfloat", key)
    }

    pub async fn decr_by_float(&self, key: &str, delta: f64) -> f64 {
        self.incr_by_float(key, -delta).await
    }
}
