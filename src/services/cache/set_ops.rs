//! 집합 연산
//!
//! 멤버의 동일성은 직렬화된 바이트로 판단합니다. 같은 값은 항상 같은 바이트로
//! 직렬화되므로 `sismember`/`srem`에 원래 값을 그대로 넘기면 됩니다.

use super::CacheService;
use crate::caching::codec::{CacheValue, Codec};
use crate::errors::{CacheError, Sentinel};

impl<C: Codec> CacheService<C> {
    /// 집합의 모든 멤버를 반환합니다. 순서는 보장되지 않습니다.
    pub async fn smembers<T: CacheValue>(&self, key: &str) -> Vec<T> {
        async {
            let raw = self.store.smembers(key).await?;
            self.decode_all(raw)
        }
        .await
        .or_sentinel("smembers", key)
    }

    pub async fn sismember<T: CacheValue>(&self, key: &str, member: &T) -> bool {
        async {
            let bytes = self.encode(member)?;
            self.store.sismember(key, bytes).await
        }
        .await
        .or_sentinel("sismember", key)
    }

    /// 멤버를 추가하고 새로 추가된 개수를 반환합니다.
    pub async fn sadd<T: CacheValue>(&self, key: &str, members: &[T]) -> u64 {
        self.sadd_with_expiry(key, members, 0).await
    }

    /// 멤버를 추가한 뒤 집합 키에 만료 시간을 설정합니다.
    pub async fn sadd_with_expiry<T: CacheValue>(&self, key: &str, members: &[T], seconds: i64) -> u64 {
        if members.is_empty() {
            return 0;
        }
        async {
            let encoded = self.encode_all(members)?;
            let added = self.store.sadd(key, encoded).await?;
            self.apply_ttl(key, seconds).await?;
            Ok::<_, CacheError>(added)
        }
        .await
        .or_sentinel("sadd", key)
    }

    pub async fn scard(&self, key: &str) -> u64 {
        self.store.scard(key).await.or_sentinel("scard", key)
    }

    /// 멤버를 제거하고 실제로 제거된 개수를 반환합니다.
    pub async fn srem<T: CacheValue>(&self, key: &str, members: &[T]) -> u64 {
        if members.is_empty() {
            return 0;
        }
        async {
            let encoded = self.encode_all(members)?;
            self.store.srem(key, encoded).await
        }
        .await
        .or_sentinel("srem", key)
    }

    /// 멤버를 `source`에서 `destination`으로 원자적으로 옮깁니다.
    /// `source`에 멤버가 없으면 `false`입니다.
    pub async fn smove<T: CacheValue>(&self, source: &str, destination: &str, member: &T) -> bool {
        async {
            let bytes = self.encode(member)?;
            self.store.smove(source, destination, bytes).await
        }
        .await
        .or_sentinel("smove", source)
    }
}
