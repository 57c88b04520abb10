//! 정렬 집합 연산
//!
//! 순위는 점수 오름차순이며, 점수가 같으면 직렬화된 바이트 순서를 따릅니다.

use super::CacheService;
use crate::caching::codec::{CacheValue, Codec};
use crate::errors::{CacheError, CacheResult, Sentinel};

impl<C: Codec> CacheService<C> {
    /// 멤버를 추가합니다. 이미 있던 멤버는 점수만 갱신되고 `false`를 반환합니다.
    pub async fn zadd<T: CacheValue>(&self, key: &str, member: &T, score: f64) -> bool {
        async {
            let bytes = self.encode(member)?;
            Ok::<_, CacheError>(self.store.zadd(key, vec![(bytes, score)]).await? > 0)
        }
        .await
        .or_sentinel("zadd", key)
    }

    /// (멤버, 점수) 쌍을 한 번의 `ZADD`로 추가하고 새로 추가된 개수를 반환합니다.
    ///
    /// 빈 목록이면 저장소를 호출하지 않고 0을 반환합니다.
    pub async fn zadd_all<T: CacheValue>(&self, key: &str, members: &[(T, f64)]) -> u64 {
        if members.is_empty() {
            return 0;
        }
        async {
            let encoded = members
                .iter()
                .map(|(member, score)| Ok((self.encode(member)?, *score)))
                .collect::<CacheResult<Vec<_>>>()?;
            self.store.zadd(key, encoded).await
        }
        .await
        .or_sentinel("zadd", key)
    }

    /// 순위 `start..=stop` 구간의 멤버를 점수 오름차순으로 반환합니다.
    pub async fn zrange<T: CacheValue>(&self, key: &str, start: i64, stop: i64) -> Vec<T> {
        async {
            let raw = self.store.zrange(key, start, stop).await?;
            self.decode_all(raw)
        }
        .await
        .or_sentinel("zrange", key)
    }

    pub async fn zrem<T: CacheValue>(&self, key: &str, members: &[T]) -> u64 {
        if members.is_empty() {
            return 0;
        }
        async {
            let encoded = self.encode_all(members)?;
            self.store.zrem(key, encoded).await
        }
        .await
        .or_sentinel("zrem", key)
    }
}
