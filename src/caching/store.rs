//! # 키-값 저장소 추상화
//!
//! 파사드가 의존하는 저장소 연결의 경계입니다. 각 메서드는 Redis 명령 하나에
//! 1:1로 대응하며, 값은 코덱을 거친 바이트로만 주고받습니다.
//!
//! 원자적 복합 연산(`SET NX`, `GETSET`, `SMOVE`, `INCRBY` 등)은 반드시 저장소의
//! 네이티브 명령 하나로 구현되어야 합니다. 구현체가 읽기+쓰기 두 번으로 흉내 내면 안 됩니다.
//!
//! ## 구현체
//!
//! - [`RedisStore`](super::redis::RedisStore) - 풀 한도가 적용된 Redis 연결
//! - 테스트 전용 `MemoryStore` - Redis 의미론을 따르는 인메모리 저장소

use std::collections::HashMap;

use async_trait::async_trait;

use crate::errors::CacheResult;

/// 바이트 단위 Redis 명령 집합
///
/// 리스트/정렬 집합 인덱스는 Redis 관례를 따릅니다. 음수 인덱스는 끝에서부터 세며,
/// `-1`은 마지막 원소입니다.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    // ===== 키 / 만료 =====

    /// `EXPIRE key seconds` - 키가 존재해 만료가 설정되면 `true`
    async fn expire(&self, key: &str, seconds: i64) -> CacheResult<bool>;

    /// `TTL key` - 남은 초. 만료 없음은 `-1`, 키 없음은 `-2`
    async fn ttl(&self, key: &str) -> CacheResult<i64>;

    async fn exists(&self, key: &str) -> CacheResult<bool>;

    /// `DEL k1 k2 ...` - 한 번의 명령으로 삭제하고 삭제된 키 개수를 반환
    async fn del(&self, keys: &[String]) -> CacheResult<u64>;

    // ===== 문자열 =====

    async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>>;

    /// `SET key value [EX seconds]`
    async fn set(&self, key: &str, value: Vec<u8>, ttl_seconds: Option<u64>) -> CacheResult<()>;

    /// `SET key value NX [EX seconds]` - 저장되었으면 `true`
    async fn set_nx(&self, key: &str, value: Vec<u8>, ttl_seconds: Option<u64>) -> CacheResult<bool>;

    /// `SET key value XX [EX seconds]` - 저장되었으면 `true`
    async fn set_xx(&self, key: &str, value: Vec<u8>, ttl_seconds: Option<u64>) -> CacheResult<bool>;

    /// `GETSET key value` - 이전 값을 반환
    async fn getset(&self, key: &str, value: Vec<u8>) -> CacheResult<Option<Vec<u8>>>;

    async fn incr_by(&self, key: &str, delta: i64) -> CacheResult<i64>;

    async fn incr_by_float(&self, key: &str, delta: f64) -> CacheResult<f64>;

    // ===== 해시 =====

    async fn hget(&self, key: &str, field: &str) -> CacheResult<Option<Vec<u8>>>;

    async fn hgetall(&self, key: &str) -> CacheResult<HashMap<String, Vec<u8>>>;

    async fn hset(&self, key: &str, field: &str, value: Vec<u8>) -> CacheResult<()>;

    async fn hset_multiple(&self, key: &str, entries: Vec<(String, Vec<u8>)>) -> CacheResult<()>;

    async fn hdel(&self, key: &str, fields: &[String]) -> CacheResult<u64>;

    async fn hexists(&self, key: &str, field: &str) -> CacheResult<bool>;

    async fn hincr_by_float(&self, key: &str, field: &str, delta: f64) -> CacheResult<f64>;

    // ===== 집합 =====

    async fn smembers(&self, key: &str) -> CacheResult<Vec<Vec<u8>>>;

    async fn sismember(&self, key: &str, member: Vec<u8>) -> CacheResult<bool>;

    async fn sadd(&self, key: &str, members: Vec<Vec<u8>>) -> CacheResult<u64>;

    async fn scard(&self, key: &str) -> CacheResult<u64>;

    async fn srem(&self, key: &str, members: Vec<Vec<u8>>) -> CacheResult<u64>;

    /// `SMOVE source destination member` - 원자적 이동
    async fn smove(&self, source: &str, destination: &str, member: Vec<u8>) -> CacheResult<bool>;

    // ===== 리스트 =====

    async fn lrange(&self, key: &str, start: i64, stop: i64) -> CacheResult<Vec<Vec<u8>>>;

    async fn llen(&self, key: &str) -> CacheResult<u64>;

    async fn lindex(&self, key: &str, index: i64) -> CacheResult<Option<Vec<u8>>>;

    /// `LPUSH` - 푸시 후 리스트 길이
    async fn lpush(&self, key: &str, values: Vec<Vec<u8>>) -> CacheResult<u64>;

    /// `RPUSH` - 푸시 후 리스트 길이
    async fn rpush(&self, key: &str, values: Vec<Vec<u8>>) -> CacheResult<u64>;

    async fn lset(&self, key: &str, index: i64, value: Vec<u8>) -> CacheResult<()>;

    /// `LREM key count value` - `count == 0`이면 모든 일치 항목 제거
    async fn lrem(&self, key: &str, count: i64, value: Vec<u8>) -> CacheResult<u64>;

    async fn ltrim(&self, key: &str, start: i64, stop: i64) -> CacheResult<()>;

    // ===== 정렬 집합 =====

    /// `ZADD key score member ...` - 새로 추가된 멤버 수
    async fn zadd(&self, key: &str, members: Vec<(Vec<u8>, f64)>) -> CacheResult<u64>;

    async fn zrange(&self, key: &str, start: i64, stop: i64) -> CacheResult<Vec<Vec<u8>>>;

    async fn zrem(&self, key: &str, members: Vec<Vec<u8>>) -> CacheResult<u64>;

    // ===== 연결 =====

    async fn ping(&self) -> CacheResult<()>;
}
