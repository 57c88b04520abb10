//! # Redis 저장소 구현
//!
//! 이 모듈은 [`KeyValueStore`]의 Redis 구현을 제공합니다.
//! Spring의 `JedisConnectionFactory` + `JedisPoolConfig`와 유사한 역할을 수행합니다.
//!
//! ## 연결 관리
//!
//! Redis 연결은 `ConnectionManager`의 멀티플렉싱 연결 하나를 공유하며,
//! 끊어지면 자동으로 재연결됩니다. 풀 한도는 다음과 같이 적용됩니다.
//!
//! | 설정 | 동작 |
//! |------|------|
//! | `max_total` | 동시에 빌릴 수 있는 연결(진행 중인 명령) 수의 상한 |
//! | `max_wait` | 연결을 빌리기 위해 기다리는 최대 시간. 초과 시 `PoolTimeout` |
//! | `min_idle` | 0보다 크면 생성 시 PING으로 연결을 미리 준비 |
//! | `max_idle` | 멀티플렉싱 연결에서는 유휴 연결이 따로 없으므로 검증에만 사용 |
//!
//! 각 명령은 `command_timeout` 안에 응답을 받지 못하면 `CommandTimeout`으로 실패합니다.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::info;
use redis::aio::ConnectionManager;
use redis::{Client, Cmd, FromRedisValue, RedisResult};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use crate::caching::store::KeyValueStore;
use crate::config::RedisConfig;
use crate::errors::{CacheError, CacheResult};

/// 풀에서 빌린 연결
///
/// 드롭되면 permit이 반환되어 다른 호출이 연결을 빌릴 수 있습니다.
struct Lease {
    conn: ConnectionManager,
    _permit: OwnedSemaphorePermit,
}

/// 풀 한도가 적용된 Redis 저장소
///
/// ## 사용 예제
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use cache_facade::caching::redis::RedisStore;
/// use cache_facade::config::RedisConfig;
/// use cache_facade::services::cache::CacheService;
///
/// let store = RedisStore::connect(&RedisConfig::from_env()).await?;
/// let cache = CacheService::new(Arc::new(store));
/// cache.set_with_expiry("session:abc", &"token".to_string(), 3600).await;
/// ```
#[derive(Clone)]
pub struct RedisStore {
    manager: ConnectionManager,
    permits: Arc<Semaphore>,
    max_wait: Duration,
    command_timeout: Duration,
}

impl RedisStore {
    /// 설정에 따라 Redis에 연결합니다.
    ///
    /// ## 에러 케이스
    ///
    /// - 풀 설정 검증 실패 (`CacheError::Config`)
    /// - 잘못된 URL 형식
    /// - Redis 서버에 연결할 수 없는 경우
    /// - 인증 실패
    pub async fn connect(config: &RedisConfig) -> CacheResult<Self> {
        config.pool.validate()?;

        let client = Client::open(config.url())?;
        let manager = ConnectionManager::new(client).await?;

        let store = Self {
            manager,
            permits: Arc::new(Semaphore::new(config.pool.max_total)),
            max_wait: config.pool.max_wait,
            command_timeout: config.command_timeout,
        };

        if config.pool.min_idle > 0 {
            // 연결 테스트 - PING 명령으로 서버 가용성 확인
            store.ping().await?;
        }

        info!(
            "✅ Redis 연결 성공: {}:{} (max_total={}, max_wait={}ms)",
            config.host,
            config.port,
            config.pool.max_total,
            config.pool.max_wait.as_millis()
        );

        Ok(store)
    }

    /// 환경 변수 설정으로 연결합니다.
    pub async fn from_env() -> CacheResult<Self> {
        Self::connect(&RedisConfig::from_env()).await
    }

    /// 현재 빌려줄 수 있는 연결 수
    pub fn available_connections(&self) -> usize {
        self.permits.available_permits()
    }

    async fn lease(&self) -> CacheResult<Lease> {
        let permit = acquire_permit(self.permits.clone(), self.max_wait).await?;
        Ok(Lease {
            conn: self.manager.clone(),
            _permit: permit,
        })
    }

    /// 연결을 빌려 명령 하나를 실행하고 반환합니다.
    async fn query<T: FromRedisValue>(&self, cmd: Cmd) -> CacheResult<T> {
        let mut lease = self.lease().await?;
        with_command_timeout(self.command_timeout, cmd.query_async::<T>(&mut lease.conn)).await
    }
}

/// `max_wait` 안에 permit을 얻지 못하면 `PoolTimeout`으로 실패합니다.
async fn acquire_permit(permits: Arc<Semaphore>, max_wait: Duration) -> CacheResult<OwnedSemaphorePermit> {
    tokio::time::timeout(max_wait, permits.acquire_owned())
        .await
        .map_err(|_| CacheError::PoolTimeout(max_wait.as_millis() as u64))?
        .map_err(|_| CacheError::Connection("connection pool is closed".to_string()))
}

/// 명령 응답을 `limit`까지만 기다립니다.
async fn with_command_timeout<T, F>(limit: Duration, command: F) -> CacheResult<T>
where
    F: Future<Output = RedisResult<T>>,
{
    match tokio::time::timeout(limit, command).await {
        Ok(result) => result.map_err(CacheError::from),
        Err(_) => Err(CacheError::CommandTimeout(limit.as_millis() as u64)),
    }
}

/// `SET` 명령을 조건/만료 옵션과 함께 구성합니다.
fn set_command(key: &str, value: Vec<u8>, condition: Option<&str>, ttl_seconds: Option<u64>) -> Cmd {
    let mut cmd = redis::cmd("SET");
    cmd.arg(key).arg(value);
    if let Some(condition) = condition {
        cmd.arg(condition);
    }
    if let Some(seconds) = ttl_seconds {
        cmd.arg("EX").arg(seconds);
    }
    cmd
}

/// 키 하나와 여러 멤버로 구성된 명령 (`SADD`, `SREM`, `LPUSH` 등)
fn multi_member_command(name: &str, key: &str, members: &[Vec<u8>]) -> Cmd {
    let mut cmd = redis::cmd(name);
    cmd.arg(key);
    for member in members {
        cmd.arg(member.as_slice());
    }
    cmd
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn expire(&self, key: &str, seconds: i64) -> CacheResult<bool> {
        let mut cmd = redis::cmd("EXPIRE");
        cmd.arg(key).arg(seconds);
        self.query(cmd).await
    }

    async fn ttl(&self, key: &str) -> CacheResult<i64> {
        let mut cmd = redis::cmd("TTL");
        cmd.arg(key);
        self.query(cmd).await
    }

    async fn exists(&self, key: &str) -> CacheResult<bool> {
        let mut cmd = redis::cmd("EXISTS");
        cmd.arg(key);
        self.query(cmd).await
    }

    async fn del(&self, keys: &[String]) -> CacheResult<u64> {
        if keys.is_empty() {
            return Ok(0);
        }
        let mut cmd = redis::cmd("DEL");
        cmd.arg(keys);
        self.query(cmd).await
    }

    async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>> {
        let mut cmd = redis::cmd("GET");
        cmd.arg(key);
        self.query(cmd).await
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl_seconds: Option<u64>) -> CacheResult<()> {
        self.query(set_command(key, value, None, ttl_seconds)).await
    }

    async fn set_nx(&self, key: &str, value: Vec<u8>, ttl_seconds: Option<u64>) -> CacheResult<bool> {
        let reply: redis::Value = self.query(set_command(key, value, Some("NX"), ttl_seconds)).await?;
        Ok(!matches!(reply, redis::Value::Nil))
    }

    async fn set_xx(&self, key: &str, value: Vec<u8>, ttl_seconds: Option<u64>) -> CacheResult<bool> {
        let reply: redis::Value = self.query(set_command(key, value, Some("XX"), ttl_seconds)).await?;
        Ok(!matches!(reply, redis::Value::Nil))
    }

    async fn getset(&self, key: &str, value: Vec<u8>) -> CacheResult<Option<Vec<u8>>> {
        let mut cmd = redis::cmd("GETSET");
        cmd.arg(key).arg(value);
        self.query(cmd).await
    }

    async fn incr_by(&self, key: &str, delta: i64) -> CacheResult<i64> {
        let mut cmd = redis::cmd("INCRBY");
        cmd.arg(key).arg(delta);
        self.query(cmd).await
    }

    async fn incr_by_float(&self, key: &str, delta: f64) -> CacheResult<f64> {
        let mut cmd = redis::cmd("INCRBYFLOAT");
        cmd.arg(key).arg(delta);
        self.query(cmd).await
    }

    async fn hget(&self, key: &str, field: &str) -> CacheResult<Option<Vec<u8>>> {
        let mut cmd = redis::cmd("HGET");
        cmd.arg(key).arg(field);
        self.query(cmd).await
    }

    async fn hgetall(&self, key: &str) -> CacheResult<HashMap<String, Vec<u8>>> {
        let mut cmd = redis::cmd("HGETALL");
        cmd.arg(key);
        self.query(cmd).await
    }

    async fn hset(&self, key: &str, field: &str, value: Vec<u8>) -> CacheResult<()> {
        let mut cmd = redis::cmd("HSET");
        cmd.arg(key).arg(field).arg(value);
        self.query(cmd).await
    }

    async fn hset_multiple(&self, key: &str, entries: Vec<(String, Vec<u8>)>) -> CacheResult<()> {
        if entries.is_empty() {
            return Ok(());
        }
        let mut cmd = redis::cmd("HSET");
        cmd.arg(key);
        for (field, value) in &entries {
            cmd.arg(field).arg(value.as_slice());
        }
        self.query(cmd).await
    }

    async fn hdel(&self, key: &str, fields: &[String]) -> CacheResult<u64> {
        if fields.is_empty() {
            return Ok(0);
        }
        let mut cmd = redis::cmd("HDEL");
        cmd.arg(key).arg(fields);
        self.query(cmd).await
    }

    async fn hexists(&self, key: &str, field: &str) -> CacheResult<bool> {
        let mut cmd = redis::cmd("HEXISTS");
        cmd.arg(key).arg(field);
        self.query(cmd).await
    }

    async fn hincr_by_float(&self, key: &str, field: &str, delta: f64) -> CacheResult<f64> {
        let mut cmd = redis::cmd("HINCRBYFLOAT");
        cmd.arg(key).arg(field).arg(delta);
        self.query(cmd).await
    }

    async fn smembers(&self, key: &str) -> CacheResult<Vec<Vec<u8>>> {
        let mut cmd = redis::cmd("SMEMBERS");
        cmd.arg(key);
        self.query(cmd).await
    }

    async fn sismember(&self, key: &str, member: Vec<u8>) -> CacheResult<bool> {
        let mut cmd = redis::cmd("SISMEMBER");
        cmd.arg(key).arg(member);
        self.query(cmd).await
    }

    async fn sadd(&self, key: &str, members: Vec<Vec<u8>>) -> CacheResult<u64> {
        if members.is_empty() {
            return Ok(0);
        }
        self.query(multi_member_command("SADD", key, &members)).await
    }

    async fn scard(&self, key: &str) -> CacheResult<u64> {
        let mut cmd = redis::cmd("SCARD");
        cmd.arg(key);
        self.query(cmd).await
    }

    async fn srem(&self, key: &str, members: Vec<Vec<u8>>) -> CacheResult<u64> {
        if members.is_empty() {
            return Ok(0);
        }
        self.query(multi_member_command("SREM", key, &members)).await
    }

    async fn smove(&self, source: &str, destination: &str, member: Vec<u8>) -> CacheResult<bool> {
        let mut cmd = redis::cmd("SMOVE");
        cmd.arg(source).arg(destination).arg(member);
        self.query(cmd).await
    }

    async fn lrange(&self, key: &str, start: i64, stop: i64) -> CacheResult<Vec<Vec<u8>>> {
        let mut cmd = redis::cmd("LRANGE");
        cmd.arg(key).arg(start).arg(stop);
        self.query(cmd).await
    }

    async fn llen(&self, key: &str) -> CacheResult<u64> {
        let mut cmd = redis::cmd("LLEN");
        cmd.arg(key);
        self.query(cmd).await
    }

    async fn lindex(&self, key: &str, index: i64) -> CacheResult<Option<Vec<u8>>> {
        let mut cmd = redis::cmd("LINDEX");
        cmd.arg(key).arg(index);
        self.query(cmd).await
    }

    async fn lpush(&self, key: &str, values: Vec<Vec<u8>>) -> CacheResult<u64> {
        if values.is_empty() {
            return self.llen(key).await;
        }
        self.query(multi_member_command("LPUSH", key, &values)).await
    }

    async fn rpush(&self, key: &str, values: Vec<Vec<u8>>) -> CacheResult<u64> {
        if values.is_empty() {
            return self.llen(key).await;
        }
        self.query(multi_member_command("RPUSH", key, &values)).await
    }

    async fn lset(&self, key: &str, index: i64, value: Vec<u8>) -> CacheResult<()> {
        let mut cmd = redis::cmd("LSET");
        cmd.arg(key).arg(index).arg(value);
        self.query(cmd).await
    }

    async fn lrem(&self, key: &str, count: i64, value: Vec<u8>) -> CacheResult<u64> {
        let mut cmd = redis::cmd("LREM");
        cmd.arg(key).arg(count).arg(value);
        self.query(cmd).await
    }

    async fn ltrim(&self, key: &str, start: i64, stop: i64) -> CacheResult<()> {
        let mut cmd = redis::cmd("LTRIM");
        cmd.arg(key).arg(start).arg(stop);
        self.query(cmd).await
    }

    async fn zadd(&self, key: &str, members: Vec<(Vec<u8>, f64)>) -> CacheResult<u64> {
        if members.is_empty() {
            return Ok(0);
        }
        let mut cmd = redis::cmd("ZADD");
        cmd.arg(key);
        for (member, score) in &members {
            cmd.arg(*score).arg(member.as_slice());
        }
        self.query(cmd).await
    }

    async fn zrange(&self, key: &str, start: i64, stop: i64) -> CacheResult<Vec<Vec<u8>>> {
        let mut cmd = redis::cmd("ZRANGE");
        cmd.arg(key).arg(start).arg(stop);
        self.query(cmd).await
    }

    async fn zrem(&self, key: &str, members: Vec<Vec<u8>>) -> CacheResult<u64> {
        if members.is_empty() {
            return Ok(0);
        }
        self.query(multi_member_command("ZREM", key, &members)).await
    }

    async fn ping(&self) -> CacheResult<()> {
        self.query(redis::cmd("PING")).await
    }
}
