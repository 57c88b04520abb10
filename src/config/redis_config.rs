//! Redis 연결 및 풀 설정 관리 모듈
//!
//! 호스트, 포트, 인증 정보와 연결 풀 한도를 환경 변수에서 읽어옵니다.
//! 값이 없으면 기본값을, 파싱에 실패하면 에러 로그를 남기고 기본값을 사용합니다.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use log::error;

use crate::errors::{CacheError, CacheResult};

/// 연결 풀 한도 설정
///
/// | 항목 | 환경 변수 | 기본값 |
/// |------|-----------|--------|
/// | 최대 동시 연결 | `REDIS_POOL_MAX_TOTAL` | 50 |
/// | 최대 유휴 연결 | `REDIS_POOL_MAX_IDLE` | 10 |
/// | 최소 유휴 연결 | `REDIS_POOL_MIN_IDLE` | 5 |
/// | 대기 제한 시간 | `REDIS_POOL_MAX_WAIT_MS` | 5000 |
#[derive(Debug, Clone, PartialEq)]
pub struct PoolConfig {
    pub max_total: usize,
    pub max_idle: usize,
    pub min_idle: usize,
    pub max_wait: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_total: 50,
            max_idle: 10,
            min_idle: 5,
            max_wait: Duration::from_millis(5000),
        }
    }
}

impl PoolConfig {
    /// 환경 변수에서 풀 설정을 읽어옵니다.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_total: env_or("REDIS_POOL_MAX_TOTAL", defaults.max_total),
            max_idle: env_or("REDIS_POOL_MAX_IDLE", defaults.max_idle),
            min_idle: env_or("REDIS_POOL_MIN_IDLE", defaults.min_idle),
            max_wait: Duration::from_millis(env_or(
                "REDIS_POOL_MAX_WAIT_MS",
                defaults.max_wait.as_millis() as u64,
            )),
        }
    }

    /// 풀 한도 간의 관계를 검증합니다.
    ///
    /// # Errors
    ///
    /// * `max_total == 0`
    /// * `max_idle > max_total`
    /// * `min_idle > max_idle`
    pub fn validate(&self) -> CacheResult<()> {
        if self.max_total == 0 {
            return Err(CacheError::Config("max_total must be greater than 0".to_string()));
        }
        if self.max_idle > self.max_total {
            return Err(CacheError::Config(format!(
                "max_idle ({}) exceeds max_total ({})",
                self.max_idle, self.max_total
            )));
        }
        if self.min_idle > self.max_idle {
            return Err(CacheError::Config(format!(
                "min_idle ({}) exceeds max_idle ({})",
                self.min_idle, self.max_idle
            )));
        }
        Ok(())
    }
}

/// Redis 서버 연결 설정
///
/// Spring의 `RedisStandaloneConfiguration`과 같은 역할로,
/// 단일 Redis 서버에 대한 주소와 인증 정보를 담습니다.
///
/// ## 환경 변수
///
/// ```bash
/// REDIS_HOST=127.0.0.1
/// REDIS_PORT=6379
/// REDIS_PASSWORD=secret        # 선택
/// REDIS_DB=0
/// REDIS_COMMAND_TIMEOUT_MS=3000
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RedisConfig {
    pub host: String,
    pub port: u16,
    pub password: Option<String>,
    pub database: i64,
    pub command_timeout: Duration,
    pub pool: PoolConfig,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 6379,
            password: None,
            database: 0,
            command_timeout: Duration::from_millis(3000),
            pool: PoolConfig::default(),
        }
    }
}

impl RedisConfig {
    /// 환경 변수에서 전체 연결 설정을 읽어옵니다.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let config = RedisConfig::from_env();
    /// let store = RedisStore::connect(&config).await?;
    /// ```
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: env::var("REDIS_HOST").unwrap_or(defaults.host),
            port: env_or("REDIS_PORT", defaults.port),
            password: env::var("REDIS_PASSWORD").ok().filter(|p| !p.is_empty()),
            database: env_or("REDIS_DB", defaults.database),
            command_timeout: Duration::from_millis(env_or(
                "REDIS_COMMAND_TIMEOUT_MS",
                defaults.command_timeout.as_millis() as u64,
            )),
            pool: PoolConfig::from_env(),
        }
    }

    /// 연결 URL을 생성합니다.
    ///
    /// 비밀번호가 있으면 `redis://:password@host:port/db` 형식을 사용합니다.
    pub fn url(&self) -> String {
        match &self.password {
            Some(password) => format!(
                "redis://:{}@{}:{}/{}",
                password, self.host, self.port, self.database
            ),
            None => format!("redis://{}:{}/{}", self.host, self.port, self.database),
        }
    }
}

/// 환경 변수를 파싱하고, 실패 시 에러 로그 후 기본값을 반환합니다.
fn env_or<T>(name: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw.trim().parse::<T>().unwrap_or_else(|e| {
            error!("{} 파싱 실패: {}. 기본값 {} 사용", name, e, default);
            default
        }),
        Err(_) => default,
    }
}
