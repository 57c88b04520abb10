//! # Configuration Module
//!
//! 캐시 파사드의 설정 관리를 담당하는 모듈입니다.
//! Spring Framework의 `@Configuration` 클래스(`RedisConfig`, `JedisPoolConfig`)와
//! 유사한 역할을 수행하며, 환경 변수 기반의 설정값들을 중앙집중식으로 관리합니다.
//!
//! ## 모듈 구성
//!
//! - [`redis_config`] - Redis 서버 주소, 인증, 연결 풀 한도
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::config::RedisConfig;
//!
//! let config = RedisConfig::from_env();
//! config.pool.validate()?;
//! println!("Redis: {}:{}", config.host, config.port);
//! ```
//!
//! ## Spring과의 비교
//!
//! | Spring | Rust (이 프로젝트) |
//! |--------|-------------------|
//! | `@Value("${redis.host}")` | `env::var("REDIS_HOST")` |
//! | `JedisPoolConfig` | `PoolConfig` |
//! | `RedisStandaloneConfiguration` | `RedisConfig` |
//! | `application.yml` | `.env` 파일 |

pub mod redis_config;

pub use redis_config::*;
