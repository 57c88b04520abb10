//! 캐시 파사드 데모 애플리케이션
//!
//! 환경 설정을 읽어 Redis 저장소와 캐시 파사드를 구성하고,
//! 연결을 확인한 뒤 `mylist` 리스트의 내용을 출력합니다.

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use env_logger::Env;
use log::{error, info, warn};
use cache_facade::caching::redis::RedisStore;
use cache_facade::config::RedisConfig;
use cache_facade::domain::User;
use cache_facade::services::cache::CacheService;

const DEMO_LIST_KEY: &str = "mylist";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // 환경 설정 및 로깅 초기화
    let env_load = load_env_file();
    init_logging();
    env_load.log();

    info!("🚀 캐시 파사드 시작중...");

    let cache = initialize_cache().await?;

    if !cache.ping().await {
        warn!("Redis PING 실패. 이후 연산은 기본값을 반환합니다");
    }

    let users: Vec<User> = cache.lrange(DEMO_LIST_KEY, 0, -1).await;
    info!("📋 {} ({}개): {:?}", DEMO_LIST_KEY, users.len(), users);

    Ok(())
}

/// `.env` 파일 로드 결과
///
/// 로거가 설치되기 전에 읽으므로 결과를 보관했다가 로깅 초기화 후에 출력합니다.
struct EnvFileLoad {
    profile: String,
    file: &'static str,
    result: dotenv::Result<PathBuf>,
}

impl EnvFileLoad {
    fn log(&self) {
        info!("Current profile: {}", self.profile);
        match &self.result {
            Ok(path) => info!("{} 파일 로드 됨 ({})", self.file, path.display()),
            Err(e) => error!("{} 파일 로드 실패: {}", self.file, e),
        }
    }
}

/// 프로필별 설정 파일 이름
///
/// * `prod` - .env.prod
/// * `dev` - .env.dev (기본값)
/// * 기타 - .env
fn env_file_for(profile: &str) -> &'static str {
    match profile {
        "prod" => ".env.prod",
        "dev" => ".env.dev",
        _ => ".env",
    }
}

/// 환경별 설정 파일을 로드합니다
///
/// `RUST_LOG`도 이 파일에서 읽을 수 있도록 로깅 초기화보다 먼저 호출합니다.
///
/// ```bash
/// PROFILE=prod cargo run
/// ```
fn load_env_file() -> EnvFileLoad {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());
    let file = env_file_for(&profile);
    let result = dotenv::from_filename(file);

    EnvFileLoad { profile, file, result }
}

/// 로깅 시스템을 초기화합니다
///
/// ```bash
/// RUST_LOG=cache_facade=debug cargo run
/// ```
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
}

/// Redis 저장소와 파사드를 구성합니다
///
/// # Errors
///
/// * 풀 설정이 잘못되었거나 Redis에 연결할 수 없는 경우
async fn initialize_cache() -> Result<CacheService, Box<dyn Error>> {
    info!("📡 Redis 연결 중...");

    let config = RedisConfig::from_env();
    let store = RedisStore::connect(&config).await?;

    info!("사용 가능한 연결 슬롯: {}", store.available_connections());

    Ok(CacheService::new(Arc::new(store)))
}
