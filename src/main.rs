//! Secrets Portal 메인 애플리케이션
//!
//! Actix-web 기반의 HTTP 서버를 구동하고 모든 서비스를 초기화합니다.
//! MongoDB, Redis 연결을 설정하고 연합 로그인과 세션 기반 페이지를 제공합니다.

use std::sync::Arc;
use actix_web::{web, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};
use secrets_portal::app::{build_app, rate_limiter};
use secrets_portal::caching::redis::RedisClient;
use secrets_portal::config::AppConfig;
use secrets_portal::core::AppContext;
use secrets_portal::db::Database;
use secrets_portal::errors::AppError;
use secrets_portal::repositories::sessions::RedisSessionBackend;
use secrets_portal::repositories::users::MongoUserDirectory;
use secrets_portal::services::auth::OAuthBroker;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // 환경 설정 및 로깅 초기화
    init_logging();
    load_env_file();

    info!("🚀 Secrets Portal 시작중...");

    let config = AppConfig::from_env().map_err(startup_error)?;
    let context = build_context(config).await.map_err(startup_error)?;

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    // HTTP 서버 시작
    start_http_server(web::Data::new(context)).await
}

/// HTTP 서버를 구성하고 실행합니다
///
/// 미들웨어 순서는 [`build_app`]을 따릅니다.
///
/// # Errors
///
/// * `std::io::Error` - 포트 바인딩 실패 또는 서버 실행 오류
async fn start_http_server(context: web::Data<AppContext>) -> std::io::Result<()> {
    let bind_address = context.config.server.bind_address();
    let rate_limit = context.config.rate_limit.clone();

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 공개 주소: {}", context.config.server.public_base_url);
    info!("📍 Health check: http://{}/health", bind_address);

    let rate_limiter = rate_limiter(&rate_limit).map_err(startup_error)?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit.per_second,
        rate_limit.burst_size
    );

    HttpServer::new(move || build_app(context.clone(), &rate_limiter))
        .bind(bind_address)?
        .run()
        .await
}

/// 저장소와 브로커를 연결하고 애플리케이션 컨텍스트를 조립합니다
///
/// MongoDB와 Redis 모두 연결 시 ping으로 가용성을 확인하며,
/// 실패하면 서버를 시작하지 않습니다.
async fn build_context(config: AppConfig) -> Result<AppContext, AppError> {
    info!("📡 데이터베이스 연결 중...");

    let database = Database::connect(&config.storage).await?;
    let directory = MongoUserDirectory::new(&database);
    directory.create_indexes().await?;

    let redis = RedisClient::connect(&config.storage.redis_url).await?;
    let sessions = RedisSessionBackend::new(redis);

    let broker = OAuthBroker::new(config.oauth.clone())?;
    info!("🔑 활성화된 로그인 프로바이더: {}개", config.oauth.providers.len());

    Ok(AppContext::new(
        config,
        Arc::new(directory),
        Arc::new(sessions),
        Arc::new(broker),
    ))
}

fn startup_error(e: AppError) -> std::io::Error {
    error!("❌ 초기화 실패: {}", e);
    std::io::Error::other(e.to_string())
}

/// 환경별 설정 파일을 로드합니다
///
/// PROFILE 환경변수에 따라 적절한 .env 파일을 로드합니다.
///
/// # Environment Variables
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    info!("Current profile: {}", profile);

    match profile.as_str() {
        "prod" => match dotenv::from_filename(".env.prod") {
            Ok(_) => info!(".env.prod 파일 로드 됨"),
            Err(e) => error!(".env.prod 파일 로드 실패: {}", e),
        },
        "dev" => match dotenv::from_filename(".env.dev") {
            Ok(_) => info!(".env.dev 파일 로드 됨"),
            Err(e) => error!(".env.dev 파일 로드 실패: {}", e),
        },
        _ => {
            // 기본 .env 파일 로드
            dotenv().ok();
            info!("기본 .env 파일 로드");
        }
    }
}

/// 로깅 시스템을 초기화합니다
///
/// 환경변수 RUST_LOG를 기반으로 로깅 레벨을 설정합니다.
///
/// ```bash
/// # 서비스 계층만 debug
/// RUST_LOG=secrets_portal::services=debug cargo run
/// ```
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=info"));
}
