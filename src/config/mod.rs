//! # Configuration Module
//!
//! 포털의 설정 관리를 담당하는 모듈입니다.
//! 환경 변수 기반의 설정값을 시작 시점에 한 번 읽어 [`AppConfig`] 값으로 만들고,
//! 이후에는 애플리케이션 컨텍스트를 통해 전달합니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 실행 환경, 서버, 저장소, Rate Limiting 설정
//! - [`auth_config`] - 인증 프로바이더, OAuth 브로커, 세션 쿠키 설정
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! # 서버 설정
//! export HOST="0.0.0.0"
//! export PORT="3000"
//! export PUBLIC_BASE_URL="http://localhost:3000"
//!
//! # 저장소
//! export MONGODB_URI="mongodb://127.0.0.1:27017"
//! export DATABASE_NAME="secrets_portal"
//! export REDIS_URL="redis://localhost:6379"
//!
//! # 세션
//! export SESSION_SECRET="your-long-random-secret"
//! export SESSION_TTL_SECONDS="86400"
//! ```

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;

use crate::errors::AppError;

/// 애플리케이션 전체 설정
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub rate_limit: RateLimitConfig,
    pub session: SessionConfig,
    pub oauth: OAuthConfig,
}

impl AppConfig {
    /// 프로세스 환경 변수에서 설정을 로드합니다.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(&|key: &str| std::env::var(key).ok())
    }

    /// 임의의 조회 함수에서 설정을 로드합니다.
    pub fn from_lookup(lookup: Lookup<'_>) -> Result<Self, AppError> {
        let environment = Environment::from_lookup(lookup);
        let server = ServerConfig::from_lookup(lookup)?;
        let oauth = OAuthConfig::from_lookup(lookup, &server.public_base_url)?;

        Ok(Self {
            storage: StorageConfig::from_lookup(lookup),
            rate_limit: RateLimitConfig::from_lookup(lookup)?,
            session: SessionConfig::from_lookup(lookup, &environment)?,
            oauth,
            server,
            environment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_from_lookup() {
        let lookup = |key: &str| match key {
            "ENVIRONMENT" => Some("development".to_string()),
            "PORT" => Some("8088".to_string()),
            "GITHUB_CLIENT_ID" => Some("gh-id".to_string()),
            "GITHUB_CLIENT_SECRET" => Some("gh-secret".to_string()),
            _ => None,
        };
        let config = AppConfig::from_lookup(&lookup).unwrap();

        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.server.port, 8088);
        assert_eq!(
            config.oauth.credentials(IdentityProvider::GitHub).unwrap().callback_url,
            "http://localhost:8088/auth/github/secrets"
        );
    }
}
