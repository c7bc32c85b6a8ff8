//! 데이터 및 서버 설정 관리 모듈
//!
//! 실행 환경, 서버 바인딩, 저장소 연결, Rate Limiting 설정을 관리합니다.

use std::str::FromStr;
use crate::errors::AppError;

/// 환경 변수 조회 함수 타입
///
/// 실제 실행에서는 `std::env::var`를, 테스트에서는 고정된 맵을 사용합니다.
pub type Lookup<'a> = &'a dyn Fn(&str) -> Option<String>;

/// 값이 있으면 파싱하고, 없으면 기본값을 사용합니다.
///
/// 값이 있지만 파싱할 수 없는 경우 조용히 기본값으로 대체하지 않고
/// `ConfigurationError`를 반환합니다.
pub(crate) fn parse_or<T: FromStr>(lookup: Lookup<'_>, key: &str, default: T) -> Result<T, AppError> {
    match lookup(key) {
        Some(raw) => raw.trim().parse::<T>().map_err(|_| {
            AppError::ConfigurationError(format!("{} 값을 해석할 수 없습니다: {}", key, raw))
        }),
        None => Ok(default),
    }
}

/// 애플리케이션 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    /// 개발 환경 - 빠른 개발을 위한 설정
    Development,
    /// 테스트 환경 - 자동화된 테스트용 설정
    Test,
    /// 스테이징 환경 - 프로덕션 유사 환경
    Staging,
    /// 프로덕션 환경 - 최고 수준의 보안
    Production,
}

impl Environment {
    /// `ENVIRONMENT` 값에서 실행 환경을 결정합니다.
    ///
    /// 설정되지 않은 경우 `Production`을 기본값으로 사용합니다.
    pub fn from_lookup(lookup: Lookup<'_>) -> Self {
        lookup("ENVIRONMENT")
            .map(|s| Self::from_str(&s))
            .unwrap_or(Environment::Production)
    }

    /// 문자열에서 Environment를 생성합니다.
    ///
    /// 알 수 없는 값인 경우 `Production`을 반환합니다.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

/// 서버 바인딩 설정
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// 바인딩할 호스트 주소. 기본값: "0.0.0.0"
    pub host: String,
    /// 바인딩할 포트. 기본값: 3000
    pub port: u16,
    /// 외부에서 접근 가능한 기본 URL (OAuth 콜백 URL 생성에 사용)
    ///
    /// 기본값: `http://localhost:{port}`
    pub public_base_url: String,
}

impl ServerConfig {
    pub fn from_lookup(lookup: Lookup<'_>) -> Result<Self, AppError> {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_or::<u16>(lookup, "PORT", 3000)?;
        let public_base_url = lookup("PUBLIC_BASE_URL")
            .unwrap_or_else(|| format!("http://localhost:{}", port))
            .trim_end_matches('/')
            .to_string();

        Ok(Self { host, port, public_base_url })
    }

    /// `host:port` 형태의 바인딩 주소
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 저장소 연결 설정
///
/// 사용자 디렉터리(MongoDB)와 세션 백엔드(Redis)의 주소를 담습니다.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub mongodb_uri: String,
    pub database_name: String,
    pub redis_url: String,
}

impl StorageConfig {
    pub fn from_lookup(lookup: Lookup<'_>) -> Self {
        Self {
            mongodb_uri: lookup("MONGODB_URI")
                .unwrap_or_else(|| "mongodb://127.0.0.1:27017".to_string()),
            database_name: lookup("DATABASE_NAME")
                .unwrap_or_else(|| "secrets_portal".to_string()),
            redis_url: lookup("REDIS_URL")
                .unwrap_or_else(|| "redis://localhost:6379".to_string()),
        }
    }
}

/// Rate Limiting 설정
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub per_second: u64,
    pub burst_size: u32,
}

impl RateLimitConfig {
    /// 환경변수에서 Rate Limiting 설정을 로드합니다
    ///
    /// * `RATE_LIMIT_PER_SECOND` - 초당 허용 요청 수 (기본값: 100)
    /// * `RATE_LIMIT_BURST_SIZE` - 버스트 허용량 (기본값: 200)
    pub fn from_lookup(lookup: Lookup<'_>) -> Result<Self, AppError> {
        Ok(Self {
            per_second: parse_or(lookup, "RATE_LIMIT_PER_SECOND", 100)?,
            burst_size: parse_or(lookup, "RATE_LIMIT_BURST_SIZE", 200)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_environment_from_string() {
        assert_eq!(Environment::from_str("development"), Environment::Development);
        assert_eq!(Environment::from_str("DEV"), Environment::Development);
        assert_eq!(Environment::from_str("test"), Environment::Test);
        assert_eq!(Environment::from_str("production"), Environment::Production);
        assert_eq!(Environment::from_str("unknown"), Environment::Production);
    }

    #[test]
    fn test_server_config_defaults() {
        let lookup = lookup_from(&[]);
        let server = ServerConfig::from_lookup(&lookup).unwrap();

        assert_eq!(server.host, "0.0.0.0");
        assert_eq!(server.port, 3000);
        assert_eq!(server.public_base_url, "http://localhost:3000");
        assert_eq!(server.bind_address(), "0.0.0.0:3000");
    }

    #[test]
    fn test_public_base_url_trailing_slash_is_trimmed() {
        let lookup = lookup_from(&[("PUBLIC_BASE_URL", "https://secrets.example.com/")]);
        let server = ServerConfig::from_lookup(&lookup).unwrap();

        assert_eq!(server.public_base_url, "https://secrets.example.com");
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let lookup = lookup_from(&[("PORT", "eighty")]);
        let result = ServerConfig::from_lookup(&lookup);

        assert!(matches!(result, Err(AppError::ConfigurationError(_))));
    }

    #[test]
    fn test_rate_limit_overrides() {
        let lookup = lookup_from(&[
            ("RATE_LIMIT_PER_SECOND", "20"),
            ("RATE_LIMIT_BURST_SIZE", "40"),
        ]);
        let rate = RateLimitConfig::from_lookup(&lookup).unwrap();

        assert_eq!(rate.per_second, 20);
        assert_eq!(rate.burst_size, 40);
    }
}
