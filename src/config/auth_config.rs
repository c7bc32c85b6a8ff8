//! # Authentication Configuration Module
//!
//! 외부 인증 프로바이더, OAuth 브로커 통신, 세션 쿠키 관련 설정을 관리하는 모듈입니다.
//!
//! ## 지원하는 인증 프로바이더
//!
//! | 프로바이더 | 요청 스코프 | 콜백 경로 | 사용자 필드 |
//! |-----------|-------------|-----------|-------------|
//! | Google | `profile` | `/auth/google/secrets` | `googleId` |
//! | Facebook | `email` | `/auth/facebook/secrets` | `facebookId` |
//! | GitHub | `user:email` | `/auth/github/secrets` | `githubId` |
//!
//! ## 필수 환경 변수 설정
//!
//! ```bash
//! export GOOGLE_CLIENT_ID="your-google-client-id"
//! export GOOGLE_CLIENT_SECRET="your-google-client-secret"
//! export FACEBOOK_CLIENT_ID="your-facebook-app-id"
//! export FACEBOOK_CLIENT_SECRET="your-facebook-app-secret"
//! export GITHUB_CLIENT_ID="your-github-client-id"
//! export GITHUB_CLIENT_SECRET="your-github-client-secret"
//!
//! export SESSION_SECRET="at-least-32-bytes-of-random-secret-material"
//! ```
//!
//! 자격 증명이 없는 프로바이더는 비활성화되며, 해당 로그인 시도는
//! `/login`으로 돌아갑니다.

use std::collections::HashMap;
use std::fmt;
use serde::{Deserialize, Serialize};
use crate::config::data_config::{parse_or, Environment, Lookup};
use crate::errors::AppError;

/// 프로덕션에서 요구하는 세션 시크릿 최소 길이 (바이트)
pub const MIN_SESSION_SECRET_LEN: usize = 32;

/// 세션 유효 시간 상한 (1년)
pub const MAX_SESSION_TTL_SECONDS: u64 = 365 * 24 * 60 * 60;

const DEVELOPMENT_SESSION_SECRET: &str = "development-only-session-secret-change-me!";

/// 외부 인증 프로바이더
///
/// 세 가지 연합 로그인 프로바이더의 닫힌 집합입니다.
/// 프로바이더별 차이(스코프, 콜백 경로, 사용자 필드명)는 모두 이 타입의
/// 메서드로 표현되며, 로그인 처리 코드는 하나의 경로로 분기 없이 동작합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentityProvider {
    Google,
    Facebook,
    GitHub,
}

impl IdentityProvider {
    pub const ALL: [IdentityProvider; 3] = [
        IdentityProvider::Google,
        IdentityProvider::Facebook,
        IdentityProvider::GitHub,
    ];

    /// 문자열(경로 세그먼트)에서 프로바이더를 찾습니다. 대소문자 무관.
    pub fn from_str(s: &str) -> Result<Self, AppError> {
        match s.to_lowercase().as_str() {
            "google" => Ok(IdentityProvider::Google),
            "facebook" => Ok(IdentityProvider::Facebook),
            "github" => Ok(IdentityProvider::GitHub),
            _ => Err(AppError::ValidationError(format!("Unsupported identity provider: {}", s))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IdentityProvider::Google => "google",
            IdentityProvider::Facebook => "facebook",
            IdentityProvider::GitHub => "github",
        }
    }

    /// 사용자 문서에서 이 프로바이더의 외부 ID를 저장하는 필드명
    pub fn user_field(&self) -> &'static str {
        match self {
            IdentityProvider::Google => "googleId",
            IdentityProvider::Facebook => "facebookId",
            IdentityProvider::GitHub => "githubId",
        }
    }

    /// 인증 요청 시 브로커에 요청하는 스코프 목록
    pub fn scopes(&self) -> &'static [&'static str] {
        match self {
            IdentityProvider::Google => &["profile"],
            IdentityProvider::Facebook => &["email"],
            IdentityProvider::GitHub => &["user:email"],
        }
    }

    /// 로그인 시작 경로 (`/auth/{provider}`)
    pub fn login_path(&self) -> String {
        format!("/auth/{}", self.as_str())
    }

    /// OAuth 콜백 경로 (`/auth/{provider}/secrets`)
    pub fn callback_path(&self) -> String {
        format!("/auth/{}/secrets", self.as_str())
    }

    fn env_prefix(&self) -> &'static str {
        match self {
            IdentityProvider::Google => "GOOGLE",
            IdentityProvider::Facebook => "FACEBOOK",
            IdentityProvider::GitHub => "GITHUB",
        }
    }
}

impl fmt::Display for IdentityProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 프로바이더 하나의 OAuth 클라이언트 정보
///
/// `client_secret`은 절대 로그에 출력하지 마세요. `Debug` 구현도 마스킹합니다.
#[derive(Clone)]
pub struct ProviderCredentials {
    pub client_id: String,
    pub client_secret: String,
    /// 브로커가 인증 후 돌려보낼 절대 URL
    pub callback_url: String,
}

impl fmt::Debug for ProviderCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .field("callback_url", &self.callback_url)
            .finish()
    }
}

/// OAuth 브로커 통신 설정
#[derive(Debug, Clone)]
pub struct OAuthConfig {
    /// 활성화된 프로바이더별 자격 증명
    pub providers: HashMap<IdentityProvider, ProviderCredentials>,
    /// 브로커 HTTP 요청 타임아웃 (초). 기본값: 10
    pub http_timeout_seconds: u64,
}

impl OAuthConfig {
    /// `{PROVIDER}_CLIENT_ID` / `{PROVIDER}_CLIENT_SECRET` 쌍을 읽습니다.
    ///
    /// 둘 중 하나라도 비어 있으면 해당 프로바이더는 비활성화됩니다.
    pub fn from_lookup(lookup: Lookup<'_>, public_base_url: &str) -> Result<Self, AppError> {
        let mut providers = HashMap::new();

        for provider in IdentityProvider::ALL {
            let prefix = provider.env_prefix();
            let client_id = lookup(&format!("{}_CLIENT_ID", prefix)).filter(|v| !v.is_empty());
            let client_secret = lookup(&format!("{}_CLIENT_SECRET", prefix)).filter(|v| !v.is_empty());

            match (client_id, client_secret) {
                (Some(client_id), Some(client_secret)) => {
                    providers.insert(provider, ProviderCredentials {
                        client_id,
                        client_secret,
                        callback_url: format!("{}{}", public_base_url, provider.callback_path()),
                    });
                }
                _ => log::warn!("{} 자격 증명이 없어 해당 로그인이 비활성화됩니다", provider),
            }
        }

        let http_timeout_seconds = parse_or(lookup, "OAUTH_HTTP_TIMEOUT_SECONDS", 10u64)?;
        if http_timeout_seconds == 0 {
            return Err(AppError::ConfigurationError(
                "OAUTH_HTTP_TIMEOUT_SECONDS는 0보다 커야 합니다".to_string(),
            ));
        }

        Ok(Self { providers, http_timeout_seconds })
    }

    pub fn credentials(&self, provider: IdentityProvider) -> Option<&ProviderCredentials> {
        self.providers.get(&provider)
    }
}

/// 세션 쿠키 설정
#[derive(Clone)]
pub struct SessionConfig {
    /// 쿠키 서명용 시크릿
    pub secret: String,
    /// 세션 유효 시간 (초). 기본값: 86400 (24시간)
    pub ttl_seconds: u64,
    /// 쿠키의 `Secure` 속성. 프로덕션 기본값: true
    pub cookie_secure: bool,
}

impl fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionConfig")
            .field("secret", &"***")
            .field("ttl_seconds", &self.ttl_seconds)
            .field("cookie_secure", &self.cookie_secure)
            .finish()
    }
}

impl SessionConfig {
    /// 세션 설정을 로드합니다.
    ///
    /// 프로덕션에서는 `SESSION_SECRET`이 필수이며 최소 32바이트여야 합니다.
    /// 그 외 환경에서는 누락 시 개발용 기본값을 사용하고 경고를 남깁니다.
    pub fn from_lookup(lookup: Lookup<'_>, environment: &Environment) -> Result<Self, AppError> {
        let secret = match lookup("SESSION_SECRET").filter(|s| !s.is_empty()) {
            Some(secret) => secret,
            None if environment.is_production() => {
                return Err(AppError::ConfigurationError(
                    "SESSION_SECRET must be set in production".to_string(),
                ));
            }
            None => {
                log::warn!("SESSION_SECRET not set, using default (not secure for production!)");
                DEVELOPMENT_SESSION_SECRET.to_string()
            }
        };

        if environment.is_production() && secret.len() < MIN_SESSION_SECRET_LEN {
            return Err(AppError::ConfigurationError(format!(
                "SESSION_SECRET must be at least {} bytes",
                MIN_SESSION_SECRET_LEN
            )));
        }

        let ttl_seconds = parse_or(lookup, "SESSION_TTL_SECONDS", 86_400u64)?;
        if ttl_seconds == 0 || ttl_seconds > MAX_SESSION_TTL_SECONDS {
            return Err(AppError::ConfigurationError(format!(
                "SESSION_TTL_SECONDS는 1 이상 {} 이하여야 합니다",
                MAX_SESSION_TTL_SECONDS
            )));
        }

        let cookie_secure = parse_or(lookup, "SESSION_COOKIE_SECURE", environment.is_production())?;

        Ok(Self { secret, ttl_seconds, cookie_secure })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_identity_provider_from_string() {
        assert_eq!(IdentityProvider::from_str("google").unwrap(), IdentityProvider::Google);
        assert_eq!(IdentityProvider::from_str("Facebook").unwrap(), IdentityProvider::Facebook);
        assert_eq!(IdentityProvider::from_str("GITHUB").unwrap(), IdentityProvider::GitHub);

        assert!(IdentityProvider::from_str("twitter").is_err());
        assert!(IdentityProvider::from_str("local").is_err());
    }

    #[test]
    fn test_identity_provider_metadata() {
        assert_eq!(IdentityProvider::Google.scopes(), &["profile"]);
        assert_eq!(IdentityProvider::Facebook.scopes(), &["email"]);
        assert_eq!(IdentityProvider::GitHub.scopes(), &["user:email"]);

        assert_eq!(IdentityProvider::GitHub.user_field(), "githubId");
        assert_eq!(IdentityProvider::Google.login_path(), "/auth/google");
        assert_eq!(IdentityProvider::Facebook.callback_path(), "/auth/facebook/secrets");
    }

    #[test]
    fn test_identity_provider_serialization() {
        let json = serde_json::to_string(&IdentityProvider::GitHub).unwrap();
        assert_eq!(json, "\"github\"");

        let deserialized: IdentityProvider = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, IdentityProvider::GitHub);
    }

    #[test]
    fn test_oauth_config_enables_only_complete_credentials() {
        let lookup = lookup_from(&[
            ("GOOGLE_CLIENT_ID", "google-id"),
            ("GOOGLE_CLIENT_SECRET", "google-secret"),
            ("GITHUB_CLIENT_ID", "github-id"),
        ]);
        let config = OAuthConfig::from_lookup(&lookup, "https://portal.example.com").unwrap();

        let google = config.credentials(IdentityProvider::Google).unwrap();
        assert_eq!(google.callback_url, "https://portal.example.com/auth/google/secrets");
        assert!(config.credentials(IdentityProvider::GitHub).is_none());
        assert!(config.credentials(IdentityProvider::Facebook).is_none());
        assert_eq!(config.http_timeout_seconds, 10);
    }

    #[test]
    fn test_credentials_debug_masks_secret() {
        let credentials = ProviderCredentials {
            client_id: "id".to_string(),
            client_secret: "super-secret".to_string(),
            callback_url: "http://localhost:3000/auth/github/secrets".to_string(),
        };

        assert!(!format!("{:?}", credentials).contains("super-secret"));
    }

    #[test]
    fn test_session_secret_required_in_production() {
        let lookup = lookup_from(&[]);
        let result = SessionConfig::from_lookup(&lookup, &Environment::Production);

        assert!(matches!(result, Err(AppError::ConfigurationError(_))));
    }

    #[test]
    fn test_short_session_secret_rejected_in_production() {
        let lookup = lookup_from(&[("SESSION_SECRET", "short")]);
        let result = SessionConfig::from_lookup(&lookup, &Environment::Production);

        assert!(matches!(result, Err(AppError::ConfigurationError(_))));
    }

    #[test]
    fn test_session_defaults_in_development() {
        let lookup = lookup_from(&[]);
        let session = SessionConfig::from_lookup(&lookup, &Environment::Development).unwrap();

        assert_eq!(session.ttl_seconds, 86_400);
        assert!(!session.cookie_secure);
        assert!(!session.secret.is_empty());
    }

    #[test]
    fn test_session_ttl_out_of_range_rejected() {
        for ttl in ["0", "31536001", "18446744073709551615"] {
            let lookup = lookup_from(&[("SESSION_TTL_SECONDS", ttl)]);
            let result = SessionConfig::from_lookup(&lookup, &Environment::Development);

            assert!(matches!(result, Err(AppError::ConfigurationError(_))), "{}", ttl);
        }
    }

    #[test]
    fn test_session_ttl_upper_bound_accepted() {
        let lookup = lookup_from(&[("SESSION_TTL_SECONDS", "31536000")]);
        let session = SessionConfig::from_lookup(&lookup, &Environment::Development).unwrap();

        assert_eq!(session.ttl_seconds, MAX_SESSION_TTL_SECONDS);
    }
}
