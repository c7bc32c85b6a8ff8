//! # 외부 인증 브로커
//!
//! Google, Facebook, GitHub의 OAuth 2.0 Authorization Code 플로우를 처리합니다.
//!
//! ```text
//! 브라우저 ── GET /auth/{provider} ──► 포털 ── 302 authorize URL ──► 프로바이더
//!    ▲                                                                  │
//!    └──── 302 /secrets ◄── 포털 ◄── GET /auth/{provider}/secrets?code ─┘
//!                            │
//!                            ├─ code → access_token (토큰 엔드포인트)
//!                            └─ access_token → 프로필 (외부 ID)
//! ```
//!
//! ## 프로바이더별 차이
//!
//! | 프로바이더 | 토큰 교환 | 프로필 조회 |
//! |------------|-----------|-------------|
//! | Google | POST form | Bearer 토큰 |
//! | Facebook | GET query | `access_token` + `appsecret_proof` 쿼리 |
//! | GitHub | POST form, `Accept: application/json` | Bearer 토큰 + `User-Agent` |
//!
//! 모든 실패(타임아웃, 2xx 외 응답, 프로바이더 에러, 코드 누락, 비활성 프로바이더)는
//! `AppError::BrokerFailure`로 보고됩니다.

use std::time::Duration;
use async_trait::async_trait;
use hmac::{Hmac, Mac};
use log::{debug, warn};
use reqwest::header::ACCEPT;
use sha2::Sha256;
use uuid::Uuid;
use crate::config::{IdentityProvider, OAuthConfig, ProviderCredentials};
use crate::domain::dto::oauth::{FacebookProfile, GitHubUser, GoogleUserInfo, OAuthCallbackQuery, OAuthTokenResponse};
use crate::domain::models::oauth::ExternalIdentity;
use crate::errors::{AppError, ErrorContext};

type HmacSha256 = Hmac<Sha256>;

/// GitHub API는 `User-Agent` 헤더가 없는 요청을 거부함
const CLIENT_USER_AGENT: &str = concat!("secrets_portal/", env!("CARGO_PKG_VERSION"));

/// 프로바이더 엔드포인트 묶음
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderEndpoints {
    pub authorize_url: &'static str,
    pub token_url: &'static str,
    pub profile_url: &'static str,
}

impl ProviderEndpoints {
    pub fn for_provider(provider: IdentityProvider) -> Self {
        match provider {
            IdentityProvider::Google => Self {
                authorize_url: "https://accounts.google.com/o/oauth2/v2/auth",
                token_url: "https://oauth2.googleapis.com/token",
                profile_url: "https://www.googleapis.com/oauth2/v2/userinfo",
            },
            IdentityProvider::Facebook => Self {
                authorize_url: "https://www.facebook.com/v19.0/dialog/oauth",
                token_url: "https://graph.facebook.com/v19.0/oauth/access_token",
                profile_url: "https://graph.facebook.com/v19.0/me?fields=id,name,email",
            },
            IdentityProvider::GitHub => Self {
                authorize_url: "https://github.com/login/oauth/authorize",
                token_url: "https://github.com/login/oauth/access_token",
                profile_url: "https://api.github.com/user",
            },
        }
    }
}

/// 연합 로그인을 수행하는 외부 브로커
///
/// 핸들러와 신원 서비스는 이 trait에만 의존하므로 테스트에서는 스텁으로 교체할 수 있습니다.
#[async_trait]
pub trait IdentityBroker: Send + Sync {
    /// 사용자를 보낼 프로바이더 인증 페이지 URL
    fn authorization_url(&self, provider: IdentityProvider, state: &str) -> Result<String, AppError>;

    /// 콜백 쿼리로 교환을 마치고 프로바이더가 주장하는 신원을 돌려줍니다.
    async fn complete(&self, provider: IdentityProvider, callback: &OAuthCallbackQuery) -> Result<ExternalIdentity, AppError>;
}

/// CSRF 방지용 OAuth state
///
/// `/auth/{provider}`에서 생성되어 서명된 `oauth_state` 쿠키에 `"{provider}:{state}"` 형태로
/// 저장되고, 콜백에서 쿼리의 `state`와 비교됩니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthState {
    pub provider: IdentityProvider,
    pub value: String,
}

impl OAuthState {
    pub const COOKIE_NAME: &'static str = "oauth_state";
    /// state 쿠키 유효 시간 (초)
    pub const MAX_AGE_SECONDS: i64 = 600;

    pub fn generate(provider: IdentityProvider) -> Self {
        Self {
            provider,
            value: Uuid::new_v4().simple().to_string(),
        }
    }

    pub fn to_cookie_value(&self) -> String {
        format!("{}:{}", self.provider, self.value)
    }

    pub fn from_cookie_value(raw: &str) -> Option<Self> {
        let (provider, value) = raw.split_once(':')?;
        let provider = IdentityProvider::from_str(provider).ok()?;
        if value.is_empty() {
            return None;
        }
        Some(Self { provider, value: value.to_string() })
    }

    /// 저장된 state가 이 프로바이더의 콜백 state와 일치하는지 확인합니다.
    pub fn verify(stored: Option<&str>, provider: IdentityProvider, received: Option<&str>) -> Result<(), AppError> {
        let stored = stored
            .and_then(Self::from_cookie_value)
            .ok_or_else(|| AppError::BrokerFailure("missing oauth state".to_string()))?;

        match received {
            Some(received) if stored.provider == provider && stored.value == received => Ok(()),
            _ => Err(AppError::BrokerFailure("oauth state mismatch".to_string())),
        }
    }
}

/// reqwest 기반 OAuth 브로커
///
/// 모든 요청은 타임아웃이 설정된 하나의 `reqwest::Client`를 공유합니다.
pub struct OAuthBroker {
    http: reqwest::Client,
    config: OAuthConfig,
}

impl OAuthBroker {
    pub fn new(config: OAuthConfig) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_seconds))
            .user_agent(CLIENT_USER_AGENT)
            .build()
            .map_err(|e| AppError::ConfigurationError(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        Ok(Self { http, config })
    }

    fn credentials(&self, provider: IdentityProvider) -> Result<&ProviderCredentials, AppError> {
        self.config
            .credentials(provider)
            .ok_or_else(|| AppError::BrokerFailure(format!("{} login is not configured", provider)))
    }

    /// Authorization Code를 액세스 토큰으로 교환
    async fn exchange_code(
        &self,
        provider: IdentityProvider,
        credentials: &ProviderCredentials,
        code: &str,
    ) -> Result<String, AppError> {
        let endpoints = ProviderEndpoints::for_provider(provider);
        let params = [
            ("code", code),
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
            ("redirect_uri", credentials.callback_url.as_str()),
            ("grant_type", "authorization_code"),
        ];

        let request = match provider {
            IdentityProvider::Facebook => self.http.get(endpoints.token_url).query(&params),
            IdentityProvider::Google | IdentityProvider::GitHub => self.http.post(endpoints.token_url).form(&params),
        };

        let response = request
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| AppError::BrokerFailure(format!("{} 토큰 요청 실패: {}", provider, e)))?;

        if !response.status().is_success() {
            return Err(AppError::BrokerFailure(format!(
                "{} 토큰 교환 실패: HTTP {}",
                provider,
                response.status()
            )));
        }

        let token = response
            .json::<OAuthTokenResponse>()
            .await
            .map_err(|e| AppError::BrokerFailure(format!("{} 토큰 응답 파싱 실패: {}", provider, e)))?;

        access_token_from(provider, token)
    }

    /// 액세스 토큰으로 프로필을 조회해 외부 신원으로 변환
    async fn fetch_identity(
        &self,
        provider: IdentityProvider,
        credentials: &ProviderCredentials,
        access_token: &str,
    ) -> Result<ExternalIdentity, AppError> {
        let endpoints = ProviderEndpoints::for_provider(provider);

        let request = match provider {
            IdentityProvider::Google => self.http.get(endpoints.profile_url).bearer_auth(access_token),
            IdentityProvider::Facebook => {
                let proof = appsecret_proof(access_token, &credentials.client_secret)?;
                self.http
                    .get(endpoints.profile_url)
                    .query(&[("access_token", access_token), ("appsecret_proof", proof.as_str())])
            }
            IdentityProvider::GitHub => self.http
                .get(endpoints.profile_url)
                .bearer_auth(access_token)
                .header(ACCEPT, "application/vnd.github+json"),
        };

        let response = request
            .send()
            .await
            .map_err(|e| AppError::BrokerFailure(format!("{} 프로필 요청 실패: {}", provider, e)))?;

        if !response.status().is_success() {
            return Err(AppError::BrokerFailure(format!(
                "{} 프로필 조회 실패: HTTP {}",
                provider,
                response.status()
            )));
        }

        let parse_error = |e: reqwest::Error| AppError::BrokerFailure(format!("{} 프로필 파싱 실패: {}", provider, e));
        let identity: ExternalIdentity = match provider {
            IdentityProvider::Google => response.json::<GoogleUserInfo>().await.map_err(parse_error)?.into(),
            IdentityProvider::Facebook => response.json::<FacebookProfile>().await.map_err(parse_error)?.into(),
            IdentityProvider::GitHub => response.json::<GitHubUser>().await.map_err(parse_error)?.into(),
        };

        Ok(identity)
    }
}

#[async_trait]
impl IdentityBroker for OAuthBroker {
    fn authorization_url(&self, provider: IdentityProvider, state: &str) -> Result<String, AppError> {
        let credentials = self.credentials(provider)?;
        Ok(build_authorization_url(provider, credentials, state))
    }

    async fn complete(&self, provider: IdentityProvider, callback: &OAuthCallbackQuery) -> Result<ExternalIdentity, AppError> {
        let credentials = self.credentials(provider)?;
        let code = authorization_code(provider, callback)?;

        let access_token = self.exchange_code(provider, credentials, code).await?;
        let identity = self.fetch_identity(provider, credentials, &access_token).await?;

        debug!("{} 신원 확인 완료", provider);
        Ok(identity)
    }
}

/// 인증 페이지 URL 구성
pub fn build_authorization_url(provider: IdentityProvider, credentials: &ProviderCredentials, state: &str) -> String {
    let scope = provider.scopes().join(" ");
    let params = [
        ("client_id", credentials.client_id.as_str()),
        ("redirect_uri", credentials.callback_url.as_str()),
        ("response_type", "code"),
        ("scope", scope.as_str()),
        ("state", state),
    ];

    let query_string = params
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");

    format!("{}?{}", ProviderEndpoints::for_provider(provider).authorize_url, query_string)
}

/// 콜백 쿼리에서 Authorization Code를 꺼냅니다.
///
/// 프로바이더가 `error`를 돌려줬거나 코드가 없으면 실패입니다.
pub fn authorization_code(provider: IdentityProvider, callback: &OAuthCallbackQuery) -> Result<&str, AppError> {
    if let Some(error) = &callback.error {
        warn!("{} 인증 거부: {}", provider, error);
        return Err(AppError::BrokerFailure(format!("{} returned error: {}", provider, error)));
    }

    callback
        .code
        .as_deref()
        .filter(|code| !code.is_empty())
        .ok_or_else(|| AppError::BrokerFailure(format!("{} callback without code", provider)))
}

fn access_token_from(provider: IdentityProvider, token: OAuthTokenResponse) -> Result<String, AppError> {
    if let Some(error) = token.error {
        return Err(AppError::BrokerFailure(format!(
            "{} 토큰 교환 거부: {} {}",
            provider,
            error,
            token.error_description.unwrap_or_default()
        )));
    }

    token
        .access_token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::BrokerFailure(format!("{} 토큰 응답에 access_token 없음", provider)))
}

/// Facebook Graph API `appsecret_proof`
///
/// 액세스 토큰을 앱 시크릿으로 HMAC-SHA256 서명한 16진수 문자열입니다.
pub fn appsecret_proof(access_token: &str, app_secret: &str) -> Result<String, AppError> {
    let mut mac = HmacSha256::new_from_slice(app_secret.as_bytes())
        .context("appsecret_proof 키 생성 실패")?;
    mac.update(access_token.as_bytes());

    Ok(mac
        .finalize()
        .into_bytes()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect())
}
