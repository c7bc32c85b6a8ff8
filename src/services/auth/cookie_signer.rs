//! 서명된 쿠키 발급과 검증
//!
//! 세션 토큰(`sid`)과 OAuth state(`oauth_state`) 쿠키는 모두 `SESSION_SECRET`에서
//! 유도한 키로 서명됩니다. 서명이 맞지 않는 쿠키는 없는 것으로 취급합니다.

use actix_web::cookie::{time::Duration, Cookie, CookieJar, Key, SameSite};
use sha2::{Digest, Sha512};
use crate::config::SessionConfig;
use crate::domain::entities::sessions::SessionToken;
use crate::errors::AppError;
use super::oauth_broker::OAuthState;

/// 세션 쿠키 이름
pub const SESSION_COOKIE_NAME: &str = "sid";

#[derive(Clone)]
pub struct CookieSigner {
    key: Key,
    secure: bool,
    session_max_age: Duration,
}

impl CookieSigner {
    /// 시크릿의 SHA-512 다이제스트(64바이트)로 서명 키를 만듭니다.
    pub fn new(config: &SessionConfig) -> Self {
        let digest = Sha512::digest(config.secret.as_bytes());

        Self {
            key: Key::from(&digest[..]),
            secure: config.cookie_secure,
            session_max_age: Duration::seconds(i64::try_from(config.ttl_seconds).unwrap_or(i64::MAX)),
        }
    }

    pub fn session_cookie(&self, token: &SessionToken) -> Result<Cookie<'static>, AppError> {
        let cookie = self.base_cookie(SESSION_COOKIE_NAME, token.as_str().to_string())
            .max_age(self.session_max_age)
            .finish();
        self.sign(cookie)
    }

    pub fn clear_session_cookie(&self) -> Cookie<'static> {
        self.removal(SESSION_COOKIE_NAME)
    }

    pub fn state_cookie(&self, state: &OAuthState) -> Result<Cookie<'static>, AppError> {
        let cookie = self.base_cookie(OAuthState::COOKIE_NAME, state.to_cookie_value())
            .max_age(Duration::seconds(OAuthState::MAX_AGE_SECONDS))
            .finish();
        self.sign(cookie)
    }

    pub fn clear_state_cookie(&self) -> Cookie<'static> {
        self.removal(OAuthState::COOKIE_NAME)
    }

    /// 요청의 `sid` 쿠키에서 토큰을 꺼냅니다. 서명이나 형식이 틀리면 `None`.
    pub fn session_token(&self, cookie: Option<Cookie<'static>>) -> Option<SessionToken> {
        self.verify(cookie?).and_then(|value| SessionToken::parse(&value))
    }

    /// 서명을 검증하고 원래 값을 돌려줍니다.
    pub fn verify(&self, cookie: Cookie<'static>) -> Option<String> {
        let name = cookie.name().to_string();
        let mut jar = CookieJar::new();
        jar.add_original(cookie);

        jar.signed(&self.key).get(&name).map(|c| c.value().to_string())
    }

    fn sign(&self, cookie: Cookie<'static>) -> Result<Cookie<'static>, AppError> {
        let name = cookie.name().to_string();
        let mut jar = CookieJar::new();
        jar.signed_mut(&self.key).add(cookie);

        jar.get(&name)
            .cloned()
            .ok_or_else(|| AppError::InternalError(format!("failed to sign cookie {}", name)))
    }

    fn base_cookie(&self, name: &'static str, value: String) -> actix_web::cookie::CookieBuilder<'static> {
        Cookie::build(name, value)
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
    }

    fn removal(&self, name: &'static str) -> Cookie<'static> {
        self.base_cookie(name, String::new())
            .max_age(Duration::ZERO)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IdentityProvider;

    fn signer() -> CookieSigner {
        CookieSigner::new(&SessionConfig {
            secret: "a-test-secret-that-is-long-enough-for-prod".to_string(),
            ttl_seconds: 3600,
            cookie_secure: false,
        })
    }

    #[test]
    fn test_signed_session_cookie_round_trip() {
        let signer = signer();
        let token = SessionToken::generate();
        let cookie = signer.session_cookie(&token).unwrap();

        assert_eq!(cookie.name(), SESSION_COOKIE_NAME);
        assert_ne!(cookie.value(), token.as_str());
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(signer.session_token(Some(cookie)), Some(token));
    }

    #[test]
    fn test_unsigned_or_tampered_cookie_is_ignored() {
        let signer = signer();
        let token = SessionToken::generate();

        let unsigned = Cookie::new(SESSION_COOKIE_NAME, token.as_str().to_string());
        assert_eq!(signer.session_token(Some(unsigned)), None);

        let signed = signer.session_cookie(&token).unwrap();
        let forged = Cookie::new(SESSION_COOKIE_NAME, format!("{}0", signed.value()));
        assert_eq!(signer.session_token(Some(forged)), None);
    }

    #[test]
    fn test_cookie_from_other_secret_is_ignored() {
        let other = CookieSigner::new(&SessionConfig {
            secret: "some-completely-different-secret-value".to_string(),
            ttl_seconds: 3600,
            cookie_secure: false,
        });
        let token = SessionToken::generate();
        let cookie = other.session_cookie(&token).unwrap();

        assert_eq!(signer().session_token(Some(cookie)), None);
    }

    #[test]
    fn test_state_cookie_round_trip() {
        let signer = signer();
        let state = OAuthState::generate(IdentityProvider::GitHub);
        let cookie = signer.state_cookie(&state).unwrap();

        assert_eq!(signer.verify(cookie), Some(state.to_cookie_value()));
    }

    #[test]
    fn test_removal_cookie_expires_immediately() {
        let cookie = signer().clear_session_cookie();

        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(Duration::ZERO));
    }
}
