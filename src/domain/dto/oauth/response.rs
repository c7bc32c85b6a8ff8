//! OAuth 브로커 응답 DTO 모듈
//!
//! 토큰 교환 응답과 프로바이더별 프로필 응답을 정의합니다.

use serde::Deserialize;
use crate::config::IdentityProvider;
use crate::domain::models::oauth::ExternalIdentity;

/// 토큰 엔드포인트 응답
///
/// GitHub는 실패해도 200 상태로 `error` 필드를 돌려주므로
/// `access_token`과 `error` 모두 선택 필드입니다.
#[derive(Debug, Deserialize)]
pub struct OAuthTokenResponse {
    pub access_token: Option<String>,
    pub token_type: Option<String>,
    pub expires_in: Option<i64>,
    pub scope: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

/// Google UserInfo v2 응답
#[derive(Debug, Deserialize)]
pub struct GoogleUserInfo {
    pub id: String,
    pub email: Option<String>,
    pub name: Option<String>,
}

/// Facebook Graph `/me` 응답
#[derive(Debug, Deserialize)]
pub struct FacebookProfile {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
}

/// GitHub `/user` 응답
#[derive(Debug, Deserialize)]
pub struct GitHubUser {
    /// GitHub의 숫자형 사용자 ID
    pub id: u64,
    pub login: String,
    pub name: Option<String>,
    pub email: Option<String>,
}

impl From<GoogleUserInfo> for ExternalIdentity {
    fn from(info: GoogleUserInfo) -> Self {
        Self {
            provider: IdentityProvider::Google,
            external_id: info.id,
            email: info.email,
            display_name: info.name,
        }
    }
}

impl From<FacebookProfile> for ExternalIdentity {
    fn from(profile: FacebookProfile) -> Self {
        Self {
            provider: IdentityProvider::Facebook,
            external_id: profile.id,
            email: profile.email,
            display_name: profile.name,
        }
    }
}

impl From<GitHubUser> for ExternalIdentity {
    fn from(user: GitHubUser) -> Self {
        Self {
            provider: IdentityProvider::GitHub,
            external_id: user.id.to_string(),
            email: user.email,
            display_name: user.name.or(Some(user.login)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_github_numeric_id_becomes_decimal_string() {
        let user: GitHubUser = serde_json::from_str(
            r#"{"id": 583231, "login": "octocat", "name": null, "email": null}"#,
        )
        .unwrap();
        let identity = ExternalIdentity::from(user);

        assert_eq!(identity.provider, IdentityProvider::GitHub);
        assert_eq!(identity.external_id, "583231");
        assert_eq!(identity.display_name.as_deref(), Some("octocat"));
    }

    #[test]
    fn test_github_error_token_response_parses() {
        let response: OAuthTokenResponse = serde_json::from_str(
            r#"{"error": "bad_verification_code", "error_description": "The code passed is incorrect or expired."}"#,
        )
        .unwrap();

        assert!(response.access_token.is_none());
        assert_eq!(response.error.as_deref(), Some("bad_verification_code"));
    }

    #[test]
    fn test_google_userinfo_without_email() {
        let info: GoogleUserInfo =
            serde_json::from_str(r#"{"id": "109876543210", "name": "Kim"}"#).unwrap();
        let identity = ExternalIdentity::from(info);

        assert_eq!(identity.external_id, "109876543210");
        assert!(identity.email.is_none());
    }
}
