//! User Entity Implementation
//!
//! 사용자 엔티티의 핵심 구현체입니다.
//! 외부 인증 프로바이더별 ID 필드를 가진 다섯 필드짜리 사용자 레코드를 제공합니다.

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use crate::config::IdentityProvider;

/// 사용자 엔티티
///
/// `users` 컬렉션에 저장되는 문서입니다. 프로바이더 ID 필드는 어떤 조합으로든
/// 채워질 수 있으며, 서로 다른 프로바이더로 로그인한 같은 사람은 별도 레코드가 됩니다.
///
/// 처음 로그인할 때 해당 프로바이더 필드만 채워진 상태로 생성되고,
/// 이후에는 갱신되지 않습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_id: Option<String>,
}

impl User {
    /// 프로바이더 필드 하나만 채워진 새 사용자 생성
    ///
    /// ID는 저장 시점에 할당됩니다.
    pub fn new_federated(provider: IdentityProvider, external_id: impl Into<String>) -> Self {
        let mut user = Self {
            id: None,
            email: None,
            username: None,
            google_id: None,
            facebook_id: None,
            github_id: None,
        };
        *user.provider_id_mut(provider) = Some(external_id.into());
        user
    }

    /// ID 문자열로 변환
    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    /// 주어진 프로바이더에서의 외부 ID
    pub fn provider_id(&self, provider: IdentityProvider) -> Option<&str> {
        match provider {
            IdentityProvider::Google => self.google_id.as_deref(),
            IdentityProvider::Facebook => self.facebook_id.as_deref(),
            IdentityProvider::GitHub => self.github_id.as_deref(),
        }
    }

    fn provider_id_mut(&mut self, provider: IdentityProvider) -> &mut Option<String> {
        match provider {
            IdentityProvider::Google => &mut self.google_id,
            IdentityProvider::Facebook => &mut self.facebook_id,
            IdentityProvider::GitHub => &mut self.github_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson;

    #[test]
    fn test_new_federated_sets_only_provider_field() {
        let user = User::new_federated(IdentityProvider::GitHub, "583231");

        assert_eq!(user.provider_id(IdentityProvider::GitHub), Some("583231"));
        assert_eq!(user.provider_id(IdentityProvider::Google), None);
        assert_eq!(user.provider_id(IdentityProvider::Facebook), None);
        assert!(user.id.is_none());
        assert!(user.email.is_none());
        assert!(user.username.is_none());
    }

    #[test]
    fn test_bson_layout_uses_provider_field_names() {
        let user = User::new_federated(IdentityProvider::Facebook, "10224");
        let document = bson::to_document(&user).unwrap();

        assert_eq!(document.get_str("facebookId").unwrap(), "10224");
        assert!(!document.contains_key("_id"));
        assert!(!document.contains_key("googleId"));
        assert!(!document.contains_key("email"));
    }
}
