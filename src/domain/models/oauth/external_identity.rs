use serde::{Deserialize, Serialize};
use crate::config::IdentityProvider;

/// 브로커가 연합 로그인 성공 후 주장하는 외부 신원
///
/// 프로바이더가 프로필 정보를 함께 돌려주더라도 사용자 레코드에는
/// `external_id`만 반영됩니다. 나머지는 로그 용도입니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalIdentity {
    pub provider: IdentityProvider,
    pub external_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl ExternalIdentity {
    pub fn new(provider: IdentityProvider, external_id: impl Into<String>) -> Self {
        Self {
            provider,
            external_id: external_id.into(),
            email: None,
            display_name: None,
        }
    }
}
