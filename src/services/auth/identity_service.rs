//! # 신원 해석 서비스
//!
//! 브로커가 주장한 외부 신원을 로컬 사용자 레코드로 바꿉니다.
//!
//! ## 로그인 처리 단계
//!
//! ```text
//! 콜백 쿼리 검증 ──► state 검증 ──► broker.complete ──► resolve_or_create
//!      │                 │                 │                    │
//!  ValidationError   BrokerFailure    BrokerFailure     StorageUnavailable
//! ```
//!
//! 같은 사람이 다른 프로바이더로 로그인하면 별도의 사용자가 됩니다. 계정 연결은 하지 않습니다.

use std::sync::Arc;
use log::{info, warn};
use validator::Validate;
use crate::config::IdentityProvider;
use crate::domain::dto::oauth::OAuthCallbackQuery;
use crate::domain::entities::users::User;
use crate::errors::AppError;
use crate::repositories::users::UserDirectory;
use super::oauth_broker::{IdentityBroker, OAuthState};

#[derive(Clone)]
pub struct IdentityService {
    directory: Arc<dyn UserDirectory>,
    broker: Arc<dyn IdentityBroker>,
}

impl IdentityService {
    pub fn new(directory: Arc<dyn UserDirectory>, broker: Arc<dyn IdentityBroker>) -> Self {
        Self { directory, broker }
    }

    /// 프로바이더 인증 페이지로 보낼 URL과, 쿠키에 저장할 state를 만듭니다.
    pub fn begin_login(&self, provider: IdentityProvider) -> Result<(String, OAuthState), AppError> {
        let state = OAuthState::generate(provider);
        let url = self.broker.authorization_url(provider, &state.value)?;
        Ok((url, state))
    }

    /// 외부 ID에 해당하는 사용자를 찾거나 새로 만듭니다.
    ///
    /// 같은 (provider, external_id)로 몇 번을 호출하든 같은 사용자를 돌려줍니다.
    ///
    /// # Errors
    ///
    /// * `AppError::BrokerFailure` - 빈 외부 ID
    /// * `AppError::StorageUnavailable` - 디렉터리 접근 실패
    pub async fn resolve_or_create(&self, provider: IdentityProvider, external_id: &str) -> Result<User, AppError> {
        if external_id.trim().is_empty() {
            return Err(AppError::BrokerFailure(format!("{} asserted an empty id", provider)));
        }

        self.directory.find_or_create(provider, external_id).await
    }

    /// 콜백을 검증하고 브로커 교환을 마친 뒤 사용자를 해석합니다.
    ///
    /// `stored_state`는 서명 검증을 통과한 `oauth_state` 쿠키 값입니다.
    pub async fn complete_login(
        &self,
        provider: IdentityProvider,
        callback: &OAuthCallbackQuery,
        stored_state: Option<&str>,
    ) -> Result<User, AppError> {
        callback
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        OAuthState::verify(stored_state, provider, callback.state.as_deref())?;

        let identity = self.broker.complete(provider, callback).await?;
        if identity.provider != provider {
            warn!("{} 콜백에서 다른 프로바이더의 신원이 반환됨: {}", provider, identity.provider);
            return Err(AppError::BrokerFailure("identity provider mismatch".to_string()));
        }

        let user = self.resolve_or_create(provider, &identity.external_id).await?;
        info!("{} 로그인 성공: user={}", provider, user.id_string().unwrap_or_default());

        Ok(user)
    }
}
