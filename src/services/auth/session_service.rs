//! # 세션 서비스
//!
//! 로그인한 사용자를 서버 측 세션에 묶고, 요청마다 세션 토큰을 사용자로 되돌립니다.
//!
//! ## 세션 생명주기
//!
//! ```text
//! 콜백 성공 ──► serialize(User) ──► establish ──► Set-Cookie: sid=<signed token>
//!                                      │
//!                                      └─ 이전 토큰은 삭제 (매 로그인마다 새 토큰)
//!
//! 요청 ──► 쿠키 서명 검증 ──► load(token) ──► deserialize(payload) ──► SessionState
//!
//! /logout ──► terminate(token) ──► 쿠키 제거
//! ```
//!
//! 세션 레코드에는 사용자 ID만 담기므로, 사용자 정보는 요청마다 디렉터리에서 다시 읽습니다.

use std::sync::Arc;
use chrono::Utc;
use log::{debug, error, info, warn};
use crate::domain::entities::sessions::{SessionPayload, SessionRecord, SessionToken};
use crate::domain::entities::users::User;
use crate::domain::models::auth::SessionState;
use crate::errors::AppError;
use crate::repositories::sessions::SessionBackend;
use crate::repositories::users::UserDirectory;

/// 서버 측 세션 관리 서비스
#[derive(Clone)]
pub struct SessionService {
    directory: Arc<dyn UserDirectory>,
    backend: Arc<dyn SessionBackend>,
    ttl_seconds: u64,
}

impl SessionService {
    pub fn new(directory: Arc<dyn UserDirectory>, backend: Arc<dyn SessionBackend>, ttl_seconds: u64) -> Self {
        Self { directory, backend, ttl_seconds }
    }

    /// 사용자를 세션 페이로드로 변환합니다.
    ///
    /// 결정적이며 로컬 ID만 담습니다. 아직 저장되지 않은(ID 없는) 사용자는 직렬화할 수 없습니다.
    pub fn serialize(&self, user: &User) -> Result<SessionPayload, AppError> {
        let user_id = user
            .id_string()
            .ok_or_else(|| AppError::InternalError("cannot serialize a user without id".to_string()))?;

        Ok(SessionPayload { user_id })
    }

    /// 세션 페이로드를 사용자로 되돌립니다.
    ///
    /// # Errors
    ///
    /// * `AppError::UnknownUser` - 사용자가 삭제되었거나 ID 형식이 잘못됨
    /// * `AppError::StorageUnavailable` - 디렉터리 접근 실패
    pub async fn deserialize(&self, payload: &SessionPayload) -> Result<User, AppError> {
        self.directory
            .find_by_id(&payload.user_id)
            .await?
            .ok_or_else(|| AppError::UnknownUser(payload.user_id.clone()))
    }

    /// 새 세션을 수립하고 토큰을 돌려줍니다.
    ///
    /// 레코드 저장이 끝난 뒤에 반환하므로, 호출자는 반환값으로 바로 리다이렉트해도
    /// 다음 요청에서 세션이 보입니다. `previous`가 있으면 이후에 정리합니다.
    pub async fn establish(&self, user: &User, previous: Option<&SessionToken>) -> Result<SessionToken, AppError> {
        let payload = self.serialize(user)?;
        let token = SessionToken::generate();
        let record = SessionRecord::new(payload, Utc::now().timestamp(), self.ttl_seconds);

        self.backend.put(&token, &record, self.ttl_seconds).await?;
        info!("세션 수립: user={}", record.user.user_id);

        if let Some(previous) = previous.filter(|p| *p != &token) {
            if let Err(e) = self.backend.delete(previous).await {
                warn!("이전 세션 정리 실패: {}", e);
            }
        }

        Ok(token)
    }

    /// 토큰의 세션 레코드를 읽습니다. 만료된 레코드는 없는 것으로 취급합니다.
    pub async fn load(&self, token: &SessionToken) -> Result<Option<SessionRecord>, AppError> {
        let record = self.backend.get(token).await?;
        Ok(record.filter(|r| !r.is_expired_at(Utc::now().timestamp())))
    }

    /// 요청에 제시된 토큰을 세션 상태로 해석합니다.
    ///
    /// 실패는 모두 `Anonymous`가 됩니다. 저장소 에러는 error 로그로 남기고,
    /// 삭제된 사용자를 가리키는 세션은 정리합니다.
    pub async fn resolve(&self, token: Option<&SessionToken>) -> SessionState {
        let Some(token) = token else {
            return SessionState::Anonymous;
        };

        let record = match self.load(token).await {
            Ok(Some(record)) => record,
            Ok(None) => return SessionState::Anonymous,
            Err(e) => {
                error!("세션 조회 실패: {}", e);
                return SessionState::Anonymous;
            }
        };

        match self.deserialize(&record.user).await {
            Ok(user) => SessionState::Authenticated { token: token.clone(), user },
            Err(AppError::UnknownUser(user_id)) => {
                debug!("존재하지 않는 사용자의 세션: user={}", user_id);
                if let Err(e) = self.backend.delete(token).await {
                    warn!("고아 세션 정리 실패: {}", e);
                }
                SessionState::Anonymous
            }
            Err(e) => {
                error!("세션 사용자 조회 실패: {}", e);
                SessionState::Anonymous
            }
        }
    }

    /// 세션을 종료합니다.
    ///
    /// 백엔드 실패는 `SessionTerminationFailure`로 바뀌며, 호출자는 이를 그대로 노출해야 합니다.
    pub async fn terminate(&self, token: &SessionToken) -> Result<(), AppError> {
        self.backend
            .delete(token)
            .await
            .map_err(|e| AppError::SessionTerminationFailure(e.to_string()))?;

        info!("세션 종료");
        Ok(())
    }
}
