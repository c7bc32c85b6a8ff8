//! 메모리 기반 사용자 디렉터리
//!
//! 외부 저장소 없이 실행하는 테스트와 로컬 개발용 구현입니다.
//! 하나의 비동기 뮤텍스 안에서 조회와 생성을 수행하므로 find-or-create가 원자적입니다.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::Mutex;
use crate::config::IdentityProvider;
use crate::domain::entities::users::User;
use crate::errors::AppError;
use super::UserDirectory;

#[derive(Default)]
pub struct InMemoryUserDirectory {
    users: Mutex<HashMap<ObjectId, User>>,
    unavailable: AtomicBool,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// 저장소 장애를 흉내냅니다. `true`이면 모든 호출이 `StorageUnavailable`을 반환합니다.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.users.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.lock().await.is_empty()
    }

    fn check_available(&self) -> Result<(), AppError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::StorageUnavailable("in-memory directory offline".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_or_create(&self, provider: IdentityProvider, external_id: &str) -> Result<User, AppError> {
        self.check_available()?;
        let mut users = self.users.lock().await;

        if let Some(existing) = users
            .values()
            .find(|user| user.provider_id(provider) == Some(external_id))
        {
            return Ok(existing.clone());
        }

        let id = ObjectId::new();
        let mut user = User::new_federated(provider, external_id);
        user.id = Some(id);
        users.insert(id, user.clone());

        Ok(user)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        self.check_available()?;
        let Ok(object_id) = ObjectId::parse_str(id) else {
            return Ok(None);
        };
        Ok(self.users.lock().await.get(&object_id).cloned())
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        self.check_available()?;
        let Ok(object_id) = ObjectId::parse_str(id) else {
            return Ok(false);
        };
        Ok(self.users.lock().await.remove(&object_id).is_some())
    }
}
