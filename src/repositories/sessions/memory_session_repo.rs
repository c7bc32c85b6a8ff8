//! 메모리 기반 세션 백엔드
//!
//! TTL은 저장된 레코드의 `expires_at`으로만 표현되며, 만료 판정은 세션 서비스가 합니다.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use async_trait::async_trait;
use tokio::sync::Mutex;
use crate::domain::entities::sessions::{SessionRecord, SessionToken};
use crate::errors::AppError;
use super::SessionBackend;

#[derive(Default)]
pub struct InMemorySessionBackend {
    records: Mutex<HashMap<SessionToken, SessionRecord>>,
    fail_deletes: AtomicBool,
    unavailable: AtomicBool,
}

impl InMemorySessionBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true`이면 `delete`가 실패합니다. 로그아웃 실패 경로를 재현할 때 사용합니다.
    pub fn set_fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    /// `true`이면 모든 호출이 `StorageUnavailable`을 반환합니다.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }

    fn check_available(&self) -> Result<(), AppError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::StorageUnavailable("in-memory session backend offline".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl SessionBackend for InMemorySessionBackend {
    async fn put(&self, token: &SessionToken, record: &SessionRecord, _ttl_seconds: u64) -> Result<(), AppError> {
        self.check_available()?;
        self.records.lock().await.insert(token.clone(), record.clone());
        Ok(())
    }

    async fn get(&self, token: &SessionToken) -> Result<Option<SessionRecord>, AppError> {
        self.check_available()?;
        Ok(self.records.lock().await.get(token).cloned())
    }

    async fn delete(&self, token: &SessionToken) -> Result<(), AppError> {
        self.check_available()?;
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(AppError::StorageUnavailable("session delete rejected".to_string()));
        }
        self.records.lock().await.remove(token);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::sessions::SessionPayload;

    fn record() -> SessionRecord {
        SessionRecord::new(SessionPayload { user_id: "65f0c0ffee65f0c0ffee65f0".to_string() }, 0, 60)
    }

    #[tokio::test]
    async fn test_put_get_delete() {
        let backend = InMemorySessionBackend::new();
        let token = SessionToken::generate();

        backend.put(&token, &record(), 60).await.unwrap();
        assert_eq!(backend.get(&token).await.unwrap(), Some(record()));

        backend.delete(&token).await.unwrap();
        assert_eq!(backend.get(&token).await.unwrap(), None);
        // 없는 토큰 삭제도 성공
        backend.delete(&token).await.unwrap();
    }

    #[tokio::test]
    async fn test_failing_delete_keeps_record() {
        let backend = InMemorySessionBackend::new();
        let token = SessionToken::generate();
        backend.put(&token, &record(), 60).await.unwrap();
        backend.set_fail_deletes(true);

        assert!(backend.delete(&token).await.is_err());
        assert!(backend.get(&token).await.unwrap().is_some());
    }
}
