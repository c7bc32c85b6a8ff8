//! 세션 백엔드
//!
//! 세션 토큰을 키로 [`SessionRecord`]를 보관하는 저장소입니다.
//!
//! - [`RedisSessionBackend`](session_repo::RedisSessionBackend) - 키 `session:{token}`, Redis TTL 사용
//! - [`InMemorySessionBackend`](memory_session_repo::InMemorySessionBackend) - 테스트용

pub mod session_repo;
pub mod memory_session_repo;

pub use session_repo::RedisSessionBackend;
pub use memory_session_repo::InMemorySessionBackend;

use async_trait::async_trait;
use crate::domain::entities::sessions::{SessionRecord, SessionToken};
use crate::errors::AppError;

#[async_trait]
pub trait SessionBackend: Send + Sync {
    /// 레코드를 저장합니다. `ttl_seconds`가 지나면 백엔드가 제거해도 됩니다.
    async fn put(&self, token: &SessionToken, record: &SessionRecord, ttl_seconds: u64) -> Result<(), AppError>;

    async fn get(&self, token: &SessionToken) -> Result<Option<SessionRecord>, AppError>;

    /// 레코드를 삭제합니다. 없는 토큰도 성공입니다.
    async fn delete(&self, token: &SessionToken) -> Result<(), AppError>;
}
