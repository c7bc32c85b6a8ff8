//! 사용자 디렉터리
//!
//! [`UserDirectory`] trait과 두 가지 구현을 제공합니다.
//!
//! - [`MongoUserDirectory`](user_repo::MongoUserDirectory) - `users` 컬렉션 기반
//! - [`InMemoryUserDirectory`](memory_user_repo::InMemoryUserDirectory) - 테스트 및 로컬 실행용

pub mod user_repo;
pub mod memory_user_repo;

pub use user_repo::MongoUserDirectory;
pub use memory_user_repo::InMemoryUserDirectory;

use async_trait::async_trait;
use crate::config::IdentityProvider;
use crate::domain::entities::users::User;
use crate::errors::AppError;

/// 사용자 레코드 저장소
///
/// 구현체는 `find_or_create`를 외부 ID 단위로 원자적으로 처리해야 합니다.
/// 같은 (프로바이더, 외부 ID)에 대한 동시 호출은 항상 같은 레코드를 돌려줘야 합니다.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// 프로바이더 필드가 `external_id`인 사용자를 찾고, 없으면 생성합니다.
    async fn find_or_create(&self, provider: IdentityProvider, external_id: &str) -> Result<User, AppError>;

    /// 로컬 ID(16진수 ObjectId)로 사용자를 조회합니다.
    ///
    /// 형식이 잘못된 ID는 존재하지 않는 사용자로 취급합니다.
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;

    /// 사용자를 삭제합니다. 삭제된 레코드가 있었으면 `true`.
    async fn delete(&self, id: &str) -> Result<bool, AppError>;
}
