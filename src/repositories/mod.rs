//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! 저장소 구현은 trait 뒤에 숨겨져 있어 서비스 계층은 구체 타입을 알지 못합니다.
//! 운영 환경에서는 MongoDB(사용자)와 Redis(세션)를, 테스트에서는 메모리 구현을 사용합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use crate::repositories::users::{MongoUserDirectory, UserDirectory};
//!
//! let directory: Arc<dyn UserDirectory> = Arc::new(MongoUserDirectory::new(&database));
//! let user = directory.find_or_create(IdentityProvider::GitHub, "583231").await?;
//! ```

pub mod users;
pub mod sessions;
