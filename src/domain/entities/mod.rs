//! # Domain Entities Module
//!
//! 영속 저장소에 보관되는 엔티티들입니다.
//!
//! - [`users`] - `users` 컬렉션의 사용자 레코드 (MongoDB)
//! - [`sessions`] - 세션 토큰으로 키잉되는 세션 레코드 (Redis)
//!
//! 사용자 디렉터리가 `User`를 독점 소유하고, 세션 저장소는 `SessionRecord`를
//! 소유하면서 사용자를 로컬 ID로만 참조합니다.

pub mod users;
pub mod sessions;
