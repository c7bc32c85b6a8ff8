//! Users Entity Module
//!
//! 사용자 도메인의 핵심 엔티티를 정의하는 모듈입니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use crate::config::IdentityProvider;
//! use crate::domain::entities::users::User;
//!
//! let user = User::new_federated(IdentityProvider::Google, "109876543210");
//! assert_eq!(user.provider_id(IdentityProvider::Google), Some("109876543210"));
//! ```

pub mod user;

pub use user::User;
