//! # OAuth Domain Models
//!
//! 외부 인증 브로커와의 경계에서 사용하는 값 객체입니다.

pub mod external_identity;

pub use external_identity::ExternalIdentity;
