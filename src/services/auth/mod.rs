//! 인증 서비스 모듈
//!
//! 연합 로그인과 세션 관리를 담당하는 서비스들을 제공합니다.
//!
//! # Features
//!
//! - Google / Facebook / GitHub OAuth 2.0 로그인 ([`oauth_broker`])
//! - 외부 ID 기반 사용자 find-or-create ([`identity_service`])
//! - 서버 측 세션 수립, 해석, 종료 ([`session_service`])
//! - 서명된 쿠키 ([`cookie_signer`])
//! - 보호 페이지 접근 판정 ([`auth_gate`])
//!
//! # Security
//!
//! - HMAC 서명 쿠키 (SHA-512로 유도한 키)
//! - CSRF 방지 (OAuth state 쿠키)
//! - HttpOnly, SameSite=Lax 세션 쿠키

pub mod auth_gate;
pub mod cookie_signer;
pub mod identity_service;
pub mod oauth_broker;
pub mod session_service;

pub use auth_gate::AuthGate;
pub use cookie_signer::{CookieSigner, SESSION_COOKIE_NAME};
pub use identity_service::IdentityService;
pub use oauth_broker::{IdentityBroker, OAuthBroker, OAuthState};
pub use session_service::SessionService;
