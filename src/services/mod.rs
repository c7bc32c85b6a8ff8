//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 서비스는 리포지토리 trait과 외부 브로커 trait에만 의존하며,
//! 시작 시점에 [`AppContext`](crate::core::context::AppContext)에서 한 번 조립됩니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::auth::{IdentityService, SessionService};
//!
//! let user = ctx.identity.complete_login(provider, &query, stored_state).await?;
//! let token = ctx.sessions.establish(&user, None).await?;
//! ```

pub mod auth;
