//! 미들웨어 모듈
//!
//! 요청 처리 파이프라인에서 사용되는 미들웨어를 제공합니다.
//!
//! # 제공 미들웨어
//!
//! ### 세션 미들웨어 (SessionMiddleware)
//! - 서명된 `sid` 쿠키 검증
//! - 세션 백엔드와 사용자 디렉터리로 세션 상태 해석
//! - `SessionState`와 `PresentedToken`을 request extension에 저장
//!
//! # 사용 방법
//!
//! ```rust,ignore
//! use actix_web::{web, App};
//! use crate::middlewares::SessionMiddleware;
//!
//! App::new()
//!     .app_data(web::Data::new(context))
//!     .wrap(SessionMiddleware)
//!     .configure(configure_all_routes)
//! ```
//!
//! 핸들러에서는 추출자로 상태를 받습니다.
//!
//! ```rust,ignore
//! #[get("/secrets")]
//! async fn secrets(session: CurrentSession) -> HttpResponse {
//!     if AuthGate::is_authenticated(&session.0) { /* ... */ }
//! }
//! ```

pub mod session_middleware;
mod session_inner;

pub use session_middleware::SessionMiddleware;
