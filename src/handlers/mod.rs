//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 정의하는 모듈입니다.
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//!   Browser
//! └─────────────────────┬───────────────────────┘
//!                       │ HTTP Request/Response
//! ┌─────────────────────▼───────────────────────┐
//!   SessionMiddleware - 쿠키 → SessionState
//! ├─────────────────────────────────────────────┤
//!   Handlers (이 모듈) - 페이지, 로그인 플로우
//! ├─────────────────────────────────────────────┤
//!   Services - 신원 해석, 세션, 브로커
//! ├─────────────────────────────────────────────┤
//!   Repositories - MongoDB / Redis
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## 모듈 구성
//!
//! - **`pages`**: `/`, `/login`, `/register`, `/secrets`
//! - **`auth`**: `/auth/{provider}`, `/auth/{provider}/secrets`, `/logout`
//!
//! 핸들러는 `web::Data<AppContext>`로 서비스를 받고, `Result<HttpResponse, AppError>`를
//! 반환하여 `?`로 에러를 전파합니다. 로그인 콜백의 복구 가능한 실패는 에러 대신
//! `/login` 리다이렉트로 바뀝니다.

pub mod pages;
pub mod auth;
