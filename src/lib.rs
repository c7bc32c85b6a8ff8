//! Secrets Portal
//!
//! Google, Facebook, GitHub 연합 로그인으로 사용자를 인증하고
//! 서버 측 세션을 기준으로 보호 페이지(`/secrets`) 접근을 제어하는 웹 애플리케이션입니다.
//!
//! # Features
//!
//! - **연합 로그인**: 세 프로바이더의 OAuth 2.0 Authorization Code 플로우
//! - **원자적 find-or-create**: 외부 ID 기준 사용자 레코드 생성
//! - **서버 측 세션**: Redis에 저장되는 세션과 서명된 `sid` 쿠키
//! - **MongoDB**: 사용자 데이터 영구 저장
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← 페이지 + 로그인 플로우
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   Middleware    │ ← sid 쿠키 → SessionState
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 신원 해석, 세션, OAuth 브로커
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← UserDirectory / SessionBackend
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ MongoDB + Redis │ ← 저장소
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use secrets_portal::core::AppContext;
//! use secrets_portal::middlewares::SessionMiddleware;
//! use secrets_portal::routes::configure_all_routes;
//!
//! let context = web::Data::new(AppContext::new(config, directory, sessions, broker));
//! let app = App::new()
//!     .app_data(context)
//!     .wrap(SessionMiddleware)
//!     .configure(configure_all_routes);
//! ```

pub mod app;
pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod routes;
pub mod handlers;
pub mod errors;
pub mod middlewares;
pub mod views;
