//! 라우트 설정 모듈
//!
//! 페이지, 연합 로그인, 헬스체크 엔드포인트를 등록합니다.
//!
//! # Routes
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | GET | `/` | [`pages::home`](handlers::pages::home) |
//! | GET | `/login` | [`pages::login`](handlers::pages::login) |
//! | GET | `/register` | [`pages::register`](handlers::pages::register) |
//! | GET | `/secrets` | [`pages::secrets`](handlers::pages::secrets) |
//! | GET | `/auth/{provider}` | [`auth::provider_login`](handlers::auth::provider_login) |
//! | GET | `/auth/{provider}/secrets` | [`auth::provider_callback`](handlers::auth::provider_callback) |
//! | GET | `/logout` | [`auth::logout`](handlers::auth::logout) |
//! | GET | `/health` | [`health_check`] |
//!
//! `{provider}`는 `google`, `facebook`, `github` 중 하나이며 그 외 값은 404입니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use actix_web::App;
//!
//! let app = App::new()
//!     .app_data(context)
//!     .wrap(SessionMiddleware)
//!     .configure(configure_all_routes);
//! ```

use crate::handlers;
use actix_web::web;
use serde_json::json;

/// 모든 라우트를 설정합니다
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    // Health check endpoint
    cfg.service(health_check);

    configure_page_routes(cfg);
    configure_auth_routes(cfg);
}

fn configure_page_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::pages::home)
        .service(handlers::pages::login)
        .service(handlers::pages::register)
        .service(handlers::pages::secrets);
}

/// 연합 로그인 라우트
///
/// 콜백 경로(`/auth/{provider}/secrets`)는 각 프로바이더 콘솔에 등록된 리다이렉트 URI와
/// 정확히 일치해야 합니다.
fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::auth::provider_login)
        .service(handlers::auth::provider_callback)
        .service(handlers::auth::logout);
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// ```bash
/// curl http://localhost:3000/health
/// ```
///
/// Response:
/// ```json
/// {
///   "status": "healthy",
///   "service": "secrets_portal",
///   "version": "0.1.0",
///   "timestamp": "2026-01-01T00:00:00Z",
///   "features": {
///     "database": "MongoDB",
///     "sessions": "Redis"
///   }
/// }
/// ```
#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "secrets_portal",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "features": {
            "database": "MongoDB",
            "sessions": "Redis"
        }
    }))
}
