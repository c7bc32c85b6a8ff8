//! # Core Module
//!
//! 서비스 조립을 담당합니다. 전역 레지스트리 대신 명시적인 [`AppContext`](context::AppContext)
//! 값을 만들어 actix-web의 앱 데이터로 전달합니다.
//!
//! ```rust,ignore
//! let context = web::Data::new(AppContext::new(config, directory, sessions, broker));
//!
//! App::new()
//!     .app_data(context.clone())
//!     .wrap(SessionMiddleware)
//!     .configure(configure_all_routes)
//! ```

pub mod context;

pub use context::AppContext;
