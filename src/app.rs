//! 애플리케이션 조립
//!
//! `main`과 테스트가 같은 미들웨어 스택을 쓰도록 `App` 구성을 한 곳에 둡니다.
//!
//! ```text
//! 요청 ──► NormalizePath ──► Logger ──► Governor ──► SessionMiddleware ──► 라우트
//! ```
//!
//! actix-web은 마지막에 `.wrap`한 미들웨어가 가장 바깥에서 실행됩니다.
//! Rate Limiting은 세션 해석보다 바깥에 있어야 거부된 요청이 저장소에 닿지 않습니다.

use actix_governor::governor::middleware::StateInformationMiddleware;
use actix_governor::{Governor, GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor};
use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{middleware, web, App};
use crate::config::RateLimitConfig;
use crate::core::AppContext;
use crate::errors::AppError;
use crate::middlewares::SessionMiddleware;
use crate::routes::configure_all_routes;

/// 피어 IP 기준 Rate Limiting 설정
pub type RateLimiter = GovernorConfig<PeerIpKeyExtractor, StateInformationMiddleware>;

/// Rate Limiting 설정을 만듭니다. 응답에 `x-ratelimit-*` 헤더를 붙입니다.
///
/// # Errors
///
/// * `AppError::ConfigurationError` - 초당 요청 수나 버스트가 0
pub fn rate_limiter(config: &RateLimitConfig) -> Result<RateLimiter, AppError> {
    // requests_per_second(0)은 0으로 나누기
    if config.per_second == 0 || config.burst_size == 0 {
        return Err(AppError::ConfigurationError(
            "RATE_LIMIT_PER_SECOND와 RATE_LIMIT_BURST_SIZE는 0보다 커야 합니다".to_string(),
        ));
    }

    GovernorConfigBuilder::default()
        .requests_per_second(config.per_second)
        .burst_size(config.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| AppError::ConfigurationError(
            "Rate Limiting 설정이 올바르지 않습니다".to_string(),
        ))
}

/// 전체 미들웨어 스택과 라우트를 갖춘 `App`을 만듭니다.
pub fn build_app(
    context: web::Data<AppContext>,
    rate_limiter: &RateLimiter,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(context)
        .wrap(SessionMiddleware)
        // 세션 해석보다 바깥
        .wrap(Governor::new(rate_limiter))
        .wrap(middleware::Logger::default())
        .wrap(middleware::NormalizePath::trim())
        .configure(configure_all_routes)
}
