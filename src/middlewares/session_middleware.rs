//! 세션 해석 미들웨어
//!
//! 모든 요청에서 서명된 `sid` 쿠키를 읽어 [`SessionState`](crate::domain::models::auth::SessionState)를
//! Request Extensions에 넣습니다. 요청을 거부하지는 않으며, 접근 판정은 핸들러가
//! [`AuthGate`](crate::services::auth::AuthGate)로 합니다.

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
};
use crate::middlewares::session_inner::SessionMiddlewareService;

/// 세션 해석 미들웨어
///
/// `web::Data<AppContext>`가 앱 데이터로 등록되어 있어야 합니다.
/// 없으면 모든 요청을 비인증으로 처리합니다.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionMiddleware;

impl<S, B> Transform<S, ServiceRequest> for SessionMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = SessionMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionMiddlewareService {
            service: Rc::new(service),
        }))
    }
}
