//! SessionMiddleware 세션 해석 로직
use std::rc::Rc;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::{web, Error, HttpMessage};
use futures_util::future::LocalBoxFuture;
use crate::core::AppContext;
use crate::domain::models::auth::{PresentedToken, SessionState};
use crate::services::auth::SESSION_COOKIE_NAME;

/// 실제 세션 해석을 수행하는 서비스
pub struct SessionMiddlewareService<S> {
    pub service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for SessionMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        Box::pin(async move {
            let state = match req.app_data::<web::Data<AppContext>>().cloned() {
                Some(context) => resolve_session(&req, &context).await,
                None => {
                    log::warn!("AppContext가 등록되지 않아 세션을 해석하지 않습니다");
                    SessionState::Anonymous
                }
            };

            req.extensions_mut().insert(state);

            service.call(req).await
        })
    }
}

/// 쿠키 서명을 검증하고 세션 상태를 해석합니다.
///
/// 서명이 유효한 토큰은 세션 존재 여부와 무관하게 `PresentedToken`으로도 저장됩니다.
async fn resolve_session(req: &ServiceRequest, context: &AppContext) -> SessionState {
    let token = context.cookies.session_token(req.cookie(SESSION_COOKIE_NAME));

    if let Some(ref token) = token {
        req.extensions_mut().insert(PresentedToken(token.clone()));
    }

    let state = context.sessions.resolve(token.as_ref()).await;
    if let SessionState::Authenticated { ref user, .. } = state {
        log::debug!("세션 사용자: {}", user.id_string().unwrap_or_default());
    }
    state
}
