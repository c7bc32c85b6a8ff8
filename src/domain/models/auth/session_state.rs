use std::future::{ready, Ready};
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use crate::domain::entities::sessions::SessionToken;
use crate::domain::entities::users::User;

/// 요청 하나에 대해 해석된 세션 상태
///
/// 세션 미들웨어가 쿠키와 세션 백엔드를 조회하여 만들고 Request Extensions에 저장합니다.
#[derive(Debug, Clone, Default)]
pub enum SessionState {
    /// 세션이 없거나, 만료되었거나, 존재하지 않는 사용자를 가리킴
    #[default]
    Anonymous,
    /// 로그인 플로우를 통해 수립된 유효한 세션
    Authenticated {
        token: SessionToken,
        user: User,
    },
}

impl SessionState {
    pub fn user(&self) -> Option<&User> {
        match self {
            SessionState::Authenticated { user, .. } => Some(user),
            SessionState::Anonymous => None,
        }
    }

    pub fn token(&self) -> Option<&SessionToken> {
        match self {
            SessionState::Authenticated { token, .. } => Some(token),
            SessionState::Anonymous => None,
        }
    }
}

/// 현재 요청의 세션 상태 추출자
///
/// 미들웨어가 상태를 넣지 않은 경우 `Anonymous`로 간주합니다.
#[derive(Debug, Clone)]
pub struct CurrentSession(pub SessionState);

/// 서명 검증을 통과한 쿠키의 세션 토큰
///
/// 세션 레코드 존재 여부와 무관하게 저장되며, 로그아웃과 재로그인 시
/// 이전 세션을 정리하는 데 사용됩니다.
#[derive(Debug, Clone)]
pub struct PresentedToken(pub SessionToken);

impl FromRequest for CurrentSession {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let state = req.extensions().get::<SessionState>().cloned().unwrap_or_default();
        ready(Ok(CurrentSession(state)))
    }
}

/// 선택적 토큰 추출자
#[derive(Debug, Clone)]
pub struct OptionalToken(pub Option<SessionToken>);

impl FromRequest for OptionalToken {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let token = req.extensions().get::<PresentedToken>().map(|t| t.0.clone());
        ready(Ok(OptionalToken(token)))
    }
}
