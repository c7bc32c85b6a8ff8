//! 페이지 핸들러

use actix_web::{get, HttpResponse};
use crate::domain::models::auth::CurrentSession;
use crate::services::auth::AuthGate;
use crate::views;

#[get("/")]
pub async fn home() -> HttpResponse {
    views::render(views::HOME)
}

#[get("/login")]
pub async fn login() -> HttpResponse {
    views::render(views::LOGIN)
}

#[get("/register")]
pub async fn register() -> HttpResponse {
    views::render(views::REGISTER)
}

/// 보호 페이지
///
/// 인증되지 않은 요청에는 리다이렉트 대신 로그인 페이지를 200으로 렌더링합니다.
#[get("/secrets")]
pub async fn secrets(session: CurrentSession) -> HttpResponse {
    if AuthGate::is_authenticated(&session.0) {
        views::render(views::SECRETS)
    } else {
        views::render(views::LOGIN)
    }
}
