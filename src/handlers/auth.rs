//! 연합 로그인 및 로그아웃 핸들러
//!
//! 세 프로바이더는 경로 세그먼트 `{provider}`로 구분되는 하나의 핸들러 쌍을 공유합니다.
//!
//! | 경로 | 성공 | 실패 |
//! |------|------|------|
//! | `GET /auth/{provider}` | 302 프로바이더 인증 페이지 | 302 `/login` |
//! | `GET /auth/{provider}/secrets` | 302 `/secrets` + `sid` 쿠키 | 302 `/login` |
//! | `GET /logout` | 302 `/` + `sid` 제거 | 500 |

use actix_web::{get, http::header, web, HttpMessage, HttpRequest, HttpResponse};
use crate::config::IdentityProvider;
use crate::core::AppContext;
use crate::domain::dto::oauth::OAuthCallbackQuery;
use crate::domain::models::auth::OptionalToken;
use crate::errors::AppError;
use crate::services::auth::OAuthState;

/// 프로바이더 인증 페이지로 리다이렉트
///
/// CSRF 방지용 state를 서명된 쿠키에 저장한 뒤 보냅니다.
/// 비활성화된 프로바이더는 로그인 페이지로 돌려보냅니다.
#[get("/auth/{provider}")]
pub async fn provider_login(
    ctx: web::Data<AppContext>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let Some(provider) = parse_provider(&path) else {
        return Ok(HttpResponse::NotFound().finish());
    };

    match ctx.identity.begin_login(provider) {
        Ok((url, state)) => Ok(HttpResponse::Found()
            .insert_header((header::LOCATION, url))
            .cookie(ctx.cookies.state_cookie(&state)?)
            .finish()),
        Err(e) if e.is_soft_login_failure() => {
            log::warn!("{} 로그인 시작 실패: {}", provider, e);
            Ok(redirect("/login"))
        }
        Err(e) => Err(e),
    }
}

/// OAuth 콜백
///
/// 교환에 성공하면 세션을 수립하고 `/secrets`로, 실패하면 세션 없이 `/login`으로 보냅니다.
/// 세션 레코드 저장이 끝난 뒤에야 응답을 만듭니다.
#[get("/auth/{provider}/secrets")]
pub async fn provider_callback(
    req: HttpRequest,
    ctx: web::Data<AppContext>,
    path: web::Path<String>,
    query: web::Query<OAuthCallbackQuery>,
    previous: OptionalToken,
) -> Result<HttpResponse, AppError> {
    let Some(provider) = parse_provider(&path) else {
        return Ok(HttpResponse::NotFound().finish());
    };

    let stored_state = req
        .cookie(OAuthState::COOKIE_NAME)
        .and_then(|cookie| ctx.cookies.verify(cookie));

    let login = async {
        let user = ctx
            .identity
            .complete_login(provider, &query, stored_state.as_deref())
            .await?;
        ctx.sessions.establish(&user, previous.0.as_ref()).await
    };

    match login.await {
        Ok(token) => Ok(HttpResponse::Found()
            .insert_header((header::LOCATION, "/secrets"))
            .cookie(ctx.cookies.session_cookie(&token)?)
            .cookie(ctx.cookies.clear_state_cookie())
            .finish()),
        Err(e) if e.is_soft_login_failure() => {
            match e {
                AppError::StorageUnavailable(_) => log::error!("{} 로그인 처리 중 저장소 오류: {}", provider, e),
                _ => log::warn!("{} 로그인 실패: {}", provider, e),
            }
            Ok(HttpResponse::Found()
                .insert_header((header::LOCATION, "/login"))
                .cookie(ctx.cookies.clear_state_cookie())
                .finish())
        }
        Err(e) => Err(e),
    }
}

/// 로그아웃
///
/// 세션 종료에 실패하면 리다이렉트하지 않고 에러를 그대로 돌려줍니다.
#[get("/logout")]
pub async fn logout(
    ctx: web::Data<AppContext>,
    token: OptionalToken,
) -> Result<HttpResponse, AppError> {
    if let Some(token) = token.0 {
        ctx.sessions.terminate(&token).await.inspect_err(|e| {
            log::error!("로그아웃 실패: {}", e);
        })?;
    }

    Ok(HttpResponse::Found()
        .insert_header((header::LOCATION, "/"))
        .cookie(ctx.cookies.clear_session_cookie())
        .finish())
}

fn parse_provider(name: &str) -> Option<IdentityProvider> {
    IdentityProvider::from_str(name).ok()
}

fn redirect(location: &'static str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}
