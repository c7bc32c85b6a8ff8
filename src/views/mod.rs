//! 고정 HTML 페이지
//!
//! 페이지는 템플릿 엔진 없이 바이너리에 포함됩니다. 각 문서의 `<body>`에는
//! 어떤 페이지인지 나타내는 `data-view` 속성이 있습니다.

use actix_web::http::header::ContentType;
use actix_web::HttpResponse;

pub const HOME: &str = include_str!("home.html");
pub const LOGIN: &str = include_str!("login.html");
pub const REGISTER: &str = include_str!("register.html");
pub const SECRETS: &str = include_str!("secrets.html");

/// 200 OK HTML 응답
pub fn render(view: &'static str) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(view)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_views_are_tagged() {
        assert!(HOME.contains(r#"data-view="home""#));
        assert!(LOGIN.contains(r#"data-view="login""#));
        assert!(REGISTER.contains(r#"data-view="register""#));
        assert!(SECRETS.contains(r#"data-view="secrets""#));
    }

    #[test]
    fn test_login_and_register_link_every_provider() {
        for view in [LOGIN, REGISTER] {
            assert!(view.contains(r#"href="/auth/google""#));
            assert!(view.contains(r#"href="/auth/facebook""#));
            assert!(view.contains(r#"href="/auth/github""#));
        }
    }
}
