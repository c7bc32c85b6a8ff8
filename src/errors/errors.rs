//! 애플리케이션 전역에서 사용하는 에러 시스템
//!
//! 연합 로그인 포털을 위한 통합 에러 처리 시스템입니다.
//! `thiserror`와 `actix_web::ResponseError`를 사용하여 타입 안전하고
//! 일관된 에러 처리를 제공합니다.
//!
//! ## 전파 정책
//!
//! | AppError | 콜백 중 처리 | 그 외 처리 |
//! |----------|--------------|------------|
//! | `BrokerFailure` | `/login` 리다이렉트 (warn 로그) | 401 |
//! | `StorageUnavailable` | `/login` 리다이렉트 (error 로그) | 503 |
//! | `UnknownUser` | - | 게이트에서 비인증으로 간주 |
//! | `SessionTerminationFailure` | - | 500 (로그아웃 리다이렉트 중단) |
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::errors::AppError;
//!
//! async fn find_user(directory: &dyn UserDirectory, id: &str) -> Result<User, AppError> {
//!     directory
//!         .find_by_id(id)
//!         .await?
//!         .ok_or_else(|| AppError::UnknownUser(id.to_string()))
//! }
//! ```

use thiserror::Error;

/// 애플리케이션 전역 에러 타입
///
/// 저장소, 외부 인증 브로커, 세션 처리에서 발생할 수 있는 실패를 포괄합니다.
/// 자동으로 HTTP 응답으로 변환되지만, 콜백 핸들러는 대부분의 실패를
/// 로그인 페이지 리다이렉트로 바꿔서 응답합니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 사용자 디렉터리 또는 세션 백엔드에 접근할 수 없음 (503 Service Unavailable)
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// 외부 인증 프로바이더가 거부했거나 교환 도중 실패함 (401 Unauthorized)
    #[error("Identity broker failure: {0}")]
    BrokerFailure(String),

    /// 세션이 더 이상 존재하지 않는 사용자를 가리킴 (401 Unauthorized)
    #[error("Unknown user: {0}")]
    UnknownUser(String),

    /// 로그아웃 시 세션을 무효화하지 못함 (500 Internal Server Error)
    #[error("Session termination failed: {0}")]
    SessionTerminationFailure(String),

    /// 입력값 검증 에러 (400 Bad Request)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 설정값 오류 (500 Internal Server Error)
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 로그인 콜백에서 사용자에게 `/login` 리다이렉트로 복구 가능한 실패인지 확인
    pub fn is_soft_login_failure(&self) -> bool {
        matches!(
            self,
            AppError::BrokerFailure(_)
                | AppError::StorageUnavailable(_)
                | AppError::ValidationError(_)
                | AppError::UnknownUser(_)
        )
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::BrokerFailure(_) | AppError::UnknownUser(_) => StatusCode::UNAUTHORIZED,
            AppError::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 내부 메시지는 로그로만 남기고, 클라이언트에게는 에러 분류만 전달합니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        let kind = match self {
            AppError::StorageUnavailable(_) => "storage_unavailable",
            AppError::BrokerFailure(_) => "broker_failure",
            AppError::UnknownUser(_) => "unknown_user",
            AppError::SessionTerminationFailure(_) => "session_termination_failure",
            AppError::ValidationError(_) => "validation_error",
            AppError::ConfigurationError(_) => "configuration_error",
            AppError::InternalError(_) => "internal_error",
        };

        actix_web::HttpResponse::build(self.status_code())
            .json(serde_json::json!({
                "error": kind
            }))
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(e: mongodb::error::Error) -> Self {
        AppError::StorageUnavailable(e.to_string())
    }
}

impl From<redis::RedisError> for AppError {
    fn from(e: redis::RedisError) -> Self {
        AppError::StorageUnavailable(e.to_string())
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::ResponseError;

    #[test]
    fn test_broker_failure_response() {
        let error = AppError::BrokerFailure("access_denied".to_string());
        assert_eq!(error.error_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_storage_unavailable_response() {
        let error = AppError::StorageUnavailable("connection refused".to_string());
        assert_eq!(error.error_response().status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_session_termination_failure_response() {
        let error = AppError::SessionTerminationFailure("redis down".to_string());
        assert_eq!(
            error.error_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_validation_error_response() {
        let error = AppError::ValidationError("code too long".to_string());
        assert_eq!(error.error_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_soft_login_failures() {
        assert!(AppError::BrokerFailure("x".into()).is_soft_login_failure());
        assert!(AppError::StorageUnavailable("x".into()).is_soft_login_failure());
        assert!(!AppError::SessionTerminationFailure("x".into()).is_soft_login_failure());
        assert!(!AppError::InternalError("x".into()).is_soft_login_failure());
    }

    #[test]
    fn test_error_context_trait() {
        let result: Result<(), &str> = Err("original error");
        let app_result = result.context("Additional context");

        if let Err(AppError::InternalError(msg)) = app_result {
            assert!(msg.contains("Additional context"));
            assert!(msg.contains("original error"));
        } else {
            panic!("Expected InternalError");
        }
    }
}
