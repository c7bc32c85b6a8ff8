//! OAuth 콜백 요청 DTO
//!
//! 브로커가 콜백 URL로 돌려보낼 때 붙이는 쿼리 파라미터를 매핑합니다.
use serde::Deserialize;
use validator::Validate;

/// OAuth 콜백 쿼리 파라미터 구조체
///
/// 성공 시에는 `code`와 `state`가, 사용자가 거부했거나 에러가 발생하면
/// `error`(와 선택적으로 `error_description`)가 전달됩니다.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct OAuthCallbackQuery {
    #[validate(length(min = 1, max = 2048, message = "Authorization code 형식이 올바르지 않습니다"))]
    pub code: Option<String>,

    #[validate(length(min = 1, max = 256, message = "State 형식이 올바르지 않습니다"))]
    pub state: Option<String>,

    /// 에러가 있을 경우 (사용자가 거부했거나 에러 발생)
    pub error: Option<String>,
    pub error_description: Option<String>,
}
