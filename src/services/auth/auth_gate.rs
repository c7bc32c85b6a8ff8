//! 인증 게이트
//!
//! 보호 페이지 접근 여부를 결정하는 순수 함수입니다. 세션 해석은 미들웨어가 이미 끝냈으므로
//! 여기서는 I/O 없이 상태만 봅니다.

use crate::domain::models::auth::SessionState;

pub struct AuthGate;

impl AuthGate {
    /// 만료되지 않은 세션이 존재하는 사용자로 해석된 경우에만 `true`
    pub fn is_authenticated(state: &SessionState) -> bool {
        matches!(state, SessionState::Authenticated { .. })
    }
}
