//! Sessions Entity Module
//!
//! 세션 토큰, 세션 페이로드, 백엔드에 저장되는 세션 레코드를 정의합니다.

pub mod session;

pub use session::{SessionPayload, SessionRecord, SessionToken};
