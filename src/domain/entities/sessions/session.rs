//! Session Entity Implementation
//!
//! 서버 측 세션 레코드와 클라이언트가 보관하는 불투명 토큰을 정의합니다.

use std::fmt;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 클라이언트가 쿠키로 보관하는 불투명 세션 토큰
///
/// 서버가 생성한 UUID v4의 하이픈 없는 16진수 표현입니다.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionToken(String);

impl SessionToken {
    /// 새 임의 토큰 생성
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// 쿠키에서 읽은 값을 토큰으로 해석합니다.
    ///
    /// 형식이 맞지 않으면 `None`을 반환합니다.
    pub fn parse(raw: &str) -> Option<Self> {
        let is_valid = raw.len() == 32 && raw.bytes().all(|b| b.is_ascii_hexdigit());
        is_valid.then(|| Self(raw.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// 토큰은 자격 증명이므로 로그에 그대로 남기지 않음
impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionToken({}…)", &self.0[..6.min(self.0.len())])
    }
}

/// 세션에 직렬화되는 사용자 참조
///
/// 사용자 레코드 전체가 아니라 로컬 식별자만 담습니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionPayload {
    pub user_id: String,
}

/// 세션 백엔드에 저장되는 레코드
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub user: SessionPayload,
    /// 발급 시각 (Unix 초)
    pub issued_at: i64,
    /// 만료 시각 (Unix 초)
    pub expires_at: i64,
}

impl SessionRecord {
    /// 만료 시각은 `i64` 범위에서 포화됩니다.
    pub fn new(user: SessionPayload, issued_at: i64, ttl_seconds: u64) -> Self {
        let ttl = i64::try_from(ttl_seconds).unwrap_or(i64::MAX);

        Self {
            user,
            issued_at,
            expires_at: issued_at.saturating_add(ttl),
        }
    }

    pub fn is_expired_at(&self, now: i64) -> bool {
        self.expires_at <= now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_tokens_are_distinct_and_parseable() {
        let a = SessionToken::generate();
        let b = SessionToken::generate();

        assert_ne!(a, b);
        assert_eq!(SessionToken::parse(a.as_str()), Some(a));
    }

    #[test]
    fn test_parse_rejects_malformed_tokens() {
        assert!(SessionToken::parse("").is_none());
        assert!(SessionToken::parse("not-a-token").is_none());
        assert!(SessionToken::parse(&"z".repeat(32)).is_none());
    }

    #[test]
    fn test_debug_does_not_leak_token() {
        let token = SessionToken::generate();
        assert!(!format!("{:?}", token).contains(token.as_str()));
    }

    #[test]
    fn test_record_expiry() {
        let record = SessionRecord::new(
            SessionPayload { user_id: "65f0c0ffee".to_string() },
            1_000,
            60,
        );

        assert_eq!(record.expires_at, 1_060);
        assert!(!record.is_expired_at(1_059));
        assert!(record.is_expired_at(1_060));
    }

    #[test]
    fn test_record_with_oversized_ttl_does_not_wrap() {
        let record = SessionRecord::new(
            SessionPayload { user_id: "65f0c0ffee".to_string() },
            1_700_000_000,
            u64::MAX,
        );

        assert_eq!(record.expires_at, i64::MAX);
        assert!(!record.is_expired_at(1_700_000_001));
    }
}
