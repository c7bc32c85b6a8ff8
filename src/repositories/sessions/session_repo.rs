//! Redis 세션 백엔드

use async_trait::async_trait;
use crate::caching::redis::RedisClient;
use crate::domain::entities::sessions::{SessionRecord, SessionToken};
use crate::errors::AppError;
use super::SessionBackend;

/// Redis에 JSON으로 세션 레코드를 저장하는 백엔드
///
/// 만료는 `SETEX`의 TTL이 처리하므로 별도의 정리 작업이 필요 없습니다.
#[derive(Clone)]
pub struct RedisSessionBackend {
    redis: RedisClient,
}

impl RedisSessionBackend {
    pub fn new(redis: RedisClient) -> Self {
        Self { redis }
    }

    fn key(token: &SessionToken) -> String {
        format!("session:{}", token.as_str())
    }
}

#[async_trait]
impl SessionBackend for RedisSessionBackend {
    async fn put(&self, token: &SessionToken, record: &SessionRecord, ttl_seconds: u64) -> Result<(), AppError> {
        self.redis
            .set_with_expiry(&Self::key(token), record, ttl_seconds)
            .await?;
        Ok(())
    }

    async fn get(&self, token: &SessionToken) -> Result<Option<SessionRecord>, AppError> {
        Ok(self.redis.get::<SessionRecord>(&Self::key(token)).await?)
    }

    async fn delete(&self, token: &SessionToken) -> Result<(), AppError> {
        self.redis.del(&Self::key(token)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_layout() {
        let token = SessionToken::parse("0123456789abcdef0123456789abcdef").unwrap();
        assert_eq!(
            RedisSessionBackend::key(&token),
            "session:0123456789abcdef0123456789abcdef"
        );
    }
}
