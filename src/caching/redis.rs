//! # Redis 클라이언트 구현
//!
//! 세션 백엔드로 사용하는 Redis 클라이언트를 제공합니다.
//! 값은 JSON으로 직렬화되어 저장되며, 모든 작업은 async/await 기반입니다.
//!
//! ## 연결 관리
//!
//! `ConnectionManager`를 사용하여 단일 멀티플렉싱 연결을 모든 요청이 공유하고,
//! 연결이 끊어지면 자동으로 재연결합니다.

use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use serde::{Serialize, de::DeserializeOwned};
use crate::errors::AppError;

/// Redis 클라이언트 래퍼
#[derive(Clone)]
pub struct RedisClient {
    /// 자동 재연결을 지원하는 멀티플렉싱 연결
    conn: ConnectionManager,
}

impl RedisClient {
    /// 새 Redis 클라이언트 인스턴스를 생성합니다.
    ///
    /// 생성 시 `PING` 명령으로 서버 가용성을 확인합니다.
    ///
    /// ## 예제
    ///
    /// ```rust,ignore
    /// let redis = RedisClient::connect("redis://localhost:6379").await?;
    /// ```
    pub async fn connect(redis_url: &str) -> Result<Self, AppError> {
        let client = Client::open(redis_url)?;
        let mut conn = ConnectionManager::new(client).await?;

        // 연결 테스트 - PING 명령으로 서버 가용성 확인
        redis::cmd("PING").query_async::<()>(&mut conn).await?;

        log::info!("✅ Redis 연결 성공");

        Ok(Self { conn })
    }

    /// 지정된 키에서 값을 조회하여 역직렬화합니다.
    ///
    /// - `Ok(Some(T))` - 키가 존재하고 역직렬화 성공
    /// - `Ok(None)` - 키가 존재하지 않음
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, redis::RedisError> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(key).await?;

        match value {
            Some(json) => {
                let deserialized = serde_json::from_str(&json)
                    .map_err(|e| redis::RedisError::from((redis::ErrorKind::TypeError, "Deserialization failed", e.to_string())))?;
                Ok(Some(deserialized))
            }
            None => Ok(None),
        }
    }

    /// 만료 시간과 함께 값을 저장합니다.
    ///
    /// `seconds`가 지나면 Redis가 키를 자동으로 삭제합니다.
    pub async fn set_with_expiry<T: Serialize>(&self, key: &str, value: &T, seconds: u64) -> Result<(), redis::RedisError> {
        let mut conn = self.conn.clone();
        let json = serde_json::to_string(value)
            .map_err(|e| redis::RedisError::from((redis::ErrorKind::TypeError, "Serialization failed", e.to_string())))?;
        conn.set_ex(key, json, seconds).await
    }

    /// 지정된 키를 삭제합니다.
    ///
    /// 키가 없어도 성공으로 처리합니다.
    pub async fn del(&self, key: &str) -> Result<(), redis::RedisError> {
        let mut conn = self.conn.clone();
        conn.del(key).await
    }
}
