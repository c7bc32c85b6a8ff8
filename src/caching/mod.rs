//! 캐싱 계층 모듈
//!
//! Redis 연결과 JSON 기반 객체 직렬화를 제공합니다.
//! 세션 리포지토리가 이 클라이언트를 사용합니다.
//!
//! # 환경 설정
//!
//! ```bash
//! REDIS_URL=redis://localhost:6379  # 기본값
//! ```

pub mod redis;
