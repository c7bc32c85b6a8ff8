//! # Domain Layer Module
//!
//! 도메인 계층을 구성하는 핵심 모듈입니다.
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── entities  - 영속 객체 (User, SessionRecord)
//! ├── dto       - OAuth 콜백/응답 데이터 전송 객체
//! └── models    - 세션 상태, 외부 신원 값 객체
//! ```

pub mod entities;
pub mod dto;
pub mod models;
