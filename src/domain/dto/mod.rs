//! # Data Transfer Objects
//!
//! HTTP 경계에서 주고받는 데이터 구조입니다.
//!
//! ```text
//! dto/
//! └── oauth/
//!     ├── request.rs   - 콜백 쿼리 파라미터
//!     └── response.rs  - 토큰 교환 및 프로필 응답
//! ```

pub mod oauth;

pub use oauth::*;
