//! # Domain Models Module
//!
//! 영속되지 않는 도메인 모델과 값 객체를 정의하는 모듈입니다.
//!
//! - [`auth`] - 요청 단위로 해석된 세션 상태와 actix-web 추출자
//! - [`oauth`] - 브로커가 주장하는 외부 신원

pub mod auth;
pub mod oauth;
