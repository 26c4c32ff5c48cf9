//! # 데이터 모델 모듈
//!
//! 애플리케이션에서 사용하는 데이터 구조체(struct)들을 정의합니다.
//! - `category`: 카테고리
//! - `post`: 게시글 (카테고리 조인 행 포함)
//! - `user`: 사용자와 역할(role)
//! - `mail`: 메일 전송 요청/결과
//! - `response`: 성공 응답 래퍼 `ApiResponse`
//!
//! `pub use X::*;`로 재공개하여 `crate::models::Post`처럼 짧게 접근합니다.

pub mod category;
pub mod mail;
pub mod post;
pub mod response;
pub mod user;

pub use category::*;
pub use mail::*;
pub use post::*;
pub use response::*;
pub use user::*;
