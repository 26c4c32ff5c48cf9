//! # 서비스 모듈
//!
//! DB 밖의 작업들입니다.
//! - `mail`: 외부 메일 전송 서비스 호출
//! - `uploads`: 업로드 파일 저장

pub mod mail;
pub mod uploads;

pub use mail::MailTransport;
pub use uploads::*;
