//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 모아둔 모듈입니다.
//!
//! 각 하위 모듈:
//! - `basics`: 예제용 기본 엔드포인트 (GET/POST/PUT/DELETE, 넓이 계산)
//! - `categories`: 카테고리 CRUD + 목록 조회
//! - `health`: 서버 상태 확인 (헬스체크)
//! - `mail`: 메일 전송
//! - `posts`: 게시글 CRUD + 목록 조회
//! - `users`: 사용자 CRUD + 목록 조회 + 프로필 이미지 업로드

pub mod basics;
pub mod categories;
pub mod health;
pub mod mail;
pub mod posts;
pub mod users;

pub use categories::*;
pub use health::*;
pub use posts::*;

use crate::services::MailTransport;
use sqlx::SqlitePool;

/// 애플리케이션 공유 상태
///
/// 모든 요청 핸들러가 `State(state): State<AppState>`로 접근합니다.
/// `SqlitePool`과 `reqwest::Client`는 내부적으로 Arc를 사용하므로 clone 비용이 작습니다.
#[derive(Clone)]
pub struct AppState {
    /// SQLite 연결 풀
    pub pool: SqlitePool,
    /// 업로드 파일 저장 디렉토리 (`/public`으로 서빙)
    pub uploads_path: String,
    /// 메일 전송 방식
    pub mailer: MailTransport,
}
