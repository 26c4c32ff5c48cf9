//! # 데이터베이스 접근 계층 (Data Access Layer)
//!
//! 데이터베이스와 직접 상호작용하는 함수들을 모아둔 모듈입니다.
//! 라우트 핸들러(routes/)에서 이 모듈의 함수를 호출하여 DB 작업을 수행합니다.
//!
//! 각 하위 모듈:
//! - `categories`: 카테고리 CRUD와 목록 조회 디스크립터
//! - `posts`: 게시글 CRUD (카테고리 조인)
//! - `users`: 사용자 CRUD, 프로필 이미지

pub mod categories;
pub mod posts;
pub mod users;

// `crate::db::list_posts`처럼 바로 접근할 수 있게 재공개합니다.
// users는 find_by_id 같은 일반적인 이름이 많아 `db::users::...`로 사용합니다.
pub use categories::*;
pub use posts::*;
pub use users::{list_users, USER_LIST};

use chrono::Utc;

/// 현재 시각을 DB 기본값과 같은 ISO 8601 형식으로 반환합니다.
pub(crate) fn now() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}
