//! # 사용자 모델
//!
//! - `User`: DB 행이자 응답 본문. `password_hash`는 직렬화하지 않습니다.
//! - `UserRole`: `admin` / `user` (DB와 JSON 모두 소문자 문자열)
//! - `CreateUserRequest`, `UpdateUserRequest`: 요청 본문

use serde::{Deserialize, Serialize};

/// 사용자 역할
///
/// `sqlx::Type` derive로 TEXT 컬럼과 직접 바인딩/디코딩됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    #[default]
    User,
}

/// `users` 테이블의 한 행
///
/// SQLite에는 BOOLEAN이 없어 `is_active`는 INTEGER(0/1)로 저장되고, sqlx가 `bool`로 디코딩합니다.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: UserRole,
    pub is_active: bool,
    /// 업로드된 프로필 이미지 파일명 (`/public/profiles/{profile}`)
    pub profile: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// `POST /users` 요청 본문
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    /// 평문 비밀번호. 라우트에서 Argon2id로 해싱한 뒤 버립니다.
    pub password: String,
    pub role: Option<UserRole>,
}

/// `PATCH /users/{id}` 요청 본문. 빠진 필드는 기존 값을 유지합니다.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
}
