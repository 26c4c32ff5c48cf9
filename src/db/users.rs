//! # 사용자 데이터베이스 쿼리 모듈
//!
//! 사용자 CRUD, 중복 확인용 조회, 프로필 이미지 갱신, 목록 조회 디스크립터입니다.
//! 비밀번호는 라우트에서 해싱한 값만 받습니다. 이 모듈은 평문 비밀번호를 다루지 않습니다.

use crate::error::AppError;
use crate::models::user::*;
use crate::query::{self, EntityDescriptor, Filter, ListQuery, Page};
use sqlx::SqlitePool;

const USER_COLUMNS: &str =
    "id, username, email, password_hash, role, is_active, profile, created_at, updated_at";

/// 사용자 목록 조회 설정. `isActive`는 동등 조건 필터로만 사용합니다.
pub static USER_LIST: EntityDescriptor = EntityDescriptor {
    name: "users",
    table: "users",
    alias: "user",
    columns: "user.id, user.username, user.email, user.password_hash, user.role, \
              user.is_active, user.profile, user.created_at, user.updated_at",
    joins: &[],
    search_fields: &[("username", "user.username"), ("email", "user.email")],
    default_search: &["user.username", "user.email"],
    sort_fields: &[
        ("id", "user.id"),
        ("username", "user.username"),
        ("email", "user.email"),
        ("role", "user.role"),
        ("isActive", "user.is_active"),
        ("createdAt", "user.created_at"),
        ("updatedAt", "user.updated_at"),
    ],
    filter_fields: &[("isActive", "user.is_active")],
};

/// 검색/정렬/페이지네이션 + `isActive` 필터가 적용된 사용자 목록 (실패 시 `None`)
///
/// `is_active`가 `None`이면 활성/비활성 사용자를 모두 조회합니다.
pub async fn list_users(
    pool: &SqlitePool,
    query: &ListQuery,
    is_active: Option<bool>,
) -> Option<Page<User>> {
    let filters: Vec<Filter> = is_active
        .map(|active| Filter::eq("isActive", active))
        .into_iter()
        .collect();

    query::find_page(pool, &USER_LIST, query, &filters).await
}

/// 새 사용자를 생성합니다. `role`이 없으면 `user`입니다.
///
/// username/email이 이미 있으면 UNIQUE 제약 위반으로 `AppError::Conflict`입니다.
pub async fn create_user(
    pool: &SqlitePool,
    req: &CreateUserRequest,
    password_hash: &str,
) -> Result<User, AppError> {
    // UUIDv7: 생성 시각 순으로 정렬되는 ID
    let id = uuid::Uuid::now_v7().to_string();

    sqlx::query(
        r#"
        INSERT INTO users (id, username, email, password_hash, role)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(req.username.trim())
    .bind(req.email.trim())
    .bind(password_hash)
    // unwrap_or_default(): role이 없으면 UserRole::default() == User
    .bind(req.role.unwrap_or_default())
    .execute(pool)
    .await?;

    find_by_id(pool, &id)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created user".to_string()))
}

/// ID로 사용자를 조회합니다. 없으면 `Ok(None)`.
pub async fn find_by_id(pool: &SqlitePool, id: &str) -> Result<Option<User>, AppError> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?");
    let user = sqlx::query_as::<_, User>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

/// username으로 조회합니다 (중복 검사용).
pub async fn find_by_username(pool: &SqlitePool, username: &str) -> Result<Option<User>, AppError> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?");
    let user = sqlx::query_as::<_, User>(&sql)
        .bind(username)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

/// email로 조회합니다 (중복 검사용).
pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>, AppError> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?");
    let user = sqlx::query_as::<_, User>(&sql)
        .bind(email)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

/// 사용자 정보를 부분 업데이트합니다.
///
/// 비밀번호는 라우트에서 미리 해싱한 값(`password_hash`)을 받습니다.
pub async fn update_user(
    pool: &SqlitePool,
    id: &str,
    req: &UpdateUserRequest,
    password_hash: Option<&str>,
) -> Result<Option<User>, AppError> {
    if find_by_id(pool, id).await?.is_none() {
        return Ok(None);
    }

    sqlx::query(
        r#"
        UPDATE users
        SET username = COALESCE(?, username),
            email = COALESCE(?, email),
            password_hash = COALESCE(?, password_hash),
            role = COALESCE(?, role),
            is_active = COALESCE(?, is_active),
            updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(req.username.as_deref().map(str::trim))
    .bind(req.email.as_deref().map(str::trim))
    .bind(password_hash)
    .bind(req.role)
    .bind(req.is_active)
    .bind(super::now())
    .bind(id)
    .execute(pool)
    .await?;

    find_by_id(pool, id).await
}

/// 프로필 이미지 파일명을 저장합니다.
///
/// 사용자가 없으면 `Ok(None)`입니다. 이전 파일 삭제는 호출하는 쪽의 몫입니다.
pub async fn update_profile(
    pool: &SqlitePool,
    id: &str,
    profile: &str,
) -> Result<Option<User>, AppError> {
    let result = sqlx::query("UPDATE users SET profile = ?, updated_at = ? WHERE id = ?")
        .bind(profile)
        .bind(super::now())
        .bind(id)
        .execute(pool)
        .await?;

    // rows_affected() == 0: WHERE id = ?에 맞는 행이 없었음
    if result.rows_affected() == 0 {
        return Ok(None);
    }

    find_by_id(pool, id).await
}

/// 사용자를 삭제하고 삭제된 사용자를 반환합니다.
pub async fn delete_user(pool: &SqlitePool, id: &str) -> Result<Option<User>, AppError> {
    let Some(user) = find_by_id(pool, id).await? else {
        return Ok(None);
    };

    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok((result.rows_affected() > 0).then_some(user))
}
