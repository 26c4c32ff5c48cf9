//! # 카테고리 데이터베이스 쿼리 모듈
//!
//! 카테고리 CRUD와 목록 조회 디스크립터를 정의합니다.
//! 모든 함수는 `SqlitePool` 참조를 받아 비동기로 실행됩니다.

use crate::error::AppError;
use crate::models::*;
use crate::query::{self, EntityDescriptor, ListQuery, Page};
use sqlx::SqlitePool;

/// 카테고리 목록 조회 설정
///
/// - 검색: `name`, `description` (기본: 둘 다 OR)
/// - 정렬: `id`, `name`, `description`, `createdAt`, `updatedAt`
pub static CATEGORY_LIST: EntityDescriptor = EntityDescriptor {
    name: "categories",
    table: "categories",
    alias: "category",
    columns: "category.id, category.name, category.description, \
              category.created_at, category.updated_at",
    joins: &[],
    search_fields: &[
        ("name", "category.name"),
        ("description", "category.description"),
    ],
    default_search: &["category.name", "category.description"],
    sort_fields: &[
        ("id", "category.id"),
        ("name", "category.name"),
        ("description", "category.description"),
        ("createdAt", "category.created_at"),
        ("updatedAt", "category.updated_at"),
    ],
    filter_fields: &[],
};

/// 검색/정렬/페이지네이션이 적용된 카테고리 목록
///
/// 조회에 실패하면 `None`을 반환합니다 (원인은 로그에 남습니다).
pub async fn list_categories(pool: &SqlitePool, query: &ListQuery) -> Option<Page<Category>> {
    query::find_page(pool, &CATEGORY_LIST, query, &[]).await
}

/// ID로 카테고리 하나를 조회합니다.
///
/// - `Ok(Some(Category))`: 찾은 경우
/// - `Ok(None)`: 존재하지 않는 경우 (라우트에서 404로 처리)
///
/// `fetch_optional`은 0행이면 None, 1행이면 Some을 반환합니다.
pub async fn get_category(pool: &SqlitePool, id: &str) -> Result<Option<Category>, AppError> {
    // query_as::<_, Category>: `_`는 DB 드라이버(SQLite)를 추론, Category는 매핑 대상
    let category = sqlx::query_as::<_, Category>(
        "SELECT id, name, description, created_at, updated_at FROM categories WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(category)
}

/// 이름으로 카테고리를 조회합니다 (중복 이름 검사용).
pub async fn find_category_by_name(
    pool: &SqlitePool,
    name: &str,
) -> Result<Option<Category>, AppError> {
    let category = sqlx::query_as::<_, Category>(
        "SELECT id, name, description, created_at, updated_at FROM categories WHERE name = ?",
    )
    .bind(name)
    .fetch_optional(pool)
    .await?;

    Ok(category)
}

/// 새 카테고리를 생성하고, DB 기본값이 채워진 카테고리를 다시 조회해 반환합니다.
pub async fn create_category(
    pool: &SqlitePool,
    req: &CreateCategoryRequest,
) -> Result<Category, AppError> {
    // UUIDv7: 시간 기반 UUID로, 생성 순서대로 정렬됩니다
    let id = uuid::Uuid::now_v7().to_string();

    // 같은 이름이 이미 있으면 UNIQUE 제약 위반 → AppError::Conflict (error.rs의 From 구현)
    sqlx::query("INSERT INTO categories (id, name, description) VALUES (?, ?, ?)")
        .bind(&id)
        .bind(req.name.trim())
        .bind(&req.description) // None이면 SQL NULL
        .execute(pool)
        .await?;

    // 생성 직후 다시 조회해 DB 기본값(created_at 등)이 채워진 값을 반환합니다
    // ok_or(): Option → Result 변환. None이면 지정한 에러
    get_category(pool, &id)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created category".to_string()))
}

/// 카테고리를 부분 업데이트합니다.
///
/// - `Ok(Some(Category))`: 업데이트 후 최신 상태
/// - `Ok(None)`: 해당 ID의 카테고리가 없음
pub async fn update_category(
    pool: &SqlitePool,
    id: &str,
    req: &UpdateCategoryRequest,
) -> Result<Option<Category>, AppError> {
    if get_category(pool, id).await?.is_none() {
        return Ok(None);
    }

    // 요청에 포함된 필드만 하나씩 업데이트합니다 (PATCH)
    if let Some(name) = &req.name {
        sqlx::query("UPDATE categories SET name = ? WHERE id = ?")
            .bind(name.trim())
            .bind(id)
            .execute(pool)
            .await?;
    }

    if let Some(description) = &req.description {
        sqlx::query("UPDATE categories SET description = ? WHERE id = ?")
            .bind(description)
            .bind(id)
            .execute(pool)
            .await?;
    }

    sqlx::query("UPDATE categories SET updated_at = ? WHERE id = ?")
        .bind(super::now())
        .bind(id)
        .execute(pool)
        .await?;

    get_category(pool, id).await
}

/// 카테고리를 삭제하고 삭제된 카테고리를 반환합니다.
///
/// 이 카테고리를 참조하던 게시글은 `ON DELETE SET NULL`로 카테고리 없이 남습니다.
pub async fn delete_category(pool: &SqlitePool, id: &str) -> Result<Option<Category>, AppError> {
    // let-else: 조회 결과가 None이면 바로 Ok(None)을 반환
    let Some(category) = get_category(pool, id).await? else {
        return Ok(None);
    };

    let result = sqlx::query("DELETE FROM categories WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    // then_some(): 조건이 true면 Some(category), false면 None
    Ok((result.rows_affected() > 0).then_some(category))
}
