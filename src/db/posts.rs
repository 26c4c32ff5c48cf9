//! # 게시글 데이터베이스 쿼리 모듈
//!
//! 게시글은 항상 `categories`를 LEFT JOIN해서 읽습니다.
//! 결과 행(`PostRow`)은 `Post`로 변환되어 카테고리가 중첩 객체로 들어갑니다.
//!
//! ```text
//! posts post ──(category_id)──→ categories category
//!   (N)                              (1)
//! ```

use crate::error::AppError;
use crate::models::*;
use crate::query::{self, EntityDescriptor, Join, ListQuery, Page};
use sqlx::SqlitePool;

/// 게시글 목록 조회 설정
///
/// - 검색: `title`, `content`, `category`(카테고리 이름). 기본은 세 컬럼 OR
/// - 정렬: `id`, `title`, `content`, `createdAt`, `updatedAt`
pub static POST_LIST: EntityDescriptor = EntityDescriptor {
    name: "posts",
    table: "posts",
    alias: "post",
    columns: "post.id, post.title, post.content, post.category_id, \
              category.name AS category_name, \
              category.description AS category_description, \
              category.created_at AS category_created_at, \
              category.updated_at AS category_updated_at, \
              post.created_at, post.updated_at",
    joins: &[Join {
        table: "categories",
        alias: "category",
        on: "category.id = post.category_id",
    }],
    search_fields: &[
        ("title", "post.title"),
        ("content", "post.content"),
        ("category", "category.name"),
    ],
    default_search: &["post.title", "post.content", "category.name"],
    sort_fields: &[
        ("id", "post.id"),
        ("title", "post.title"),
        ("content", "post.content"),
        ("createdAt", "post.created_at"),
        ("updatedAt", "post.updated_at"),
    ],
    filter_fields: &[],
};

/// 검색/정렬/페이지네이션이 적용된 게시글 목록 (실패 시 `None`)
pub async fn list_posts(pool: &SqlitePool, query: &ListQuery) -> Option<Page<Post>> {
    // 터보피시(::<PostRow>): 행 타입을 명시. 평평한 행을 Post(중첩 category)로 변환합니다
    query::find_page::<PostRow>(pool, &POST_LIST, query, &[])
        .await
        .map(|page| page.map(Post::from))
}

/// ID로 게시글 하나를 카테고리와 함께 조회합니다.
pub async fn get_post(pool: &SqlitePool, id: &str) -> Result<Option<Post>, AppError> {
    let sql = format!(
        "SELECT {} FROM posts post \
         LEFT JOIN categories category ON category.id = post.category_id \
         WHERE post.id = ?",
        POST_LIST.columns
    );

    // LEFT JOIN이라 카테고리가 없어도 게시글은 조회됩니다
    let row = sqlx::query_as::<_, PostRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(Post::from))
}

/// 새 게시글을 생성합니다.
///
/// - `Ok(Some(Post))`: 생성 성공
/// - `Ok(None)`: `category_id`에 해당하는 카테고리가 없음
pub async fn create_post(pool: &SqlitePool, req: &CreatePostRequest) -> Result<Option<Post>, AppError> {
    if super::get_category(pool, &req.category_id).await?.is_none() {
        return Ok(None);
    }

    let id = uuid::Uuid::now_v7().to_string();

    sqlx::query("INSERT INTO posts (id, title, content, category_id) VALUES (?, ?, ?, ?)")
        .bind(&id)
        .bind(&req.title)
        .bind(&req.content)
        .bind(&req.category_id)
        .execute(pool)
        .await?;

    let post = get_post(pool, &id)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created post".to_string()))?;

    Ok(Some(post))
}

/// 게시글을 수정합니다. 요청에 없는 필드는 기존 값을 유지합니다.
///
/// 게시글이 없거나, `category_id`가 주어졌는데 해당 카테고리가 없으면 `Ok(None)`입니다.
pub async fn update_post(
    pool: &SqlitePool,
    id: &str,
    req: &UpdatePostRequest,
) -> Result<Option<Post>, AppError> {
    if get_post(pool, id).await?.is_none() {
        return Ok(None);
    }

    if let Some(category_id) = &req.category_id {
        if super::get_category(pool, category_id).await?.is_none() {
            return Ok(None);
        }
    }

    // COALESCE(?, column): 바인딩 값이 NULL이면 기존 값을 유지
    sqlx::query(
        r#"
        UPDATE posts
        SET title = COALESCE(?, title),
            content = COALESCE(?, content),
            category_id = COALESCE(?, category_id),
            updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&req.title)
    .bind(&req.content)
    .bind(&req.category_id)
    .bind(super::now())
    .bind(id)
    .execute(pool)
    .await?;

    get_post(pool, id).await
}

/// ID로 게시글을 삭제합니다. 삭제된 행이 없으면 `false`.
pub async fn delete_post(pool: &SqlitePool, id: &str) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM posts WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
