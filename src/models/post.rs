//! # 게시글 모델 정의
//!
//! 게시글은 카테고리 하나에 속합니다 (N:1).
//! 목록/단건 조회는 `categories`를 LEFT JOIN한 평평한 행(`PostRow`)을 읽은 뒤
//! 카테고리를 중첩 객체로 가진 `Post`로 바꿔서 응답합니다.

use serde::{Deserialize, Serialize};

use super::Category;

/// `posts LEFT JOIN categories` 결과 한 행
///
/// 조인된 카테고리 컬럼은 `category_` 접두사로 별칭을 붙여 읽습니다.
/// 카테고리가 없거나 삭제된 경우 모두 NULL이므로 Option입니다.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PostRow {
    pub id: String,
    pub title: String,
    pub content: Option<String>,
    pub category_id: Option<String>,
    pub category_name: Option<String>,
    pub category_description: Option<String>,
    pub category_created_at: Option<String>,
    pub category_updated_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// 게시글 응답 모델
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    pub content: Option<String>,
    /// 연결된 카테고리. 카테고리가 삭제되었으면 null
    pub category: Option<Category>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        // LEFT JOIN이 매칭된 경우에만 카테고리 객체를 만듭니다
        let category = match (row.category_id, row.category_name) {
            (Some(id), Some(name)) => Some(Category {
                id,
                name,
                description: row.category_description,
                created_at: row.category_created_at.unwrap_or_default(),
                updated_at: row.category_updated_at.unwrap_or_default(),
            }),
            _ => None,
        };

        Self {
            id: row.id,
            title: row.title,
            content: row.content,
            category,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// `POST /api/v1/posts` 요청 본문
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub title: String,
    pub content: Option<String>,
    pub category_id: String,
}

/// `PUT /api/v1/posts/{id}` 요청 본문. 빠진 필드는 기존 값을 유지합니다.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category_id: Option<String>,
}
