//! # 카테고리 모델 정의
//!
//! 게시글을 분류하는 카테고리 관련 구조체들입니다.
//!
//! ## 구조체 역할
//! - `Category`: DB의 `categories` 테이블 한 행 (응답용)
//! - `CreateCategoryRequest`: `POST /api/v1/categories` 요청 본문
//! - `UpdateCategoryRequest`: `PATCH /api/v1/categories/{id}` 요청 본문

use serde::{Deserialize, Serialize};

/// 카테고리 엔티티
///
/// JSON 필드명은 camelCase(`createdAt`)이고, DB 컬럼명은 snake_case(`created_at`)입니다.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// 카테고리 고유 식별자 (UUIDv7 형식 문자열)
    pub id: String,
    /// 카테고리 이름 (예: "General", "Rust")
    pub name: String,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub description: Option<String>,
}

/// 부분 업데이트: 보낸 필드만 변경합니다.
#[derive(Debug, Deserialize)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}
