//! # 게시글 API 라우트 핸들러
//!
//! ## 엔드포인트
//! - `GET    /api/v1/posts`      → 검색/정렬/페이지네이션 목록 (카테고리 포함)
//! - `POST   /api/v1/posts`      → 새 게시글 생성
//! - `GET    /api/v1/posts/{id}` → 단건 조회
//! - `PUT    /api/v1/posts/{id}` → 수정 (빠진 필드는 유지)
//! - `DELETE /api/v1/posts/{id}` → 삭제 (삭제된 ID 반환)

// ── 의존성 가져오기 ──
use crate::{
    db,                                   // 데이터베이스 쿼리 모듈
    error::AppError,                      // 에러 타입
    extract::{AppJson, AppPath, AppQuery}, // JSON 에러 응답을 내는 추출자
    models::*,                            // Post, 요청 구조체, ApiResponse
    query::{ListParams, Page},
    routes::AppState,
};
use axum::{extract::State, http::StatusCode, Json};

/// `GET /api/v1/posts?search=rust&searchField=category&sort=title`
///
/// `searchField=category`는 조인된 카테고리 이름을 검색합니다.
pub async fn list_posts(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ListParams>,
) -> Result<Json<ApiResponse<Page<Post>>>, AppError> {
    let query = params.into_query()?;

    // 카테고리 JOIN은 db::posts의 디스크립터가 담당합니다
    let page = db::list_posts(&state.pool, &query)
        .await
        .ok_or_else(|| AppError::Unavailable("Could not retrieve posts".to_string()))?;

    Ok(Json(ApiResponse::ok("Posts retrieved successfully", page)))
}

/// `POST /api/v1/posts` + `{ "title": "...", "content": "...", "categoryId": "..." }`
///
/// 카테고리가 없으면 404입니다.
pub async fn create_post(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreatePostRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Post>>), AppError> {
    if req.title.trim().is_empty() {
        return Err(AppError::BadRequest("Title must not be empty".to_string()));
    }

    // Ok(None) = 카테고리 없음 → 404
    let post = db::create_post(&state.pool, &req).await?.ok_or_else(|| {
        AppError::NotFound("Category not found or error creating post".to_string())
    })?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Post created successfully", post)),
    ))
}

/// `GET /api/v1/posts/{id}`
pub async fn get_post(
    State(state): State<AppState>,
    AppPath(id): AppPath<String>,
) -> Result<Json<ApiResponse<Post>>, AppError> {
    let post = db::get_post(&state.pool, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    Ok(Json(ApiResponse::ok("Post retrieved successfully", post)))
}

/// `PUT /api/v1/posts/{id}` + `{ "title"?, "content"?, "categoryId"? }`
pub async fn update_post(
    State(state): State<AppState>,
    AppPath(id): AppPath<String>,
    AppJson(req): AppJson<UpdatePostRequest>,
) -> Result<Json<ApiResponse<Post>>, AppError> {
    // matches!: 패턴 + 가드(if)로 "제목이 주어졌는데 비어 있음"을 한 줄로 검사
    if matches!(&req.title, Some(title) if title.trim().is_empty()) {
        return Err(AppError::BadRequest("Title must not be empty".to_string()));
    }

    let post = db::update_post(&state.pool, &id, &req)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found or category not valid".to_string()))?;

    Ok(Json(ApiResponse::ok("Post updated successfully", post)))
}

/// `DELETE /api/v1/posts/{id}` → `{ "data": "<id>" }`
pub async fn delete_post(
    State(state): State<AppState>,
    AppPath(id): AppPath<String>,
) -> Result<Json<ApiResponse<String>>, AppError> {
    // 게시글은 삭제된 행 대신 ID만 반환합니다
    let deleted = db::delete_post(&state.pool, &id).await?;
    if !deleted {
        return Err(AppError::NotFound(
            "Post not found or could not be deleted".to_string(),
        ));
    }

    Ok(Json(ApiResponse::ok("Post deleted successfully", id)))
}
