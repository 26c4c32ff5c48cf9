//! # 카테고리 API 라우트 핸들러
//!
//! ## 엔드포인트 목록
//! | 메서드 | 경로 | 핸들러 | 설명 |
//! |--------|------|--------|------|
//! | GET | /api/v1/categories | `list_categories` | 검색/정렬/페이지네이션 목록 |
//! | POST | /api/v1/categories | `create_category` | 새 카테고리 생성 |
//! | GET | /api/v1/categories/{id} | `get_category` | 단건 조회 |
//! | PATCH | /api/v1/categories/{id} | `update_category` | 부분 수정 |
//! | DELETE | /api/v1/categories/{id} | `delete_category` | 삭제 (삭제된 카테고리 반환) |

// ── 의존성 가져오기 ──
use crate::{
    db,                                   // 데이터베이스 쿼리 모듈
    error::AppError,                      // 에러 타입 (JSON 에러 응답으로 변환됨)
    extract::{AppJson, AppPath, AppQuery}, // 거부를 AppError로 바꾸는 추출자
    models::*,                            // Category, 요청 구조체, ApiResponse
    query::{ListParams, Page},            // 목록 쿼리 파라미터와 페이지 결과
    routes::AppState,                     // 공유 상태 (DB 풀, 업로드 경로)
};
use axum::{
    extract::State,   // 앱 상태 추출
    http::StatusCode, // 201 Created 등
    Json,             // JSON 응답
};

/// `GET /api/v1/categories?page=1&limit=10&search=gen&searchField=name&sort=name&order=DESC`
///
/// `limit`은 여기서 최대 100으로 잘린 뒤 쿼리 빌더로 전달됩니다.
/// 빌더가 `None`을 돌려주면 500 응답입니다.
pub async fn list_categories(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ListParams>,
) -> Result<Json<ApiResponse<Page<Category>>>, AppError> {
    // 검증 실패(page=0 등)는 `?`로 바로 400 응답
    let query = params.into_query()?;

    // ok_or_else(): None(조회 실패)을 500 에러로 변환
    let page = db::list_categories(&state.pool, &query)
        .await
        .ok_or_else(|| AppError::Unavailable("Could not retrieve categories".to_string()))?;

    Ok(Json(ApiResponse::ok("Categories retrieved successfully", page)))
}

/// `POST /api/v1/categories` + `{ "name": "...", "description": "..." }` → `201 Created`
pub async fn create_category(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Category>>), AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::BadRequest("Name must not be empty".to_string()));
    }

    if db::find_category_by_name(&state.pool, req.name.trim()).await?.is_some() {
        return Err(AppError::Conflict("Category name already exists".to_string()));
    }

    let category = db::create_category(&state.pool, &req).await?;
    // (StatusCode, Json) 튜플도 IntoResponse를 구현하므로 상태 코드를 바꿔 응답할 수 있습니다
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Category created successfully", category)),
    ))
}

/// `GET /api/v1/categories/{id}`
pub async fn get_category(
    State(state): State<AppState>,
    AppPath(id): AppPath<String>,
) -> Result<Json<ApiResponse<Category>>, AppError> {
    let category = db::get_category(&state.pool, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("Category not found".to_string()))?;

    Ok(Json(ApiResponse::ok("Category retrieved successfully", category)))
}

/// `PATCH /api/v1/categories/{id}` + `{ "name": "...", "description": "..." }`
pub async fn update_category(
    State(state): State<AppState>,
    AppPath(id): AppPath<String>,
    AppJson(req): AppJson<UpdateCategoryRequest>,
) -> Result<Json<ApiResponse<Category>>, AppError> {
    if let Some(name) = &req.name {
        if name.trim().is_empty() {
            return Err(AppError::BadRequest("Name must not be empty".to_string()));
        }
        // 다른 카테고리가 이미 같은 이름을 쓰고 있으면 충돌
        if let Some(existing) = db::find_category_by_name(&state.pool, name.trim()).await? {
            if existing.id != id {
                return Err(AppError::Conflict("Category name already exists".to_string()));
            }
        }
    }

    let category = db::update_category(&state.pool, &id, &req)
        .await?
        .ok_or_else(|| AppError::NotFound("Category not found".to_string()))?;

    Ok(Json(ApiResponse::ok("Category updated successfully", category)))
}

/// `DELETE /api/v1/categories/{id}` → 삭제된 카테고리
pub async fn delete_category(
    State(state): State<AppState>,
    AppPath(id): AppPath<String>,
) -> Result<Json<ApiResponse<Category>>, AppError> {
    let category = db::delete_category(&state.pool, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("Category not found".to_string()))?;

    Ok(Json(ApiResponse::ok("Category deleted successfully", category)))
}
