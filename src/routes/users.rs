//! # 사용자 API 라우트 핸들러
//!
//! ## 엔드포인트
//! - `GET    /api/v1/users?isActive=true`   → 목록 (활성 여부 필터 + 검색/정렬/페이지네이션)
//! - `POST   /api/v1/users`                 → 새 사용자 생성 (비밀번호 Argon2 해싱)
//! - `GET    /api/v1/users/{id}`            → 단건 조회
//! - `PATCH  /api/v1/users/{id}`            → 부분 수정
//! - `DELETE /api/v1/users/{id}`            → 삭제 (삭제된 사용자 반환)
//! - `POST   /api/v1/users/{id}/profile`    → 프로필 이미지 업로드 (multipart `file` 필드)
//!
//! 응답에는 `password_hash`가 포함되지 않습니다 (`#[serde(skip_serializing)]`).

use crate::{
    db,
    error::AppError,
    extract::{AppJson, AppPath, AppQuery},
    models::*,
    query::{ListParams, Page},
    routes::AppState,
    services,
};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

/// 사용자 목록 전용 쿼리 파라미터
///
/// `ListParams`와 같은 쿼리 문자열에서 별도로 추출합니다.
/// 값은 문자열 그대로 받고 `parse_is_active`에서 검증합니다.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFilterParams {
    pub is_active: Option<String>,
}

/// `isActive` 값을 해석합니다. `"true"` / `"false"`만 허용하고 나머지는 400입니다.
pub fn parse_is_active(raw: Option<&str>) -> Result<Option<bool>, AppError> {
    match raw {
        None => Ok(None),
        Some("true") => Ok(Some(true)),
        Some("false") => Ok(Some(false)),
        Some(other) => Err(AppError::BadRequest(format!(
            "isActive must be 'true' or 'false', got '{other}'"
        ))),
    }
}

/// 비밀번호를 Argon2id로 해싱합니다.
fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))
}

fn validate_email(email: &str) -> Result<(), AppError> {
    match email.trim().split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(AppError::BadRequest("Email must be a valid address".to_string())),
    }
}

/// 다른 사용자가 같은 username/email을 쓰고 있는지 확인합니다.
///
/// `exclude_id`는 수정 중인 사용자 자신입니다.
async fn ensure_unique(
    state: &AppState,
    username: Option<&str>,
    email: Option<&str>,
    exclude_id: Option<&str>,
) -> Result<(), AppError> {
    let is_other = |user: &User| Some(user.id.as_str()) != exclude_id;

    if let Some(username) = username {
        if let Some(user) = db::users::find_by_username(&state.pool, username.trim()).await? {
            if is_other(&user) {
                return Err(AppError::Conflict("Username already exists".to_string()));
            }
        }
    }
    if let Some(email) = email {
        if let Some(user) = db::users::find_by_email(&state.pool, email.trim()).await? {
            if is_other(&user) {
                return Err(AppError::Conflict("Email already exists".to_string()));
            }
        }
    }
    Ok(())
}

/// `GET /api/v1/users?isActive=true&search=kim&sort=username`
///
/// `Query` 추출자를 두 번 사용해 공통 목록 파라미터와 사용자 필터를 각각 꺼냅니다.
pub async fn list_users(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ListParams>,
    AppQuery(filter): AppQuery<UserFilterParams>,
) -> Result<Json<ApiResponse<Page<User>>>, AppError> {
    let query = params.into_query()?;
    let is_active = parse_is_active(filter.is_active.as_deref())?;

    let page = db::list_users(&state.pool, &query, is_active)
        .await
        .ok_or_else(|| AppError::Unavailable("Could not retrieve users".to_string()))?;

    Ok(Json(ApiResponse::ok("Users retrieved successfully", page)))
}

/// `POST /api/v1/users` + `{ "username", "email", "password", "role"? }` → `201 Created`
pub async fn create_user(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<User>>), AppError> {
    if req.username.trim().is_empty() {
        return Err(AppError::BadRequest("Username must not be empty".to_string()));
    }
    if req.password.is_empty() {
        return Err(AppError::BadRequest("Password must not be empty".to_string()));
    }
    validate_email(&req.email)?;

    ensure_unique(&state, Some(&req.username), Some(&req.email), None).await?;

    let password_hash = hash_password(&req.password)?;
    let user = db::users::create_user(&state.pool, &req, &password_hash).await?;

    tracing::info!(user_id = %user.id, username = %user.username, "User created");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("User created successfully", user)),
    ))
}

/// `GET /api/v1/users/{id}`
pub async fn get_user(
    State(state): State<AppState>,
    AppPath(id): AppPath<String>,
) -> Result<Json<ApiResponse<User>>, AppError> {
    let user = db::users::find_by_id(&state.pool, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(ApiResponse::ok("User retrieved successfully", user)))
}

/// `PATCH /api/v1/users/{id}`
///
/// 비밀번호가 포함되면 새로 해싱해서 저장합니다.
pub async fn update_user(
    State(state): State<AppState>,
    AppPath(id): AppPath<String>,
    AppJson(req): AppJson<UpdateUserRequest>,
) -> Result<Json<ApiResponse<User>>, AppError> {
    if matches!(&req.username, Some(username) if username.trim().is_empty()) {
        return Err(AppError::BadRequest("Username must not be empty".to_string()));
    }
    if let Some(email) = &req.email {
        validate_email(email)?;
    }

    ensure_unique(&state, req.username.as_deref(), req.email.as_deref(), Some(&id)).await?;

    let password_hash = match req.password.as_deref() {
        Some("") => {
            return Err(AppError::BadRequest("Password must not be empty".to_string()));
        }
        Some(password) => Some(hash_password(password)?),
        None => None,
    };

    let user = db::users::update_user(&state.pool, &id, &req, password_hash.as_deref())
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(ApiResponse::ok("User updated successfully", user)))
}

/// `DELETE /api/v1/users/{id}` → 삭제된 사용자
pub async fn delete_user(
    State(state): State<AppState>,
    AppPath(id): AppPath<String>,
) -> Result<Json<ApiResponse<User>>, AppError> {
    let user = db::users::delete_user(&state.pool, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    if let Some(profile) = user.profile.as_deref() {
        services::remove_profile_image(&state.uploads_path, profile).await;
    }

    tracing::info!(user_id = %user.id, "User deleted");
    Ok(Json(ApiResponse::ok("User deleted successfully", user)))
}

/// `POST /api/v1/users/{id}/profile` (multipart/form-data, 필드 이름 `file`)
///
/// 처리 순서:
/// 1. `file` 필드를 읽음 (없거나 비어 있으면 400)
/// 2. 확장자 검사 (이미지가 아니면 400)
/// 3. 사용자 존재 확인 (없으면 404, 파일은 저장하지 않음)
/// 4. 파일 저장 후 `profile` 컬럼 갱신 (실패하면 새 파일 삭제)
/// 5. 이전 프로필 이미지 삭제
pub async fn upload_profile(
    State(state): State<AppState>,
    AppPath(id): AppPath<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ApiResponse<User>>, AppError> {
    // Result<추출자, 거부>로 받으면 multipart가 아닌 요청도 JSON 에러 응답이 됩니다
    let mut multipart = multipart.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        upload = Some((file_name, bytes));
        break;
    }

    let (file_name, bytes) = upload
        .filter(|(_, bytes)| !bytes.is_empty())
        .ok_or_else(|| AppError::BadRequest("No file uploaded".to_string()))?;

    let extension = services::image_extension(&file_name).ok_or_else(|| {
        AppError::BadRequest("Only png, jpg, jpeg, gif or webp images are allowed".to_string())
    })?;

    let Some(previous) = db::users::find_by_id(&state.pool, &id).await? else {
        return Err(AppError::NotFound("User not found".to_string()));
    };

    let stored = services::save_profile_image(&state.uploads_path, &extension, &bytes).await?;

    // 저장과 갱신 사이에 사용자가 삭제되었거나 갱신이 실패하면 방금 쓴 파일을 지웁니다
    let user = match db::users::update_profile(&state.pool, &id, &stored).await {
        Ok(Some(user)) => user,
        other => {
            services::remove_profile_image(&state.uploads_path, &stored).await;
            return Err(other
                .err()
                .unwrap_or_else(|| AppError::NotFound("User not found".to_string())));
        }
    };

    // 이전 이미지는 더 이상 참조되지 않습니다
    if let Some(old) = previous.profile.as_deref() {
        services::remove_profile_image(&state.uploads_path, old).await;
    }

    tracing::info!(user_id = %user.id, profile = %stored, "Profile image uploaded");
    Ok(Json(ApiResponse::ok("Profile image uploaded successfully", user)))
}
