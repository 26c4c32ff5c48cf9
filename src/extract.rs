//! # 요청 추출자(Extractor)
//!
//! axum 기본 추출자(`Json`, `Query`, `Path`)는 입력이 잘못되면 text/plain 응답을 직접 돌려줍니다.
//! 여기 있는 래퍼들은 같은 추출자를 쓰되, 거부(rejection)를 `AppError::BadRequest`로 바꿔서
//! 모든 에러가 `{ "success": false, "error": { "code", "message" } }` 형태로 나가게 합니다.
//!
//! ```text
//! GET /api/v1/categories?page=abc
//!   Query<ListParams> 실패 → QueryRejection → AppError::BadRequest → 400 JSON
//! ```
//!
//! 핸들러에서는 기본 추출자와 똑같이 구조 분해해서 사용합니다:
//! `AppQuery(params): AppQuery<ListParams>`

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        FromRequest, FromRequestParts,
    },
    Json,
};

use crate::error::AppError;

/// JSON 요청 본문 (`axum::Json` + JSON 에러 응답)
///
/// 응답 쪽은 그대로 `axum::Json`을 사용합니다.
// #[derive(FromRequest)]: "macros" feature가 제공하는 derive 매크로.
// via(Json): 실제 추출은 axum::Json에 맡기고, rejection(AppError): 실패 타입만 바꿉니다.
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// 쿼리 문자열 (`axum::extract::Query` + JSON 에러 응답)
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);

/// 경로 파라미터 (`axum::extract::Path` + JSON 에러 응답)
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);

// ── 거부 → AppError 변환 ──
// body_text(): axum이 원래 응답 본문으로 쓰려던 설명 문자열
// (예: "Failed to deserialize query string: page: invalid digit found in string")

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}
