//! # 에러 처리 모듈
//!
//! 애플리케이션에서 발생할 수 있는 에러 타입을 정의합니다.
//!
//! - `AppError`: 핸들러가 반환하는 에러. `IntoResponse`로 HTTP 응답이 됩니다.
//! - `QueryError`: 목록 조회 쿼리 빌더 내부 에러. 빌더 경계 밖으로는 나가지 않고
//!   로그만 남긴 뒤 `None`으로 바뀝니다 (`query::find_page` 참고).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::services::mail::MailError;

/// 애플리케이션에서 발생할 수 있는 모든 에러 종류
///
/// 각 variant는 적절한 HTTP 상태 코드와 메시지로 변환됩니다.
/// 핸들러에서 `Result<T, AppError>`를 반환하면
/// Axum이 `IntoResponse`를 호출하여 HTTP 응답으로 변환합니다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 요청한 리소스를 찾을 수 없음 (HTTP 404)
    #[error("{0}")]
    NotFound(String),

    /// 잘못된 요청 (HTTP 400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// 리소스 충돌 (HTTP 409): 중복된 사용자명, 이메일, 카테고리 이름
    #[error("Conflict: {0}")]
    Conflict(String),

    /// 목록 조회 실패 (HTTP 500)
    ///
    /// 쿼리 빌더가 `None`을 돌려준 경우입니다. 원인은 이미 로그에 남아 있으므로
    /// 클라이언트에는 리소스별 메시지("Could not retrieve posts")만 보냅니다.
    #[error("{0}")]
    Unavailable(String),

    /// 서버 내부 오류 (HTTP 500)
    #[error("Internal error: {0}")]
    Internal(String),

    /// 데이터베이스 오류 (HTTP 500)
    /// `?` 연산자로 sqlx::Error가 자동 변환됩니다 (아래 `From` 구현 참고).
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    /// 파일 입출력 오류 (HTTP 500)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// 메일 전송 실패 (HTTP 500)
    #[error("Mail error: {0}")]
    Mail(#[from] MailError),
}

/// sqlx::Error → AppError
///
/// UNIQUE 제약 위반은 409로 바꿉니다. 라우트의 중복 검사와 INSERT/UPDATE 사이에
/// 다른 요청이 같은 값을 먼저 저장한 경우입니다.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> Self {
        match &error {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                tracing::debug!("Unique constraint violated: {}", db.message());
                AppError::Conflict("Resource already exists".to_string())
            }
            _ => AppError::Database(error),
        }
    }
}

impl IntoResponse for AppError {
    /// AppError를 HTTP 응답으로 변환합니다.
    ///
    /// 내부 에러(Database, IO, Internal, Mail)는 실제 내용을 로그에만 기록하고,
    /// 클라이언트에는 일반적인 메시지만 반환합니다.
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::NotFound(ref msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            AppError::BadRequest(ref msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", msg.clone())
            }
            AppError::Conflict(ref msg) => (StatusCode::CONFLICT, "conflict", msg.clone()),
            AppError::Unavailable(ref msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "unavailable", msg.clone())
            }
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
            AppError::Database(ref e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database_error",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Io(ref e) => {
                tracing::error!("IO error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "io_error",
                    "An IO error occurred".to_string(),
                )
            }
            AppError::Mail(ref e) => {
                tracing::error!("Mail error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "mail_error",
                    "Could not send the email".to_string(),
                )
            }
        };

        // 결과: { "success": false, "error": { "code": "not_found", "message": "Post not found" } }
        let body = Json(json!({
            "success": false,
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

/// 목록 조회 쿼리를 만들거나 실행하는 도중 발생하는 에러
#[derive(Debug, Error)]
pub enum QueryError {
    /// 정렬 기준으로 알 수 없는 필드가 지정됨
    #[error("Unknown sort field: {0}")]
    UnknownSortField(String),

    /// 엔티티가 지원하지 않는 동등 조건 필터
    #[error("Unknown filter field: {0}")]
    UnknownFilterField(String),

    /// 저장소(SQLite) 에러
    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),
}
