//! # 성공 응답 래퍼
//!
//! 모든 성공 응답은 같은 모양으로 감쌉니다:
//! `{ "success": true, "message": "Posts retrieved successfully", "data": ... }`
//!
//! 에러 응답은 `AppError::into_response`가 만듭니다.

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
        }
    }
}
