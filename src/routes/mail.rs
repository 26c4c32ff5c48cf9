//! # 메일 전송 라우트
//!
//! - `POST /api/v1/mail/send` + `{ "to", "subject", "message" }` → `{ "messageId" }`

use crate::{error::AppError, extract::AppJson, models::*, routes::AppState};
use axum::{extract::State, Json};

/// 본문을 검증한 뒤 설정된 전송 방식으로 메일을 보냅니다.
///
/// 검증 실패는 400, 전송 실패는 500 "Could not send the email"입니다.
pub async fn send_mail(
    State(state): State<AppState>,
    AppJson(req): AppJson<SendMailRequest>,
) -> Result<Json<ApiResponse<MailReceipt>>, AppError> {
    req.validate()?;

    let receipt = state.mailer.send(&req).await?;
    tracing::debug!(transport = state.mailer.name(), message_id = %receipt.message_id, "Mail sent");

    Ok(Json(ApiResponse::ok("Mail sent successfully", receipt)))
}
