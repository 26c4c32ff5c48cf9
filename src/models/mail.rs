//! # 메일 전송 모델
//!
//! - `SendMailRequest`: `POST /api/v1/mail/send` 요청 본문
//! - `MailReceipt`: 전송 결과 (`{ "messageId": "..." }`)

use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Clone, Deserialize)]
pub struct SendMailRequest {
    /// 수신자 이메일 주소
    pub to: String,
    pub subject: String,
    /// HTML 본문
    pub message: String,
}

impl SendMailRequest {
    /// 전송 전에 요청 본문을 검증합니다.
    pub fn validate(&self) -> Result<(), AppError> {
        let to = self.to.trim();
        // 최소한의 형식 검사: local@domain
        let valid_address = matches!(
            to.split_once('@'),
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !to.contains(char::is_whitespace)
        );
        if !valid_address {
            return Err(AppError::BadRequest("Invalid recipient email address".to_string()));
        }
        if self.subject.trim().is_empty() {
            return Err(AppError::BadRequest("Subject must not be empty".to_string()));
        }
        if self.message.trim().is_empty() {
            return Err(AppError::BadRequest("Message must not be empty".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MailReceipt {
    pub message_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(to: &str, subject: &str, message: &str) -> SendMailRequest {
        SendMailRequest {
            to: to.to_string(),
            subject: subject.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn accepts_a_complete_request() {
        assert!(request("reader@example.com", "Hi", "<p>Hello</p>").validate().is_ok());
    }

    #[test]
    fn rejects_bad_recipients() {
        for to in ["", "reader", "@example.com", "reader@", "a b@example.com"] {
            assert!(
                matches!(request(to, "Hi", "Body").validate(), Err(AppError::BadRequest(_))),
                "{to:?} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_empty_subject_or_message() {
        assert!(request("reader@example.com", " ", "Body").validate().is_err());
        assert!(request("reader@example.com", "Hi", "").validate().is_err());
    }
}
