//! # 메일 전송 서비스
//!
//! 실제 전송은 외부 메일 서비스가 담당합니다. 이 모듈은 그 서비스의 HTTP API를
//! 호출하거나, 설정이 없을 때는 로그만 남기는 전송 방식을 제공합니다.
//!
//! - `SendGrid`: SendGrid v3 `mail/send` API에 JSON으로 요청
//! - `Log`: 메일을 보내지 않고 `tracing::info!`로 기록 (개발/테스트용)

use reqwest::header::{HeaderValue, AUTHORIZATION};
use serde_json::{json, Value};
use thiserror::Error;

use crate::config::Config;
use crate::models::{MailReceipt, SendMailRequest};

#[derive(Debug, Error)]
pub enum MailError {
    #[error("mail transport request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("mail transport rejected the message with status {status}")]
    Rejected { status: u16 },

    #[error("invalid mail transport credentials")]
    InvalidCredentials,
}

#[derive(Debug, Clone)]
pub enum MailTransport {
    SendGrid {
        client: reqwest::Client,
        endpoint: String,
        api_key: String,
        sender: String,
    },
    Log {
        sender: String,
    },
}

impl MailTransport {
    /// API 키가 설정되어 있으면 SendGrid, 아니면 로그 전용 전송을 사용합니다.
    pub fn from_config(config: &Config) -> Self {
        match &config.sendgrid_api_key {
            Some(api_key) => MailTransport::SendGrid {
                client: reqwest::Client::new(),
                endpoint: config.sendgrid_endpoint.clone(),
                api_key: api_key.clone(),
                sender: config.mail_sender.clone(),
            },
            None => MailTransport::Log {
                sender: config.mail_sender.clone(),
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MailTransport::SendGrid { .. } => "sendgrid",
            MailTransport::Log { .. } => "log",
        }
    }

    /// 메일을 전송하고 메시지 ID를 반환합니다.
    ///
    /// 요청 본문 검증(`SendMailRequest::validate`)은 호출하는 쪽에서 먼저 합니다.
    pub async fn send(&self, mail: &SendMailRequest) -> Result<MailReceipt, MailError> {
        match self {
            MailTransport::SendGrid {
                client,
                endpoint,
                api_key,
                sender,
            } => {
                let mut auth = HeaderValue::from_str(&format!("Bearer {api_key}"))
                    .map_err(|_| MailError::InvalidCredentials)?;
                auth.set_sensitive(true);

                let response = client
                    .post(endpoint)
                    .header(AUTHORIZATION, auth)
                    .json(&sendgrid_payload(sender, mail))
                    .send()
                    .await?;

                let status = response.status();
                if !status.is_success() {
                    return Err(MailError::Rejected {
                        status: status.as_u16(),
                    });
                }

                // SendGrid는 202 Accepted와 함께 X-Message-Id 헤더를 돌려줍니다
                let message_id = response
                    .headers()
                    .get("x-message-id")
                    .and_then(|value| value.to_str().ok())
                    .map(str::to_string)
                    .unwrap_or_else(|| uuid::Uuid::now_v7().to_string());

                tracing::info!(to = %mail.to, %message_id, "Mail accepted by SendGrid");
                Ok(MailReceipt { message_id })
            }
            MailTransport::Log { sender } => {
                let message_id = uuid::Uuid::now_v7().to_string();
                tracing::info!(
                    from = %sender,
                    to = %mail.to,
                    subject = %mail.subject,
                    %message_id,
                    "Mail transport not configured, message logged only"
                );
                Ok(MailReceipt { message_id })
            }
        }
    }
}

/// SendGrid v3 `mail/send` 요청 본문
fn sendgrid_payload(sender: &str, mail: &SendMailRequest) -> Value {
    json!({
        "personalizations": [{ "to": [{ "email": mail.to.trim() }] }],
        "from": { "email": sender },
        "subject": mail.subject,
        "content": [{ "type": "text/html", "value": mail.message }]
    })
}
