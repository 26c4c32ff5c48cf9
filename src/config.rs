//! # 애플리케이션 설정(Configuration) 모듈
//!
//! 환경변수에서 서버 설정값을 읽어오는 모듈입니다.
//! `.env` 파일이나 시스템 환경변수에서 값을 가져옵니다.
//!
//! 설정 항목:
//! - `DATABASE_URL`: SQLite 데이터베이스 경로 (필수)
//! - `HOST`, `PORT`: 서버 바인딩 주소와 포트
//! - `UPLOADS_PATH`: 업로드 파일 저장 디렉토리 (`/public`으로 서빙)
//! - `CORS_ORIGINS`: 쉼표로 구분한 허용 출처 목록
//! - `MAIL_SENDER`: 발신자 주소
//! - `SENDGRID_API_KEY`, `SENDGRID_ENDPOINT`: 외부 메일 전송 서비스 설정

use std::env;

use thiserror::Error;

/// 기본 CORS 허용 출처 (Vite 개발 서버, 로컬 프론트엔드)
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:5173,http://localhost:3000";

/// SendGrid v3 메일 전송 API
pub const DEFAULT_SENDGRID_ENDPOINT: &str = "https://api.sendgrid.com/v3/mail/send";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
}

/// 애플리케이션 전체 설정을 담는 구조체
///
/// 서버 시작 시 한 번 읽어온 후 애플리케이션 전체에서 공유됩니다.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite 데이터베이스 URL (예: "sqlite:data/blog.db?mode=rwc")
    pub database_url: String,
    /// 서버가 바인딩할 호스트 주소 (기본값: "0.0.0.0")
    pub host: String,
    /// 서버 포트 번호 (기본값: 3000)
    pub port: u16,
    /// 업로드 파일 저장 디렉토리 (기본값: "public")
    pub uploads_path: String,
    /// CORS 허용 출처 목록
    pub cors_origins: Vec<String>,
    /// 메일 발신자 주소
    pub mail_sender: String,
    /// SendGrid API 키. 없으면 로그 전용 메일 전송을 사용합니다.
    pub sendgrid_api_key: Option<String>,
    pub sendgrid_endpoint: String,
}

impl Config {
    /// 환경변수에서 설정값을 읽어 Config 인스턴스를 생성합니다.
    ///
    /// # 에러
    /// `DATABASE_URL`은 필수이며, 없으면 에러가 발생합니다.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 키 → 값 조회 함수로부터 설정을 만듭니다.
    ///
    /// 프로세스 환경변수를 건드리지 않고 테스트할 수 있도록 분리했습니다.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // 빈 문자열은 "설정되지 않음"으로 취급합니다
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Ok(Self {
            database_url: get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?,
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            // 파싱 실패 시 기본값 3000
            port: get("PORT")
                .and_then(|port| port.trim().parse().ok())
                .unwrap_or(3000),
            uploads_path: get("UPLOADS_PATH").unwrap_or_else(|| "public".to_string()),
            cors_origins: get("CORS_ORIGINS")
                .unwrap_or_else(|| DEFAULT_CORS_ORIGINS.to_string())
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(str::to_string)
                .collect(),
            mail_sender: get("MAIL_SENDER").unwrap_or_else(|| "no-reply@localhost".to_string()),
            sendgrid_api_key: get("SENDGRID_API_KEY"),
            sendgrid_endpoint: get("SENDGRID_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_SENDGRID_ENDPOINT.to_string()),
        })
    }
}
