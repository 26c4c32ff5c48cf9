//! # 헬스체크(Health Check) 핸들러
//!
//! ## 엔드포인트
//! - `GET /api/v1/health` → `{ "status": "ok", "service": "blog-backend" }`
//!
//! DB나 메일 전송 상태는 확인하지 않습니다. 프로세스가 요청을 받을 수 있는지만 봅니다.

use axum::Json;
use serde_json::{json, Value};

/// `GET /health`: 고정된 JSON을 반환하며 실패하지 않습니다.
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "blog-backend"
    }))
}
