//! # 기본 예제 엔드포인트
//!
//! 요청 방식별(GET/POST/PUT/DELETE) 추출자 사용 예와 간단한 넓이 계산입니다.
//! 모든 응답은 `{ service, controller, function, ... }` 형태의 JSON입니다.

use crate::extract::{AppJson, AppPath};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

const SERVICE: &str = "blog-backend";

#[derive(Debug, Deserialize)]
pub struct TriangleRequest {
    pub base: f64,
    pub height: f64,
}

pub fn triangle_area(base: f64, height: f64) -> f64 {
    base * height / 2.0
}

pub fn rectangle_area(width: f64, height: f64) -> f64 {
    width * height
}

/// `GET /api/v1/basics`
pub async fn first_get() -> Json<Value> {
    Json(json!({
        "service": SERVICE,
        "controller": "/basics",
        "function": "GET example"
    }))
}

/// `GET /api/v1/basics/{param}`
pub async fn get_with_param(AppPath(param): AppPath<String>) -> Json<Value> {
    Json(json!({
        "service": SERVICE,
        "controller": "/basics",
        "function": "GET with path parameter",
        "receivedParam": param
    }))
}

/// `POST /api/v1/basics`: 받은 본문을 그대로 돌려줍니다.
pub async fn echo_post(AppJson(body): AppJson<Value>) -> Json<Value> {
    Json(json!({
        "service": SERVICE,
        "controller": "/basics POST",
        "function": "POST example",
        "body": body
    }))
}

/// `PUT /api/v1/basics/{param}`
pub async fn echo_put(
    AppPath(param): AppPath<String>,
    AppJson(body): AppJson<Value>,
) -> Json<Value> {
    Json(json!({
        "service": SERVICE,
        "controller": "/basics PUT",
        "function": "PUT example",
        "body": body,
        "param": param
    }))
}

/// `DELETE /api/v1/basics/{param}`
pub async fn echo_delete(AppPath(param): AppPath<String>) -> Json<Value> {
    Json(json!({
        "service": SERVICE,
        "controller": "/basics DELETE",
        "function": "DELETE example",
        "param": param
    }))
}

/// `POST /api/v1/basics/triangle-area` + `{ "base": 4, "height": 3 }` → `result: 6`
pub async fn triangle(AppJson(req): AppJson<TriangleRequest>) -> Json<Value> {
    Json(json!({
        "service": SERVICE,
        "controller": "/basics/triangle-area",
        "function": "triangle area",
        "base": req.base,
        "height": req.height,
        "result": triangle_area(req.base, req.height)
    }))
}

/// `GET /api/v1/basics/rectangle-area/{width}/{height}`
///
/// 경로 값이 숫자가 아니면 `Path` 추출자가 400을 반환합니다.
pub async fn rectangle(AppPath((width, height)): AppPath<(f64, f64)>) -> Json<Value> {
    Json(json!({
        "service": SERVICE,
        "controller": "/basics/rectangle-area",
        "function": "rectangle area",
        "width": width,
        "height": height,
        "result": rectangle_area(width, height)
    }))
}
