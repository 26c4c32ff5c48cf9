//! 통합 테스트 공용 도구
//!
//! 실제 마이그레이션을 적용한 인메모리 SQLite 풀과, 실제 라우터에
//! `oneshot`으로 요청을 보내는 `TestApp`을 제공합니다.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use blog_backend::{
    build_router,
    db,
    models::*,
    routes::AppState,
    services::MailTransport,
};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use tower::ServiceExt;

/// 인메모리 DB는 연결마다 따로 생기므로 연결을 하나로 고정하고 닫지 않습니다.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory SQLite");

    blog_backend::migrate(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

pub async fn seed_category(pool: &SqlitePool, name: &str, description: &str) -> Category {
    db::create_category(
        pool,
        &CreateCategoryRequest {
            name: name.to_string(),
            description: Some(description.to_string()),
        },
    )
    .await
    .expect("Failed to seed category")
}

pub async fn seed_post(pool: &SqlitePool, title: &str, content: &str, category_id: &str) -> Post {
    db::create_post(
        pool,
        &CreatePostRequest {
            title: title.to_string(),
            content: Some(content.to_string()),
            category_id: category_id.to_string(),
        },
    )
    .await
    .expect("Failed to seed post")
    .expect("Seed category must exist")
}

pub async fn seed_user(pool: &SqlitePool, username: &str, email: &str, active: bool) -> User {
    let user = db::users::create_user(
        pool,
        &CreateUserRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: "unused".to_string(),
            role: None,
        },
        "$argon2id$test",
    )
    .await
    .expect("Failed to seed user");

    if active {
        return user;
    }

    db::users::update_user(
        pool,
        &user.id,
        &UpdateUserRequest {
            is_active: Some(false),
            ..Default::default()
        },
        None,
    )
    .await
    .expect("Failed to deactivate user")
    .expect("Seeded user must exist")
}

/// 실제 라우터를 감싼 테스트 앱
pub struct TestApp {
    router: Router,
    pub pool: SqlitePool,
    /// 업로드 디렉토리. 테스트가 끝나면 삭제됩니다.
    pub uploads: tempfile::TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        let pool = test_pool().await;
        let uploads = tempfile::tempdir().expect("Failed to create uploads dir");

        let state = AppState {
            pool: pool.clone(),
            uploads_path: uploads.path().to_string_lossy().into_owned(),
            mailer: MailTransport::Log {
                sender: "blog@example.com".to_string(),
            },
        };

        Self {
            router: build_router(state, &["http://localhost:5173".to_string()]),
            pool,
            uploads,
        }
    }

    pub async fn request(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router call failed");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, body)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .expect("Invalid request"),
        )
        .await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request(
            Request::builder()
                .method("DELETE")
                .uri(uri)
                .body(Body::empty())
                .expect("Invalid request"),
        )
        .await
    }

    pub async fn send_json(&self, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .expect("Invalid request"),
        )
        .await
    }

    /// `file` 필드 하나짜리 multipart 요청
    pub async fn upload(&self, uri: &str, file_name: &str, bytes: &[u8]) -> (StatusCode, Value) {
        let boundary = "blogtestboundary";
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        self.request(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={boundary}"),
                )
                .body(Body::from(body))
                .expect("Invalid request"),
        )
        .await
    }
}
