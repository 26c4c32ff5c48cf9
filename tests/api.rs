//! HTTP 레벨 통합 테스트
//!
//! 실제 라우터(`build_router`)에 `oneshot`으로 요청을 보내 상태 코드와 응답 본문을 확인합니다.

mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::*;
use serde_json::json;

#[tokio::test]
async fn health_reports_ok() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/v1/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok", "service": "blog-backend" }));
}

#[tokio::test]
async fn category_crud_round_trip() {
    let app = TestApp::new().await;

    let (status, created) = app
        .send_json(
            "POST",
            "/api/v1/categories",
            json!({ "name": "Rust", "description": "Systems programming" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["success"], true);
    assert_eq!(created["message"], "Category created successfully");
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = app.get(&format!("/api/v1/categories/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Rust");
    assert!(body["data"]["createdAt"].is_string());

    let (status, body) = app
        .send_json(
            "PATCH",
            &format!("/api/v1/categories/{id}"),
            json!({ "description": "Ownership and borrowing" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Rust");
    assert_eq!(body["data"]["description"], "Ownership and borrowing");

    let (status, body) = app.delete(&format!("/api/v1/categories/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], id.as_str());

    let (status, body) = app.get(&format!("/api/v1/categories/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "not_found");
}

#[tokio::test]
async fn duplicate_category_name_conflicts() {
    let app = TestApp::new().await;
    seed_category(&app.pool, "Rust", "").await;

    let (status, body) = app
        .send_json("POST", "/api/v1/categories", json!({ "name": "Rust" }))
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn list_envelope_and_limit_cap() {
    let app = TestApp::new().await;
    seed_category(&app.pool, "Rust", "").await;

    let (status, body) = app.get("/api/v1/categories?limit=1000").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Categories retrieved successfully");
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 1);
    assert_eq!(
        body["data"]["meta"],
        json!({
            "totalItems": 1,
            "itemCount": 1,
            "itemsPerPage": 100,
            "totalPages": 1,
            "currentPage": 1
        })
    );
}

#[tokio::test]
async fn list_rejects_page_or_limit_below_one() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/v1/posts?page=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "page must not be less than 1");

    let (status, _) = app.get("/api/v1/users?limit=-5").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_sort_field_is_a_server_error() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/v1/posts?sort=password").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["message"], "Could not retrieve posts");
}

#[tokio::test]
async fn users_list_validates_is_active() {
    let app = TestApp::new().await;
    seed_user(&app.pool, "kim", "kim@example.com", true).await;
    seed_user(&app.pool, "lee", "lee@example.com", false).await;

    let (status, _) = app.get("/api/v1/users?isActive=yes").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app.get("/api/v1/users?isActive=false&sort=username").await;
    assert_eq!(status, StatusCode::OK);
    let items = body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["username"], "lee");
    assert_eq!(items[0]["isActive"], false);
    assert!(items[0].get("passwordHash").is_none());
}

#[tokio::test]
async fn post_needs_an_existing_category() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send_json(
            "POST",
            "/api/v1/posts",
            json!({ "title": "Orphan", "content": "", "categoryId": "missing" }),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body["error"]["message"],
        "Category not found or error creating post"
    );
}

#[tokio::test]
async fn post_lifecycle_includes_category() {
    let app = TestApp::new().await;
    let rust = seed_category(&app.pool, "Rust", "").await;

    let (status, created) = app
        .send_json(
            "POST",
            "/api/v1/posts",
            json!({ "title": "Borrowing", "content": "lifetimes", "categoryId": rust.id }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["data"]["category"]["name"], "Rust");
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = app
        .send_json(
            "PUT",
            &format!("/api/v1/posts/{id}"),
            json!({ "title": "Borrowing, revisited" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "Borrowing, revisited");
    assert_eq!(body["data"]["content"], "lifetimes");

    let (status, body) = app
        .send_json(
            "PUT",
            &format!("/api/v1/posts/{id}"),
            json!({ "categoryId": "missing" }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "Post not found or category not valid");

    let (status, body) = app.delete(&format!("/api/v1/posts/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], id.as_str());

    let (status, _) = app.delete(&format!("/api/v1/posts/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn user_creation_hashes_and_rejects_duplicates() {
    let app = TestApp::new().await;
    let payload = json!({
        "username": "kim",
        "email": "kim@example.com",
        "password": "s3cret!"
    });

    let (status, body) = app.send_json("POST", "/api/v1/users", payload.clone()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["role"], "user");
    assert_eq!(body["data"]["isActive"], true);
    assert!(body["data"].get("password").is_none());

    let id = body["data"]["id"].as_str().unwrap();
    let stored = blog_backend::db::users::find_by_id(&app.pool, id)
        .await
        .unwrap()
        .unwrap();
    assert!(stored.password_hash.starts_with("$argon2id$"));

    let (status, _) = app.send_json("POST", "/api/v1/users", payload).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app
        .send_json(
            "POST",
            "/api/v1/users",
            json!({ "username": "lee", "email": "not-an-email", "password": "x" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn user_update_and_delete() {
    let app = TestApp::new().await;
    let kim = seed_user(&app.pool, "kim", "kim@example.com", true).await;
    seed_user(&app.pool, "lee", "lee@example.com", true).await;

    let (status, _) = app
        .send_json(
            "PATCH",
            &format!("/api/v1/users/{}", kim.id),
            json!({ "email": "lee@example.com" }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = app
        .send_json(
            "PATCH",
            &format!("/api/v1/users/{}", kim.id),
            json!({ "role": "admin", "isActive": false }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["role"], "admin");
    assert_eq!(body["data"]["isActive"], false);

    let (status, body) = app.delete(&format!("/api/v1/users/{}", kim.id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], "kim");

    let (status, _) = app.get(&format!("/api/v1/users/{}", kim.id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn profile_upload_stores_image_and_serves_it() {
    let app = TestApp::new().await;
    let kim = seed_user(&app.pool, "kim", "kim@example.com", true).await;

    let (status, body) = app
        .upload(&format!("/api/v1/users/{}/profile", kim.id), "me.png", b"\x89PNG")
        .await;
    assert_eq!(status, StatusCode::OK);
    let profile = body["data"]["profile"].as_str().unwrap().to_string();
    assert!(profile.ends_with(".png"));

    let (status, _) = app.get(&format!("/public/profiles/{profile}")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn profile_upload_rejects_bad_input() {
    let app = TestApp::new().await;
    let kim = seed_user(&app.pool, "kim", "kim@example.com", true).await;

    let (status, _) = app
        .upload(&format!("/api/v1/users/{}/profile", kim.id), "notes.txt", b"hello")
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .upload("/api/v1/users/missing/profile", "me.png", b"\x89PNG")
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn basics_endpoints_echo_and_compute() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/v1/basics").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["service"], "blog-backend");

    let (_, body) = app.get("/api/v1/basics/hello").await;
    assert_eq!(body["receivedParam"], "hello");

    let (_, body) = app
        .send_json("POST", "/api/v1/basics", json!({ "any": [1, 2] }))
        .await;
    assert_eq!(body["body"], json!({ "any": [1, 2] }));

    let (_, body) = app
        .send_json("PUT", "/api/v1/basics/7", json!({ "x": true }))
        .await;
    assert_eq!(body["param"], "7");
    assert_eq!(body["body"]["x"], true);

    let (_, body) = app.delete("/api/v1/basics/7").await;
    assert_eq!(body["param"], "7");

    let (status, body) = app
        .send_json(
            "POST",
            "/api/v1/basics/triangle-area",
            json!({ "base": 4, "height": 3 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"], 6.0);

    let (status, body) = app.get("/api/v1/basics/rectangle-area/4/2.5").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"], 10.0);

    let (status, _) = app.get("/api/v1/basics/rectangle-area/four/2").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn mail_send_validates_then_uses_transport() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send_json(
            "POST",
            "/api/v1/mail/send",
            json!({ "to": "reader@example.com", "subject": "Hi", "message": "<p>Hello</p>" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["messageId"].as_str().is_some_and(|id| !id.is_empty()));

    let (status, _) = app
        .send_json(
            "POST",
            "/api/v1/mail/send",
            json!({ "to": "nobody", "subject": "Hi", "message": "Hello" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_query_string_uses_error_envelope() {
    let app = TestApp::new().await;

    for uri in [
        "/api/v1/categories?page=abc",
        "/api/v1/posts?order=sideways",
        "/api/v1/users?limit=ten",
    ] {
        let (status, body) = app.get(uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["success"], false, "{uri}");
        assert_eq!(body["error"]["code"], "bad_request", "{uri}");
        assert!(body["error"]["message"].is_string(), "{uri}");
    }
}

#[tokio::test]
async fn malformed_body_and_path_use_error_envelope() {
    let app = TestApp::new().await;

    // 잘못된 JSON 문법
    let (status, body) = app
        .request(
            Request::builder()
                .method("POST")
                .uri("/api/v1/categories")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{\"name\":"))
                .unwrap(),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    // 필수 필드 누락
    let (status, body) = app
        .send_json("POST", "/api/v1/posts", json!({ "content": "no title" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "bad_request");

    // 숫자가 아닌 경로 값
    let (status, body) = app.get("/api/v1/basics/rectangle-area/four/2").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    // multipart가 아닌 업로드 요청
    let (status, body) = app
        .send_json("POST", "/api/v1/users/anyone/profile", json!({}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn new_profile_image_replaces_the_previous_file() {
    let app = TestApp::new().await;
    let kim = seed_user(&app.pool, "kim", "kim@example.com", true).await;
    let uri = format!("/api/v1/users/{}/profile", kim.id);
    let profiles = app.uploads.path().join("profiles");

    let (_, first) = app.upload(&uri, "first.png", b"\x89PNG-1").await;
    let first = first["data"]["profile"].as_str().unwrap().to_string();
    assert!(profiles.join(&first).exists());

    let (status, second) = app.upload(&uri, "second.jpg", b"\xFF\xD8-2").await;
    assert_eq!(status, StatusCode::OK);
    let second = second["data"]["profile"].as_str().unwrap().to_string();

    assert!(!profiles.join(&first).exists());
    assert!(profiles.join(&second).exists());

    // 사용자를 삭제하면 남은 이미지도 지워집니다
    let (status, _) = app.delete(&format!("/api/v1/users/{}", kim.id)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!profiles.join(&second).exists());
}
