//! # 블로그 백엔드 라이브러리
//!
//! 카테고리, 게시글, 사용자, 메일 전송 REST API를 제공합니다.
//! 실행 파일(`main.rs`)과 통합 테스트(`tests/`)가 같은 라우터를 사용하도록
//! 앱 조립(`build_router`)과 DB 연결(`connect`)을 여기에 둡니다.

pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod models;
pub mod query;
pub mod routes;
pub mod services;

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use routes::*;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};
use std::str::FromStr;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

/// SQLite 연결 풀을 만들고 마이그레이션을 실행합니다.
///
/// 파일 DB가 없으면 새로 만듭니다. 외래 키 제약은 sqlx 기본값(켜짐)을 따릅니다.
pub async fn connect(database_url: &str) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    migrate(&pool).await?;
    Ok(pool)
}

/// `./migrations`의 SQL 파일을 컴파일 타임에 포함해 아직 적용되지 않은 것만 실행합니다.
pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(pool).await
}

/// 허용 출처 목록으로 CORS 레이어를 만듭니다.
///
/// 헤더 값으로 쓸 수 없는 출처는 경고 로그를 남기고 건너뜁니다.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .allow_credentials(true)
}

/// 전체 애플리케이션 라우터
///
/// - `/api/v1/...`: REST API
/// - `/public/...`: 업로드된 파일 (`UPLOADS_PATH`)
pub fn build_router(state: AppState, cors_origins: &[String]) -> Router {
    let uploads = ServeDir::new(&state.uploads_path);

    let api_routes = Router::new()
        .route("/health", get(health_check))
        // 카테고리
        .route("/categories", get(list_categories).post(create_category))
        .route(
            "/categories/{id}",
            get(get_category).patch(update_category).delete(delete_category),
        )
        // 게시글
        .route("/posts", get(list_posts).post(create_post))
        .route("/posts/{id}", get(get_post).put(update_post).delete(delete_post))
        // 사용자
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/{id}",
            get(users::get_user)
                .patch(users::update_user)
                .delete(users::delete_user),
        )
        .route("/users/{id}/profile", post(users::upload_profile))
        // 기본 예제 (고정 경로가 `{param}`보다 우선합니다)
        .route("/basics", get(basics::first_get).post(basics::echo_post))
        .route("/basics/triangle-area", post(basics::triangle))
        .route("/basics/rectangle-area/{width}/{height}", get(basics::rectangle))
        .route(
            "/basics/{param}",
            get(basics::get_with_param)
                .put(basics::echo_put)
                .delete(basics::echo_delete),
        )
        // 메일
        .route("/mail/send", post(mail::send_mail))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .nest_service("/public", uploads)
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
}
