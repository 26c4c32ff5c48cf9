//! # 목록 조회 쿼리 빌더
//!
//! 카테고리, 게시글, 사용자 목록 엔드포인트가 공통으로 사용하는
//! "필터 + 검색 + 정렬 + 페이지네이션" 조회 로직입니다.
//!
//! 하위 모듈:
//! - `params`: 쿼리 문자열 → `ListQuery` (검증, limit 보정)
//! - `descriptor`: 리소스별 컬럼 조회 테이블 (`EntityDescriptor`)
//! - `plan`: 어떤 조건/정렬로 조회할지 결정 (`ListPlan`)
//! - `scan`: `ListPlan` → SQL (`sqlx::QueryBuilder`)
//! - `page`: COUNT + LIMIT/OFFSET 실행 → `Page<T>`

pub mod descriptor;
pub mod page;
pub mod params;
pub mod plan;
pub mod scan;

pub use descriptor::*;
pub use page::*;
pub use params::*;
pub use plan::*;

use sqlx::{sqlite::SqliteRow, FromRow, SqlitePool};

use crate::error::QueryError;

/// 목록을 조회합니다. 실패하면 로그를 남기고 `None`을 반환합니다.
///
/// 저장소 에러나 쿼리 구성 에러(모르는 정렬 필드 등)는 이 함수 밖으로 전파되지 않습니다.
/// 호출하는 엔드포인트는 `None`을 HTTP 500으로 바꿔야 합니다.
pub async fn find_page<T>(
    pool: &SqlitePool,
    descriptor: &'static EntityDescriptor,
    query: &ListQuery,
    filters: &[Filter],
) -> Option<Page<T>>
where
    T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
{
    // async 블록 안에서는 `?`로 에러를 모으고, 밖에서 한 번에 None으로 바꿉니다
    let result: Result<Page<T>, QueryError> = async {
        let plan = ListPlan::build(descriptor, query, filters)?;
        paginate(pool, &plan).await
    }
    .await;

    match result {
        Ok(page) => Some(page),
        Err(e) => {
            // entity 필드로 어떤 리소스 조회가 실패했는지 구분합니다
            tracing::error!(entity = descriptor.name, "Error retrieving {}: {}", descriptor.name, e);
            None
        }
    }
}
