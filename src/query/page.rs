//! # 페이지네이션
//!
//! 조건에 맞는 전체 개수를 센 뒤 요청한 페이지만 잘라서 `Page<T>`로 돌려줍니다.
//!
//! 응답 예:
//! ```json
//! {
//!   "items": [ ... ],
//!   "meta": { "totalItems": 42, "itemCount": 10, "itemsPerPage": 10, "totalPages": 5, "currentPage": 1 }
//! }
//! ```

use serde::Serialize;
use sqlx::{sqlite::SqliteRow, FromRow, SqlitePool};

use super::plan::ListPlan;
use super::scan;
use crate::error::QueryError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total_items: u64,
    /// 이 페이지에 실제로 담긴 항목 수 (항상 `items_per_page` 이하)
    pub item_count: u64,
    pub items_per_page: u64,
    /// `ceil(total_items / items_per_page)`
    pub total_pages: u64,
    pub current_page: u64,
}

impl PageMeta {
    pub fn new(total_items: u64, item_count: u64, items_per_page: u32, current_page: u32) -> Self {
        let items_per_page = u64::from(items_per_page.max(1));
        Self {
            total_items,
            item_count,
            items_per_page,
            total_pages: total_items.div_ceil(items_per_page),
            current_page: u64::from(current_page),
        }
    }
}

/// 목록 엔드포인트가 반환하는 단위: 한 페이지 분량의 항목과 개수 정보
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

impl<T> Page<T> {
    /// 메타 정보는 그대로 두고 항목 타입만 바꿉니다 (예: 조인 행 → 응답 모델)
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}

/// 계획대로 COUNT 쿼리와 페이지 쿼리를 실행합니다.
pub async fn paginate<T>(pool: &SqlitePool, plan: &ListPlan) -> Result<Page<T>, QueryError>
where
    T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
{
    // ── 1단계: 조건에 맞는 전체 개수 ──
    let mut count = scan::count_query(plan);
    tracing::debug!(sql = count.sql(), "count {}", plan.descriptor.name);
    // build_query_scalar(): 첫 컬럼 하나(COUNT(*))만 꺼내는 쿼리. SQLite 정수는 i64
    let total: i64 = count.build_query_scalar().fetch_one(pool).await?;

    // ── 2단계: 요청한 페이지의 행 ──
    let mut select = scan::page_query(plan);
    tracing::debug!(sql = select.sql(), "select {}", plan.descriptor.name);
    // build_query_as(): 각 행을 FromRow로 T에 매핑
    let items: Vec<T> = select.build_query_as().fetch_all(pool).await?;

    let meta = PageMeta::new(
        u64::try_from(total).unwrap_or_default(),
        items.len() as u64,
        plan.limit,
        plan.page,
    );
    Ok(Page { items, meta })
}
