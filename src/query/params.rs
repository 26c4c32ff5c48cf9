//! # 목록 조회 파라미터
//!
//! `GET /posts?page=2&limit=20&search=rust&searchField=title&sort=title&order=DESC`
//! 형태의 쿼리 문자열을 검증하고 `ListQuery`로 변환합니다.
//!
//! 경계(boundary) 규칙:
//! - `page`, `limit`은 1 이상이어야 합니다 (아니면 400)
//! - `limit`은 최대 100으로 잘립니다. 쿼리 빌더는 100을 넘는 값을 보지 않으며,
//!   빌더 스스로는 다시 자르지 않습니다.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 100;

/// 정렬 방향. 쿼리 문자열에서는 `ASC` / `DESC` (소문자도 허용)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    #[serde(rename = "ASC", alias = "asc")]
    Asc,
    #[serde(rename = "DESC", alias = "desc")]
    Desc,
}

impl SortOrder {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// 검증과 보정이 끝난 목록 조회 조건
///
/// 요청마다 새로 만들어지며, 쿼리 빌더 안에서는 읽기 전용입니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u32,
    pub limit: u32,
    pub search: Option<String>,
    /// 검색할 필드 이름. 없거나 모르는 이름이면 기본 다중 필드 검색을 사용합니다.
    pub search_field: Option<String>,
    /// 정렬 기준 필드 이름
    pub sort: Option<String>,
    /// 정렬 방향. None이면 오름차순
    pub order: Option<SortOrder>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            search: None,
            search_field: None,
            sort: None,
            order: None,
        }
    }
}

impl ListQuery {
    /// 실제로 적용할 검색어
    ///
    /// `None`과 빈 문자열만 검색을 건너뜁니다. 공백만 있는 검색어는 trim하지 않고
    /// 그대로 `%   %` 패턴이 됩니다.
    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().filter(|term| !term.is_empty())
    }

    /// 실제로 적용할 정렬 필드 (빈 문자열은 "정렬 없음")
    pub fn sort_field(&self) -> Option<&str> {
        self.sort.as_deref().filter(|field| !field.is_empty())
    }
}

/// URL 쿼리 파라미터 원본
///
/// Axum의 `Query` 추출자가 쿼리 문자열을 이 구조체로 변환합니다.
/// 음수도 받아서 직접 검증할 수 있도록 숫자는 `i64`로 받습니다.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
    pub search_field: Option<String>,
    pub sort: Option<String>,
    pub order: Option<SortOrder>,
}

impl ListParams {
    /// 기본값 적용, 최소값 검증, `limit` 상한 보정을 거쳐 `ListQuery`를 만듭니다.
    pub fn into_query(self) -> Result<ListQuery, AppError> {
        // 쿼리 문자열에 없으면 기본값 (page=1, limit=10)
        let page = at_least_one("page", self.page.unwrap_or(i64::from(DEFAULT_PAGE)))?;
        let limit = at_least_one("limit", self.limit.unwrap_or(i64::from(DEFAULT_LIMIT)))?
            .min(MAX_LIMIT); // 100을 넘으면 100으로 자름 (에러 아님)

        Ok(ListQuery {
            page,
            limit,
            search: self.search,
            search_field: self.search_field,
            sort: self.sort,
            order: self.order,
        })
    }
}

fn at_least_one(name: &str, value: i64) -> Result<u32, AppError> {
    if value < 1 {
        return Err(AppError::BadRequest(format!(
            "{name} must not be less than 1"
        )));
    }
    // i64 → u32: 너무 큰 값은 u32::MAX로 포화시킵니다 (page는 결과가 비게 될 뿐)
    Ok(u32::try_from(value).unwrap_or(u32::MAX))
}
