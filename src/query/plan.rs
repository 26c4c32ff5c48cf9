//! # 목록 조회 계획(plan)
//!
//! `EntityDescriptor` + `ListQuery` + 필터로부터 "어떤 조건으로 조회할지"를 결정합니다.
//! 이 단계는 SQL을 만들지 않는 순수 변환이라 저장소 없이 테스트할 수 있습니다.
//! SQL 렌더링은 `scan` 모듈이 담당합니다.

use super::descriptor::{EntityDescriptor, Filter, FilterValue};
use super::params::{ListQuery, SortOrder};
use crate::error::QueryError;

/// 검색 조건 (대소문자 무시 부분 일치)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchPredicate {
    /// `searchField`로 지정된 컬럼 하나
    Column {
        column: &'static str,
        pattern: String,
    },
    /// 디스크립터의 기본 검색 컬럼들을 OR로 묶은 그룹
    AnyOf {
        columns: &'static [&'static str],
        pattern: String,
    },
}

/// 한 번의 목록 조회에 필요한 모든 결정 사항
#[derive(Debug, Clone)]
pub struct ListPlan {
    pub descriptor: &'static EntityDescriptor,
    /// AND로 묶이는 동등 조건. 검색 조건보다 먼저 적용됩니다.
    pub filters: Vec<(&'static str, FilterValue)>,
    pub search: Option<SearchPredicate>,
    pub order: Option<(&'static str, SortOrder)>,
    pub page: u32,
    pub limit: u32,
}

impl ListPlan {
    /// ## 규칙
    /// 1. 검색어가 비어 있지 않으면 검색 조건을 하나 추가합니다.
    ///    - `searchField`가 조회 테이블에 있으면 해당 컬럼만 검색
    ///    - 없거나 모르는 이름이면 기본 검색 컬럼 전체를 OR로 검색 (에러 아님)
    /// 2. 필터는 각각 AND 조건이 됩니다. 모르는 필터 이름은 에러입니다.
    /// 3. `sort`가 있으면 해당 컬럼으로 정렬하고, 방향이 없으면 ASC입니다.
    ///    모르는 정렬 필드는 에러입니다 (SQL에 그대로 넣지 않습니다).
    ///
    /// `limit`은 경계에서 이미 보정된 값을 그대로 사용합니다.
    pub fn build(
        descriptor: &'static EntityDescriptor,
        query: &ListQuery,
        filters: &[Filter],
    ) -> Result<Self, QueryError> {
        let filters = filters
            .iter()
            .map(|filter| {
                descriptor
                    .filter_column(filter.field)
                    .map(|column| (column, filter.value.clone()))
                    .ok_or_else(|| QueryError::UnknownFilterField(filter.field.to_string()))
            })
            // collect::<Result<Vec<_>, _>>(): 하나라도 Err면 첫 에러를 반환
            .collect::<Result<Vec<_>, _>>()?;

        let search = query.search_term().map(|term| {
            let pattern = like_pattern(term);
            match query
                .search_field
                .as_deref()
                .and_then(|field| descriptor.search_column(field))
            {
                Some(column) => SearchPredicate::Column { column, pattern },
                None => SearchPredicate::AnyOf {
                    columns: descriptor.default_search,
                    pattern,
                },
            }
        });

        let order = match query.sort_field() {
            Some(field) => {
                let column = descriptor
                    .sort_column(field)
                    .ok_or_else(|| QueryError::UnknownSortField(field.to_string()))?;
                // unwrap_or_default(): SortOrder의 Default는 Asc
                Some((column, query.order.unwrap_or_default()))
            }
            None => None,
        };

        Ok(Self {
            descriptor,
            filters,
            search,
            order,
            page: query.page,
            limit: query.limit,
        })
    }

    pub fn offset(&self) -> u64 {
        // u64로 넓혀서 곱하므로 큰 page에서도 오버플로가 없습니다
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }
}

/// 검색어를 `%term%`으로 감쌉니다.
///
/// 검색어 안의 `%`, `_`는 이스케이프하지 않습니다 (와일드카드로 동작).
pub fn like_pattern(term: &str) -> String {
    format!("%{term}%")
}
