//! # 엔티티 디스크립터
//!
//! 리소스(카테고리/게시글/사용자)마다 다른 것은 컬럼 이름뿐이므로,
//! 목록 조회 로직은 하나만 두고 리소스별 차이는 정적인 `EntityDescriptor` 값으로 표현합니다.
//!
//! 검색 필드, 정렬 필드, 필터 필드는 모두 "API 이름 → SQL 컬럼" 조회 테이블입니다.
//! 사용자 입력은 이 테이블에서 찾은 컬럼으로만 SQL에 들어갑니다.

/// `LEFT JOIN {table} {alias} ON {on}`
#[derive(Debug)]
pub struct Join {
    pub table: &'static str,
    pub alias: &'static str,
    pub on: &'static str,
}

/// 리소스 하나의 목록 조회 설정
#[derive(Debug)]
pub struct EntityDescriptor {
    /// 로그에 남길 리소스 이름 (예: "posts")
    pub name: &'static str,
    pub table: &'static str,
    pub alias: &'static str,
    /// SELECT 목록
    pub columns: &'static str,
    pub joins: &'static [Join],
    /// `searchField` 이름 → 컬럼
    pub search_fields: &'static [(&'static str, &'static str)],
    /// `searchField`가 없거나 모르는 이름일 때 OR로 묶어 검색할 컬럼들
    pub default_search: &'static [&'static str],
    /// `sort` 이름 → 컬럼
    pub sort_fields: &'static [(&'static str, &'static str)],
    /// 동등 조건 필터 이름 → 컬럼
    pub filter_fields: &'static [(&'static str, &'static str)],
}

impl EntityDescriptor {
    pub fn search_column(&self, field: &str) -> Option<&'static str> {
        lookup(self.search_fields, field)
    }

    pub fn sort_column(&self, field: &str) -> Option<&'static str> {
        lookup(self.sort_fields, field)
    }

    pub fn filter_column(&self, field: &str) -> Option<&'static str> {
        lookup(self.filter_fields, field)
    }
}

fn lookup(table: &'static [(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, column)| *column)
}

/// 동등 조건 필터에 바인딩할 값
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Bool(bool),
    Text(String),
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::Bool(value)
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Text(value)
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

/// 목록 조회에 추가되는 `field = value` 조건 (예: 사용자 `isActive = true`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub field: &'static str,
    pub value: FilterValue,
}

impl Filter {
    pub fn eq(field: &'static str, value: impl Into<FilterValue>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }
}
