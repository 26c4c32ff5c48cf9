//! # SQL 렌더링
//!
//! `ListPlan`을 `sqlx::QueryBuilder`로 옮깁니다.
//! 컬럼/테이블 이름은 디스크립터의 정적 문자열만 `push`하고,
//! 사용자 입력(검색 패턴, 필터 값, LIMIT/OFFSET)은 모두 `push_bind`로 바인딩합니다.
//!
//! ```sql
//! SELECT {columns} FROM {table} {alias}
//!   LEFT JOIN ...                              -- 디스크립터의 조인
//!  WHERE {filter} = ? AND ...                  -- 동등 조건
//!    AND ({col} LIKE ? OR {col} LIKE ?)        -- 검색 조건
//!  ORDER BY {col} ASC|DESC
//!  LIMIT ? OFFSET ?
//! ```
//!
//! SQLite의 `LIKE`는 ASCII 범위에서 대소문자를 구분하지 않으므로 `ILIKE` 역할을 합니다.

use sqlx::{QueryBuilder, Sqlite};

use super::descriptor::FilterValue;
use super::plan::{ListPlan, SearchPredicate};

/// 조건에 맞는 전체 행 수를 세는 쿼리
pub fn count_query(plan: &ListPlan) -> QueryBuilder<'static, Sqlite> {
    // QueryBuilder::new(): 초기 SQL 조각으로 빌더 생성. 이후 push로 이어 붙입니다
    let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM ");
    push_source(&mut qb, plan);
    push_conditions(&mut qb, plan);
    qb
}

/// 요청한 페이지의 행만 가져오는 쿼리
pub fn page_query(plan: &ListPlan) -> QueryBuilder<'static, Sqlite> {
    let mut qb = QueryBuilder::new("SELECT ");
    qb.push(plan.descriptor.columns).push(" FROM ");
    push_source(&mut qb, plan);
    push_conditions(&mut qb, plan);

    // 정렬 컬럼은 디스크립터의 정적 문자열이라 push해도 안전합니다
    if let Some((column, order)) = plan.order {
        qb.push(" ORDER BY ").push(column).push(" ").push(order.as_sql());
    }

    // u32 * u32는 i64 범위를 넘지 않습니다
    let offset = i64::try_from(plan.offset()).unwrap_or(i64::MAX);
    qb.push(" LIMIT ")
        .push_bind(i64::from(plan.limit))
        .push(" OFFSET ")
        .push_bind(offset);
    qb
}

fn push_source(qb: &mut QueryBuilder<'static, Sqlite>, plan: &ListPlan) {
    let descriptor = plan.descriptor;
    qb.push(descriptor.table).push(" ").push(descriptor.alias);

    for join in descriptor.joins {
        qb.push(" LEFT JOIN ")
            .push(join.table)
            .push(" ")
            .push(join.alias)
            .push(" ON ")
            .push(join.on);
    }
}

fn push_conditions(qb: &mut QueryBuilder<'static, Sqlite>, plan: &ListPlan) {
    // 첫 조건 앞에는 WHERE, 그 다음부터는 AND
    let mut keyword = " WHERE ";

    for (column, value) in &plan.filters {
        qb.push(keyword).push(*column).push(" = ");
        // push_bind(): SQL에는 `?`가 들어가고 값은 바인딩 인자로 따로 전달됩니다
        match value {
            FilterValue::Bool(flag) => qb.push_bind(*flag), // SQLite에서는 0/1로 저장
            FilterValue::Text(text) => qb.push_bind(text.clone()),
        };
        keyword = " AND ";
    }

    // 검색어가 없으면 조건 추가 끝
    let Some(search) = &plan.search else {
        return;
    };

    qb.push(keyword);
    match search {
        SearchPredicate::Column { column, pattern } => {
            qb.push(*column).push(" LIKE ").push_bind(pattern.clone());
        }
        SearchPredicate::AnyOf { columns, pattern } => {
            // 괄호로 묶어야 앞의 AND 필터와 OR가 섞이지 않습니다
            qb.push("(");
            for (i, column) in columns.iter().enumerate() {
                if i > 0 {
                    qb.push(" OR ");
                }
                qb.push(*column).push(" LIKE ").push_bind(pattern.clone());
            }
            qb.push(")");
        }
    }
}
