//! SQLite SQL dialect.
//!
//! SQLite differences from the generic dialect:
//! - Booleans render as 1/0
//! - OFFSET requires a LIMIT; offset-only queries use `LIMIT -1`
//! - `IS` / `IS NOT` are null-safe comparisons
//! - Row locks do not exist and are dropped
//! - No EXTRACT, no CUBE/ROLLUP/GROUPING SETS, no LATERAL

use super::helpers;
use super::{DistinctFromStyle, ExtractStyle, LockStyle, Pagination, SqlDialect};

/// SQLite SQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct Sqlite;

impl SqlDialect for Sqlite {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_double(ident)
    }

    fn format_bool(&self, b: bool) -> &'static str {
        helpers::format_bool_numeric(b)
    }

    fn pagination(&self) -> Pagination {
        Pagination::LimitOffset {
            unbounded_limit: Some("-1"),
        }
    }

    fn supports_lateral(&self) -> bool {
        false
    }

    fn supports_aggregate_filter(&self) -> bool {
        true
    }

    fn supports_groups_frame(&self) -> bool {
        true
    }

    fn supports_grouping_sets(&self) -> bool {
        false
    }

    fn supports_materialized_cte(&self) -> bool {
        true
    }

    fn distinct_from_style(&self) -> DistinctFromStyle {
        DistinctFromStyle::Is
    }

    fn extract_style(&self) -> ExtractStyle {
        ExtractStyle::Unsupported
    }

    fn lock_style(&self) -> LockStyle {
        LockStyle::Ignored
    }
}
