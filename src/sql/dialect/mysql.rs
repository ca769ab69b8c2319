//! MySQL SQL dialect.
//!
//! MySQL differences from the generic dialect:
//! - Backtick identifier quoting (`` `name` ``)
//! - Backslash is an escape character inside string literals
//! - Booleans render as 1/0
//! - No `||` concatenation (uses CONCAT())
//! - OFFSET requires a LIMIT; offset-only queries use the maximum row count
//! - `<=>` null-safe equality instead of IS DISTINCT FROM
//! - REGEXP operator, `LIKE BINARY` for case-sensitive matching
//! - ON DUPLICATE KEY UPDATE instead of ON CONFLICT, no RETURNING
//! - UPDATE/DELETE accept ORDER BY, LIMIT and JOIN directly
//! - No NULLS FIRST/LAST (emulated with an `IS NULL` sort key)

use super::helpers;
use super::{DistinctFromStyle, NullsOrdering, Pagination, ReturningStyle, SqlDialect, UpsertStyle};

/// MySQL SQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct MySql;

impl SqlDialect for MySql {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_backtick(ident)
    }

    fn quote_string(&self, s: &str) -> String {
        helpers::quote_string_backslash(s)
    }

    fn format_bool(&self, b: bool) -> &'static str {
        helpers::format_bool_numeric(b)
    }

    fn pagination(&self) -> Pagination {
        Pagination::LimitOffset {
            unbounded_limit: Some("18446744073709551615"),
        }
    }

    fn supports_concat_operator(&self) -> bool {
        false
    }

    fn default_values_clause(&self) -> &'static str {
        "VALUES ()"
    }

    fn supports_full_outer_join(&self) -> bool {
        false
    }

    fn nulls_ordering(&self) -> NullsOrdering {
        NullsOrdering::IsNullPrefix
    }

    fn supports_grouping_sets(&self) -> bool {
        // MySQL only has the `WITH ROLLUP` modifier
        false
    }

    fn uses_binary_like(&self) -> bool {
        true
    }

    fn regexp_operator(&self, _case_sensitive: bool, negated: bool) -> Option<&'static str> {
        Some(if negated { "NOT REGEXP" } else { "REGEXP" })
    }

    fn distinct_from_style(&self) -> DistinctFromStyle {
        DistinctFromStyle::NullSafeEq
    }

    fn returning_style(&self) -> ReturningStyle {
        ReturningStyle::Unsupported
    }

    fn upsert_style(&self) -> UpsertStyle {
        UpsertStyle::OnDuplicateKey
    }

    fn supports_dml_order_limit(&self) -> bool {
        true
    }
}
