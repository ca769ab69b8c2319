//! Oracle SQL dialect.
//!
//! Oracle differences from the generic dialect:
//! - Plain lower-case identifiers are folded to upper case before quoting
//! - Booleans render as 1/0
//! - `:an` bind placeholders
//! - Pagination through ROWNUM and wrapping subqueries
//! - Table aliases without `AS`
//! - MINUS instead of EXCEPT, WITH without RECURSIVE
//! - IN lists are capped at 1000 elements
//! - `DECODE` for null-safe comparison
//! - No RETURNING (without INTO binds), no ON CONFLICT

use super::helpers;
use super::{DistinctFromStyle, Pagination, ReturningStyle, SqlDialect, UpsertStyle};

/// Oracle SQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct Oracle;

impl SqlDialect for Oracle {
    fn name(&self) -> &'static str {
        "oracle"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_double(&helpers::fold_upper_if_plain(ident))
    }

    fn format_bool(&self, b: bool) -> &'static str {
        helpers::format_bool_numeric(b)
    }

    fn placeholder(&self, index: usize) -> String {
        helpers::placeholder_colon(index)
    }

    fn pagination(&self) -> Pagination {
        Pagination::RowNum
    }

    fn table_alias_uses_as(&self) -> bool {
        false
    }

    fn except_keyword(&self) -> &'static str {
        "MINUS"
    }

    fn emit_recursive_keyword(&self) -> bool {
        false
    }

    fn supports_named_windows(&self) -> bool {
        false
    }

    fn distinct_from_style(&self) -> DistinctFromStyle {
        DistinctFromStyle::Decode
    }

    fn in_list_limit(&self) -> Option<usize> {
        Some(1000)
    }

    fn returning_style(&self) -> ReturningStyle {
        ReturningStyle::Unsupported
    }

    fn upsert_style(&self) -> UpsertStyle {
        UpsertStyle::Unsupported
    }
}
