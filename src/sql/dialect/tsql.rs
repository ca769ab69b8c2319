//! T-SQL (SQL Server / Azure SQL) dialect.
//!
//! T-SQL has significant differences from the generic dialect:
//! - Square bracket identifier quoting (`[name]`)
//! - No native boolean in SELECT (1/0)
//! - OFFSET FETCH for pagination (requires ORDER BY)
//! - N'...' prefix for Unicode strings
//! - `@Pn` bind placeholders
//! - OUTPUT instead of RETURNING
//! - No RECURSIVE keyword for recursive CTEs
//! - String concatenation with `+`
//! - DATEPART instead of EXTRACT
//! - Row locks are table hints, not a trailing clause

use super::helpers;
use super::{
    DistinctFromStyle, ExtractStyle, LockStyle, NullsOrdering, Pagination, ReturningStyle,
    SqlDialect, UpsertStyle,
};

/// T-SQL (SQL Server) dialect.
#[derive(Debug, Clone, Copy)]
pub struct TSql;

impl SqlDialect for TSql {
    fn name(&self) -> &'static str {
        "tsql"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_bracket(ident)
    }

    fn quote_string(&self, s: &str) -> String {
        if !s.is_ascii() {
            helpers::quote_string_unicode(s)
        } else {
            helpers::quote_string_single(s)
        }
    }

    fn format_bool(&self, b: bool) -> &'static str {
        helpers::format_bool_numeric(b)
    }

    fn placeholder(&self, index: usize) -> String {
        helpers::placeholder_at(index)
    }

    fn pagination(&self) -> Pagination {
        Pagination::OffsetFetch
    }

    fn requires_order_by_for_offset(&self) -> bool {
        true
    }

    fn concat_operator(&self) -> &'static str {
        "+"
    }

    fn emit_recursive_keyword(&self) -> bool {
        false
    }

    fn supports_lateral(&self) -> bool {
        // CROSS APPLY / OUTER APPLY have different join semantics
        false
    }

    fn nulls_ordering(&self) -> NullsOrdering {
        NullsOrdering::CasePrefix
    }

    fn supports_named_windows(&self) -> bool {
        false
    }

    fn distinct_from_style(&self) -> DistinctFromStyle {
        DistinctFromStyle::IntersectExists
    }

    fn extract_style(&self) -> ExtractStyle {
        ExtractStyle::DatePart
    }

    fn lock_style(&self) -> LockStyle {
        LockStyle::Unsupported
    }

    fn returning_style(&self) -> ReturningStyle {
        ReturningStyle::Output
    }

    fn upsert_style(&self) -> UpsertStyle {
        UpsertStyle::Unsupported
    }
}
