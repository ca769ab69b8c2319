//! PostgreSQL SQL dialect.
//!
//! PostgreSQL features:
//! - ANSI identifier quoting (`"`)
//! - Escape string constants (`E'...'`) for string literals
//! - Native boolean type (TRUE/FALSE)
//! - `$n` bind placeholders
//! - RETURNING clause and ON CONFLICT upserts
//! - DISTINCT ON, ILIKE and POSIX regexp operators
//! - FILTER clause for aggregates, GROUPS frames
//! - MATERIALIZED / NOT MATERIALIZED and CYCLE on CTEs
//! - Array containment (`@>`) and overlap (`&&`)

use super::helpers;
use super::SqlDialect;

/// PostgreSQL SQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct Postgres;

impl SqlDialect for Postgres {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_double(ident)
    }

    fn quote_string(&self, s: &str) -> String {
        helpers::quote_string_escaped(s)
    }

    fn format_bool(&self, b: bool) -> &'static str {
        helpers::format_bool_literal(b)
    }

    fn placeholder(&self, index: usize) -> String {
        helpers::placeholder_dollar(index)
    }

    // Uses default pagination (LIMIT ... OFFSET ...)

    fn supports_distinct_on(&self) -> bool {
        true
    }

    fn supports_aggregate_filter(&self) -> bool {
        true
    }

    fn supports_groups_frame(&self) -> bool {
        true
    }

    fn supports_materialized_cte(&self) -> bool {
        true
    }

    fn supports_cte_cycle(&self) -> bool {
        true
    }

    fn supports_array_operators(&self) -> bool {
        true
    }

    fn supports_ilike(&self) -> bool {
        true
    }

    fn regexp_operator(&self, case_sensitive: bool, negated: bool) -> Option<&'static str> {
        Some(match (case_sensitive, negated) {
            (true, false) => "~",
            (false, false) => "~*",
            (true, true) => "!~",
            (false, true) => "!~*",
        })
    }
}
