//! Generic SQL dialect.
//!
//! A close-to-standard rendering used when no database is targeted:
//! - ANSI identifier quoting (`"`)
//! - TRUE/FALSE boolean keywords
//! - `?` placeholders
//! - LIMIT/OFFSET pagination
//! - FILTER, GROUPS frames, MATERIALIZED CTEs and CYCLE accepted as written
//!
//! Constructs that are vendor extensions (DISTINCT ON, regexp operators,
//! array operators) are rejected.

use super::helpers;
use super::SqlDialect;

/// Generic SQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct Generic;

impl SqlDialect for Generic {
    fn name(&self) -> &'static str {
        "generic"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_double(ident)
    }

    fn format_bool(&self, b: bool) -> &'static str {
        helpers::format_bool_literal(b)
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
}
