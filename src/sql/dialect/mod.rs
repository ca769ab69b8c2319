//! SQL Dialect definitions and formatting rules.
//!
//! This module provides a trait-based abstraction for SQL dialect differences.
//! Each dialect implements `SqlDialect` to handle its specific syntax:
//!
//! - Identifier quoting: `"` (Generic/PG/SQLite/Oracle), `` ` `` (MySQL), `[]` (T-SQL)
//! - Bind placeholders: `?`, `$n`, `:an`, `@Pn`
//! - Pagination: LIMIT/OFFSET vs OFFSET FETCH vs ROWNUM wrapping
//! - Boolean literals: TRUE/FALSE vs 1/0
//! - String concatenation: `||` vs `+` vs CONCAT()
//! - Feature gates the renderer checks before emitting a construct
//!
//! # Usage
//!
//! ```
//! use quarry::dialect::{Dialect, SqlDialect};
//!
//! let dialect = Dialect::Postgres;
//! assert_eq!(dialect.quote_identifier("user"), "\"user\"");
//! assert_eq!(dialect.placeholder(1), "$1");
//! ```
//!
//! # Feature Matrix
//!
//! | Feature | Generic | PostgreSQL | MySQL | SQLite | Oracle | SQL Server |
//! |---------|---------|------------|-------|--------|--------|------------|
//! | DISTINCT ON | ❌ | ✓ | ❌ | ❌ | ❌ | ❌ |
//! | Regexp match | ❌ | ✓ | ✓ | ❌ | ❌ | ❌ |
//! | NULLS FIRST/LAST | ✓ | ✓ | emulated | ✓ | ✓ | emulated |
//! | FILTER clause | ✓ | ✓ | ❌ | ✓ | ❌ | ❌ |
//! | GROUPS frame | ✓ | ✓ | ❌ | ✓ | ❌ | ❌ |
//! | WINDOW clause | ✓ | ✓ | ✓ | ✓ | ❌ | ❌ |
//! | CUBE/ROLLUP | ✓ | ✓ | ❌ | ❌ | ✓ | ✓ |
//! | MATERIALIZED CTE | ✓ | ✓ | ❌ | ✓ | ❌ | ❌ |
//! | RETURNING | ✓ | ✓ | ❌ | ✓ | ❌ | OUTPUT |
//! | Upsert | ON CONFLICT | ON CONFLICT | ON DUPLICATE KEY | ON CONFLICT | ❌ | ❌ |
//! | Row locks | ✓ | ✓ | ✓ | ignored | ✓ | ❌ |
//!
//! Unsupported constructs make the renderer fail with `Error::Unsupported`
//! instead of emitting SQL with different semantics.

mod generic;
pub mod helpers;
mod mysql;
mod oracle;
mod postgres;
mod sqlite;
mod tsql;

pub use generic::Generic;
pub use mysql::MySql;
pub use oracle::Oracle;
pub use postgres::Postgres;
pub use sqlite::Sqlite;
pub use tsql::TSql;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How a dialect expresses LIMIT / OFFSET.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pagination {
    /// `LIMIT n OFFSET m`. An offset without a limit needs the given
    /// "no limit" sentinel in dialects that require LIMIT before OFFSET.
    LimitOffset { unbounded_limit: Option<&'static str> },
    /// `OFFSET m ROWS FETCH NEXT n ROWS ONLY`
    OffsetFetch,
    /// `ROWNUM` filtering through wrapping subqueries.
    RowNum,
}

/// How NULLS FIRST / NULLS LAST is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullsOrdering {
    Native,
    /// `expr IS NULL, expr` prefix sort key.
    IsNullPrefix,
    /// `CASE WHEN expr IS NULL THEN 1 ELSE 0 END, expr` prefix sort key.
    CasePrefix,
}

/// How null-safe comparison is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistinctFromStyle {
    /// `a IS [NOT] DISTINCT FROM b`
    Standard,
    /// `a <=> b` / `NOT a <=> b`
    NullSafeEq,
    /// `a IS b` / `a IS NOT b`
    Is,
    /// `DECODE(a, b, 0, 1) = 1|0`
    Decode,
    /// `[NOT] EXISTS (SELECT a INTERSECT SELECT b)`
    IntersectExists,
}

/// How row locking clauses are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockStyle {
    Native,
    /// Silently dropped: the engine locks whole databases.
    Ignored,
    Unsupported,
}

/// How DML statements return affected rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturningStyle {
    Returning,
    /// `OUTPUT INSERTED.col` / `OUTPUT DELETED.col`
    Output,
    Unsupported,
}

/// How INSERT conflict handling is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertStyle {
    OnConflict,
    OnDuplicateKey,
    Unsupported,
}

/// How `EXTRACT(field FROM expr)` is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractStyle {
    Extract,
    /// `DATEPART(field, expr)`
    DatePart,
    Unsupported,
}

/// SQL dialect trait - defines how SQL constructs are rendered.
///
/// Implementations handle dialect-specific syntax differences.
/// The default implementations follow the generic dialect where possible.
pub trait SqlDialect: std::fmt::Debug {
    /// Dialect name for display/logging.
    fn name(&self) -> &'static str;

    // =========================================================================
    // Identifier and Literal Quoting
    // =========================================================================

    /// Quote an identifier (table, column, alias).
    fn quote_identifier(&self, ident: &str) -> String;

    /// Quote a string literal.
    ///
    /// Default is single quotes with `''` escaping.
    fn quote_string(&self, s: &str) -> String {
        helpers::quote_string_single(s)
    }

    /// Format a boolean literal.
    fn format_bool(&self, b: bool) -> &'static str;

    /// Format a NULL literal.
    fn format_null(&self) -> &'static str {
        "NULL"
    }

    /// Placeholder for the `index`-th bind parameter (1-based).
    fn placeholder(&self, _index: usize) -> String {
        "?".to_string()
    }

    // =========================================================================
    // Statement Shape
    // =========================================================================

    fn pagination(&self) -> Pagination {
        Pagination::LimitOffset {
            unbounded_limit: None,
        }
    }

    /// Whether OFFSET requires an ORDER BY clause.
    fn requires_order_by_for_offset(&self) -> bool {
        false
    }

    /// Whether table aliases are introduced with `AS`.
    fn table_alias_uses_as(&self) -> bool {
        true
    }

    /// String concatenation operator.
    fn concat_operator(&self) -> &'static str {
        "||"
    }

    /// Whether this dialect supports the concat operator (vs CONCAT function).
    fn supports_concat_operator(&self) -> bool {
        true
    }

    /// Keyword for the EXCEPT set operation.
    fn except_keyword(&self) -> &'static str {
        "EXCEPT"
    }

    /// Whether recursive CTEs are introduced with `WITH RECURSIVE`.
    fn emit_recursive_keyword(&self) -> bool {
        true
    }

    /// Source clause of an INSERT that only takes column defaults.
    fn default_values_clause(&self) -> &'static str {
        "DEFAULT VALUES"
    }

    fn supports_full_outer_join(&self) -> bool {
        true
    }

    fn supports_lateral(&self) -> bool {
        true
    }

    fn nulls_ordering(&self) -> NullsOrdering {
        NullsOrdering::Native
    }

    fn supports_distinct_on(&self) -> bool {
        false
    }

    /// Whether aggregates accept a `FILTER (WHERE ...)` clause.
    fn supports_aggregate_filter(&self) -> bool {
        false
    }

    /// Whether window frames accept GROUPS units.
    fn supports_groups_frame(&self) -> bool {
        false
    }

    /// Whether a `WINDOW w AS (...)` clause is accepted.
    fn supports_named_windows(&self) -> bool {
        true
    }

    /// Whether CUBE, ROLLUP and GROUPING SETS are accepted in GROUP BY.
    fn supports_grouping_sets(&self) -> bool {
        true
    }

    fn supports_materialized_cte(&self) -> bool {
        false
    }

    /// Whether recursive CTEs accept a `CYCLE ... SET ... USING ...` clause.
    fn supports_cte_cycle(&self) -> bool {
        false
    }

    /// Whether the array containment / overlap operators (`@>`, `&&`) exist.
    fn supports_array_operators(&self) -> bool {
        false
    }

    // =========================================================================
    // Predicates
    // =========================================================================

    /// Whether a case-insensitive match renders as `ILIKE`.
    fn supports_ilike(&self) -> bool {
        false
    }

    /// Whether a case-sensitive match renders as `LIKE BINARY`.
    fn uses_binary_like(&self) -> bool {
        false
    }

    /// Regular-expression operator, or `None` when unsupported.
    fn regexp_operator(&self, _case_sensitive: bool, _negated: bool) -> Option<&'static str> {
        None
    }

    fn distinct_from_style(&self) -> DistinctFromStyle {
        DistinctFromStyle::Standard
    }

    /// Maximum number of elements in one IN list, if capped.
    fn in_list_limit(&self) -> Option<usize> {
        None
    }

    fn extract_style(&self) -> ExtractStyle {
        ExtractStyle::Extract
    }

    // =========================================================================
    // Locking and DML
    // =========================================================================

    fn lock_style(&self) -> LockStyle {
        LockStyle::Native
    }

    fn returning_style(&self) -> ReturningStyle {
        ReturningStyle::Returning
    }

    fn upsert_style(&self) -> UpsertStyle {
        UpsertStyle::OnConflict
    }

    /// Whether UPDATE/DELETE accept ORDER BY, LIMIT and JOIN directly.
    fn supports_dml_order_limit(&self) -> bool {
        false
    }
}

/// Supported SQL dialects.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    Generic,
    Postgres,
    MySql,
    Sqlite,
    Oracle,
    TSql,
}

impl Dialect {
    /// Every supported dialect, in declaration order.
    pub const ALL: [Dialect; 6] = [
        Dialect::Generic,
        Dialect::Postgres,
        Dialect::MySql,
        Dialect::Sqlite,
        Dialect::Oracle,
        Dialect::TSql,
    ];

    /// Get the dialect implementation.
    pub fn dialect(&self) -> &'static dyn SqlDialect {
        match self {
            Dialect::Generic => &Generic,
            Dialect::Postgres => &Postgres,
            Dialect::MySql => &MySql,
            Dialect::Sqlite => &Sqlite,
            Dialect::Oracle => &Oracle,
            Dialect::TSql => &TSql,
        }
    }

    /// Alternate names accepted by `FromStr`, besides [`SqlDialect::name`].
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Dialect::Generic => &["ansi"],
            Dialect::Postgres => &["postgresql", "pg"],
            Dialect::MySql => &["mariadb"],
            Dialect::Sqlite => &["sqlite3"],
            Dialect::Oracle => &[],
            Dialect::TSql => &["mssql", "sqlserver"],
        }
    }
}

// Implement SqlDialect for Dialect enum by delegating to concrete types
impl SqlDialect for Dialect {
    fn name(&self) -> &'static str {
        self.dialect().name()
    }

    fn quote_identifier(&self, ident: &str) -> String {
        self.dialect().quote_identifier(ident)
    }

    fn quote_string(&self, s: &str) -> String {
        self.dialect().quote_string(s)
    }

    fn format_bool(&self, b: bool) -> &'static str {
        self.dialect().format_bool(b)
    }

    fn format_null(&self) -> &'static str {
        self.dialect().format_null()
    }

    fn placeholder(&self, index: usize) -> String {
        self.dialect().placeholder(index)
    }

    fn pagination(&self) -> Pagination {
        self.dialect().pagination()
    }

    fn requires_order_by_for_offset(&self) -> bool {
        self.dialect().requires_order_by_for_offset()
    }

    fn table_alias_uses_as(&self) -> bool {
        self.dialect().table_alias_uses_as()
    }

    fn concat_operator(&self) -> &'static str {
        self.dialect().concat_operator()
    }

    fn supports_concat_operator(&self) -> bool {
        self.dialect().supports_concat_operator()
    }

    fn except_keyword(&self) -> &'static str {
        self.dialect().except_keyword()
    }

    fn emit_recursive_keyword(&self) -> bool {
        self.dialect().emit_recursive_keyword()
    }

    fn default_values_clause(&self) -> &'static str {
        self.dialect().default_values_clause()
    }

    fn supports_full_outer_join(&self) -> bool {
        self.dialect().supports_full_outer_join()
    }

    fn supports_lateral(&self) -> bool {
        self.dialect().supports_lateral()
    }

    fn nulls_ordering(&self) -> NullsOrdering {
        self.dialect().nulls_ordering()
    }

    fn supports_distinct_on(&self) -> bool {
        self.dialect().supports_distinct_on()
    }

    fn supports_aggregate_filter(&self) -> bool {
        self.dialect().supports_aggregate_filter()
    }

    fn supports_groups_frame(&self) -> bool {
        self.dialect().supports_groups_frame()
    }

    fn supports_named_windows(&self) -> bool {
        self.dialect().supports_named_windows()
    }

    fn supports_grouping_sets(&self) -> bool {
        self.dialect().supports_grouping_sets()
    }

    fn supports_materialized_cte(&self) -> bool {
        self.dialect().supports_materialized_cte()
    }

    fn supports_cte_cycle(&self) -> bool {
        self.dialect().supports_cte_cycle()
    }

    fn supports_array_operators(&self) -> bool {
        self.dialect().supports_array_operators()
    }

    fn supports_ilike(&self) -> bool {
        self.dialect().supports_ilike()
    }

    fn uses_binary_like(&self) -> bool {
        self.dialect().uses_binary_like()
    }

    fn regexp_operator(&self, case_sensitive: bool, negated: bool) -> Option<&'static str> {
        self.dialect().regexp_operator(case_sensitive, negated)
    }

    fn distinct_from_style(&self) -> DistinctFromStyle {
        self.dialect().distinct_from_style()
    }

    fn in_list_limit(&self) -> Option<usize> {
        self.dialect().in_list_limit()
    }

    fn extract_style(&self) -> ExtractStyle {
        self.dialect().extract_style()
    }

    fn lock_style(&self) -> LockStyle {
        self.dialect().lock_style()
    }

    fn returning_style(&self) -> ReturningStyle {
        self.dialect().returning_style()
    }

    fn upsert_style(&self) -> UpsertStyle {
        self.dialect().upsert_style()
    }

    fn supports_dml_order_limit(&self) -> bool {
        self.dialect().supports_dml_order_limit()
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.dialect().name())
    }
}

/// Error returned when parsing an unknown dialect name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown dialect: {0}")]
pub struct UnknownDialect(pub String);

impl FromStr for Dialect {
    type Err = UnknownDialect;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        Dialect::ALL
            .into_iter()
            .find(|d| d.name() == name || d.aliases().contains(&name.as_str()))
            .ok_or_else(|| UnknownDialect(s.to_string()))
    }
}
