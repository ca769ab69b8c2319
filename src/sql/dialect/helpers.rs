//! Shared helper functions for SQL dialect implementations.
//!
//! This module provides reusable building blocks that dialects can compose
//! to implement the `SqlDialect` trait with minimal duplication.

// =============================================================================
// Identifier Quoting
// =============================================================================

/// Quote identifier with double quotes (ANSI style).
/// Used by: Generic, Postgres, SQLite, Oracle
pub fn quote_double(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Quote identifier with backticks.
/// Used by: MySQL
pub fn quote_backtick(ident: &str) -> String {
    format!("`{}`", ident.replace('`', "``"))
}

/// Quote identifier with square brackets.
/// Used by: T-SQL
pub fn quote_bracket(ident: &str) -> String {
    format!("[{}]", ident.replace(']', "]]"))
}

/// Upper-case identifiers that Oracle would fold when unquoted.
///
/// Only plain lower-case names (`[a-z][a-z0-9_$#]*`) are folded, so
/// mixed-case or otherwise exotic names keep their exact spelling.
pub fn fold_upper_if_plain(ident: &str) -> String {
    let mut chars = ident.chars();
    let plain = matches!(chars.next(), Some(c) if c.is_ascii_lowercase())
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || "_$#".contains(c));
    if plain {
        ident.to_ascii_uppercase()
    } else {
        ident.to_string()
    }
}

// =============================================================================
// String Quoting
// =============================================================================

/// Quote string with single quotes (standard SQL).
/// Used by: Generic, SQLite, Oracle, T-SQL
pub fn quote_string_single(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

/// Quote string with N prefix for Unicode (T-SQL).
/// Used by: T-SQL for non-ASCII strings
pub fn quote_string_unicode(s: &str) -> String {
    format!("N'{}'", s.replace('\'', "''"))
}

/// Quote string as a PostgreSQL escape string constant (`E'...'`).
///
/// Backslashes are doubled so the value is read back verbatim
/// regardless of `standard_conforming_strings`.
pub fn quote_string_escaped(s: &str) -> String {
    format!("E'{}'", s.replace('\\', "\\\\").replace('\'', "''"))
}

/// Quote string for servers that treat backslash as an escape character.
/// Used by: MySQL
pub fn quote_string_backslash(s: &str) -> String {
    format!("'{}'", s.replace('\\', "\\\\").replace('\'', "''"))
}

// =============================================================================
// Boolean Formatting
// =============================================================================

/// Format boolean as keyword TRUE/FALSE.
/// Used by: Generic, Postgres
pub fn format_bool_literal(b: bool) -> &'static str {
    if b {
        "TRUE"
    } else {
        "FALSE"
    }
}

/// Format boolean as numeric 1/0.
/// Used by: MySQL, SQLite, Oracle, T-SQL
pub fn format_bool_numeric(b: bool) -> &'static str {
    if b {
        "1"
    } else {
        "0"
    }
}

// =============================================================================
// Bind Placeholders
// =============================================================================

/// Positional `$n` placeholder.
/// Used by: Postgres
pub fn placeholder_dollar(index: usize) -> String {
    format!("${}", index)
}

/// Named `:an` placeholder.
/// Used by: Oracle
pub fn placeholder_colon(index: usize) -> String {
    format!(":a{}", index)
}

/// Named `@Pn` placeholder.
/// Used by: T-SQL
pub fn placeholder_at(index: usize) -> String {
    format!("@P{}", index)
}
