//! Shared helpers for the rendering tests.

#![allow(dead_code)]

use quarry::prelude::*;
use sqlparser::dialect::{
    GenericDialect, MsSqlDialect, MySqlDialect, PostgreSqlDialect, SQLiteDialect,
};
use sqlparser::parser::Parser;

/// Render with placeholders and return only the SQL text.
pub fn sql_for(stmt: &impl ToSql, dialect: Dialect) -> String {
    stmt.to_sql(dialect)
        .unwrap_or_else(|e| panic!("render failed for {}: {}", dialect, e))
        .sql
}

/// Parse `sql` back with sqlparser. Oracle has no parser dialect and is
/// not accepted here.
pub fn assert_parses(sql: &str, dialect: Dialect) {
    let parser: Box<dyn sqlparser::dialect::Dialect> = match dialect {
        Dialect::Generic => Box::new(GenericDialect {}),
        Dialect::Postgres => Box::new(PostgreSqlDialect {}),
        Dialect::MySql => Box::new(MySqlDialect {}),
        Dialect::Sqlite => Box::new(SQLiteDialect {}),
        Dialect::TSql => Box::new(MsSqlDialect {}),
        Dialect::Oracle => panic!("no sqlparser dialect for oracle"),
    };
    if let Err(e) = Parser::parse_sql(&*parser, sql) {
        panic!("{} rejected by sqlparser: {}\nSQL: {}", dialect, e, sql);
    }
}

/// Assert that rendering fails with `Unsupported` for `feature`.
pub fn assert_unsupported(stmt: &impl ToSql, dialect: Dialect, feature: &str) {
    match stmt.to_sql(dialect) {
        Err(Error::Unsupported {
            feature: actual,
            dialect: name,
        }) => {
            assert_eq!(actual, feature);
            assert_eq!(name, dialect.to_string());
        }
        other => panic!("expected {} to be unsupported by {}, got {:?}", feature, dialect, other),
    }
}
