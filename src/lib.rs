//! # quarry
//!
//! A relational-algebra SQL AST with fluent builders and a multi-dialect
//! renderer.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │     Builders (Table, SelectManager, UpdateManager, ...)  │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │          AST (Node, SelectStatement, Statement)          │
//! │     owned trees, structural Eq/Hash, serde-friendly      │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [Renderer + SqlDialect]
//! ┌─────────────────────────────────────────────────────────┐
//! │              Rendered { sql, binds }                     │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use quarry::prelude::*;
//!
//! let users = Table::new("users");
//! let update = UpdateManager::new()
//!     .table(&users)
//!     .set("name", "nick")
//!     .filter(users.col("id").eq(1));
//!
//! assert_eq!(
//!     update.to_sql(Dialect::Postgres).unwrap().sql,
//!     r#"UPDATE "users" SET "name" = E'nick' WHERE "users"."id" = 1"#
//! );
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod sql;

// Re-export SQL submodules at crate level
pub use sql::dialect;
pub use sql::dml;
pub use sql::node;
pub use sql::query;
pub use sql::render;
pub use sql::token;

pub use error::{Error, Result};

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::dialect::{Dialect, SqlDialect};
    pub use crate::error::{Error, Result};
    pub use crate::sql::manager::{DeleteManager, InsertManager, SelectManager, UpdateManager};
    pub use crate::sql::node::{
        // Constructors
        all_of,
        any_of,
        avg,
        bind,
        coalesce,
        col,
        count,
        count_distinct,
        count_star,
        cube,
        exists,
        func,
        grouping,
        grouping_sets,
        lit,
        max,
        min,
        null,
        rank,
        rollup,
        row,
        row_number,
        sql,
        star,
        sum,
        // Types
        CaseBuilder,
        Node,
        Predications,
    };
    pub use crate::sql::query::{Cte, Lock, Ordering, Relation, SelectStatement, SetOp};
    pub use crate::sql::render::{RenderOptions, Rendered, ToSql};
    pub use crate::sql::table::Table;
    pub use crate::sql::value::Value;
    pub use crate::sql::window::{FrameBound, Window, WindowFrame};
    pub use crate::sql::dml::{Assignment, OnConflict, Statement};
    pub use crate::sql::literal::BoundSqlLiteral;
}

// Also export at crate root for convenience
pub use dialect::Dialect;
pub use sql::{Node, Rendered, SelectManager, Statement, Table, ToSql};
