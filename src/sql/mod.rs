//! SQL AST, builders and renderer.
//!
//! - [`node`] - expression and predicate nodes, the `Predications` builder trait
//! - [`query`] - SELECT statement nodes
//! - [`dml`] - INSERT, UPDATE and DELETE statement nodes
//! - [`manager`] - fluent statement builders
//! - [`render`] - the visitor that turns statements into SQL and binds
//! - [`token`] - token types the renderer emits
//! - [`dialect`] - SQL dialect implementations

pub mod dialect;
pub mod dml;
pub mod literal;
pub mod manager;
pub mod node;
pub mod query;
pub mod render;
pub mod table;
pub mod token;
pub mod value;
pub mod window;

#[cfg(test)]
pub mod test_utils;

pub use dialect::{Dialect, SqlDialect, UnknownDialect};
pub use dml::{
    Assignment, DeleteStatement, InsertSource, InsertStatement, OnConflict, Statement,
    UpdateStatement,
};
pub use literal::BoundSqlLiteral;
pub use manager::{DeleteManager, InsertManager, SelectManager, UpdateManager};
pub use node::{
    all_of, any_of, avg, bind, coalesce, col, count, count_distinct, count_star, cube, exists,
    func, grouping, grouping_sets, lit, max, min, null, rank, rollup, row, row_number, sql, star,
    sum, Attribute, BinaryOp, CaseBuilder, Node, Predications,
};
pub use query::{
    Cte, Join, JoinKind, JoinSource, Lock, NullsOrder, Ordering, Relation, SelectCore,
    SelectStatement, SetOp, SetQuantifier, SortDir, With,
};
pub use render::{RenderOptions, Rendered, Renderer, ToSql};
pub use table::Table;
pub use token::{Token, TokenStream};
pub use value::Value;
pub use window::{FrameBound, FrameUnit, NamedWindow, Window, WindowFrame, WindowSpec};
