//! Fluent statement builders.
//!
//! Managers are consumed by value and return themselves, so a chain reads
//! top to bottom and a half-built query can be forked with `clone()`.
//! List clauses (projections, WHERE, GROUP BY, HAVING, ORDER BY, joins)
//! accumulate across calls; single-valued clauses (FROM, LIMIT, OFFSET,
//! lock) are overwritten.
//!
//! # Example
//!
//! ```
//! use quarry::prelude::*;
//!
//! let users = Table::new("users");
//! let posts = Table::new("posts");
//!
//! let query = users
//!     .from()
//!     .project([users.col("name"), posts.col("title")])
//!     .join(&posts, posts.col("user_id").eq(users.col("id")))
//!     .filter(users.col("active").eq(true))
//!     .order([users.col("name").asc()]);
//!
//! let sql = query.to_sql(Dialect::Postgres).unwrap().sql;
//! assert!(sql.starts_with(r#"SELECT "users"."name", "posts"."title" FROM "users" INNER JOIN "posts""#));
//! ```

use super::dialect::Dialect;
use super::dml::{
    Assignment, DeleteStatement, InsertSource, InsertStatement, OnConflict, Statement,
    UpdateStatement,
};
use super::node::Node;
use super::query::{
    Cte, Join, JoinKind, JoinSource, Lock, Ordering, Relation, SelectStatement, SetOp,
    SetQuantifier, With,
};
use super::render::{RenderOptions, Rendered, ToSql};
use super::table::Table;
use super::window::{NamedWindow, Window};
use crate::error::{Error, Result};

fn push_ctes(with: &mut Option<With>, recursive: bool, ctes: impl IntoIterator<Item = Cte>) {
    let with = with.get_or_insert_with(With::default);
    with.recursive |= recursive;
    with.ctes.extend(ctes);
}

// ============================================================================
// SELECT
// ============================================================================

/// Builder for SELECT statements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[must_use = "SelectManager has no effect until rendered with to_sql()"]
pub struct SelectManager {
    ast: SelectStatement,
}

impl SelectManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the FROM relation, replacing any previous one.
    pub fn from(mut self, relation: impl Into<Relation>) -> Self {
        self.ast.core_mut().source.left = Some(relation.into());
        self
    }

    /// Add projections.
    pub fn project(mut self, projections: impl IntoIterator<Item = Node>) -> Self {
        self.ast.core_mut().projections.extend(projections);
        self
    }

    /// Add a WHERE predicate, ANDed with the existing ones.
    pub fn filter(mut self, predicate: Node) -> Self {
        self.ast.core_mut().wheres.push(predicate);
        self
    }

    fn push_join(mut self, kind: JoinKind, relation: Relation, on: Option<Node>) -> Self {
        self.ast
            .core_mut()
            .source
            .joins
            .push(Join { kind, relation, on });
        self
    }

    /// INNER JOIN.
    pub fn join(self, relation: impl Into<Relation>, on: Node) -> Self {
        self.push_join(JoinKind::Inner, relation.into(), Some(on))
    }

    pub fn left_join(self, relation: impl Into<Relation>, on: Node) -> Self {
        self.push_join(JoinKind::LeftOuter, relation.into(), Some(on))
    }

    pub fn right_join(self, relation: impl Into<Relation>, on: Node) -> Self {
        self.push_join(JoinKind::RightOuter, relation.into(), Some(on))
    }

    pub fn full_join(self, relation: impl Into<Relation>, on: Node) -> Self {
        self.push_join(JoinKind::FullOuter, relation.into(), Some(on))
    }

    pub fn cross_join(self, relation: impl Into<Relation>) -> Self {
        self.push_join(JoinKind::Cross, relation.into(), None)
    }

    /// Raw join clause, emitted as written.
    ///
    /// # Errors
    ///
    /// `Error::EmptyJoin` when `clause` is empty or blank.
    pub fn join_sql(self, clause: &str) -> Result<Self> {
        if clause.trim().is_empty() {
            return Err(Error::EmptyJoin);
        }
        Ok(self.push_join(JoinKind::Sql, Relation::Sql(clause.to_string()), None))
    }

    /// `CROSS JOIN LATERAL (query) alias`
    pub fn lateral_join(self, query: impl Into<SelectStatement>, alias: &str) -> Self {
        let relation = Relation::Lateral {
            query: Box::new(query.into()),
            alias: alias.into(),
        };
        self.push_join(JoinKind::Cross, relation, None)
    }

    pub fn group(mut self, exprs: impl IntoIterator<Item = Node>) -> Self {
        self.ast.core_mut().groups.extend(exprs);
        self
    }

    pub fn having(mut self, predicate: Node) -> Self {
        self.ast.core_mut().havings.push(predicate);
        self
    }

    /// Define a named window for the WINDOW clause.
    pub fn window(mut self, name: &str, window: Window) -> Self {
        self.ast
            .core_mut()
            .windows
            .push(NamedWindow::new(name, window));
        self
    }

    pub fn distinct(mut self) -> Self {
        self.ast.core_mut().set_quantifier = Some(SetQuantifier::Distinct);
        self
    }

    pub fn distinct_on(mut self, exprs: impl IntoIterator<Item = Node>) -> Self {
        self.ast.core_mut().set_quantifier =
            Some(SetQuantifier::DistinctOn(exprs.into_iter().collect()));
        self
    }

    pub fn order(mut self, orderings: impl IntoIterator<Item = impl Into<Ordering>>) -> Self {
        self.ast
            .orders
            .extend(orderings.into_iter().map(Into::into));
        self
    }

    /// LIMIT, replacing any previous one.
    pub fn take(mut self, n: impl Into<Node>) -> Self {
        self.ast.limit = Some(n.into());
        self
    }

    /// OFFSET, replacing any previous one.
    pub fn skip(mut self, n: impl Into<Node>) -> Self {
        self.ast.offset = Some(n.into());
        self
    }

    pub fn lock(mut self, lock: Lock) -> Self {
        self.ast.lock = Some(lock);
        self
    }

    pub fn with(mut self, ctes: impl IntoIterator<Item = Cte>) -> Self {
        push_ctes(&mut self.ast.with, false, ctes);
        self
    }

    pub fn with_recursive(mut self, ctes: impl IntoIterator<Item = Cte>) -> Self {
        push_ctes(&mut self.ast.with, true, ctes);
        self
    }

    /// Optimizer hints, rendered as `/*+ ... */` after SELECT.
    pub fn optimizer_hints(mut self, hints: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.ast
            .core_mut()
            .optimizer_hints
            .extend(hints.into_iter().map(Into::into));
        self
    }

    /// Trailing `/* comment */`.
    pub fn comment(mut self, text: impl Into<String>) -> Self {
        self.ast.core_mut().comments.push(text.into());
        self
    }

    /// `EXISTS (this query)`
    pub fn exists(self) -> Node {
        super::node::exists(self.ast)
    }

    /// This query as an aliased derived table.
    pub fn as_relation(self, alias: &str) -> Relation {
        Relation::Derived {
            node: Box::new(Node::Subquery(Box::new(self.ast))),
            alias: alias.into(),
        }
    }

    fn set_operation(self, op: SetOp, other: impl Into<SelectStatement>) -> Node {
        Node::SetOperation {
            op,
            left: Box::new(self.ast),
            right: Box::new(other.into()),
        }
    }

    pub fn union(self, other: impl Into<SelectStatement>) -> Node {
        self.set_operation(SetOp::Union, other)
    }

    pub fn union_all(self, other: impl Into<SelectStatement>) -> Node {
        self.set_operation(SetOp::UnionAll, other)
    }

    pub fn intersect(self, other: impl Into<SelectStatement>) -> Node {
        self.set_operation(SetOp::Intersect, other)
    }

    pub fn intersect_all(self, other: impl Into<SelectStatement>) -> Node {
        self.set_operation(SetOp::IntersectAll, other)
    }

    pub fn except(self, other: impl Into<SelectStatement>) -> Node {
        self.set_operation(SetOp::Except, other)
    }

    pub fn except_all(self, other: impl Into<SelectStatement>) -> Node {
        self.set_operation(SetOp::ExceptAll, other)
    }

    /// Append `other`'s cores joined by `op`. Statement-level clauses of
    /// `other` (ORDER BY, LIMIT, WITH) are dropped; set them on `self`.
    pub fn compound(mut self, op: SetOp, other: impl Into<SelectStatement>) -> Self {
        let other = other.into();
        self.ast.set_ops.push(op);
        self.ast.set_ops.extend(other.set_ops);
        self.ast.cores.extend(other.cores);
        self
    }

    pub fn projections(&self) -> &[Node] {
        self.ast.core().map_or(&[], |c| &c.projections)
    }

    /// WHERE predicates of the current core.
    pub fn constraints(&self) -> &[Node] {
        self.ast.core().map_or(&[], |c| &c.wheres)
    }

    pub fn join_sources(&self) -> Option<&JoinSource> {
        self.ast.core().map(|c| &c.source)
    }

    pub fn limit(&self) -> Option<&Node> {
        self.ast.limit.as_ref()
    }

    pub fn offset(&self) -> Option<&Node> {
        self.ast.offset.as_ref()
    }

    pub fn ast(&self) -> &SelectStatement {
        &self.ast
    }

    pub fn into_statement(self) -> SelectStatement {
        self.ast
    }
}

impl From<SelectManager> for SelectStatement {
    fn from(m: SelectManager) -> Self {
        m.ast
    }
}

impl From<SelectManager> for Node {
    fn from(m: SelectManager) -> Self {
        Node::Subquery(Box::new(m.ast))
    }
}

impl From<SelectManager> for Statement {
    fn from(m: SelectManager) -> Self {
        Statement::Select(m.ast)
    }
}

impl ToSql for SelectManager {
    fn to_sql_with(&self, dialect: Dialect, options: RenderOptions) -> Result<Rendered> {
        self.ast.to_sql_with(dialect, options)
    }
}

// ============================================================================
// INSERT
// ============================================================================

/// Builder for INSERT statements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[must_use = "InsertManager has no effect until rendered with to_sql()"]
pub struct InsertManager {
    ast: InsertStatement,
}

impl InsertManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Target table.
    pub fn into(mut self, table: impl Into<Table>) -> Self {
        self.ast.relation = Some(table.into());
        self
    }

    pub fn columns(mut self, columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.ast
            .columns
            .extend(columns.into_iter().map(Into::into));
        self
    }

    /// Append one VALUES row. Replaces a SELECT or DEFAULT VALUES source.
    pub fn values(mut self, row: impl IntoIterator<Item = Node>) -> Self {
        let row: Vec<Node> = row.into_iter().collect();
        match &mut self.ast.source {
            Some(InsertSource::Values(rows)) => rows.push(row),
            source => *source = Some(InsertSource::Values(vec![row])),
        }
        self
    }

    /// Column/value pairs: adds the columns and one VALUES row.
    pub fn insert(self, pairs: impl IntoIterator<Item = (impl Into<String>, Node)>) -> Self {
        let (columns, row): (Vec<String>, Vec<Node>) =
            pairs.into_iter().map(|(c, v)| (c.into(), v)).unzip();
        self.columns(columns).values(row)
    }

    /// `INSERT INTO t (...) SELECT ...`
    pub fn select(mut self, query: impl Into<SelectStatement>) -> Self {
        self.ast.source = Some(InsertSource::Select(Box::new(query.into())));
        self
    }

    pub fn default_values(mut self) -> Self {
        self.ast.source = Some(InsertSource::DefaultValues);
        self
    }

    pub fn on_conflict(mut self, conflict: OnConflict) -> Self {
        self.ast.on_conflict = Some(conflict);
        self
    }

    pub fn returning(mut self, exprs: impl IntoIterator<Item = Node>) -> Self {
        self.ast.returning.extend(exprs);
        self
    }

    pub fn with(mut self, ctes: impl IntoIterator<Item = Cte>) -> Self {
        push_ctes(&mut self.ast.with, false, ctes);
        self
    }

    pub fn ast(&self) -> &InsertStatement {
        &self.ast
    }

    pub fn into_statement(self) -> InsertStatement {
        self.ast
    }
}

impl From<InsertManager> for Statement {
    fn from(m: InsertManager) -> Self {
        Statement::Insert(m.ast)
    }
}

impl ToSql for InsertManager {
    fn to_sql_with(&self, dialect: Dialect, options: RenderOptions) -> Result<Rendered> {
        self.ast.to_sql_with(dialect, options)
    }
}

// ============================================================================
// UPDATE / DELETE
// ============================================================================

/// Builder for UPDATE statements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[must_use = "UpdateManager has no effect until rendered with to_sql()"]
pub struct UpdateManager {
    ast: UpdateStatement,
}

impl UpdateManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table(mut self, table: impl Into<Table>) -> Self {
        self.ast.relation = Some(table.into());
        self
    }

    /// Add a `"column" = value` assignment.
    pub fn set(mut self, column: impl Into<String>, value: impl Into<Node>) -> Self {
        self.ast.values.push(Assignment::new(column, value));
        self
    }

    pub fn filter(mut self, predicate: Node) -> Self {
        self.ast.wheres.push(predicate);
        self
    }

    pub fn join(mut self, relation: impl Into<Relation>, on: Node) -> Self {
        self.ast.joins.push(Join {
            kind: JoinKind::Inner,
            relation: relation.into(),
            on: Some(on),
        });
        self
    }

    pub fn group(mut self, exprs: impl IntoIterator<Item = Node>) -> Self {
        self.ast.groups.extend(exprs);
        self
    }

    pub fn having(mut self, predicate: Node) -> Self {
        self.ast.havings.push(predicate);
        self
    }

    pub fn order(mut self, orderings: impl IntoIterator<Item = impl Into<Ordering>>) -> Self {
        self.ast
            .orders
            .extend(orderings.into_iter().map(Into::into));
        self
    }

    pub fn take(mut self, n: impl Into<Node>) -> Self {
        self.ast.limit = Some(n.into());
        self
    }

    pub fn skip(mut self, n: impl Into<Node>) -> Self {
        self.ast.offset = Some(n.into());
        self
    }

    /// Primary-key expression used to rewrite ORDER BY, LIMIT and joins
    /// into a `key IN (SELECT key ...)` subselect.
    pub fn key(mut self, key: Node) -> Self {
        self.ast.key = Some(key);
        self
    }

    pub fn returning(mut self, exprs: impl IntoIterator<Item = Node>) -> Self {
        self.ast.returning.extend(exprs);
        self
    }

    pub fn with(mut self, ctes: impl IntoIterator<Item = Cte>) -> Self {
        push_ctes(&mut self.ast.with, false, ctes);
        self
    }

    pub fn ast(&self) -> &UpdateStatement {
        &self.ast
    }

    pub fn into_statement(self) -> UpdateStatement {
        self.ast
    }
}

impl From<UpdateManager> for Statement {
    fn from(m: UpdateManager) -> Self {
        Statement::Update(m.ast)
    }
}

impl ToSql for UpdateManager {
    fn to_sql_with(&self, dialect: Dialect, options: RenderOptions) -> Result<Rendered> {
        self.ast.to_sql_with(dialect, options)
    }
}

/// Builder for DELETE statements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[must_use = "DeleteManager has no effect until rendered with to_sql()"]
pub struct DeleteManager {
    ast: DeleteStatement,
}

impl DeleteManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from(mut self, table: impl Into<Table>) -> Self {
        self.ast.relation = Some(table.into());
        self
    }

    pub fn filter(mut self, predicate: Node) -> Self {
        self.ast.wheres.push(predicate);
        self
    }

    pub fn join(mut self, relation: impl Into<Relation>, on: Node) -> Self {
        self.ast.joins.push(Join {
            kind: JoinKind::Inner,
            relation: relation.into(),
            on: Some(on),
        });
        self
    }

    pub fn group(mut self, exprs: impl IntoIterator<Item = Node>) -> Self {
        self.ast.groups.extend(exprs);
        self
    }

    pub fn having(mut self, predicate: Node) -> Self {
        self.ast.havings.push(predicate);
        self
    }

    pub fn order(mut self, orderings: impl IntoIterator<Item = impl Into<Ordering>>) -> Self {
        self.ast
            .orders
            .extend(orderings.into_iter().map(Into::into));
        self
    }

    pub fn take(mut self, n: impl Into<Node>) -> Self {
        self.ast.limit = Some(n.into());
        self
    }

    pub fn skip(mut self, n: impl Into<Node>) -> Self {
        self.ast.offset = Some(n.into());
        self
    }

    pub fn key(mut self, key: Node) -> Self {
        self.ast.key = Some(key);
        self
    }

    pub fn returning(mut self, exprs: impl IntoIterator<Item = Node>) -> Self {
        self.ast.returning.extend(exprs);
        self
    }

    pub fn with(mut self, ctes: impl IntoIterator<Item = Cte>) -> Self {
        push_ctes(&mut self.ast.with, false, ctes);
        self
    }

    pub fn ast(&self) -> &DeleteStatement {
        &self.ast
    }

    pub fn into_statement(self) -> DeleteStatement {
        self.ast
    }
}

impl From<DeleteManager> for Statement {
    fn from(m: DeleteManager) -> Self {
        Statement::Delete(m.ast)
    }
}

impl ToSql for DeleteManager {
    fn to_sql_with(&self, dialect: Dialect, options: RenderOptions) -> Result<Rendered> {
        self.ast.to_sql_with(dialect, options)
    }
}
