//! SELECT statement nodes.
//!
//! A `SelectStatement` is one or more `SelectCore`s joined by set
//! operators, plus the statement-level ORDER BY, LIMIT, OFFSET, lock and
//! WITH clause. A `SelectCore` holds the per-SELECT clauses: FROM with its
//! joins, projections, WHERE, GROUP BY, HAVING, WINDOW and the set
//! quantifier.

use serde::{Deserialize, Serialize};

use super::node::Node;
use super::table::Table;
use super::window::NamedWindow;

// ============================================================================
// Relations and joins
// ============================================================================

/// Anything that can appear in FROM or JOIN.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    Table(Table),
    /// Parenthesized subquery or set operation with an alias.
    Derived { node: Box<Node>, alias: String },
    /// `LATERAL (subquery) alias`
    Lateral {
        query: Box<SelectStatement>,
        alias: String,
    },
    /// Raw SQL relation.
    Sql(String),
}

impl From<Table> for Relation {
    fn from(t: Table) -> Self {
        Relation::Table(t)
    }
}

impl From<&Table> for Relation {
    fn from(t: &Table) -> Self {
        Relation::Table(t.clone())
    }
}

impl From<&str> for Relation {
    fn from(name: &str) -> Self {
        Relation::Table(Table::new(name))
    }
}

/// JOIN type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinKind {
    Inner,
    LeftOuter,
    RightOuter,
    FullOuter,
    Cross,
    /// Raw SQL join; the relation carries the whole clause.
    Sql,
}

/// One JOIN clause.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Join {
    pub kind: JoinKind,
    pub relation: Relation,
    pub on: Option<Node>,
}

/// FROM relation plus its joins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JoinSource {
    pub left: Option<Relation>,
    pub joins: Vec<Join>,
}

impl JoinSource {
    pub fn is_empty(&self) -> bool {
        self.left.is_none() && self.joins.is_empty()
    }
}

// ============================================================================
// Ordering
// ============================================================================

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDir {
    Asc,
    Desc,
}

/// NULL placement in ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NullsOrder {
    First,
    Last,
}

/// ORDER BY term.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ordering {
    pub expr: Node,
    pub direction: Option<SortDir>,
    pub nulls: Option<NullsOrder>,
}

impl Ordering {
    pub fn new(expr: Node) -> Self {
        Self {
            expr,
            direction: None,
            nulls: None,
        }
    }

    pub fn direction(mut self, dir: SortDir) -> Self {
        self.direction = Some(dir);
        self
    }

    pub fn nulls_first(mut self) -> Self {
        self.nulls = Some(NullsOrder::First);
        self
    }

    pub fn nulls_last(mut self) -> Self {
        self.nulls = Some(NullsOrder::Last);
        self
    }

    /// The ordering with direction and NULL placement both flipped.
    /// An unspecified direction counts as ascending.
    pub fn reverse(self) -> Self {
        let direction = match self.direction {
            Some(SortDir::Desc) => SortDir::Asc,
            Some(SortDir::Asc) | None => SortDir::Desc,
        };
        Self {
            expr: self.expr,
            direction: Some(direction),
            nulls: self.nulls.map(|n| match n {
                NullsOrder::First => NullsOrder::Last,
                NullsOrder::Last => NullsOrder::First,
            }),
        }
    }
}

impl From<Node> for Ordering {
    fn from(expr: Node) -> Self {
        Ordering::new(expr)
    }
}

// ============================================================================
// Set operations, locks, CTEs
// ============================================================================

/// Set operation joining two SELECTs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetOp {
    Union,
    UnionAll,
    Intersect,
    IntersectAll,
    Except,
    ExceptAll,
}

/// Row-locking clause.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lock {
    /// `FOR UPDATE`
    ForUpdate,
    /// Raw locking clause such as `FOR SHARE SKIP LOCKED`.
    Sql(String),
}

/// `CYCLE col, ... SET mark USING path` on a recursive CTE.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CteCycle {
    pub columns: Vec<String>,
    pub mark_column: String,
    pub path_column: String,
}

/// Common Table Expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cte {
    pub name: String,
    pub columns: Vec<String>,
    pub query: Box<SelectStatement>,
    /// `Some(true)` = MATERIALIZED, `Some(false)` = NOT MATERIALIZED
    pub materialized: Option<bool>,
    pub cycle: Option<CteCycle>,
}

impl Cte {
    pub fn new(name: impl Into<String>, query: impl Into<SelectStatement>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            query: Box::new(query.into()),
            materialized: None,
            cycle: None,
        }
    }

    pub fn columns(mut self, cols: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.columns = cols.into_iter().map(Into::into).collect();
        self
    }

    pub fn materialized(mut self, materialized: bool) -> Self {
        self.materialized = Some(materialized);
        self
    }

    pub fn cycle(
        mut self,
        columns: impl IntoIterator<Item = impl Into<String>>,
        mark_column: impl Into<String>,
        path_column: impl Into<String>,
    ) -> Self {
        self.cycle = Some(CteCycle {
            columns: columns.into_iter().map(Into::into).collect(),
            mark_column: mark_column.into(),
            path_column: path_column.into(),
        });
        self
    }
}

/// WITH clause.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct With {
    pub recursive: bool,
    pub ctes: Vec<Cte>,
}

// ============================================================================
// SELECT
// ============================================================================

/// DISTINCT or DISTINCT ON.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetQuantifier {
    Distinct,
    DistinctOn(Vec<Node>),
}

/// A single SELECT ... FROM ... WHERE ... GROUP BY ... HAVING ... WINDOW.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectCore {
    pub source: JoinSource,
    pub projections: Vec<Node>,
    pub wheres: Vec<Node>,
    pub groups: Vec<Node>,
    pub havings: Vec<Node>,
    pub windows: Vec<NamedWindow>,
    pub set_quantifier: Option<SetQuantifier>,
    pub optimizer_hints: Vec<String>,
    pub comments: Vec<String>,
}

/// A complete SELECT statement.
///
/// `cores` is never empty; `set_ops[i]` joins `cores[i]` and `cores[i + 1]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[must_use]
pub struct SelectStatement {
    pub with: Option<With>,
    pub cores: Vec<SelectCore>,
    pub set_ops: Vec<SetOp>,
    pub orders: Vec<Ordering>,
    pub limit: Option<Node>,
    pub offset: Option<Node>,
    pub lock: Option<Lock>,
}

impl Default for SelectStatement {
    fn default() -> Self {
        Self {
            with: None,
            cores: vec![SelectCore::default()],
            set_ops: Vec::new(),
            orders: Vec::new(),
            limit: None,
            offset: None,
            lock: None,
        }
    }
}

impl SelectStatement {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append another core joined by `op`, making this a compound SELECT.
    pub fn compound(mut self, op: SetOp, core: SelectCore) -> Self {
        self.set_ops.push(op);
        self.cores.push(core);
        self
    }

    /// The core that clause builders extend (the last one).
    pub fn core(&self) -> Option<&SelectCore> {
        self.cores.last()
    }

    pub(crate) fn core_mut(&mut self) -> &mut SelectCore {
        if self.cores.is_empty() {
            self.cores.push(SelectCore::default());
        }
        let last = self.cores.len() - 1;
        &mut self.cores[last]
    }

    pub fn is_compound(&self) -> bool {
        self.cores.len() > 1
    }
}
