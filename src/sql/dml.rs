//! DML (Data Manipulation Language) statement nodes.
//!
//! INSERT, UPDATE and DELETE trees, plus the `Statement` union the renderer
//! and render cache work with. Builders live in `manager`.

use serde::{Deserialize, Serialize};

use super::node::Node;
use super::query::{Join, Ordering, SelectStatement, With};
use super::table::Table;

// ============================================================================
// INSERT
// ============================================================================

/// `"column" = value` in SET and DO UPDATE SET.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Assignment {
    pub column: String,
    pub value: Node,
}

impl Assignment {
    pub fn new(column: impl Into<String>, value: impl Into<Node>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }
}

/// Where inserted rows come from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsertSource {
    /// `VALUES (...), (...)`
    Values(Vec<Vec<Node>>),
    /// `INSERT INTO t (...) SELECT ...`
    Select(Box<SelectStatement>),
    DefaultValues,
}

/// Conflict handling for INSERT.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnConflict {
    DoNothing {
        target: Vec<String>,
    },
    DoUpdate {
        target: Vec<String>,
        assignments: Vec<Assignment>,
    },
}

impl OnConflict {
    pub fn do_nothing(target: impl IntoIterator<Item = impl Into<String>>) -> Self {
        OnConflict::DoNothing {
            target: target.into_iter().map(Into::into).collect(),
        }
    }

    pub fn do_update(
        target: impl IntoIterator<Item = impl Into<String>>,
        assignments: impl IntoIterator<Item = Assignment>,
    ) -> Self {
        OnConflict::DoUpdate {
            target: target.into_iter().map(Into::into).collect(),
            assignments: assignments.into_iter().collect(),
        }
    }
}

/// INSERT statement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InsertStatement {
    pub relation: Option<Table>,
    pub columns: Vec<String>,
    pub source: Option<InsertSource>,
    pub with: Option<With>,
    pub on_conflict: Option<OnConflict>,
    pub returning: Vec<Node>,
}

// ============================================================================
// UPDATE / DELETE
// ============================================================================

/// UPDATE statement.
///
/// `key` is the primary-key expression used when ORDER BY, LIMIT, OFFSET,
/// GROUP BY or joins must be pushed into a `key IN (SELECT key ...)`
/// subselect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UpdateStatement {
    pub relation: Option<Table>,
    pub joins: Vec<Join>,
    pub values: Vec<Assignment>,
    pub wheres: Vec<Node>,
    pub groups: Vec<Node>,
    pub havings: Vec<Node>,
    pub orders: Vec<Ordering>,
    pub limit: Option<Node>,
    pub offset: Option<Node>,
    pub key: Option<Node>,
    pub with: Option<With>,
    pub returning: Vec<Node>,
}

/// DELETE statement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeleteStatement {
    pub relation: Option<Table>,
    pub joins: Vec<Join>,
    pub wheres: Vec<Node>,
    pub groups: Vec<Node>,
    pub havings: Vec<Node>,
    pub orders: Vec<Ordering>,
    pub limit: Option<Node>,
    pub offset: Option<Node>,
    pub key: Option<Node>,
    pub with: Option<With>,
    pub returning: Vec<Node>,
}

/// Clauses UPDATE and DELETE share, borrowed for the subselect rewrite.
pub(crate) struct ModifyParts<'a> {
    pub relation: Option<&'a Table>,
    pub joins: &'a [Join],
    pub wheres: &'a [Node],
    pub groups: &'a [Node],
    pub havings: &'a [Node],
    pub orders: &'a [Ordering],
    pub limit: Option<&'a Node>,
    pub offset: Option<&'a Node>,
    pub key: Option<&'a Node>,
}

impl ModifyParts<'_> {
    pub fn has_limit_offset_or_orders(&self) -> bool {
        self.limit.is_some() || self.offset.is_some() || !self.orders.is_empty()
    }

    pub fn has_groups(&self) -> bool {
        !self.groups.is_empty() || !self.havings.is_empty()
    }

    pub fn has_joins(&self) -> bool {
        !self.joins.is_empty()
    }
}

impl UpdateStatement {
    pub(crate) fn parts(&self) -> ModifyParts<'_> {
        ModifyParts {
            relation: self.relation.as_ref(),
            joins: &self.joins,
            wheres: &self.wheres,
            groups: &self.groups,
            havings: &self.havings,
            orders: &self.orders,
            limit: self.limit.as_ref(),
            offset: self.offset.as_ref(),
            key: self.key.as_ref(),
        }
    }
}

impl DeleteStatement {
    pub(crate) fn parts(&self) -> ModifyParts<'_> {
        ModifyParts {
            relation: self.relation.as_ref(),
            joins: &self.joins,
            wheres: &self.wheres,
            groups: &self.groups,
            havings: &self.havings,
            orders: &self.orders,
            limit: self.limit.as_ref(),
            offset: self.offset.as_ref(),
            key: self.key.as_ref(),
        }
    }
}

// ============================================================================
// Statement
// ============================================================================

/// Any renderable top-level statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "statement", rename_all = "snake_case")]
pub enum Statement {
    Select(SelectStatement),
    Insert(InsertStatement),
    Update(UpdateStatement),
    Delete(DeleteStatement),
}

impl Statement {
    pub fn kind(&self) -> &'static str {
        match self {
            Statement::Select(_) => "select",
            Statement::Insert(_) => "insert",
            Statement::Update(_) => "update",
            Statement::Delete(_) => "delete",
        }
    }
}

impl From<SelectStatement> for Statement {
    fn from(s: SelectStatement) -> Self {
        Statement::Select(s)
    }
}

impl From<InsertStatement> for Statement {
    fn from(s: InsertStatement) -> Self {
        Statement::Insert(s)
    }
}

impl From<UpdateStatement> for Statement {
    fn from(s: UpdateStatement) -> Self {
        Statement::Update(s)
    }
}

impl From<DeleteStatement> for Statement {
    fn from(s: DeleteStatement) -> Self {
        Statement::Delete(s)
    }
}
