//! Tables as attribute factories and entry points to query builders.

use serde::{Deserialize, Serialize};

use super::manager::SelectManager;
use super::node::{Attribute, Node};
use super::query::{Ordering, Relation};

/// A named table, optionally schema-qualified and aliased.
///
/// ```
/// use quarry::prelude::*;
///
/// let users = Table::new("users");
/// let sql = users.project([users.col("id")]).take(1).to_sql(Dialect::Generic).unwrap();
/// assert_eq!(sql.sql, r#"SELECT "users"."id" FROM "users" LIMIT 1"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    pub schema: Option<String>,
    pub alias: Option<String>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema: None,
            alias: None,
        }
    }

    /// Schema-qualified table: `"schema"."name"`.
    pub fn with_schema(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema: Some(schema.into()),
            alias: None,
        }
    }

    /// An aliased copy; attributes of the copy are qualified by the alias.
    pub fn alias(&self, alias: impl Into<String>) -> Table {
        Table {
            alias: Some(alias.into()),
            ..self.clone()
        }
    }

    /// The name attributes are qualified with.
    pub fn reference_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    /// Column of this table.
    pub fn col(&self, name: &str) -> Node {
        Node::Attribute(Attribute::new(self.reference_name(), name))
    }

    /// `"table".*`
    pub fn star(&self) -> Node {
        Node::Star {
            relation: Some(self.reference_name().to_string()),
        }
    }

    pub fn relation(&self) -> Relation {
        Relation::Table(self.clone())
    }

    /// `SELECT ... FROM table` builder.
    pub fn from(&self) -> SelectManager {
        SelectManager::new().from(self)
    }

    pub fn project(&self, projections: impl IntoIterator<Item = Node>) -> SelectManager {
        self.from().project(projections)
    }

    pub fn filter(&self, predicate: Node) -> SelectManager {
        self.from().filter(predicate)
    }

    pub fn join(&self, other: impl Into<Relation>, on: Node) -> SelectManager {
        self.from().join(other, on)
    }

    pub fn group(&self, exprs: impl IntoIterator<Item = Node>) -> SelectManager {
        self.from().group(exprs)
    }

    pub fn order(&self, orderings: impl IntoIterator<Item = impl Into<Ordering>>) -> SelectManager {
        self.from().order(orderings)
    }

    pub fn take(&self, n: impl Into<Node>) -> SelectManager {
        self.from().take(n)
    }

    pub fn skip(&self, n: impl Into<Node>) -> SelectManager {
        self.from().skip(n)
    }
}

impl From<&str> for Table {
    fn from(name: &str) -> Self {
        Table::new(name)
    }
}

impl From<&Table> for Table {
    fn from(t: &Table) -> Self {
        t.clone()
    }
}
