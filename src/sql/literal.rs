//! Raw SQL fragments with bind values.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::node::Node;
use crate::error::{Error, Result};

/// `::` casts are matched first so `x::int` is not read as a `:int` bind.
static NAMED_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"::|:([A-Za-z]\w*)").expect("placeholder pattern is valid"));

/// A segment of a bound SQL literal after placeholder substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment<'a> {
    Sql(&'a str),
    Bind(&'a Node),
}

/// Raw SQL with `?` positional or `:name` named placeholders.
///
/// Bind counts are validated at construction, so a literal that exists
/// always renders.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundSqlLiteral {
    sql: String,
    positional: Vec<Node>,
    named: BTreeMap<String, Node>,
}

impl BoundSqlLiteral {
    /// Build a literal, checking the binds against the placeholders.
    ///
    /// # Errors
    ///
    /// `Error::Bind` when positional and named binds are mixed, when the
    /// number of positional binds differs from the number of `?`, or when
    /// a `:name` placeholder has no named bind.
    pub fn new(
        sql: impl Into<String>,
        positional: Vec<Node>,
        named: BTreeMap<String, Node>,
    ) -> Result<Self> {
        let sql = sql.into();

        if !positional.is_empty() {
            if !named.is_empty() {
                return Err(Error::bind("cannot mix positional and named binds", &sql));
            }
            let expected = sql.matches('?').count();
            if positional.len() != expected {
                return Err(Error::bind(
                    format!(
                        "wrong number of bind variables ({} for {})",
                        positional.len(),
                        expected
                    ),
                    &sql,
                ));
            }
        } else if !named.is_empty() {
            let missing: BTreeSet<&str> = placeholder_names(&sql)
                .into_iter()
                .filter(|name| !named.contains_key(*name))
                .collect();
            match missing.len() {
                0 => {}
                1 => {
                    let name = missing.iter().next().copied().unwrap_or_default();
                    return Err(Error::bind(format!("missing value for :{}", name), &sql));
                }
                _ => {
                    let names: Vec<String> = missing.iter().map(|n| format!(":{}", n)).collect();
                    return Err(Error::bind(
                        format!("missing values for [{}]", names.join(", ")),
                        &sql,
                    ));
                }
            }
        }

        Ok(Self {
            sql,
            positional,
            named,
        })
    }

    /// Positional form: `sql` with one `?` per bind.
    pub fn positional(sql: impl Into<String>, binds: Vec<Node>) -> Result<Self> {
        Self::new(sql, binds, BTreeMap::new())
    }

    /// Named form: `sql` with `:name` placeholders.
    pub fn named(
        sql: impl Into<String>,
        binds: impl IntoIterator<Item = (impl Into<String>, Node)>,
    ) -> Result<Self> {
        let named = binds.into_iter().map(|(k, v)| (k.into(), v)).collect();
        Self::new(sql, Vec::new(), named)
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Split the SQL into raw text and the binds that replace its placeholders.
    pub fn fragments(&self) -> Vec<Fragment<'_>> {
        let mut out = Vec::new();
        if !self.positional.is_empty() {
            let mut binds = self.positional.iter();
            let mut parts = self.sql.split('?').peekable();
            while let Some(part) = parts.next() {
                if !part.is_empty() {
                    out.push(Fragment::Sql(part));
                }
                if parts.peek().is_some() {
                    if let Some(bind) = binds.next() {
                        out.push(Fragment::Bind(bind));
                    }
                }
            }
        } else if !self.named.is_empty() {
            let mut last = 0;
            for caps in NAMED_PLACEHOLDER.captures_iter(&self.sql) {
                let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                    continue;
                };
                if let Some(bind) = self.named.get(name.as_str()) {
                    if whole.start() > last {
                        out.push(Fragment::Sql(&self.sql[last..whole.start()]));
                    }
                    out.push(Fragment::Bind(bind));
                    last = whole.end();
                }
            }
            if last < self.sql.len() {
                out.push(Fragment::Sql(&self.sql[last..]));
            }
        } else if !self.sql.is_empty() {
            out.push(Fragment::Sql(&self.sql));
        }
        out
    }
}

/// Names of the `:name` placeholders in `sql`, in order of appearance.
fn placeholder_names(sql: &str) -> Vec<&str> {
    NAMED_PLACEHOLDER
        .captures_iter(sql)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}
