//! AST renderer.
//!
//! `Renderer` walks statements and nodes into a `TokenStream`, collecting
//! bind values in emission order so placeholder `n` always matches
//! `binds[n - 1]`. Dialect differences are resolved here: the renderer asks
//! the dialect how to spell a construct, emulates it where a faithful
//! rewrite exists, and fails with `Error::Unsupported` otherwise.
//!
//! ```
//! use quarry::prelude::*;
//!
//! let users = Table::new("users");
//! let query = users
//!     .project([users.col("id")])
//!     .filter(users.col("id").eq(1))
//!     .take(1);
//!
//! let rendered = query.to_sql(Dialect::Generic).unwrap();
//! assert_eq!(
//!     rendered.sql,
//!     r#"SELECT "users"."id" FROM "users" WHERE "users"."id" = 1 LIMIT 1"#
//! );
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use super::dialect::{
    Dialect, DistinctFromStyle, ExtractStyle, LockStyle, NullsOrdering, Pagination,
    ReturningStyle, SqlDialect, UpsertStyle,
};
use super::dml::{
    Assignment, DeleteStatement, InsertSource, InsertStatement, ModifyParts, OnConflict,
    Statement, UpdateStatement,
};
use super::literal::Fragment;
use super::node::{Attribute, BinaryOp, Node};
use super::query::{
    Cte, Join, JoinKind, JoinSource, Lock, NullsOrder, Ordering, Relation, SelectCore,
    SelectStatement, SetOp, SetQuantifier, SortDir, With,
};
use super::table::Table;
use super::token::{sanitize_comment, Token, TokenStream};
use super::value::Value;
use super::window::{FrameBound, FrameUnit, Window, WindowFrame, WindowSpec};
use crate::error::{Error, Result};

/// Alias of the derived table MySQL needs around a keyed DML subselect.
const DERIVED_KEY_ALIAS: &str = "__quarry_temp";

/// Rendering switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Emit bind parameters as placeholders. When false they are inlined
    /// as quoted literals and `Rendered::binds` is empty.
    pub prepared_statements: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            prepared_statements: true,
        }
    }
}

/// SQL text plus the bind values its placeholders refer to, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rendered {
    pub sql: String,
    pub binds: Vec<Value>,
}

/// Anything that can be rendered to SQL.
pub trait ToSql {
    fn to_sql(&self, dialect: Dialect) -> Result<Rendered> {
        self.to_sql_with(dialect, RenderOptions::default())
    }

    fn to_sql_with(&self, dialect: Dialect, options: RenderOptions) -> Result<Rendered>;
}

fn render(
    dialect: Dialect,
    options: RenderOptions,
    kind: &'static str,
    f: impl FnOnce(&mut Renderer) -> Result<()>,
) -> Result<Rendered> {
    let mut renderer = Renderer::new(dialect, options);
    f(&mut renderer)?;
    let rendered = renderer.finish();
    debug!(%dialect, kind, binds = rendered.binds.len(), "rendered");
    trace!(sql = %rendered.sql);
    Ok(rendered)
}

impl ToSql for Node {
    fn to_sql_with(&self, dialect: Dialect, options: RenderOptions) -> Result<Rendered> {
        render(dialect, options, self.kind(), |r| r.node(self))
    }
}

impl ToSql for SelectStatement {
    fn to_sql_with(&self, dialect: Dialect, options: RenderOptions) -> Result<Rendered> {
        render(dialect, options, "select", |r| r.select(self))
    }
}

impl ToSql for InsertStatement {
    fn to_sql_with(&self, dialect: Dialect, options: RenderOptions) -> Result<Rendered> {
        render(dialect, options, "insert", |r| r.insert(self))
    }
}

impl ToSql for UpdateStatement {
    fn to_sql_with(&self, dialect: Dialect, options: RenderOptions) -> Result<Rendered> {
        render(dialect, options, "update", |r| r.update(self))
    }
}

impl ToSql for DeleteStatement {
    fn to_sql_with(&self, dialect: Dialect, options: RenderOptions) -> Result<Rendered> {
        render(dialect, options, "delete", |r| r.delete(self))
    }
}

impl ToSql for Statement {
    fn to_sql_with(&self, dialect: Dialect, options: RenderOptions) -> Result<Rendered> {
        render(dialect, options, self.kind(), |r| match self {
            Statement::Select(s) => r.select(s),
            Statement::Insert(s) => r.insert(s),
            Statement::Update(s) => r.update(s),
            Statement::Delete(s) => r.delete(s),
        })
    }
}

/// How an UPDATE/DELETE handles ORDER BY, LIMIT, GROUP BY and joins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ModifyPlan {
    /// None of those clauses are present.
    Plain,
    /// The dialect accepts them on the statement itself.
    Native,
    /// They move into a `key IN (SELECT key ...)` subselect.
    Rewrite,
}

/// Visitor that turns AST nodes into tokens and binds.
#[derive(Debug)]
pub struct Renderer {
    dialect: Dialect,
    options: RenderOptions,
    ts: TokenStream,
    binds: Vec<Value>,
}

impl Renderer {
    pub fn new(dialect: Dialect, options: RenderOptions) -> Self {
        Self {
            dialect,
            options,
            ts: TokenStream::new(),
            binds: Vec::new(),
        }
    }

    /// Serialize the collected tokens.
    pub fn finish(self) -> Rendered {
        Rendered {
            sql: self.ts.serialize(self.dialect),
            binds: self.binds,
        }
    }

    fn unsupported(&self, feature: &'static str) -> Error {
        Error::unsupported(feature, self.dialect.name())
    }

    /// Render `items` separated by `, `.
    fn list<T>(
        &mut self,
        items: &[T],
        mut f: impl FnMut(&mut Self, &T) -> Result<()>,
    ) -> Result<()> {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.ts.comma().space();
            }
            f(self, item)?;
        }
        Ok(())
    }

    fn nodes(&mut self, nodes: &[Node]) -> Result<()> {
        self.list(nodes, |r, n| r.node(n))
    }

    fn idents(&mut self, names: &[String]) {
        for (i, name) in names.iter().enumerate() {
            if i > 0 {
                self.ts.comma().space();
            }
            self.ts.push(Token::Ident(name.clone()));
        }
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    pub fn node(&mut self, node: &Node) -> Result<()> {
        match node {
            Node::Attribute(a) => self.attribute(a),
            Node::UnqualifiedColumn(name) => {
                self.ts.push(Token::Ident(name.clone()));
            }
            Node::Star { relation } => {
                if let Some(r) = relation {
                    self.ts.push(Token::Ident(r.clone())).push(Token::Dot);
                }
                self.ts.push(Token::Star);
            }
            Node::Literal(v) => self.value(v)?,
            Node::BindParam(v) => self.bind(v)?,
            Node::SqlLiteral(raw) => {
                self.ts.push(Token::Raw(raw.clone()));
            }
            Node::BoundSqlLiteral(b) => {
                for fragment in b.fragments() {
                    match fragment {
                        Fragment::Sql(raw) => {
                            self.ts.push(Token::Raw(raw.to_string()));
                        }
                        Fragment::Bind(n) => self.node(n)?,
                    }
                }
            }
            Node::Not(inner) => {
                self.ts.push(Token::Not).space().lparen();
                self.node(inner)?;
                self.ts.rparen();
            }
            Node::Grouping(inner) => {
                // (( x )) collapses to ( x )
                if matches!(**inner, Node::Grouping(_)) {
                    self.node(inner)?;
                } else {
                    self.ts.lparen();
                    self.node(inner)?;
                    self.ts.rparen();
                }
            }
            Node::Exists { query, negated } => {
                if *negated {
                    self.ts.push(Token::Not).space();
                }
                self.ts.push(Token::Exists).space().lparen();
                self.select(query)?;
                self.ts.rparen();
            }
            Node::Subquery(query) => {
                self.ts.lparen();
                self.select(query)?;
                self.ts.rparen();
            }
            Node::As { expr, alias } => {
                self.node(expr)?;
                self.ts
                    .space()
                    .push(Token::As)
                    .space()
                    .push(Token::Ident(alias.clone()));
            }
            Node::Extract { field, expr } => self.extract(field, expr)?,
            Node::Binary { op, left, right } => self.binary(*op, left, right)?,
            Node::Between {
                expr,
                low,
                high,
                negated,
            } => {
                self.node(expr)?;
                self.ts.space();
                if *negated {
                    self.ts.push(Token::Not).space();
                }
                self.ts.push(Token::Between).space();
                self.node(low)?;
                self.ts.space().push(Token::And).space();
                self.node(high)?;
            }
            Node::In {
                expr,
                values,
                negated,
            } => self.in_list(expr, values, *negated)?,
            Node::InSelect {
                expr,
                query,
                negated,
            } => {
                self.node(expr)?;
                self.ts.space();
                if *negated {
                    self.ts.push(Token::Not).space();
                }
                self.ts.push(Token::In).space().lparen();
                self.select(query)?;
                self.ts.rparen();
            }
            Node::HomogeneousIn {
                attribute,
                values,
                negated,
            } => {
                let expr = Node::Attribute(attribute.clone());
                let values: Vec<Node> = values.iter().cloned().map(Node::BindParam).collect();
                self.in_list(&expr, &values, *negated)?;
            }
            Node::Matches {
                expr,
                pattern,
                escape,
                case_sensitive,
                negated,
            } => self.matches(expr, pattern, *escape, *case_sensitive, *negated)?,
            Node::Regexp {
                expr,
                pattern,
                case_sensitive,
                negated,
            } => {
                let op = self
                    .dialect
                    .regexp_operator(*case_sensitive, *negated)
                    .ok_or_else(|| self.unsupported("regular expression matching"))?;
                self.node(expr)?;
                self.ts.space().push(Token::Raw(op.into())).space();
                self.node(pattern)?;
            }
            Node::SetOperation { op, left, right } => {
                self.ts.lparen();
                self.select(left)?;
                self.ts.space();
                self.set_op(*op);
                self.ts.space();
                self.select(right)?;
                self.ts.rparen();
            }
            Node::And(children) => self.conjunction(children)?,
            Node::Or(children) => {
                if children.is_empty() {
                    self.ts.push(Token::Raw("1=0".into()));
                }
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        self.ts.space().push(Token::Or).space();
                    }
                    self.node(child)?;
                }
            }
            Node::Row(values) => {
                self.ts.lparen();
                self.nodes(values)?;
                self.ts.rparen();
            }
            Node::Function {
                name,
                args,
                distinct,
                filter,
            } => self.function(name, args, *distinct, filter.as_deref())?,
            Node::Over { expr, window } => {
                self.node(expr)?;
                self.ts.space().push(Token::Over).space();
                self.window_spec(window)?;
            }
            Node::Case {
                operand,
                whens,
                default,
            } => {
                self.ts.push(Token::Case);
                if let Some(operand) = operand {
                    self.ts.space();
                    self.node(operand)?;
                }
                for (condition, result) in whens {
                    self.ts.space().push(Token::When).space();
                    self.node(condition)?;
                    self.ts.space().push(Token::Then).space();
                    self.node(result)?;
                }
                if let Some(default) = default {
                    self.ts.space().push(Token::Else).space();
                    self.node(default)?;
                }
                self.ts.space().push(Token::End);
            }
            Node::Cube(exprs) => self.grouping_element(Token::Cube, exprs)?,
            Node::Rollup(exprs) => self.grouping_element(Token::Rollup, exprs)?,
            Node::GroupingSets(sets) => {
                if !self.dialect.supports_grouping_sets() {
                    return Err(self.unsupported("GROUPING SETS"));
                }
                self.ts.push(Token::GroupingSets).space().lparen();
                self.list(sets, |r, set| {
                    r.ts.lparen();
                    r.nodes(set)?;
                    r.ts.rparen();
                    Ok(())
                })?;
                self.ts.rparen();
            }
        }
        Ok(())
    }

    fn attribute(&mut self, a: &Attribute) {
        self.ts
            .push(Token::Ident(a.relation.clone()))
            .push(Token::Dot)
            .push(Token::Ident(a.name.clone()));
    }

    fn value(&mut self, v: &Value) -> Result<()> {
        let token = match v {
            Value::Null => Token::LitNull,
            Value::Bool(b) => Token::LitBool(*b),
            Value::Int(n) => Token::LitInt(*n),
            Value::Float(x) if !x.0.is_finite() => {
                return Err(Error::InvalidLiteral(format!(
                    "{} has no SQL representation",
                    x.0
                )));
            }
            Value::Float(x) => Token::LitFloat(x.0),
            Value::String(s) => Token::LitString(s.clone()),
        };
        self.ts.push(token);
        Ok(())
    }

    fn bind(&mut self, v: &Value) -> Result<()> {
        if !self.options.prepared_statements {
            return self.value(v);
        }
        self.binds.push(v.clone());
        self.ts.push(Token::Placeholder(self.binds.len()));
        Ok(())
    }

    /// Predicates joined by AND. A nested OR is parenthesized so it keeps
    /// its meaning.
    fn conjunction(&mut self, predicates: &[Node]) -> Result<()> {
        if predicates.is_empty() {
            self.ts.push(Token::Raw("1=1".into()));
        }
        let wrap_or = predicates.len() > 1;
        for (i, predicate) in predicates.iter().enumerate() {
            if i > 0 {
                self.ts.space().push(Token::And).space();
            }
            if wrap_or && matches!(predicate, Node::Or(_)) {
                self.ts.lparen();
                self.node(predicate)?;
                self.ts.rparen();
            } else {
                self.node(predicate)?;
            }
        }
        Ok(())
    }

    fn binary(&mut self, op: BinaryOp, left: &Node, right: &Node) -> Result<()> {
        let right_is_null = matches!(right, Node::Literal(Value::Null));
        match op {
            BinaryOp::Eq | BinaryOp::NotEq if right_is_null => {
                self.node(left)?;
                self.ts.space().push(if op == BinaryOp::Eq {
                    Token::IsNull
                } else {
                    Token::IsNotNull
                });
            }
            BinaryOp::IsDistinctFrom | BinaryOp::IsNotDistinctFrom => {
                self.distinct_from(op == BinaryOp::IsDistinctFrom, left, right)?;
            }
            BinaryOp::Concat if !self.dialect.supports_concat_operator() => {
                self.ts
                    .push(Token::FunctionName("CONCAT".into()))
                    .lparen();
                self.node(left)?;
                self.ts.comma().space();
                self.node(right)?;
                self.ts.rparen();
            }
            BinaryOp::Contains | BinaryOp::Overlaps
                if !self.dialect.supports_array_operators() =>
            {
                return Err(self.unsupported("array operators"));
            }
            _ => {
                self.node(left)?;
                self.ts.space().push(operator_token(op)).space();
                self.node(right)?;
            }
        }
        Ok(())
    }

    fn distinct_from(&mut self, distinct: bool, left: &Node, right: &Node) -> Result<()> {
        if matches!(right, Node::Literal(Value::Null)) {
            self.node(left)?;
            self.ts.space().push(if distinct {
                Token::IsNotNull
            } else {
                Token::IsNull
            });
            return Ok(());
        }

        match self.dialect.distinct_from_style() {
            DistinctFromStyle::Standard => {
                self.node(left)?;
                self.ts.space().push(if distinct {
                    Token::IsDistinctFrom
                } else {
                    Token::IsNotDistinctFrom
                });
                self.ts.space();
                self.node(right)?;
            }
            DistinctFromStyle::NullSafeEq => {
                if distinct {
                    self.ts.push(Token::Not).space();
                }
                self.node(left)?;
                self.ts.space().push(Token::NullSafeEq).space();
                self.node(right)?;
            }
            DistinctFromStyle::Is => {
                self.node(left)?;
                self.ts.space().push(Token::Is).space();
                if distinct {
                    self.ts.push(Token::Not).space();
                }
                self.node(right)?;
            }
            DistinctFromStyle::Decode => {
                self.ts.push(Token::FunctionName("DECODE".into())).lparen();
                self.node(left)?;
                self.ts.comma().space();
                self.node(right)?;
                self.ts
                    .comma()
                    .space()
                    .push(Token::LitInt(0))
                    .comma()
                    .space()
                    .push(Token::LitInt(1))
                    .rparen()
                    .space()
                    .push(Token::Eq)
                    .space()
                    .push(Token::LitInt(i64::from(distinct)));
            }
            DistinctFromStyle::IntersectExists => {
                if distinct {
                    self.ts.push(Token::Not).space();
                }
                self.ts
                    .push(Token::Exists)
                    .space()
                    .lparen()
                    .push(Token::Select)
                    .space();
                self.node(left)?;
                self.ts
                    .space()
                    .push(Token::Intersect)
                    .space()
                    .push(Token::Select)
                    .space();
                self.node(right)?;
                self.ts.rparen();
            }
        }
        Ok(())
    }

    fn extract(&mut self, field: &str, expr: &Node) -> Result<()> {
        if field.is_empty() || !field.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(Error::InvalidLiteral(format!(
                "{:?} is not a date part",
                field
            )));
        }
        match self.dialect.extract_style() {
            ExtractStyle::Extract => {
                self.ts
                    .push(Token::Extract)
                    .lparen()
                    .push(Token::Raw(field.into()))
                    .space()
                    .push(Token::From)
                    .space();
                self.node(expr)?;
                self.ts.rparen();
            }
            ExtractStyle::DatePart => {
                self.ts
                    .push(Token::FunctionName("DATEPART".into()))
                    .lparen()
                    .push(Token::Raw(field.into()))
                    .comma()
                    .space();
                self.node(expr)?;
                self.ts.rparen();
            }
            ExtractStyle::Unsupported => return Err(self.unsupported("EXTRACT")),
        }
        Ok(())
    }

    fn in_list(&mut self, expr: &Node, values: &[Node], negated: bool) -> Result<()> {
        if values.is_empty() {
            let always = if negated { "1=1" } else { "1=0" };
            self.ts.push(Token::Raw(always.into()));
            return Ok(());
        }
        match self.dialect.in_list_limit() {
            Some(limit) if values.len() > limit => {
                let joiner = if negated { Token::And } else { Token::Or };
                self.ts.lparen();
                for (i, chunk) in values.chunks(limit).enumerate() {
                    if i > 0 {
                        self.ts.space().push(joiner.clone()).space();
                    }
                    self.in_clause(expr, chunk, negated)?;
                }
                self.ts.rparen();
            }
            _ => self.in_clause(expr, values, negated)?,
        }
        Ok(())
    }

    fn in_clause(&mut self, expr: &Node, values: &[Node], negated: bool) -> Result<()> {
        self.node(expr)?;
        self.ts.space();
        if negated {
            self.ts.push(Token::Not).space();
        }
        self.ts.push(Token::In).space().lparen();
        self.nodes(values)?;
        self.ts.rparen();
        Ok(())
    }

    fn matches(
        &mut self,
        expr: &Node,
        pattern: &Node,
        escape: Option<char>,
        case_sensitive: bool,
        negated: bool,
    ) -> Result<()> {
        self.node(expr)?;
        self.ts.space();
        if negated {
            self.ts.push(Token::Not).space();
        }
        if !case_sensitive && self.dialect.supports_ilike() {
            self.ts.push(Token::ILike);
        } else {
            self.ts.push(Token::Like);
            if case_sensitive && self.dialect.uses_binary_like() {
                self.ts.space().push(Token::Raw("BINARY".into()));
            }
        }
        self.ts.space();
        self.node(pattern)?;
        if let Some(c) = escape {
            self.ts
                .space()
                .push(Token::Escape)
                .space()
                .push(Token::LitString(c.to_string()));
        }
        Ok(())
    }

    fn function(
        &mut self,
        name: &str,
        args: &[Node],
        distinct: bool,
        filter: Option<&Node>,
    ) -> Result<()> {
        if name.is_empty()
            || !name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
        {
            return Err(Error::InvalidLiteral(format!(
                "{:?} is not a function name",
                name
            )));
        }
        self.ts.push(Token::FunctionName(name.into())).lparen();
        if distinct {
            self.ts.push(Token::Distinct).space();
        }
        self.nodes(args)?;
        self.ts.rparen();
        if let Some(filter) = filter {
            if !self.dialect.supports_aggregate_filter() {
                return Err(self.unsupported("aggregate FILTER"));
            }
            self.ts
                .space()
                .push(Token::Filter)
                .space()
                .lparen()
                .push(Token::Where)
                .space();
            self.node(filter)?;
            self.ts.rparen();
        }
        Ok(())
    }

    fn grouping_element(&mut self, keyword: Token, exprs: &[Node]) -> Result<()> {
        if !self.dialect.supports_grouping_sets() {
            return Err(self.unsupported("CUBE and ROLLUP"));
        }
        self.ts.push(keyword).lparen();
        self.nodes(exprs)?;
        self.ts.rparen();
        Ok(())
    }

    // =========================================================================
    // Windows and ordering
    // =========================================================================

    fn window_spec(&mut self, spec: &WindowSpec) -> Result<()> {
        match spec {
            WindowSpec::Inline(w) => {
                self.ts.lparen();
                self.window(w)?;
                self.ts.rparen();
            }
            WindowSpec::Named(name) => {
                if !self.dialect.supports_named_windows() {
                    return Err(self.unsupported("named windows"));
                }
                self.ts.push(Token::Ident(name.clone()));
            }
        }
        Ok(())
    }

    fn window(&mut self, w: &Window) -> Result<()> {
        let mut started = false;
        if !w.partition_by.is_empty() {
            self.ts.push(Token::PartitionBy).space();
            self.nodes(&w.partition_by)?;
            started = true;
        }
        if !w.order_by.is_empty() {
            if started {
                self.ts.space();
            }
            self.ts.push(Token::OrderBy).space();
            self.orderings(&w.order_by)?;
            started = true;
        }
        if let Some(frame) = &w.frame {
            if started {
                self.ts.space();
            }
            self.frame(frame)?;
        }
        Ok(())
    }

    fn frame(&mut self, frame: &WindowFrame) -> Result<()> {
        let unit = match frame.unit {
            FrameUnit::Rows => Token::Rows,
            FrameUnit::Range => Token::Range,
            FrameUnit::Groups => {
                if !self.dialect.supports_groups_frame() {
                    return Err(self.unsupported("GROUPS frames"));
                }
                Token::Groups
            }
        };
        self.ts.push(unit).space();
        match frame.end {
            Some(end) => {
                self.ts.push(Token::Between).space();
                self.frame_bound(frame.start);
                self.ts.space().push(Token::And).space();
                self.frame_bound(end);
            }
            None => self.frame_bound(frame.start),
        }
        Ok(())
    }

    fn frame_bound(&mut self, bound: FrameBound) {
        match bound {
            FrameBound::UnboundedPreceding => {
                self.ts.push(Token::Unbounded).space().push(Token::Preceding);
            }
            FrameBound::Preceding(n) => {
                self.ts
                    .push(Token::Raw(n.to_string()))
                    .space()
                    .push(Token::Preceding);
            }
            FrameBound::CurrentRow => {
                self.ts.push(Token::CurrentRow);
            }
            FrameBound::Following(n) => {
                self.ts
                    .push(Token::Raw(n.to_string()))
                    .space()
                    .push(Token::Following);
            }
            FrameBound::UnboundedFollowing => {
                self.ts.push(Token::Unbounded).space().push(Token::Following);
            }
        }
    }

    fn orderings(&mut self, orderings: &[Ordering]) -> Result<()> {
        self.list(orderings, |r, o| r.ordering(o))
    }

    fn ordering(&mut self, o: &Ordering) -> Result<()> {
        let style = self.dialect.nulls_ordering();
        if let Some(nulls) = o.nulls {
            match style {
                NullsOrdering::Native => {}
                NullsOrdering::IsNullPrefix => {
                    warn!(dialect = %self.dialect, "emulating NULLS FIRST/LAST with an IS NULL sort key");
                    self.node(&o.expr)?;
                    self.ts.space().push(match nulls {
                        NullsOrder::First => Token::IsNotNull,
                        NullsOrder::Last => Token::IsNull,
                    });
                    self.ts.comma().space();
                }
                NullsOrdering::CasePrefix => {
                    warn!(dialect = %self.dialect, "emulating NULLS FIRST/LAST with a CASE sort key");
                    let (when_null, otherwise) = match nulls {
                        NullsOrder::First => (0, 1),
                        NullsOrder::Last => (1, 0),
                    };
                    self.ts.push(Token::Case).space().push(Token::When).space();
                    self.node(&o.expr)?;
                    self.ts
                        .space()
                        .push(Token::IsNull)
                        .space()
                        .push(Token::Then)
                        .space()
                        .push(Token::LitInt(when_null))
                        .space()
                        .push(Token::Else)
                        .space()
                        .push(Token::LitInt(otherwise))
                        .space()
                        .push(Token::End)
                        .comma()
                        .space();
                }
            }
        }

        self.node(&o.expr)?;
        match o.direction {
            Some(SortDir::Asc) => {
                self.ts.space().push(Token::Asc);
            }
            Some(SortDir::Desc) => {
                self.ts.space().push(Token::Desc);
            }
            None => {}
        }
        if style == NullsOrdering::Native {
            match o.nulls {
                Some(NullsOrder::First) => {
                    self.ts.space().push(Token::NullsFirst);
                }
                Some(NullsOrder::Last) => {
                    self.ts.space().push(Token::NullsLast);
                }
                None => {}
            }
        }
        Ok(())
    }

    // =========================================================================
    // SELECT
    // =========================================================================

    pub fn select(&mut self, stmt: &SelectStatement) -> Result<()> {
        if stmt.cores.is_empty() {
            return Err(Error::Composition("SELECT statement has no cores".into()));
        }
        if stmt.set_ops.len() + 1 != stmt.cores.len() {
            return Err(Error::Composition(format!(
                "{} set operators for {} SELECT cores",
                stmt.set_ops.len(),
                stmt.cores.len()
            )));
        }
        if stmt.lock.is_some() && self.dialect.lock_style() == LockStyle::Unsupported {
            return Err(self.unsupported("row locking"));
        }

        let paginated = stmt.limit.is_some() || stmt.offset.is_some();
        if paginated && self.dialect.pagination() == Pagination::RowNum {
            self.rownum_select(stmt)
        } else {
            self.plain_select(stmt)
        }
    }

    fn plain_select(&mut self, stmt: &SelectStatement) -> Result<()> {
        if let Some(with) = &stmt.with {
            self.with_clause(with)?;
            self.ts.space();
        }

        for (i, core) in stmt.cores.iter().enumerate() {
            if i > 0 {
                self.ts.space();
                self.set_op(stmt.set_ops[i - 1]);
                self.ts.space();
            }
            self.core(core)?;
        }

        if !stmt.orders.is_empty() {
            self.ts.space().push(Token::OrderBy).space();
            self.orderings(&stmt.orders)?;
        }

        self.pagination(stmt)?;

        if let Some(lock) = &stmt.lock {
            match self.dialect.lock_style() {
                LockStyle::Native => {
                    self.ts.space();
                    match lock {
                        Lock::ForUpdate => self.ts.push(Token::ForUpdate),
                        Lock::Sql(raw) => self.ts.push(Token::Raw(raw.clone())),
                    };
                }
                LockStyle::Ignored => {}
                LockStyle::Unsupported => return Err(self.unsupported("row locking")),
            }
        }
        Ok(())
    }

    fn pagination(&mut self, stmt: &SelectStatement) -> Result<()> {
        match self.dialect.pagination() {
            Pagination::LimitOffset { unbounded_limit } => {
                if let Some(limit) = &stmt.limit {
                    self.ts.space().push(Token::Limit).space();
                    self.node(limit)?;
                } else if let (Some(_), Some(sentinel)) = (&stmt.offset, unbounded_limit) {
                    self.ts
                        .space()
                        .push(Token::Limit)
                        .space()
                        .push(Token::Raw(sentinel.into()));
                }
                if let Some(offset) = &stmt.offset {
                    self.ts.space().push(Token::Offset).space();
                    self.node(offset)?;
                }
            }
            Pagination::OffsetFetch => {
                if stmt.limit.is_none() && stmt.offset.is_none() {
                    return Ok(());
                }
                if stmt.orders.is_empty() && self.dialect.requires_order_by_for_offset() {
                    self.ts
                        .space()
                        .push(Token::OrderBy)
                        .space()
                        .push(Token::Raw("(SELECT NULL)".into()));
                }
                self.ts.space().push(Token::Offset).space();
                match &stmt.offset {
                    Some(offset) => self.node(offset)?,
                    None => {
                        self.ts.push(Token::LitInt(0));
                    }
                }
                self.ts.space().push(Token::Rows);
                if let Some(limit) = &stmt.limit {
                    self.ts
                        .space()
                        .push(Token::Fetch)
                        .space()
                        .push(Token::Next)
                        .space();
                    self.node(limit)?;
                    self.ts.space().push(Token::Rows).space().push(Token::Only);
                }
            }
            // Handled by wrapping in rownum_select
            Pagination::RowNum => {}
        }
        Ok(())
    }

    /// LIMIT/OFFSET through ROWNUM filtering.
    fn rownum_select(&mut self, stmt: &SelectStatement) -> Result<()> {
        if stmt.lock.is_some() {
            return Err(self.unsupported("row locking combined with LIMIT or OFFSET"));
        }

        let mut inner = stmt.clone();
        let limit = inner.limit.take();
        let offset = inner.offset.take();
        let distinct = inner
            .cores
            .first()
            .is_some_and(|c| c.set_quantifier.is_some());
        // ROWNUM is assigned before GROUP BY, so grouped queries must be wrapped.
        let grouped = inner
            .cores
            .first()
            .is_some_and(|c| !c.groups.is_empty() || !c.havings.is_empty());

        match (limit, offset) {
            (Some(limit), None)
                if inner.orders.is_empty()
                    && !distinct
                    && !grouped
                    && !inner.is_compound() =>
            {
                inner.core_mut().wheres.push(Node::Binary {
                    op: BinaryOp::LtEq,
                    left: Box::new(Node::SqlLiteral("ROWNUM".into())),
                    right: Box::new(limit),
                });
                self.plain_select(&inner)
            }
            (Some(limit), None) => {
                self.ts.push(Token::Raw("SELECT * FROM (".into()));
                self.plain_select(&inner)?;
                self.ts.push(Token::Raw(") WHERE ROWNUM <= ".into()));
                self.node(&limit)
            }
            (Some(limit), Some(offset)) => {
                self.ts.push(Token::Raw(
                    "SELECT * FROM (SELECT raw_sql_.*, rownum raw_rnum_ FROM (".into(),
                ));
                self.plain_select(&inner)?;
                self.ts.push(Token::Raw(") raw_sql_ WHERE rownum <= ".into()));
                match (&offset, &limit) {
                    (Node::Literal(Value::Int(o)), Node::Literal(Value::Int(l))) => {
                        self.ts.push(Token::LitInt(o.saturating_add(*l)));
                    }
                    _ => {
                        self.ts.lparen();
                        self.node(&offset)?;
                        self.ts.space().push(Token::Plus).space();
                        self.node(&limit)?;
                        self.ts.rparen();
                    }
                }
                self.ts.push(Token::Raw(") WHERE raw_rnum_ > ".into()));
                self.node(&offset)
            }
            (None, Some(offset)) => {
                self.ts.push(Token::Raw(
                    "SELECT * FROM (SELECT raw_sql_.*, rownum raw_rnum_ FROM (".into(),
                ));
                self.plain_select(&inner)?;
                self.ts
                    .push(Token::Raw(") raw_sql_) WHERE raw_rnum_ > ".into()));
                self.node(&offset)
            }
            (None, None) => self.plain_select(&inner),
        }
    }

    fn set_op(&mut self, op: SetOp) {
        match op {
            SetOp::Union => self.ts.push(Token::Union),
            SetOp::UnionAll => self.ts.push(Token::Union).space().push(Token::All),
            SetOp::Intersect => self.ts.push(Token::Intersect),
            SetOp::IntersectAll => self.ts.push(Token::Intersect).space().push(Token::All),
            SetOp::Except => self.ts.push(Token::Except),
            SetOp::ExceptAll => self.ts.push(Token::Except).space().push(Token::All),
        };
    }

    fn core(&mut self, core: &SelectCore) -> Result<()> {
        self.ts.push(Token::Select);

        if !core.optimizer_hints.is_empty() {
            let hints: Vec<String> = core
                .optimizer_hints
                .iter()
                .map(|h| sanitize_comment(h))
                .collect();
            self.ts
                .space()
                .push(Token::Raw(format!("/*+ {} */", hints.join(" "))));
        }

        match &core.set_quantifier {
            Some(SetQuantifier::Distinct) => {
                self.ts.space().push(Token::Distinct);
            }
            Some(SetQuantifier::DistinctOn(exprs)) => {
                if !self.dialect.supports_distinct_on() {
                    return Err(self.unsupported("DISTINCT ON"));
                }
                self.ts
                    .space()
                    .push(Token::Distinct)
                    .space()
                    .push(Token::On)
                    .space()
                    .lparen();
                self.nodes(exprs)?;
                self.ts.rparen();
            }
            None => {}
        }

        self.ts.space();
        if core.projections.is_empty() {
            self.ts.push(Token::Star);
        } else {
            self.nodes(&core.projections)?;
        }

        self.join_source(&core.source)?;

        if !core.wheres.is_empty() {
            self.ts.space().push(Token::Where).space();
            self.conjunction(&core.wheres)?;
        }

        if !core.groups.is_empty() {
            self.ts.space().push(Token::GroupBy).space();
            self.nodes(&core.groups)?;
        }

        if !core.havings.is_empty() {
            self.ts.space().push(Token::Having).space();
            self.conjunction(&core.havings)?;
        }

        if !core.windows.is_empty() {
            if !self.dialect.supports_named_windows() {
                return Err(self.unsupported("named windows"));
            }
            self.ts.space().push(Token::Window).space();
            self.list(&core.windows, |r, w| {
                r.ts.push(Token::Ident(w.name.clone()))
                    .space()
                    .push(Token::As)
                    .space()
                    .lparen();
                r.window(&w.window)?;
                r.ts.rparen();
                Ok(())
            })?;
        }

        for comment in &core.comments {
            self.ts.space().push(Token::Comment(comment.clone()));
        }
        Ok(())
    }

    fn join_source(&mut self, source: &JoinSource) -> Result<()> {
        match &source.left {
            Some(left) => {
                self.ts.space().push(Token::From).space();
                self.relation(left)?;
                self.joins(&source.joins)
            }
            None if source.joins.is_empty() => Ok(()),
            None => Err(Error::Composition("JOIN without a FROM relation".into())),
        }
    }

    fn joins(&mut self, joins: &[Join]) -> Result<()> {
        for join in joins {
            self.ts.space();
            match join.kind {
                JoinKind::Inner => {
                    self.ts.push(Token::Inner).space().push(Token::Join);
                }
                JoinKind::LeftOuter => {
                    self.ts
                        .push(Token::Left)
                        .space()
                        .push(Token::Outer)
                        .space()
                        .push(Token::Join);
                }
                JoinKind::RightOuter => {
                    self.ts
                        .push(Token::Right)
                        .space()
                        .push(Token::Outer)
                        .space()
                        .push(Token::Join);
                }
                JoinKind::FullOuter => {
                    if !self.dialect.supports_full_outer_join() {
                        return Err(self.unsupported("FULL OUTER JOIN"));
                    }
                    self.ts
                        .push(Token::Full)
                        .space()
                        .push(Token::Outer)
                        .space()
                        .push(Token::Join);
                }
                JoinKind::Cross => {
                    self.ts.push(Token::Cross).space().push(Token::Join);
                }
                JoinKind::Sql => {
                    self.relation(&join.relation)?;
                    continue;
                }
            }
            self.ts.space();
            self.relation(&join.relation)?;
            if let Some(on) = &join.on {
                self.ts.space().push(Token::On).space();
                self.node(on)?;
            }
        }
        Ok(())
    }

    fn relation(&mut self, relation: &Relation) -> Result<()> {
        match relation {
            Relation::Table(t) => self.table(t),
            Relation::Derived { node, alias } => {
                match **node {
                    Node::Subquery(_) | Node::SetOperation { .. } | Node::Grouping(_) => {
                        self.node(node)?;
                    }
                    _ => {
                        self.ts.lparen();
                        self.node(node)?;
                        self.ts.rparen();
                    }
                }
                self.alias(alias);
            }
            Relation::Lateral { query, alias } => {
                if !self.dialect.supports_lateral() {
                    return Err(self.unsupported("LATERAL"));
                }
                self.ts.push(Token::Lateral).space().lparen();
                self.select(query)?;
                self.ts.rparen();
                self.alias(alias);
            }
            Relation::Sql(raw) => {
                self.ts.push(Token::Raw(raw.clone()));
            }
        }
        Ok(())
    }

    fn table(&mut self, t: &Table) {
        self.ts.push(Token::QualifiedIdent {
            schema: t.schema.clone(),
            name: t.name.clone(),
        });
        if let Some(alias) = &t.alias {
            self.alias(alias);
        }
    }

    fn alias(&mut self, alias: &str) {
        self.ts.space();
        if self.dialect.table_alias_uses_as() {
            self.ts.push(Token::As).space();
        }
        self.ts.push(Token::Ident(alias.into()));
    }

    fn with_clause(&mut self, with: &With) -> Result<()> {
        self.ts.push(Token::With);
        if with.recursive && self.dialect.emit_recursive_keyword() {
            self.ts.space().push(Token::Recursive);
        }
        self.ts.space();
        self.list(&with.ctes, |r, cte| r.cte(cte, with.recursive))
    }

    fn cte(&mut self, cte: &Cte, recursive: bool) -> Result<()> {
        self.ts.push(Token::Ident(cte.name.clone()));
        if !cte.columns.is_empty() {
            self.ts.space().lparen();
            self.idents(&cte.columns);
            self.ts.rparen();
        }
        self.ts.space().push(Token::As).space();

        if let Some(materialized) = cte.materialized {
            if !self.dialect.supports_materialized_cte() {
                return Err(self.unsupported("MATERIALIZED CTEs"));
            }
            if !materialized {
                self.ts.push(Token::Not).space();
            }
            self.ts.push(Token::Materialized).space();
        }

        self.ts.lparen();
        self.select(&cte.query)?;
        self.ts.rparen();

        if let Some(cycle) = &cte.cycle {
            if !self.dialect.supports_cte_cycle() {
                return Err(self.unsupported("CTE CYCLE"));
            }
            if !recursive {
                return Err(Error::Composition(format!(
                    "CYCLE on {} requires a recursive WITH",
                    cte.name
                )));
            }
            self.ts.space().push(Token::Cycle).space();
            self.idents(&cycle.columns);
            self.ts
                .space()
                .push(Token::Set)
                .space()
                .push(Token::Ident(cycle.mark_column.clone()))
                .space()
                .push(Token::Using)
                .space()
                .push(Token::Ident(cycle.path_column.clone()));
        }
        Ok(())
    }

    // =========================================================================
    // DML
    // =========================================================================

    pub fn insert(&mut self, stmt: &InsertStatement) -> Result<()> {
        let table = stmt
            .relation
            .as_ref()
            .ok_or_else(|| Error::Composition("INSERT requires a target table".into()))?;

        if let Some(with) = &stmt.with {
            self.with_clause(with)?;
            self.ts.space();
        }

        self.ts
            .push(Token::Insert)
            .space()
            .push(Token::Into)
            .space();
        self.table(table);

        if !stmt.columns.is_empty() {
            self.ts.space().lparen();
            self.idents(&stmt.columns);
            self.ts.rparen();
        }

        self.output(Token::Inserted, &stmt.returning)?;

        match &stmt.source {
            Some(InsertSource::Values(rows)) => {
                if rows.is_empty() {
                    return Err(Error::Composition(
                        "VALUES requires at least one row".into(),
                    ));
                }
                self.ts.space().push(Token::Values).space();
                self.list(rows, |r, row| {
                    r.ts.lparen();
                    r.nodes(row)?;
                    r.ts.rparen();
                    Ok(())
                })?;
            }
            Some(InsertSource::Select(query)) => {
                self.ts.space();
                self.select(query)?;
            }
            Some(InsertSource::DefaultValues) => {
                self.ts.space().push(Token::DefaultValues);
            }
            None => {
                return Err(Error::Composition(
                    "INSERT requires VALUES, a SELECT or DEFAULT VALUES".into(),
                ));
            }
        }

        if let Some(conflict) = &stmt.on_conflict {
            self.on_conflict(conflict)?;
        }

        self.returning(&stmt.returning)
    }

    fn on_conflict(&mut self, conflict: &OnConflict) -> Result<()> {
        match self.dialect.upsert_style() {
            UpsertStyle::OnConflict => {
                let target = match conflict {
                    OnConflict::DoNothing { target } | OnConflict::DoUpdate { target, .. } => {
                        target
                    }
                };
                self.ts.space().push(Token::On).space().push(Token::Conflict);
                if !target.is_empty() {
                    self.ts.space().lparen();
                    self.idents(target);
                    self.ts.rparen();
                }
                self.ts.space().push(Token::Do).space();
                match conflict {
                    OnConflict::DoNothing { .. } => {
                        self.ts.push(Token::Nothing);
                    }
                    OnConflict::DoUpdate { assignments, .. } => {
                        self.ts.push(Token::Update).space().push(Token::Set).space();
                        self.assignments(assignments)?;
                    }
                }
            }
            UpsertStyle::OnDuplicateKey => match conflict {
                OnConflict::DoNothing { .. } => {
                    return Err(self.unsupported("ON CONFLICT DO NOTHING"));
                }
                OnConflict::DoUpdate { assignments, .. } => {
                    self.ts.space().push(Token::DuplicateKeyUpdate).space();
                    self.assignments(assignments)?;
                }
            },
            UpsertStyle::Unsupported => return Err(self.unsupported("ON CONFLICT")),
        }
        Ok(())
    }

    fn assignments(&mut self, assignments: &[Assignment]) -> Result<()> {
        if assignments.is_empty() {
            return Err(Error::Composition("SET requires at least one assignment".into()));
        }
        self.list(assignments, |r, a| {
            r.ts.push(Token::Ident(a.column.clone()))
                .space()
                .push(Token::Eq)
                .space();
            r.node(&a.value)
        })
    }

    /// `OUTPUT INSERTED.col, ...` for dialects that return rows that way.
    fn output(&mut self, prefix: Token, returning: &[Node]) -> Result<()> {
        if returning.is_empty() || self.dialect.returning_style() != ReturningStyle::Output {
            return Ok(());
        }
        self.ts.space().push(Token::Output).space();
        self.list(returning, |r, node| {
            r.ts.push(prefix.clone()).push(Token::Dot);
            match node {
                Node::UnqualifiedColumn(name) => {
                    r.ts.push(Token::Ident(name.clone()));
                }
                Node::Attribute(a) => {
                    r.ts.push(Token::Ident(a.name.clone()));
                }
                Node::Star { .. } => {
                    r.ts.push(Token::Star);
                }
                other => {
                    return Err(Error::Composition(format!(
                        "OUTPUT accepts columns, not {}",
                        other.kind()
                    )));
                }
            }
            Ok(())
        })
    }

    fn returning(&mut self, returning: &[Node]) -> Result<()> {
        if returning.is_empty() {
            return Ok(());
        }
        match self.dialect.returning_style() {
            ReturningStyle::Returning => {
                self.ts.space().push(Token::Returning).space();
                self.nodes(returning)
            }
            ReturningStyle::Output => Ok(()),
            ReturningStyle::Unsupported => Err(self.unsupported("RETURNING")),
        }
    }

    pub fn update(&mut self, stmt: &UpdateStatement) -> Result<()> {
        let table = stmt
            .relation
            .as_ref()
            .ok_or_else(|| Error::Composition("UPDATE requires a target table".into()))?;
        let parts = stmt.parts();
        let plan = self.modify_plan(&parts, "UPDATE with ORDER BY, LIMIT, GROUP BY or JOIN")?;

        if let Some(with) = &stmt.with {
            self.with_clause(with)?;
            self.ts.space();
        }

        self.ts.push(Token::Update).space();
        self.table(table);
        if plan == ModifyPlan::Native {
            self.joins(&stmt.joins)?;
        }

        self.ts.space().push(Token::Set).space();
        self.assignments(&stmt.values)?;
        self.output(Token::Inserted, &stmt.returning)?;

        self.modify_tail(&parts, plan)?;
        self.returning(&stmt.returning)
    }

    pub fn delete(&mut self, stmt: &DeleteStatement) -> Result<()> {
        let table = stmt
            .relation
            .as_ref()
            .ok_or_else(|| Error::Composition("DELETE requires a target table".into()))?;
        let parts = stmt.parts();
        let plan = self.modify_plan(&parts, "DELETE with ORDER BY, LIMIT, GROUP BY or JOIN")?;

        if let Some(with) = &stmt.with {
            self.with_clause(with)?;
            self.ts.space();
        }

        self.ts.push(Token::Delete).space();
        let native_join = plan == ModifyPlan::Native && parts.has_joins();
        if native_join {
            // Multi-table form names the target before FROM
            match &table.alias {
                Some(alias) => self.ts.push(Token::Ident(alias.clone())),
                None => self.ts.push(Token::QualifiedIdent {
                    schema: table.schema.clone(),
                    name: table.name.clone(),
                }),
            };
            self.ts.space();
        }
        self.ts.push(Token::From).space();
        self.table(table);
        if native_join {
            self.joins(&stmt.joins)?;
        }

        self.output(Token::Deleted, &stmt.returning)?;
        self.modify_tail(&parts, plan)?;
        self.returning(&stmt.returning)
    }

    fn modify_plan(&self, parts: &ModifyParts<'_>, feature: &'static str) -> Result<ModifyPlan> {
        let needs_plan =
            parts.has_joins() || parts.has_limit_offset_or_orders() || parts.has_groups();
        if !needs_plan {
            return Ok(ModifyPlan::Plain);
        }

        let rewrite = if self.dialect.supports_dml_order_limit() {
            parts.offset.is_some()
                || parts.has_groups()
                || (parts.has_joins() && parts.has_limit_offset_or_orders())
        } else {
            true
        };

        match (rewrite, parts.key) {
            (false, _) => Ok(ModifyPlan::Native),
            (true, Some(_)) => Ok(ModifyPlan::Rewrite),
            (true, None) => Err(self.unsupported(feature)),
        }
    }

    /// WHERE, plus ORDER BY and LIMIT when the dialect takes them natively.
    fn modify_tail(&mut self, parts: &ModifyParts<'_>, plan: ModifyPlan) -> Result<()> {
        match (plan, parts.key) {
            (ModifyPlan::Rewrite, Some(key)) => {
                let subselect = self.key_subselect(parts, key)?;
                self.ts.space().push(Token::Where).space();
                self.node(key)?;
                self.ts.space().push(Token::In).space().lparen();
                self.select(&subselect)?;
                self.ts.rparen();
            }
            _ => {
                if !parts.wheres.is_empty() {
                    self.ts.space().push(Token::Where).space();
                    self.conjunction(parts.wheres)?;
                }
            }
        }

        if plan == ModifyPlan::Native {
            if !parts.orders.is_empty() {
                self.ts.space().push(Token::OrderBy).space();
                self.orderings(parts.orders)?;
            }
            if let Some(limit) = parts.limit {
                self.ts.space().push(Token::Limit).space();
                self.node(limit)?;
            }
        }
        Ok(())
    }

    /// `SELECT key FROM relation ... ` carrying the clauses the target
    /// statement cannot hold.
    fn key_subselect(&self, parts: &ModifyParts<'_>, key: &Node) -> Result<SelectStatement> {
        let core = SelectCore {
            source: JoinSource {
                left: parts.relation.cloned().map(Relation::Table),
                joins: parts.joins.to_vec(),
            },
            projections: vec![key.clone()],
            wheres: parts.wheres.to_vec(),
            groups: parts.groups.to_vec(),
            havings: parts.havings.to_vec(),
            ..Default::default()
        };
        let mut subselect = SelectStatement {
            cores: vec![core],
            orders: parts.orders.to_vec(),
            limit: parts.limit.cloned(),
            offset: parts.offset.cloned(),
            ..Default::default()
        };

        if !self.dialect.supports_dml_order_limit() {
            return Ok(subselect);
        }

        // MySQL cannot select from the table it modifies, so the subselect
        // is materialized as a derived table.
        if !parts.has_limit_offset_or_orders() {
            subselect.core_mut().set_quantifier = Some(SetQuantifier::Distinct);
        }
        let key_column = match key {
            Node::Attribute(a) => Node::UnqualifiedColumn(a.name.clone()),
            Node::UnqualifiedColumn(name) => Node::UnqualifiedColumn(name.clone()),
            other => {
                return Err(Error::Composition(format!(
                    "a derived-table key must be a column, not {}",
                    other.kind()
                )));
            }
        };
        let mut outer = SelectStatement::new();
        let core = outer.core_mut();
        core.source.left = Some(Relation::Derived {
            node: Box::new(Node::Subquery(Box::new(subselect))),
            alias: DERIVED_KEY_ALIAS.into(),
        });
        core.projections = vec![key_column];
        Ok(outer)
    }
}

fn operator_token(op: BinaryOp) -> Token {
    match op {
        BinaryOp::Eq => Token::Eq,
        BinaryOp::NotEq => Token::Ne,
        BinaryOp::Lt => Token::Lt,
        BinaryOp::LtEq => Token::Lte,
        BinaryOp::Gt => Token::Gt,
        BinaryOp::GtEq => Token::Gte,
        BinaryOp::IsDistinctFrom => Token::IsDistinctFrom,
        BinaryOp::IsNotDistinctFrom => Token::IsNotDistinctFrom,
        BinaryOp::Plus => Token::Plus,
        BinaryOp::Minus => Token::Minus,
        BinaryOp::Mul => Token::Mul,
        BinaryOp::Div => Token::Div,
        BinaryOp::Mod => Token::Mod,
        BinaryOp::Concat => Token::Concat,
        BinaryOp::BitAnd => Token::BitAnd,
        BinaryOp::BitOr => Token::BitOr,
        BinaryOp::BitXor => Token::BitXor,
        BinaryOp::ShiftLeft => Token::ShiftLeft,
        BinaryOp::ShiftRight => Token::ShiftRight,
        BinaryOp::Contains => Token::Contains,
        BinaryOp::Overlaps => Token::Overlaps,
    }
}
