//! Expression AST - the node library every statement is built from.
//!
//! `Node` is a closed union: leaves (attributes, literals, binds, raw SQL),
//! unary wrappers (`Not`, `Grouping`, `As`), binary operators, n-ary
//! `And`/`Or`, and the richer forms (functions, windows, CASE, set
//! operations). Nodes carry no dialect knowledge; the renderer decides
//! how each one is spelled.
//!
//! Equality and hashing are structural, so two independently built trees
//! with the same shape and leaves are interchangeable as cache keys.

use serde::{Deserialize, Serialize};

use super::literal::BoundSqlLiteral;
use super::query::{Ordering, SelectStatement, SetOp, SortDir};
use super::value::Value;
use super::window::WindowSpec;
use crate::error::{Error, Result};

// =============================================================================
// Expression AST
// =============================================================================

/// Column of a named relation: `"users"."id"`.
///
/// `relation` is the table name, or its alias when the table is aliased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attribute {
    pub relation: String,
    pub name: String,
}

impl Attribute {
    pub fn new(relation: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            relation: relation.into(),
            name: name.into(),
        }
    }
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOp {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    IsDistinctFrom,
    IsNotDistinctFrom,
    Plus,
    Minus,
    Mul,
    Div,
    Mod,
    Concat,
    BitAnd,
    BitOr,
    BitXor,
    ShiftLeft,
    ShiftRight,
    /// Array containment `@>`
    Contains,
    /// Array overlap `&&`
    Overlaps,
}

impl BinaryOp {
    /// The operator with the opposite truth value, for comparisons.
    pub fn inverse(self) -> Option<BinaryOp> {
        use BinaryOp::*;
        match self {
            Eq => Some(NotEq),
            NotEq => Some(Eq),
            Lt => Some(GtEq),
            GtEq => Some(Lt),
            Gt => Some(LtEq),
            LtEq => Some(Gt),
            IsDistinctFrom => Some(IsNotDistinctFrom),
            IsNotDistinctFrom => Some(IsDistinctFrom),
            _ => None,
        }
    }

    /// Whether the operator yields a boolean.
    pub fn is_predicate(self) -> bool {
        self.inverse().is_some() || matches!(self, BinaryOp::Contains | BinaryOp::Overlaps)
    }
}

/// A SQL expression or predicate.
///
/// Every variant must be handled by the renderer - the compiler enforces this.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "node", content = "args", rename_all = "snake_case")]
pub enum Node {
    /// Qualified column reference
    Attribute(Attribute),

    /// Column name without a relation, as in `SET "name" = ...`
    UnqualifiedColumn(String),

    /// Wildcard: `*` or `"users".*`
    Star { relation: Option<String> },

    /// Inline literal, quoted by the dialect
    Literal(Value),

    /// Bind parameter, rendered as a placeholder and collected in order
    BindParam(Value),

    /// Raw SQL passed directly to output without escaping.
    ///
    /// # Security Warning
    ///
    /// **Never pass user input to this variant.** Use `Literal` or
    /// `BindParam` for values.
    SqlLiteral(String),

    /// Raw SQL with validated `?` or `:name` placeholders
    BoundSqlLiteral(BoundSqlLiteral),

    /// `NOT (expr)`
    Not(Box<Node>),

    /// `(expr)`
    Grouping(Box<Node>),

    /// `[NOT] EXISTS (SELECT ...)`
    Exists {
        query: Box<SelectStatement>,
        negated: bool,
    },

    /// Scalar subquery `(SELECT ...)`
    Subquery(Box<SelectStatement>),

    /// `expr AS alias`
    As { expr: Box<Node>, alias: String },

    /// `EXTRACT(field FROM expr)`
    Extract { field: String, expr: Box<Node> },

    /// `left op right`
    Binary {
        op: BinaryOp,
        left: Box<Node>,
        right: Box<Node>,
    },

    /// `expr [NOT] BETWEEN low AND high`
    Between {
        expr: Box<Node>,
        low: Box<Node>,
        high: Box<Node>,
        negated: bool,
    },

    /// `expr [NOT] IN (values...)`
    In {
        expr: Box<Node>,
        values: Vec<Node>,
        negated: bool,
    },

    /// `expr [NOT] IN (SELECT ...)`
    InSelect {
        expr: Box<Node>,
        query: Box<SelectStatement>,
        negated: bool,
    },

    /// Membership of one attribute in a list of same-typed values.
    /// Every value is rendered as a bind parameter.
    HomogeneousIn {
        attribute: Attribute,
        values: Vec<Value>,
        negated: bool,
    },

    /// `expr [NOT] LIKE pattern [ESCAPE c]`; case-insensitive matching
    /// uses ILIKE where the dialect has it.
    Matches {
        expr: Box<Node>,
        pattern: Box<Node>,
        escape: Option<char>,
        case_sensitive: bool,
        negated: bool,
    },

    /// Regular-expression match
    Regexp {
        expr: Box<Node>,
        pattern: Box<Node>,
        case_sensitive: bool,
        negated: bool,
    },

    /// `(left UNION right)` and friends
    SetOperation {
        op: SetOp,
        left: Box<SelectStatement>,
        right: Box<SelectStatement>,
    },

    /// Conjunction of every child
    And(Vec<Node>),

    /// Disjunction of every child
    Or(Vec<Node>),

    /// Row constructor `(a, b, ...)`
    Row(Vec<Node>),

    /// Function call: `name([DISTINCT] args...) [FILTER (WHERE ...)]`
    Function {
        name: String,
        args: Vec<Node>,
        distinct: bool,
        filter: Option<Box<Node>>,
    },

    /// `expr OVER (...)` or `expr OVER w`
    Over { expr: Box<Node>, window: WindowSpec },

    /// `CASE [operand] WHEN ... THEN ... [ELSE ...] END`
    Case {
        operand: Option<Box<Node>>,
        whens: Vec<(Node, Node)>,
        default: Option<Box<Node>>,
    },

    /// `CUBE(...)` grouping element
    Cube(Vec<Node>),

    /// `ROLLUP(...)` grouping element
    Rollup(Vec<Node>),

    /// `GROUPING SETS((...), ...)` grouping element
    GroupingSets(Vec<Vec<Node>>),
}

impl Node {
    /// Short variant name, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Attribute(_) => "attribute",
            Node::UnqualifiedColumn(_) => "unqualified column",
            Node::Star { .. } => "star",
            Node::Literal(_) => "literal",
            Node::BindParam(_) => "bind parameter",
            Node::SqlLiteral(_) => "sql literal",
            Node::BoundSqlLiteral(_) => "bound sql literal",
            Node::Not(_) => "not",
            Node::Grouping(_) => "grouping",
            Node::Exists { .. } => "exists",
            Node::Subquery(_) => "subquery",
            Node::As { .. } => "alias",
            Node::Extract { .. } => "extract",
            Node::Binary { .. } => "binary operation",
            Node::Between { .. } => "between",
            Node::In { .. } => "in",
            Node::InSelect { .. } => "in select",
            Node::HomogeneousIn { .. } => "homogeneous in",
            Node::Matches { .. } => "matches",
            Node::Regexp { .. } => "regexp",
            Node::SetOperation { .. } => "set operation",
            Node::And(_) => "and",
            Node::Or(_) => "or",
            Node::Row(_) => "row",
            Node::Function { .. } => "function",
            Node::Over { .. } => "window function",
            Node::Case { .. } => "case",
            Node::Cube(_) => "cube",
            Node::Rollup(_) => "rollup",
            Node::GroupingSets(_) => "grouping sets",
        }
    }

    /// The logical inverse of a predicate.
    ///
    /// Comparisons swap to their complementary operator, membership and
    /// pattern tests flip their `negated` flag, `And`/`Or` follow De Morgan,
    /// and `Not(x)` unwraps to `x` once `x` is known to be invertible.
    /// Predicates with no complementary form (raw SQL, array operators) are
    /// wrapped in `Not`. Inverting twice returns a tree equal to the
    /// original, except for `Not(x)`, which comes back as the inverse of `x`.
    ///
    /// # Errors
    ///
    /// `Error::NotInvertible` for nodes that are not boolean-valued.
    pub fn invert(&self) -> Result<Node> {
        let inverted = match self {
            Node::Binary { op, left, right } => match op.inverse() {
                Some(op) => Node::Binary {
                    op,
                    left: left.clone(),
                    right: right.clone(),
                },
                None if op.is_predicate() => Node::Not(Box::new(self.clone())),
                None => return Err(self.not_invertible()),
            },
            Node::Between {
                expr,
                low,
                high,
                negated,
            } => Node::Between {
                expr: expr.clone(),
                low: low.clone(),
                high: high.clone(),
                negated: !negated,
            },
            Node::In {
                expr,
                values,
                negated,
            } => Node::In {
                expr: expr.clone(),
                values: values.clone(),
                negated: !negated,
            },
            Node::InSelect {
                expr,
                query,
                negated,
            } => Node::InSelect {
                expr: expr.clone(),
                query: query.clone(),
                negated: !negated,
            },
            Node::HomogeneousIn {
                attribute,
                values,
                negated,
            } => Node::HomogeneousIn {
                attribute: attribute.clone(),
                values: values.clone(),
                negated: !negated,
            },
            Node::Matches {
                expr,
                pattern,
                escape,
                case_sensitive,
                negated,
            } => Node::Matches {
                expr: expr.clone(),
                pattern: pattern.clone(),
                escape: *escape,
                case_sensitive: *case_sensitive,
                negated: !negated,
            },
            Node::Regexp {
                expr,
                pattern,
                case_sensitive,
                negated,
            } => Node::Regexp {
                expr: expr.clone(),
                pattern: pattern.clone(),
                case_sensitive: *case_sensitive,
                negated: !negated,
            },
            Node::Exists { query, negated } => Node::Exists {
                query: query.clone(),
                negated: !negated,
            },
            Node::Not(inner) => {
                inner.invert()?;
                (**inner).clone()
            }
            Node::And(children) => Node::Or(invert_all(children)?),
            Node::Or(children) => Node::And(invert_all(children)?),
            Node::Grouping(inner) => Node::Grouping(Box::new(inner.invert()?)),
            Node::Literal(Value::Bool(b)) => Node::Literal(Value::Bool(!b)),
            Node::SqlLiteral(_) | Node::BoundSqlLiteral(_) => Node::Not(Box::new(self.clone())),
            _ => return Err(self.not_invertible()),
        };
        Ok(inverted)
    }

    fn not_invertible(&self) -> Error {
        Error::NotInvertible { node: self.kind() }
    }

    /// Attach a `FILTER (WHERE ...)` clause to an aggregate call.
    ///
    /// # Errors
    ///
    /// `Error::Composition` when `self` is not a function call.
    pub fn with_filter(self, predicate: impl Into<Node>) -> Result<Node> {
        match self {
            Node::Function {
                name,
                args,
                distinct,
                ..
            } => Ok(Node::Function {
                name,
                args,
                distinct,
                filter: Some(Box::new(predicate.into())),
            }),
            other => Err(Error::Composition(format!(
                "FILTER applies to aggregate functions, not {}",
                other.kind()
            ))),
        }
    }
}

fn invert_all(children: &[Node]) -> Result<Vec<Node>> {
    children.iter().map(Node::invert).collect()
}

// =============================================================================
// Constructors
// =============================================================================

/// Raw SQL fragment.
///
/// **Never pass user input to this function.** The SQL is not sanitized.
pub fn sql(raw: &str) -> Node {
    Node::SqlLiteral(raw.into())
}

/// Bind parameter.
pub fn bind(value: impl Into<Value>) -> Node {
    Node::BindParam(value.into())
}

/// Inline literal.
pub fn lit(value: impl Into<Value>) -> Node {
    Node::Literal(value.into())
}

/// NULL literal.
pub fn null() -> Node {
    Node::Literal(Value::Null)
}

/// Unqualified column reference.
pub fn col(name: &str) -> Node {
    Node::UnqualifiedColumn(name.into())
}

/// Unqualified `*`.
pub fn star() -> Node {
    Node::Star { relation: None }
}

/// Generic function call.
pub fn func(name: &str, args: Vec<Node>) -> Node {
    Node::Function {
        name: name.into(),
        args,
        distinct: false,
        filter: None,
    }
}

pub fn count(expr: Node) -> Node {
    func("COUNT", vec![expr])
}

/// COUNT(*)
pub fn count_star() -> Node {
    func("COUNT", vec![star()])
}

pub fn count_distinct(expr: Node) -> Node {
    Node::Function {
        name: "COUNT".into(),
        args: vec![expr],
        distinct: true,
        filter: None,
    }
}

pub fn sum(expr: Node) -> Node {
    func("SUM", vec![expr])
}

pub fn avg(expr: Node) -> Node {
    func("AVG", vec![expr])
}

pub fn min(expr: Node) -> Node {
    func("MIN", vec![expr])
}

pub fn max(expr: Node) -> Node {
    func("MAX", vec![expr])
}

pub fn coalesce(args: Vec<Node>) -> Node {
    func("COALESCE", args)
}

pub fn row_number() -> Node {
    func("ROW_NUMBER", vec![])
}

pub fn rank() -> Node {
    func("RANK", vec![])
}

/// `EXISTS (query)`
pub fn exists(query: SelectStatement) -> Node {
    Node::Exists {
        query: Box::new(query),
        negated: false,
    }
}

/// Parenthesize an expression.
pub fn grouping(expr: Node) -> Node {
    Node::Grouping(Box::new(expr))
}

/// Row constructor `(a, b, ...)`.
pub fn row(values: Vec<Node>) -> Node {
    Node::Row(values)
}

pub fn cube(exprs: Vec<Node>) -> Node {
    Node::Cube(exprs)
}

pub fn rollup(exprs: Vec<Node>) -> Node {
    Node::Rollup(exprs)
}

pub fn grouping_sets(sets: Vec<Vec<Node>>) -> Node {
    Node::GroupingSets(sets)
}

/// Conjunction of all predicates.
pub fn all_of(predicates: impl IntoIterator<Item = Node>) -> Node {
    Node::And(predicates.into_iter().collect())
}

/// Disjunction of all predicates.
pub fn any_of(predicates: impl IntoIterator<Item = Node>) -> Node {
    Node::Or(predicates.into_iter().collect())
}

// =============================================================================
// CASE Builder
// =============================================================================

/// Builder for CASE expressions.
#[derive(Debug, Clone, Default)]
#[must_use = "CaseBuilder has no effect until build() is called"]
pub struct CaseBuilder {
    operand: Option<Node>,
    whens: Vec<(Node, Node)>,
    default: Option<Node>,
}

impl CaseBuilder {
    /// Searched CASE: `CASE WHEN cond THEN ... END`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Simple CASE: `CASE operand WHEN value THEN ... END`.
    pub fn on(operand: impl Into<Node>) -> Self {
        Self {
            operand: Some(operand.into()),
            ..Self::default()
        }
    }

    pub fn when(mut self, condition: impl Into<Node>, result: impl Into<Node>) -> Self {
        self.whens.push((condition.into(), result.into()));
        self
    }

    pub fn otherwise(mut self, result: impl Into<Node>) -> Self {
        self.default = Some(result.into());
        self
    }

    pub fn build(self) -> Node {
        Node::Case {
            operand: self.operand.map(Box::new),
            whens: self.whens,
            default: self.default.map(Box::new),
        }
    }
}

// =============================================================================
// Predication Builder Trait
// =============================================================================

/// Extension trait for building predicates and expressions fluently.
pub trait Predications: Sized {
    fn into_node(self) -> Node;

    // Comparison operators
    fn eq(self, other: impl Into<Node>) -> Node {
        binary(BinaryOp::Eq, self.into_node(), other.into())
    }

    fn not_eq(self, other: impl Into<Node>) -> Node {
        binary(BinaryOp::NotEq, self.into_node(), other.into())
    }

    fn gt(self, other: impl Into<Node>) -> Node {
        binary(BinaryOp::Gt, self.into_node(), other.into())
    }

    fn gteq(self, other: impl Into<Node>) -> Node {
        binary(BinaryOp::GtEq, self.into_node(), other.into())
    }

    fn lt(self, other: impl Into<Node>) -> Node {
        binary(BinaryOp::Lt, self.into_node(), other.into())
    }

    fn lteq(self, other: impl Into<Node>) -> Node {
        binary(BinaryOp::LtEq, self.into_node(), other.into())
    }

    fn is_distinct_from(self, other: impl Into<Node>) -> Node {
        binary(BinaryOp::IsDistinctFrom, self.into_node(), other.into())
    }

    fn is_not_distinct_from(self, other: impl Into<Node>) -> Node {
        binary(BinaryOp::IsNotDistinctFrom, self.into_node(), other.into())
    }

    /// `expr IS NULL`
    #[allow(clippy::wrong_self_convention)]
    fn is_null(self) -> Node {
        self.eq(null())
    }

    /// `expr IS NOT NULL`
    #[allow(clippy::wrong_self_convention)]
    fn is_not_null(self) -> Node {
        self.not_eq(null())
    }

    /// `(expr = a OR expr = b ...)`
    fn eq_any(self, others: impl IntoIterator<Item = impl Into<Node>>) -> Node {
        let expr = self.into_node();
        grouping(Node::Or(
            others.into_iter().map(|o| expr.clone().eq(o)).collect(),
        ))
    }

    /// `(expr = a AND expr = b ...)`
    fn eq_all(self, others: impl IntoIterator<Item = impl Into<Node>>) -> Node {
        let expr = self.into_node();
        grouping(Node::And(
            others.into_iter().map(|o| expr.clone().eq(o)).collect(),
        ))
    }

    /// `(expr <> a AND expr <> b ...)`
    fn not_eq_all(self, others: impl IntoIterator<Item = impl Into<Node>>) -> Node {
        let expr = self.into_node();
        grouping(Node::And(
            others.into_iter().map(|o| expr.clone().not_eq(o)).collect(),
        ))
    }

    // Logical operators
    fn and(self, other: impl Into<Node>) -> Node {
        match self.into_node() {
            Node::And(mut children) => {
                children.push(other.into());
                Node::And(children)
            }
            left => Node::And(vec![left, other.into()]),
        }
    }

    fn or(self, other: impl Into<Node>) -> Node {
        match self.into_node() {
            Node::Or(mut children) => {
                children.push(other.into());
                Node::Or(children)
            }
            left => Node::Or(vec![left, other.into()]),
        }
    }

    fn not(self) -> Node {
        Node::Not(Box::new(self.into_node()))
    }

    // Membership
    fn in_list(self, values: impl IntoIterator<Item = impl Into<Node>>) -> Node {
        Node::In {
            expr: Box::new(self.into_node()),
            values: values.into_iter().map(Into::into).collect(),
            negated: false,
        }
    }

    fn not_in_list(self, values: impl IntoIterator<Item = impl Into<Node>>) -> Node {
        Node::In {
            expr: Box::new(self.into_node()),
            values: values.into_iter().map(Into::into).collect(),
            negated: true,
        }
    }

    fn in_select(self, query: impl Into<SelectStatement>) -> Node {
        Node::InSelect {
            expr: Box::new(self.into_node()),
            query: Box::new(query.into()),
            negated: false,
        }
    }

    fn not_in_select(self, query: impl Into<SelectStatement>) -> Node {
        Node::InSelect {
            expr: Box::new(self.into_node()),
            query: Box::new(query.into()),
            negated: true,
        }
    }

    /// Membership test whose values are all sent as binds.
    ///
    /// Builds a `HomogeneousIn` for attributes and an `In` over bind
    /// parameters for any other expression.
    fn in_values(self, values: impl IntoIterator<Item = impl Into<Value>>) -> Node {
        homogeneous_in(self.into_node(), values, false)
    }

    fn not_in_values(self, values: impl IntoIterator<Item = impl Into<Value>>) -> Node {
        homogeneous_in(self.into_node(), values, true)
    }

    // BETWEEN operator
    fn between(self, low: impl Into<Node>, high: impl Into<Node>) -> Node {
        Node::Between {
            expr: Box::new(self.into_node()),
            low: Box::new(low.into()),
            high: Box::new(high.into()),
            negated: false,
        }
    }

    fn not_between(self, low: impl Into<Node>, high: impl Into<Node>) -> Node {
        Node::Between {
            expr: Box::new(self.into_node()),
            low: Box::new(low.into()),
            high: Box::new(high.into()),
            negated: true,
        }
    }

    // Pattern matching
    /// Case-insensitive LIKE (ILIKE where available).
    fn matches(self, pattern: impl Into<Node>) -> Node {
        matches(self.into_node(), pattern.into(), None, false, false)
    }

    fn matches_case_sensitive(self, pattern: impl Into<Node>) -> Node {
        matches(self.into_node(), pattern.into(), None, true, false)
    }

    fn matches_escape(self, pattern: impl Into<Node>, escape: char) -> Node {
        matches(self.into_node(), pattern.into(), Some(escape), false, false)
    }

    fn does_not_match(self, pattern: impl Into<Node>) -> Node {
        matches(self.into_node(), pattern.into(), None, false, true)
    }

    fn matches_regexp(self, pattern: impl Into<Node>, case_sensitive: bool) -> Node {
        Node::Regexp {
            expr: Box::new(self.into_node()),
            pattern: Box::new(pattern.into()),
            case_sensitive,
            negated: false,
        }
    }

    fn does_not_match_regexp(self, pattern: impl Into<Node>, case_sensitive: bool) -> Node {
        Node::Regexp {
            expr: Box::new(self.into_node()),
            pattern: Box::new(pattern.into()),
            case_sensitive,
            negated: true,
        }
    }

    // Array operators
    fn contains(self, other: impl Into<Node>) -> Node {
        binary(BinaryOp::Contains, self.into_node(), other.into())
    }

    fn overlaps(self, other: impl Into<Node>) -> Node {
        binary(BinaryOp::Overlaps, self.into_node(), other.into())
    }

    // Arithmetic; additive and bitwise forms are parenthesized
    fn add(self, other: impl Into<Node>) -> Node {
        grouping(binary(BinaryOp::Plus, self.into_node(), other.into()))
    }

    fn sub(self, other: impl Into<Node>) -> Node {
        grouping(binary(BinaryOp::Minus, self.into_node(), other.into()))
    }

    fn mul(self, other: impl Into<Node>) -> Node {
        binary(BinaryOp::Mul, self.into_node(), other.into())
    }

    fn div(self, other: impl Into<Node>) -> Node {
        binary(BinaryOp::Div, self.into_node(), other.into())
    }

    fn modulo(self, other: impl Into<Node>) -> Node {
        binary(BinaryOp::Mod, self.into_node(), other.into())
    }

    fn bit_and(self, other: impl Into<Node>) -> Node {
        grouping(binary(BinaryOp::BitAnd, self.into_node(), other.into()))
    }

    fn bit_or(self, other: impl Into<Node>) -> Node {
        grouping(binary(BinaryOp::BitOr, self.into_node(), other.into()))
    }

    fn bit_xor(self, other: impl Into<Node>) -> Node {
        grouping(binary(BinaryOp::BitXor, self.into_node(), other.into()))
    }

    fn shift_left(self, other: impl Into<Node>) -> Node {
        grouping(binary(BinaryOp::ShiftLeft, self.into_node(), other.into()))
    }

    fn shift_right(self, other: impl Into<Node>) -> Node {
        grouping(binary(BinaryOp::ShiftRight, self.into_node(), other.into()))
    }

    /// String concatenation.
    fn concat(self, other: impl Into<Node>) -> Node {
        binary(BinaryOp::Concat, self.into_node(), other.into())
    }

    // Aggregates over this expression
    fn count(self) -> Node {
        count(self.into_node())
    }

    fn count_distinct(self) -> Node {
        count_distinct(self.into_node())
    }

    fn sum(self) -> Node {
        sum(self.into_node())
    }

    fn maximum(self) -> Node {
        max(self.into_node())
    }

    fn minimum(self) -> Node {
        min(self.into_node())
    }

    fn average(self) -> Node {
        avg(self.into_node())
    }

    fn extract(self, field: &str) -> Node {
        Node::Extract {
            field: field.to_uppercase(),
            expr: Box::new(self.into_node()),
        }
    }

    /// Window this expression: `expr OVER (...)`.
    fn over(self, window: impl Into<WindowSpec>) -> Node {
        Node::Over {
            expr: Box::new(self.into_node()),
            window: window.into(),
        }
    }

    /// Alias this expression (for SELECT list).
    fn alias(self, name: &str) -> Node {
        Node::As {
            expr: Box::new(self.into_node()),
            alias: name.into(),
        }
    }

    // Ordering
    fn asc(self) -> Ordering {
        Ordering::new(self.into_node()).direction(SortDir::Asc)
    }

    fn desc(self) -> Ordering {
        Ordering::new(self.into_node()).direction(SortDir::Desc)
    }
}

impl Predications for Node {
    fn into_node(self) -> Node {
        self
    }
}

fn binary(op: BinaryOp, left: Node, right: Node) -> Node {
    Node::Binary {
        op,
        left: Box::new(left),
        right: Box::new(right),
    }
}

fn matches(
    expr: Node,
    pattern: Node,
    escape: Option<char>,
    case_sensitive: bool,
    negated: bool,
) -> Node {
    Node::Matches {
        expr: Box::new(expr),
        pattern: Box::new(pattern),
        escape,
        case_sensitive,
        negated,
    }
}

fn homogeneous_in(
    expr: Node,
    values: impl IntoIterator<Item = impl Into<Value>>,
    negated: bool,
) -> Node {
    let values: Vec<Value> = values.into_iter().map(Into::into).collect();
    match expr {
        Node::Attribute(attribute) => Node::HomogeneousIn {
            attribute,
            values,
            negated,
        },
        other => Node::In {
            expr: Box::new(other),
            values: values.into_iter().map(Node::BindParam).collect(),
            negated,
        },
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<Value> for Node {
    fn from(v: Value) -> Self {
        Node::Literal(v)
    }
}

impl From<i64> for Node {
    fn from(n: i64) -> Self {
        lit(n)
    }
}

impl From<i32> for Node {
    fn from(n: i32) -> Self {
        lit(n)
    }
}

impl From<u32> for Node {
    fn from(n: u32) -> Self {
        lit(n)
    }
}

impl From<f64> for Node {
    fn from(x: f64) -> Self {
        lit(x)
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        lit(s)
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        lit(s)
    }
}

impl From<bool> for Node {
    fn from(b: bool) -> Self {
        lit(b)
    }
}

impl From<Attribute> for Node {
    fn from(a: Attribute) -> Self {
        Node::Attribute(a)
    }
}

impl From<BoundSqlLiteral> for Node {
    fn from(b: BoundSqlLiteral) -> Self {
        Node::BoundSqlLiteral(b)
    }
}

impl From<SelectStatement> for Node {
    fn from(q: SelectStatement) -> Self {
        Node::Subquery(Box::new(q))
    }
}
