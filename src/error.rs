//! Error types for AST construction and rendering.

/// Errors raised while building or rendering a statement.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Bind values do not match the placeholders of a bound SQL literal.
    #[error("{message} in: {sql}")]
    Bind { message: String, sql: String },

    /// `invert()` was called on a node that is not a boolean predicate.
    #[error("cannot invert non-boolean node: {node}")]
    NotInvertible { node: &'static str },

    /// The target dialect has no faithful rendering for a construct.
    #[error("{feature} is not supported by the {dialect} dialect")]
    Unsupported {
        feature: &'static str,
        dialect: &'static str,
    },

    /// Nodes were combined into a shape that has no SQL meaning.
    #[error("invalid composition: {0}")]
    Composition(String),

    /// A string join was given empty SQL.
    #[error("cannot join on an empty SQL fragment")]
    EmptyJoin,

    /// A literal has no SQL representation (NaN, infinity).
    #[error("invalid literal: {0}")]
    InvalidLiteral(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn bind(message: impl Into<String>, sql: &str) -> Self {
        Error::Bind {
            message: message.into(),
            sql: sql.to_string(),
        }
    }

    pub(crate) fn unsupported(feature: &'static str, dialect: &'static str) -> Self {
        Error::Unsupported { feature, dialect }
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
