//! In-memory cache of rendered statements.
//!
//! # Design
//!
//! - Keyed by `(Dialect, Statement)`; structural `Eq`/`Hash` on the AST
//!   makes independently built but identical statements share an entry
//! - Rendering options are fixed per cache, so they are not part of the key
//! - Errors are not cached; a failing statement is re-rendered every time
//!
//! The map is a `DashMap`, so one cache can be shared across threads
//! behind an `Arc` without an outer lock.

mod hash;
pub use hash::compute_hash;

use dashmap::DashMap;
use tracing::debug;

use crate::error::Result;
use crate::sql::{Dialect, RenderOptions, Rendered, Statement, ToSql};

/// Concurrent cache of rendered SQL.
#[derive(Debug, Default)]
pub struct RenderCache {
    options: RenderOptions,
    entries: DashMap<(Dialect, Statement), Rendered>,
}

impl RenderCache {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            entries: DashMap::new(),
        }
    }

    pub fn options(&self) -> RenderOptions {
        self.options
    }

    /// Render `statement`, reusing a previous rendering when one exists.
    pub fn render(&self, statement: &Statement, dialect: Dialect) -> Result<Rendered> {
        let key = (dialect, statement.clone());
        if let Some(hit) = self.entries.get(&key) {
            debug!(%dialect, kind = statement.kind(), "render cache hit");
            return Ok(hit.value().clone());
        }

        debug!(%dialect, kind = statement.kind(), "render cache miss");
        let rendered = statement.to_sql_with(dialect, self.options)?;
        self.entries.insert(key, rendered.clone());
        Ok(rendered)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}
