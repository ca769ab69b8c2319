//! Window definitions for `OVER (...)` and the `WINDOW` clause.

use serde::{Deserialize, Serialize};

use super::node::Node;
use super::query::Ordering;

/// Inline window definition: `(PARTITION BY ... ORDER BY ... frame)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[must_use]
pub struct Window {
    pub partition_by: Vec<Node>,
    pub order_by: Vec<Ordering>,
    pub frame: Option<WindowFrame>,
}

impl Window {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add PARTITION BY expressions. Repeated calls accumulate.
    pub fn partition(mut self, exprs: impl IntoIterator<Item = Node>) -> Self {
        self.partition_by.extend(exprs);
        self
    }

    /// Add ORDER BY terms. Repeated calls accumulate.
    pub fn order(mut self, orderings: impl IntoIterator<Item = impl Into<Ordering>>) -> Self {
        self.order_by.extend(orderings.into_iter().map(Into::into));
        self
    }

    /// Set the window frame.
    pub fn frame(mut self, frame: WindowFrame) -> Self {
        self.frame = Some(frame);
        self
    }

    /// `ROWS BETWEEN start AND end`
    pub fn rows(self, start: FrameBound, end: FrameBound) -> Self {
        self.frame(WindowFrame::between(FrameUnit::Rows, start, end))
    }

    /// `RANGE BETWEEN start AND end`
    pub fn range(self, start: FrameBound, end: FrameBound) -> Self {
        self.frame(WindowFrame::between(FrameUnit::Range, start, end))
    }

    /// `GROUPS BETWEEN start AND end`
    pub fn groups(self, start: FrameBound, end: FrameBound) -> Self {
        self.frame(WindowFrame::between(FrameUnit::Groups, start, end))
    }
}

/// Window referenced by an `OVER` clause.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowSpec {
    /// `OVER (...)`
    Inline(Window),
    /// `OVER w`, defined in the statement's WINDOW clause
    Named(String),
}

impl From<Window> for WindowSpec {
    fn from(w: Window) -> Self {
        WindowSpec::Inline(w)
    }
}

impl From<&str> for WindowSpec {
    fn from(name: &str) -> Self {
        WindowSpec::Named(name.into())
    }
}

/// Named window for the WINDOW clause: `w AS (...)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NamedWindow {
    pub name: String,
    pub window: Window,
}

impl NamedWindow {
    pub fn new(name: impl Into<String>, window: Window) -> Self {
        Self {
            name: name.into(),
            window,
        }
    }
}

/// Window frame specification.
///
/// Examples:
/// - `ROWS BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW`
/// - `RANGE BETWEEN 1 PRECEDING AND 1 FOLLOWING`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowFrame {
    pub unit: FrameUnit,
    pub start: FrameBound,
    pub end: Option<FrameBound>,
}

impl WindowFrame {
    /// Create a frame with just a start bound.
    pub fn new(unit: FrameUnit, start: FrameBound) -> Self {
        Self {
            unit,
            start,
            end: None,
        }
    }

    /// Create a frame with BETWEEN start AND end.
    pub fn between(unit: FrameUnit, start: FrameBound, end: FrameBound) -> Self {
        Self {
            unit,
            start,
            end: Some(end),
        }
    }

    /// ROWS BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW
    pub fn rows_to_current() -> Self {
        Self::between(
            FrameUnit::Rows,
            FrameBound::UnboundedPreceding,
            FrameBound::CurrentRow,
        )
    }

    /// Rolling window: ROWS BETWEEN (periods-1) PRECEDING AND CURRENT ROW
    pub fn rolling(periods: u32) -> Self {
        let preceding = periods.saturating_sub(1);
        Self::between(
            FrameUnit::Rows,
            FrameBound::Preceding(preceding.into()),
            FrameBound::CurrentRow,
        )
    }
}

/// Frame unit: ROWS, RANGE, or GROUPS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameUnit {
    /// ROWS - physical row offsets
    Rows,
    /// RANGE - logical value ranges
    Range,
    /// GROUPS - peer groups
    Groups,
}

/// Frame boundary specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameBound {
    UnboundedPreceding,
    Preceding(u64),
    CurrentRow,
    Following(u64),
    UnboundedFollowing,
}
