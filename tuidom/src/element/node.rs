use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::layout::Placement;
use crate::types::Style;

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// Identifier of an element, unique for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

impl ElementId {
    pub(crate) fn next() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "el-{}", self.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Content {
    #[default]
    None,
    /// Lines of text, split on `\n` when rendered.
    Text(String),
}

/// A node in a [`Document`](super::Document).
#[derive(Debug, Clone)]
pub struct Element {
    pub id: ElementId,
    /// Style class name. Purely informational for the renderer; hosts use it
    /// to find and describe elements.
    pub class: String,
    pub parent: Option<ElementId>,
    pub children: Vec<ElementId>,
    pub placement: Placement,
    pub style: Style,
    pub content: Content,
    /// Offset (columns, rows) applied to text content before it is drawn.
    pub scroll_offset: (u16, u16),
}

impl Element {
    pub(crate) fn new(class: impl Into<String>) -> Self {
        Self {
            id: ElementId::next(),
            class: class.into(),
            parent: None,
            children: Vec::new(),
            placement: Placement::default(),
            style: Style::default(),
            content: Content::None,
            scroll_offset: (0, 0),
        }
    }
}
