use std::collections::HashMap;

use super::Rect;
use crate::element::{Element, ElementId};
use crate::types::Length;

pub type LayoutResult = HashMap<ElementId, Rect>;

/// Where an element sits inside its parent.
///
/// Every element is placed absolutely: `left`/`top` are offsets from the
/// parent's origin and `width`/`height` resolve against the parent's size.
/// The result is clipped to the parent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Placement {
    pub left: u16,
    pub top: u16,
    pub width: Length,
    pub height: Length,
}

impl Placement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn left(mut self, left: u16) -> Self {
        self.left = left;
        self
    }

    pub fn top(mut self, top: u16) -> Self {
        self.top = top;
        self
    }

    pub fn width(mut self, width: Length) -> Self {
        self.width = width;
        self
    }

    pub fn height(mut self, height: Length) -> Self {
        self.height = height;
        self
    }

    /// Resolve this placement inside `parent`.
    pub fn resolve(&self, parent: Rect) -> Rect {
        let left = self.left.min(parent.width);
        let top = self.top.min(parent.height);
        let room_x = parent.width - left;
        let room_y = parent.height - top;
        Rect::new(
            parent.x.saturating_add(left),
            parent.y.saturating_add(top),
            self.width.resolve(parent.width).min(room_x),
            self.height.resolve(parent.height).min(room_y),
        )
    }
}

/// Lay out the subtree under `root`, which fills `viewport`.
pub fn layout(
    elements: &HashMap<ElementId, Element>,
    root: ElementId,
    viewport: Rect,
) -> LayoutResult {
    let mut result = LayoutResult::with_capacity(elements.len());
    result.insert(root, viewport);
    if let Some(element) = elements.get(&root) {
        layout_children(elements, element, viewport, &mut result);
    }
    result
}

fn layout_children(
    elements: &HashMap<ElementId, Element>,
    element: &Element,
    rect: Rect,
    result: &mut LayoutResult,
) {
    for child_id in &element.children {
        let Some(child) = elements.get(child_id) else {
            continue;
        };
        let child_rect = child.placement.resolve(rect);
        result.insert(*child_id, child_rect);
        layout_children(elements, child, child_rect, result);
    }
}
