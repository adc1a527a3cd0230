use std::collections::HashMap;

use crate::element::{Element, ElementId};
use crate::layout::LayoutResult;

/// Find the deepest element under `(x, y)`, starting from `root`.
/// Later siblings are drawn on top and win ties.
pub fn hit_test(
    elements: &HashMap<ElementId, Element>,
    layout: &LayoutResult,
    root: ElementId,
    x: u16,
    y: u16,
) -> Option<ElementId> {
    let element = elements.get(&root)?;
    let rect = layout.get(&root)?;

    if !rect.contains(x, y) {
        return None;
    }

    // Check children in reverse order (last rendered = on top)
    for child in element.children.iter().rev() {
        if let Some(id) = hit_test(elements, layout, *child, x, y) {
            return Some(id);
        }
    }

    Some(root)
}
