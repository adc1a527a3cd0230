use std::collections::HashMap;

use crate::buffer::Buffer;
use crate::element::{Content, Element, ElementId};
use crate::layout::LayoutResult;
use crate::text::{char_width, skip_columns};
use crate::types::Rgb;

const DEFAULT_FG: Rgb = Rgb::new(255, 255, 255);

/// Paint `root` and its descendants. Parents are painted before children, so
/// children cover their parent; siblings paint in insertion order.
pub fn render_to_buffer(
    elements: &HashMap<ElementId, Element>,
    layout: &LayoutResult,
    root: ElementId,
    buf: &mut Buffer,
) {
    let Some(element) = elements.get(&root) else {
        return;
    };
    let Some(rect) = layout.get(&root).copied() else {
        return;
    };
    if rect.is_empty() {
        return;
    }

    let bg = element.style.background.map(|c| c.to_rgb());
    let fg = element.style.foreground.map(|c| c.to_rgb());
    if bg.is_some() || element.style.fill.is_some() {
        let fill = element.style.fill;
        buf.fill_with(rect, |cell| {
            if let Some(bg) = bg {
                cell.bg = bg;
            }
            if let Some(ch) = fill {
                cell.char = ch;
                cell.wide_continuation = false;
                cell.fg = fg.unwrap_or(DEFAULT_FG);
            }
        });
    }

    if let Content::Text(text) = &element.content {
        let (skip_x, skip_y) = element.scroll_offset;
        let lines = text.lines().skip(skip_y as usize).take(rect.height as usize);
        for (row, line) in lines.enumerate() {
            let y = rect.y + row as u16;
            let mut x = rect.x;
            for ch in skip_columns(line, skip_x as usize).chars() {
                let width = char_width(ch).max(1) as u16;
                if x + width > rect.right() {
                    break;
                }
                if let Some(cell) = buf.get_mut(x, y) {
                    cell.char = ch;
                    cell.fg = fg.unwrap_or(DEFAULT_FG);
                    cell.wide_continuation = false;
                    if let Some(bg) = bg {
                        cell.bg = bg;
                    }
                }
                if width == 2 {
                    if let Some(cell) = buf.get_mut(x + 1, y) {
                        cell.wide_continuation = true;
                    }
                }
                x += width;
            }
        }
    }

    for child in &element.children {
        render_to_buffer(elements, layout, *child, buf);
    }
}
