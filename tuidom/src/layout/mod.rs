mod place;
mod rect;

pub use place::{layout, LayoutResult, Placement};
pub use rect::Rect;
