pub mod buffer;
pub mod element;
pub mod error;
pub mod event;
pub mod hit;
pub mod layout;
pub mod render;
pub mod terminal;
pub mod text;
pub mod types;

pub use buffer::{Buffer, Cell};
pub use element::{Content, Document, Element, ElementId, ListenerId, PointerCapture};
pub use error::DocumentError;
pub use event::{Event, EventKind, EventResult, MouseButton};
pub use layout::{Placement, Rect};
pub use terminal::Terminal;
pub use types::*;
