mod document;
mod node;

pub use document::{Document, ListenerFn, ListenerId, PointerCapture};
pub use node::{Content, Element, ElementId};
