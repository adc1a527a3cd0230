use thiserror::Error;

use crate::element::ElementId;

/// Errors raised by [`Document`](crate::Document) mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("element {0} does not exist in this document")]
    UnknownElement(ElementId),
    #[error("element {0} already has a parent")]
    AlreadyAttached(ElementId),
    #[error("appending {child} to {parent} would create a cycle")]
    Cycle { parent: ElementId, child: ElementId },
    #[error("the root element cannot be removed or re-parented")]
    Root,
    #[error("pointer is already captured by {0}")]
    CaptureHeld(ElementId),
}
