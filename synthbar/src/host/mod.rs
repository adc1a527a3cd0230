//! The host surface a scrollbar renders into.
//!
//! The engine never touches a host directly: a [`Scrollbar`](crate::Scrollbar)
//! asks its host to create the track and thumb, to report the track's laid
//! out size, to route pointer input, and to place the thumb after each
//! commit.

mod tui;

use std::fmt;
use std::sync::Arc;

pub use tui::{ScrollbarTheme, TuiHost, TuiListener};

use crate::error::HostError;
use crate::orientation::Orientation;

/// Pointer input delivered to a scrollbar part, in host coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerInput {
    Down { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    Up { x: f64, y: f64 },
    /// The press was abandoned without a release; end any drag it started.
    Cancel,
    Wheel { delta_x: f64, delta_y: f64 },
}

/// Pointer handler. Returns `true` to consume the input, which stops it from
/// reaching ancestors and suppresses default handling such as selection.
pub type PointerHandler = Arc<dyn Fn(&PointerInput) -> bool + Send + Sync>;

/// The two elements a scrollbar is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Part {
    Track,
    Thumb,
}

impl Part {
    /// Style class carried by the element.
    pub const fn class(self) -> &'static str {
        match self {
            Self::Track => "synthbar-track",
            Self::Thumb => "synthbar-thumb",
        }
    }
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class())
    }
}

/// Laid-out rectangle of a host node.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Capabilities a scrollbar needs from the surface it lives on.
pub trait ScrollbarHost: Clone + Send + Sync + 'static {
    /// Handle to an element.
    type Node: Copy + Eq + fmt::Debug + Send + Sync + 'static;
    /// Handle to a registered pointer listener.
    type Listener: Send + Sync + 'static;
    /// Scoped pointer capture; dropping it releases the capture.
    type Capture: Send + Sync + 'static;

    /// Create a detached track or thumb element styled for `orientation`:
    /// absolutely placed, cross-axis dimension at 100% of its parent.
    fn create_part(&self, part: Part, orientation: Orientation) -> Result<Self::Node, HostError>;

    fn append_child(&self, parent: Self::Node, child: Self::Node) -> Result<(), HostError>;

    /// Remove `node` and its descendants.
    fn remove(&self, node: Self::Node) -> Result<(), HostError>;

    /// Whether `node` still exists on the surface.
    fn contains(&self, node: Self::Node) -> bool;

    fn add_pointer_listener(
        &self,
        node: Self::Node,
        handler: PointerHandler,
    ) -> Result<Self::Listener, HostError>;

    fn remove_pointer_listener(&self, listener: Self::Listener);

    /// Laid-out bounds, `None` while the node is not laid out.
    fn bounds(&self, node: Self::Node) -> Option<Bounds>;

    /// Write the main-axis offset and length of `node`.
    fn place(
        &self,
        node: Self::Node,
        orientation: Orientation,
        offset: f64,
        length: f64,
    ) -> Result<(), HostError>;

    /// Route pointer move/release to `node` until the capture is dropped or
    /// the pointer is released. A later press on any node ends the capture
    /// and delivers [`PointerInput::Cancel`] to `node`.
    fn capture_pointer(&self, node: Self::Node) -> Result<Self::Capture, HostError>;
}
