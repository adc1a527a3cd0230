//! Synthetic scrollbars.
//!
//! A scrollbar here is a track element with a thumb element inside it, both
//! owned by a host surface. Their geometry comes from a logical
//! content/viewport ratio, and they can be driven by pointer input or
//! programmatically.
//!
//! - [`axis`]: clamping and thumb geometry, shared by both orientations.
//! - [`interaction`]: the drag and track-click state machine.
//! - [`orientation`]: the axis-selection decision.
//! - [`store`]: the reactive store that orders commits and notifications.
//! - [`host`]: the host-surface seam, with a terminal implementation.
//! - [`Scrollbar`], [`HorizontalScrollbar`], [`VerticalScrollbar`]: the widgets.
//!
//! ```ignore
//! let doc = Document::new(Rect::from_size(80, 24));
//! let gutter = doc.create_element("gutter");
//! doc.set_placement(gutter, Placement::new().left(79).width(Length::Cells(1)))?;
//! doc.append_child(doc.root(), gutter)?;
//!
//! let bar = VerticalScrollbar::new(
//!     TuiHost::new(doc.clone()),
//!     gutter,
//!     ScrollbarConfig::new(200.0, 24.0).min_thumb(1.0),
//! )?;
//! let sub = bar.scroll_signal().subscribe(|value| log::info!("scrolled to {value}"));
//! bar.scroll_to(50.0)?;
//! sub.cleanup();
//! ```

pub mod axis;
pub mod config;
pub mod error;
pub mod host;
pub mod interaction;
pub mod orientation;
pub mod scrollbar;
pub mod store;

pub use axis::{thumb_geometry, ScrollAxis, ThumbGeometry, MIN_THUMB};
pub use config::{ScrollCallback, ScrollbarConfig};
pub use error::{HostError, Result, ScrollbarError};
pub use host::{Bounds, Part, PointerInput, ScrollbarHost, ScrollbarTheme, TuiHost};
pub use interaction::{track_click_target, DragSession, DragState, Interaction};
pub use orientation::{AxisDescriptor, OffsetAttr, Orientation, PointerAxis, SizeAttr};
pub use scrollbar::{Channel, HorizontalScrollbar, ScrollSignal, Scrollbar, VerticalScrollbar};
pub use store::{Store, Subscription};
