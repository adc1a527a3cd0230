//! Scrollbar construction options.

use std::fmt;
use std::sync::Arc;

use crate::axis::MIN_THUMB;

/// Callback receiving each committed scroll value.
pub type ScrollCallback = Arc<dyn Fn(f64) + Send + Sync>;

/// Default scroll distance per wheel notch.
pub const DEFAULT_WHEEL_STEP: f64 = 1.0;

/// Options for constructing a [`Scrollbar`](crate::Scrollbar).
#[derive(Clone)]
pub struct ScrollbarConfig {
    /// Total scrollable extent.
    pub content_size: f64,
    /// Viewport extent along the scrollbar's axis.
    pub visible_size: f64,
    /// Called after every commit, once the thumb has been placed.
    pub on_scroll: Option<ScrollCallback>,
    /// Lower bound on thumb length, in host units.
    pub min_thumb: f64,
    /// Re-clamp the scroll value when a size setter shrinks the range.
    /// Off by default: a stale value then persists until the next scroll.
    pub reclamp_on_resize: bool,
    /// Scroll distance per wheel notch over the track.
    pub wheel_step: f64,
}

impl Default for ScrollbarConfig {
    fn default() -> Self {
        Self {
            content_size: 0.0,
            visible_size: 0.0,
            on_scroll: None,
            min_thumb: MIN_THUMB,
            reclamp_on_resize: false,
            wheel_step: DEFAULT_WHEEL_STEP,
        }
    }
}

impl fmt::Debug for ScrollbarConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollbarConfig")
            .field("content_size", &self.content_size)
            .field("visible_size", &self.visible_size)
            .field("on_scroll", &self.on_scroll.as_ref().map(|_| "Fn(f64)"))
            .field("min_thumb", &self.min_thumb)
            .field("reclamp_on_resize", &self.reclamp_on_resize)
            .field("wheel_step", &self.wheel_step)
            .finish()
    }
}

impl ScrollbarConfig {
    pub fn new(content_size: f64, visible_size: f64) -> Self {
        Self {
            content_size,
            visible_size,
            ..Default::default()
        }
    }

    pub fn on_scroll<F>(mut self, callback: F) -> Self
    where
        F: Fn(f64) + Send + Sync + 'static,
    {
        self.on_scroll = Some(Arc::new(callback));
        self
    }

    pub fn min_thumb(mut self, min_thumb: f64) -> Self {
        self.min_thumb = min_thumb;
        self
    }

    pub fn reclamp_on_resize(mut self, reclamp: bool) -> Self {
        self.reclamp_on_resize = reclamp;
        self
    }

    pub fn wheel_step(mut self, step: f64) -> Self {
        self.wheel_step = step;
        self
    }
}
