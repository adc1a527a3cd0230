//! Scroll geometry shared by both orientations.
//!
//! Everything here is plain arithmetic on `f64`; nothing touches a host
//! surface. The [`Scrollbar`](crate::Scrollbar) drives a [`ScrollAxis`]
//! through a [`Store`](crate::store::Store) so commits and notifications stay
//! ordered.

use crate::error::{Result, ScrollbarError};

/// Smallest thumb length, in host units, unless configured otherwise.
pub const MIN_THUMB: f64 = 20.0;

/// Thumb size and offset along the track.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ThumbGeometry {
    pub size: f64,
    pub position: f64,
}

/// Largest valid scroll value. Never negative.
pub fn max_scroll(content_size: f64, visible_size: f64) -> f64 {
    (content_size - visible_size).max(0.0)
}

/// Thumb length for a track. Zero when there is no content.
pub fn thumb_size(track_size: f64, content_size: f64, visible_size: f64, min_thumb: f64) -> f64 {
    if content_size <= 0.0 {
        return 0.0;
    }
    (track_size * (visible_size / content_size)).max(min_thumb)
}

/// Compute thumb size and position from scratch.
///
/// A scroll value outside `[0, max_scroll]` (possible after a size change that
/// was not re-clamped) still places the thumb inside the track.
pub fn thumb_geometry(
    track_size: f64,
    content_size: f64,
    visible_size: f64,
    scroll_value: f64,
    min_thumb: f64,
) -> ThumbGeometry {
    let size = thumb_size(track_size, content_size, visible_size, min_thumb);
    let max = max_scroll(content_size, visible_size);
    let ratio = if max > 0.0 {
        (scroll_value / max).clamp(0.0, 1.0)
    } else {
        0.0
    };
    ThumbGeometry {
        size,
        position: ratio * (track_size - size).max(0.0),
    }
}

/// Reject negative and non-finite sizes.
pub fn validate_dimension(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ScrollbarError::InvalidDimension { name, value })
    }
}

/// Logical state of one scrollbar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollAxis {
    content_size: f64,
    visible_size: f64,
    scroll_value: f64,
    track_size: f64,
    thumb_size: f64,
    thumb_position: f64,
    min_thumb: f64,
}

impl ScrollAxis {
    /// Create an axis scrolled to the start, with no track yet.
    pub fn new(content_size: f64, visible_size: f64) -> Result<Self> {
        Self::with_min_thumb(content_size, visible_size, MIN_THUMB)
    }

    pub fn with_min_thumb(content_size: f64, visible_size: f64, min_thumb: f64) -> Result<Self> {
        let mut axis = Self {
            content_size: validate_dimension("content_size", content_size)?,
            visible_size: validate_dimension("visible_size", visible_size)?,
            scroll_value: 0.0,
            track_size: 0.0,
            thumb_size: 0.0,
            thumb_position: 0.0,
            min_thumb: validate_dimension("min_thumb", min_thumb)?,
        };
        axis.refresh_thumb();
        Ok(axis)
    }

    pub fn content_size(&self) -> f64 {
        self.content_size
    }

    pub fn visible_size(&self) -> f64 {
        self.visible_size
    }

    pub fn scroll_value(&self) -> f64 {
        self.scroll_value
    }

    pub fn track_size(&self) -> f64 {
        self.track_size
    }

    pub fn thumb_size(&self) -> f64 {
        self.thumb_size
    }

    pub fn thumb_position(&self) -> f64 {
        self.thumb_position
    }

    pub fn min_thumb(&self) -> f64 {
        self.min_thumb
    }

    pub fn max_scroll(&self) -> f64 {
        max_scroll(self.content_size, self.visible_size)
    }

    /// How far the thumb can travel. Zero when the thumb fills the track.
    pub fn thumb_travel(&self) -> f64 {
        (self.track_size - self.thumb_size).max(0.0)
    }

    /// `scroll_value / max_scroll`, or 0 when nothing can scroll.
    pub fn scroll_ratio(&self) -> f64 {
        let max = self.max_scroll();
        if max > 0.0 {
            self.scroll_value / max
        } else {
            0.0
        }
    }

    /// Whether the content overflows the viewport.
    pub fn is_scrollable(&self) -> bool {
        self.max_scroll() > 0.0
    }

    /// Clamp `value` into `[0, max_scroll]`. `NaN` maps to 0.
    pub fn clamp_scroll(&self, value: f64) -> f64 {
        if value.is_nan() {
            return 0.0;
        }
        value.clamp(0.0, self.max_scroll())
    }

    /// Scroll value that puts the thumb's leading edge at `thumb_position`.
    pub fn thumb_to_scroll(&self, thumb_position: f64) -> f64 {
        let travel = self.track_size - self.thumb_size;
        if travel <= 0.0 || thumb_position.is_nan() {
            return 0.0;
        }
        let ratio = thumb_position.clamp(0.0, travel) / travel;
        ratio * self.max_scroll()
    }

    /// Clamp and commit a scroll value, returning what was stored.
    pub fn set_scroll(&mut self, value: f64) -> f64 {
        self.scroll_value = self.clamp_scroll(value);
        self.refresh_thumb();
        self.scroll_value
    }

    /// Set the content size. The scroll value is not re-clamped.
    pub fn set_content_size(&mut self, size: f64) -> Result<()> {
        self.content_size = validate_dimension("content_size", size)?;
        self.refresh_thumb();
        Ok(())
    }

    /// Set the visible size. The scroll value is not re-clamped.
    pub fn set_visible_size(&mut self, size: f64) -> Result<()> {
        self.visible_size = validate_dimension("visible_size", size)?;
        self.refresh_thumb();
        Ok(())
    }

    /// Pull a stale scroll value back into range. Returns `true` if it moved.
    pub fn reclamp(&mut self) -> bool {
        let clamped = self.clamp_scroll(self.scroll_value);
        if clamped == self.scroll_value {
            return false;
        }
        self.scroll_value = clamped;
        self.refresh_thumb();
        true
    }

    /// Adopt a new track length and re-derive the thumb.
    ///
    /// Track sizes come from host layout; anything negative or non-finite is
    /// treated as an empty track.
    pub fn recompute_geometry(&mut self, track_size: f64) -> ThumbGeometry {
        self.track_size = if track_size.is_finite() {
            track_size.max(0.0)
        } else {
            0.0
        };
        self.refresh_thumb()
    }

    pub fn geometry(&self) -> ThumbGeometry {
        ThumbGeometry {
            size: self.thumb_size,
            position: self.thumb_position,
        }
    }

    fn refresh_thumb(&mut self) -> ThumbGeometry {
        let geometry = thumb_geometry(
            self.track_size,
            self.content_size,
            self.visible_size,
            self.scroll_value,
            self.min_thumb,
        );
        self.thumb_size = geometry.size;
        self.thumb_position = geometry.position;
        geometry
    }
}
