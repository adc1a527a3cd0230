//! Drag and track-click state machine.
//!
//! The controller only turns pointer coordinates into candidate scroll
//! values; committing them is the caller's job (see
//! [`ScrollAxis::set_scroll`]). Coordinates are already reduced to the
//! scrollbar's axis.

use crate::axis::ScrollAxis;

/// Anchors recorded when a drag starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    /// Pointer coordinate at the press.
    pub anchor_pointer: f64,
    /// Thumb position at the press.
    pub anchor_thumb: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// Interaction controller for one scrollbar.
#[derive(Debug, Clone, Default)]
pub struct Interaction {
    state: DragState,
}

impl Interaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    pub fn session(&self) -> Option<DragSession> {
        match self.state {
            DragState::Dragging(session) => Some(session),
            DragState::Idle => None,
        }
    }

    /// Pointer pressed on the thumb: start (or restart) a drag.
    pub fn press_thumb(&mut self, pointer: f64, axis: &ScrollAxis) -> DragSession {
        let session = DragSession {
            anchor_pointer: pointer,
            anchor_thumb: axis.thumb_position(),
        };
        self.state = DragState::Dragging(session);
        session
    }

    /// Pointer moved. Returns the scroll value to commit, or `None` when idle.
    pub fn pointer_move(&self, pointer: f64, axis: &ScrollAxis) -> Option<f64> {
        let session = self.session()?;
        let delta = pointer - session.anchor_pointer;
        Some(axis.thumb_to_scroll(session.anchor_thumb + delta))
    }

    /// Pointer released. Returns `true` if a drag ended.
    pub fn release(&mut self) -> bool {
        let was_dragging = self.is_dragging();
        self.state = DragState::Idle;
        was_dragging
    }

    /// Abandon a drag without a release (focus loss, detach).
    pub fn cancel(&mut self) -> bool {
        self.release()
    }
}

/// Scroll value for a click on the track, `click_offset` from the track's
/// origin. The thumb is centred under the click.
pub fn track_click_target(axis: &ScrollAxis, click_offset: f64) -> f64 {
    axis.thumb_to_scroll(click_offset - axis.thumb_size() / 2.0)
}
