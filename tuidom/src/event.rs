use crossterm::event::{Event as CrosstermEvent, MouseEventKind};

/// Pointer and window events delivered through [`Document::dispatch`](crate::Document::dispatch).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Mouse button pressed
    PointerDown { x: u16, y: u16, button: MouseButton },
    /// Mouse moved, with or without a button held
    PointerMove { x: u16, y: u16 },
    /// Mouse button released
    PointerUp { x: u16, y: u16, button: MouseButton },
    /// Capture ended without a release. Sent only to the capturing element,
    /// when a new press arrives while the previous one was never released.
    PointerCancel,
    /// Mouse wheel, one unit per notch
    Wheel {
        x: u16,
        y: u16,
        delta_x: i16,
        delta_y: i16,
    },
    /// Terminal resized
    Resize { width: u16, height: u16 },
}

/// Event kinds listeners can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    PointerDown,
    PointerMove,
    PointerUp,
    PointerCancel,
    Wheel,
}

/// Outcome of a listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventResult {
    /// Let the event continue to the next listener or ancestor.
    #[default]
    Ignored,
    /// Stop propagation and suppress default handling.
    Consumed,
}

/// Mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl Event {
    /// Listener kind this event is delivered to, `None` for window events.
    pub fn kind(&self) -> Option<EventKind> {
        match self {
            Self::PointerDown { .. } => Some(EventKind::PointerDown),
            Self::PointerMove { .. } => Some(EventKind::PointerMove),
            Self::PointerUp { .. } => Some(EventKind::PointerUp),
            Self::PointerCancel => Some(EventKind::PointerCancel),
            Self::Wheel { .. } => Some(EventKind::Wheel),
            Self::Resize { .. } => None,
        }
    }

    pub fn position(&self) -> Option<(u16, u16)> {
        match *self {
            Self::PointerDown { x, y, .. }
            | Self::PointerMove { x, y }
            | Self::PointerUp { x, y, .. }
            | Self::Wheel { x, y, .. } => Some((x, y)),
            Self::PointerCancel | Self::Resize { .. } => None,
        }
    }

    /// Convert a crossterm event. Keyboard and focus events have no
    /// counterpart and yield `None`.
    pub fn from_crossterm(event: &CrosstermEvent) -> Option<Self> {
        match event {
            CrosstermEvent::Mouse(mouse) => {
                let (x, y) = (mouse.column, mouse.row);
                let event = match mouse.kind {
                    MouseEventKind::Down(button) => Self::PointerDown {
                        x,
                        y,
                        button: button.into(),
                    },
                    MouseEventKind::Up(button) => Self::PointerUp {
                        x,
                        y,
                        button: button.into(),
                    },
                    MouseEventKind::Drag(_) | MouseEventKind::Moved => Self::PointerMove { x, y },
                    MouseEventKind::ScrollUp => Self::Wheel {
                        x,
                        y,
                        delta_x: 0,
                        delta_y: -1,
                    },
                    MouseEventKind::ScrollDown => Self::Wheel {
                        x,
                        y,
                        delta_x: 0,
                        delta_y: 1,
                    },
                    MouseEventKind::ScrollLeft => Self::Wheel {
                        x,
                        y,
                        delta_x: -1,
                        delta_y: 0,
                    },
                    MouseEventKind::ScrollRight => Self::Wheel {
                        x,
                        y,
                        delta_x: 1,
                        delta_y: 0,
                    },
                };
                Some(event)
            }
            CrosstermEvent::Resize(width, height) => Some(Self::Resize {
                width: *width,
                height: *height,
            }),
            _ => None,
        }
    }
}

impl From<crossterm::event::MouseButton> for MouseButton {
    fn from(btn: crossterm::event::MouseButton) -> Self {
        use crossterm::event::MouseButton as CtBtn;
        match btn {
            CtBtn::Left => MouseButton::Left,
            CtBtn::Right => MouseButton::Right,
            CtBtn::Middle => MouseButton::Middle,
        }
    }
}
