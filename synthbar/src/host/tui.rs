//! [`ScrollbarHost`] for a terminal [`Document`].

use std::sync::Arc;

use tuidom::{
    Color, Document, ElementId, Event, EventKind, EventResult, Length, ListenerId, Placement,
    PointerCapture, Style,
};

use super::{Bounds, Part, PointerHandler, PointerInput, ScrollbarHost};
use crate::error::HostError;
use crate::orientation::Orientation;

/// Colours and glyphs for scrollbar parts.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollbarTheme {
    pub track: Color,
    pub thumb: Color,
    pub track_char: Option<char>,
    pub thumb_char: Option<char>,
}

impl Default for ScrollbarTheme {
    fn default() -> Self {
        Self {
            track: Color::rgb(60, 60, 70),
            thumb: Color::rgb(120, 120, 140),
            track_char: None,
            thumb_char: None,
        }
    }
}

impl ScrollbarTheme {
    fn style_for(&self, part: Part) -> Style {
        let (color, fill) = match part {
            Part::Track => (self.track, self.track_char),
            Part::Thumb => (self.thumb, self.thumb_char),
        };
        let style = Style::new().background(color);
        match fill {
            Some(ch) => style.fill(ch),
            None => style,
        }
    }
}

/// Listeners registered for one pointer handler, one per event kind.
#[derive(Debug)]
pub struct TuiListener(Vec<ListenerId>);

/// Terminal host: scrollbar parts are elements of a shared [`Document`].
#[derive(Debug, Clone)]
pub struct TuiHost {
    document: Document,
    theme: ScrollbarTheme,
}

impl TuiHost {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            theme: ScrollbarTheme::default(),
        }
    }

    pub fn with_theme(mut self, theme: ScrollbarTheme) -> Self {
        self.theme = theme;
        self
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

const POINTER_KINDS: [EventKind; 5] = [
    EventKind::PointerDown,
    EventKind::PointerMove,
    EventKind::PointerUp,
    EventKind::PointerCancel,
    EventKind::Wheel,
];

fn to_pointer_input(event: &Event) -> Option<PointerInput> {
    match *event {
        Event::PointerDown { x, y, .. } => Some(PointerInput::Down {
            x: x.into(),
            y: y.into(),
        }),
        Event::PointerMove { x, y } => Some(PointerInput::Move {
            x: x.into(),
            y: y.into(),
        }),
        Event::PointerUp { x, y, .. } => Some(PointerInput::Up {
            x: x.into(),
            y: y.into(),
        }),
        Event::PointerCancel => Some(PointerInput::Cancel),
        Event::Wheel {
            delta_x, delta_y, ..
        } => Some(PointerInput::Wheel {
            delta_x: delta_x.into(),
            delta_y: delta_y.into(),
        }),
        Event::Resize { .. } => None,
    }
}

fn to_cells(value: f64) -> u16 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, f64::from(u16::MAX)) as u16
}

impl ScrollbarHost for TuiHost {
    type Node = ElementId;
    type Listener = TuiListener;
    type Capture = PointerCapture;

    fn create_part(&self, part: Part, orientation: Orientation) -> Result<ElementId, HostError> {
        let id = self.document.create_element(part.class());
        let placement = match (part, orientation) {
            (Part::Track, _) => Placement::new(),
            (Part::Thumb, Orientation::Horizontal) => Placement::new()
                .width(Length::Cells(0))
                .height(Length::Percent(100.0)),
            (Part::Thumb, Orientation::Vertical) => Placement::new()
                .width(Length::Percent(100.0))
                .height(Length::Cells(0)),
        };
        self.document.set_placement(id, placement)?;
        self.document.set_style(id, self.theme.style_for(part))?;
        log::trace!("[synthbar] created {} {} as {}", orientation, part, id);
        Ok(id)
    }

    fn append_child(&self, parent: ElementId, child: ElementId) -> Result<(), HostError> {
        Ok(self.document.append_child(parent, child)?)
    }

    fn remove(&self, node: ElementId) -> Result<(), HostError> {
        Ok(self.document.remove(node)?)
    }

    fn contains(&self, node: ElementId) -> bool {
        self.document.contains(node)
    }

    fn add_pointer_listener(
        &self,
        node: ElementId,
        handler: PointerHandler,
    ) -> Result<TuiListener, HostError> {
        let mut ids = Vec::with_capacity(POINTER_KINDS.len());
        for kind in POINTER_KINDS {
            let handler = Arc::clone(&handler);
            let registered = self.document.add_event_listener(node, kind, move |event| {
                match to_pointer_input(event) {
                    Some(input) if handler(&input) => EventResult::Consumed,
                    _ => EventResult::Ignored,
                }
            });
            match registered {
                Ok(id) => ids.push(id),
                Err(err) => {
                    for id in ids {
                        self.document.remove_event_listener(id);
                    }
                    return Err(err.into());
                }
            }
        }
        Ok(TuiListener(ids))
    }

    fn remove_pointer_listener(&self, listener: TuiListener) {
        for id in listener.0 {
            self.document.remove_event_listener(id);
        }
    }

    fn bounds(&self, node: ElementId) -> Option<Bounds> {
        self.document.computed_rect(node).map(|rect| Bounds {
            x: rect.x.into(),
            y: rect.y.into(),
            width: rect.width.into(),
            height: rect.height.into(),
        })
    }

    fn place(
        &self,
        node: ElementId,
        orientation: Orientation,
        offset: f64,
        length: f64,
    ) -> Result<(), HostError> {
        // Round both edges so the thumb never runs past the track's end.
        let start = to_cells(offset);
        let end = to_cells(offset + length).max(start);
        let (offset, length) = (start, Length::Cells(end - start));
        self.document.update(node, |element| {
            let placement = &mut element.placement;
            match orientation {
                Orientation::Horizontal => {
                    placement.left = offset;
                    placement.width = length;
                }
                Orientation::Vertical => {
                    placement.top = offset;
                    placement.height = length;
                }
            }
        })?;
        Ok(())
    }

    fn capture_pointer(&self, node: ElementId) -> Result<PointerCapture, HostError> {
        Ok(self.document.capture_pointer(node)?)
    }
}
