use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};

use super::{Content, Element, ElementId};
use crate::buffer::Buffer;
use crate::error::DocumentError;
use crate::event::{Event, EventKind, EventResult};
use crate::layout::{layout, LayoutResult, Placement, Rect};
use crate::types::Style;

/// Callback invoked when an event reaches an element.
pub type ListenerFn = Arc<dyn Fn(&Event) -> EventResult + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

struct Listener {
    id: ListenerId,
    element: ElementId,
    kind: EventKind,
    handler: ListenerFn,
}

#[derive(Debug, Clone, Copy)]
struct Capture {
    token: u64,
    element: ElementId,
}

struct DocumentInner {
    root: ElementId,
    elements: HashMap<ElementId, Element>,
    listeners: Vec<Listener>,
    capture: Option<Capture>,
    viewport: Rect,
    layout: LayoutResult,
    layout_dirty: bool,
    next_listener: u64,
    next_capture: u64,
}

impl DocumentInner {
    fn ensure_layout(&mut self) {
        if self.layout_dirty {
            self.layout = layout(&self.elements, self.root, self.viewport);
            self.layout_dirty = false;
        }
    }

    fn element_mut(&mut self, id: ElementId) -> Result<&mut Element, DocumentError> {
        self.elements
            .get_mut(&id)
            .ok_or(DocumentError::UnknownElement(id))
    }

    /// `id` followed by each of its ancestors, innermost first.
    fn ancestry(&self, id: ElementId) -> Vec<ElementId> {
        let mut path = Vec::new();
        let mut current = Some(id);
        while let Some(el) = current {
            path.push(el);
            current = self.elements.get(&el).and_then(|e| e.parent);
        }
        path
    }

    fn collect_subtree(&self, id: ElementId, out: &mut Vec<ElementId>) {
        out.push(id);
        if let Some(element) = self.elements.get(&id) {
            for child in &element.children {
                self.collect_subtree(*child, out);
            }
        }
    }
}

/// A retained tree of elements plus the listeners attached to them.
///
/// `Document` is a cheap-to-clone handle; clones share the same tree. Event
/// listeners run with no internal lock held, so they may freely mutate the
/// document they were dispatched from.
#[derive(Clone)]
pub struct Document {
    inner: Arc<RwLock<DocumentInner>>,
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.read();
        f.debug_struct("Document")
            .field("root", &inner.root)
            .field("elements", &inner.elements.len())
            .field("listeners", &inner.listeners.len())
            .field("viewport", &inner.viewport)
            .finish()
    }
}

impl Document {
    /// Create a document whose root element fills `viewport`.
    pub fn new(viewport: Rect) -> Self {
        let root = Element::new("root");
        let root_id = root.id;
        let mut elements = HashMap::new();
        elements.insert(root_id, root);
        Self {
            inner: Arc::new(RwLock::new(DocumentInner {
                root: root_id,
                elements,
                listeners: Vec::new(),
                capture: None,
                viewport,
                layout: LayoutResult::new(),
                layout_dirty: true,
                next_listener: 0,
                next_capture: 0,
            })),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, DocumentInner> {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, DocumentInner> {
        self.inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn root(&self) -> ElementId {
        self.read().root
    }

    pub fn viewport(&self) -> Rect {
        self.read().viewport
    }

    pub fn set_viewport(&self, viewport: Rect) {
        let mut inner = self.write();
        if inner.viewport != viewport {
            log::debug!("[dom] viewport {:?} -> {:?}", inner.viewport, viewport);
            inner.viewport = viewport;
            inner.layout_dirty = true;
        }
    }

    // -------------------------------------------------------------------------
    // Tree
    // -------------------------------------------------------------------------

    /// Create a parentless element. It is not laid out or hit until appended
    /// somewhere under the root.
    pub fn create_element(&self, class: impl Into<String>) -> ElementId {
        let element = Element::new(class);
        let id = element.id;
        self.write().elements.insert(id, element);
        id
    }

    pub fn append_child(&self, parent: ElementId, child: ElementId) -> Result<(), DocumentError> {
        let mut inner = self.write();
        if child == inner.root {
            return Err(DocumentError::Root);
        }
        if !inner.elements.contains_key(&parent) {
            return Err(DocumentError::UnknownElement(parent));
        }
        if inner.element_mut(child)?.parent.is_some() {
            return Err(DocumentError::AlreadyAttached(child));
        }
        if inner.ancestry(parent).contains(&child) {
            return Err(DocumentError::Cycle { parent, child });
        }
        inner.element_mut(child)?.parent = Some(parent);
        inner.element_mut(parent)?.children.push(child);
        inner.layout_dirty = true;
        Ok(())
    }

    /// Remove an element, its descendants, and every listener attached to them.
    pub fn remove(&self, id: ElementId) -> Result<(), DocumentError> {
        let mut inner = self.write();
        if id == inner.root {
            return Err(DocumentError::Root);
        }
        let parent = inner
            .elements
            .get(&id)
            .ok_or(DocumentError::UnknownElement(id))?
            .parent;
        if let Some(parent) = parent.and_then(|p| inner.elements.get_mut(&p)) {
            parent.children.retain(|c| *c != id);
        }

        let mut doomed = Vec::new();
        inner.collect_subtree(id, &mut doomed);
        for el in &doomed {
            inner.elements.remove(el);
        }
        inner.listeners.retain(|l| !doomed.contains(&l.element));
        if inner.capture.is_some_and(|c| doomed.contains(&c.element)) {
            inner.capture = None;
        }
        inner.layout_dirty = true;
        log::debug!("[dom] removed {} ({} elements)", id, doomed.len());
        Ok(())
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.read().elements.contains_key(&id)
    }

    /// Whether `id` is reachable from the root.
    pub fn is_attached(&self, id: ElementId) -> bool {
        let inner = self.read();
        inner.elements.contains_key(&id) && inner.ancestry(id).last() == Some(&inner.root)
    }

    /// Snapshot of an element.
    pub fn element(&self, id: ElementId) -> Option<Element> {
        self.read().elements.get(&id).cloned()
    }

    pub fn children(&self, id: ElementId) -> Vec<ElementId> {
        self.read()
            .elements
            .get(&id)
            .map(|e| e.children.clone())
            .unwrap_or_default()
    }

    pub fn find_by_class(&self, class: &str) -> Vec<ElementId> {
        let inner = self.read();
        let mut found: Vec<_> = inner
            .elements
            .values()
            .filter(|e| e.class == class)
            .map(|e| e.id)
            .collect();
        found.sort();
        found
    }

    // -------------------------------------------------------------------------
    // Element properties
    // -------------------------------------------------------------------------

    pub fn update<F>(&self, id: ElementId, f: F) -> Result<(), DocumentError>
    where
        F: FnOnce(&mut Element),
    {
        let mut inner = self.write();
        f(inner.element_mut(id)?);
        inner.layout_dirty = true;
        Ok(())
    }

    pub fn set_placement(&self, id: ElementId, placement: Placement) -> Result<(), DocumentError> {
        self.update(id, |e| e.placement = placement)
    }

    pub fn set_style(&self, id: ElementId, style: Style) -> Result<(), DocumentError> {
        self.update(id, |e| e.style = style)
    }

    pub fn set_text(&self, id: ElementId, text: impl Into<String>) -> Result<(), DocumentError> {
        let text = text.into();
        self.update(id, |e| e.content = Content::Text(text))
    }

    pub fn set_scroll_offset(&self, id: ElementId, offset: (u16, u16)) -> Result<(), DocumentError> {
        self.update(id, |e| e.scroll_offset = offset)
    }

    /// Rectangle an attached element occupies after layout.
    pub fn computed_rect(&self, id: ElementId) -> Option<Rect> {
        let mut inner = self.write();
        inner.ensure_layout();
        inner.layout.get(&id).copied()
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    pub fn add_event_listener<F>(
        &self,
        id: ElementId,
        kind: EventKind,
        handler: F,
    ) -> Result<ListenerId, DocumentError>
    where
        F: Fn(&Event) -> EventResult + Send + Sync + 'static,
    {
        let mut inner = self.write();
        if !inner.elements.contains_key(&id) {
            return Err(DocumentError::UnknownElement(id));
        }
        let listener_id = ListenerId(inner.next_listener);
        inner.next_listener += 1;
        inner.listeners.push(Listener {
            id: listener_id,
            element: id,
            kind,
            handler: Arc::new(handler),
        });
        Ok(listener_id)
    }

    /// Returns `false` when the listener was already gone.
    pub fn remove_event_listener(&self, id: ListenerId) -> bool {
        let mut inner = self.write();
        let before = inner.listeners.len();
        inner.listeners.retain(|l| l.id != id);
        inner.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.read().listeners.len()
    }

    /// Route pointer move and release events to `id` until the returned
    /// capture is released or dropped, or the pointer is released.
    pub fn capture_pointer(&self, id: ElementId) -> Result<PointerCapture, DocumentError> {
        let mut inner = self.write();
        if !inner.elements.contains_key(&id) {
            return Err(DocumentError::UnknownElement(id));
        }
        if let Some(existing) = inner.capture {
            if existing.element != id {
                return Err(DocumentError::CaptureHeld(existing.element));
            }
        }
        let token = inner.next_capture;
        inner.next_capture += 1;
        inner.capture = Some(Capture { token, element: id });
        log::trace!("[dom] pointer captured by {}", id);
        Ok(PointerCapture {
            doc: Arc::downgrade(&self.inner),
            token,
            element: id,
        })
    }

    /// Element currently holding pointer capture.
    pub fn captured(&self) -> Option<ElementId> {
        self.read().capture.map(|c| c.element)
    }

    /// Deepest attached element under the given cell.
    pub fn hit_test(&self, x: u16, y: u16) -> Option<ElementId> {
        let mut inner = self.write();
        inner.ensure_layout();
        crate::hit::hit_test(&inner.elements, &inner.layout, inner.root, x, y)
    }

    /// Deliver an event.
    ///
    /// Pointer events go to the hit element and bubble through its ancestors
    /// until a listener consumes them. While the pointer is captured, moves
    /// and releases go only to the capturing element. A release ends any
    /// capture it was routed through. A press while a capture is still held
    /// means the release was lost: the capture is dropped and its element
    /// receives [`Event::PointerCancel`] before the press is delivered.
    pub fn dispatch(&self, event: &Event) -> EventResult {
        if let Event::Resize { width, height } = *event {
            self.set_viewport(Rect::from_size(width, height));
            return EventResult::Ignored;
        }
        let Some(kind) = event.kind() else {
            return EventResult::Ignored;
        };
        if kind == EventKind::PointerCancel {
            return EventResult::Ignored;
        }
        if kind == EventKind::PointerDown {
            self.cancel_stale_capture();
        }

        let (handlers, routed_capture) = {
            let mut inner = self.write();
            inner.ensure_layout();

            let captured = match (inner.capture, kind) {
                (Some(capture), EventKind::PointerMove | EventKind::PointerUp) => Some(capture),
                _ => None,
            };
            let path = match captured {
                Some(capture) => vec![capture.element],
                None => event
                    .position()
                    .and_then(|(x, y)| {
                        crate::hit::hit_test(&inner.elements, &inner.layout, inner.root, x, y)
                    })
                    .map(|target| inner.ancestry(target))
                    .unwrap_or_default(),
            };

            let handlers: Vec<ListenerFn> = path
                .iter()
                .flat_map(|el| {
                    inner
                        .listeners
                        .iter()
                        .filter(move |l| l.element == *el && l.kind == kind)
                        .map(|l| Arc::clone(&l.handler))
                })
                .collect();
            (handlers, captured)
        };

        let mut result = EventResult::Ignored;
        for handler in handlers {
            if handler(event) == EventResult::Consumed {
                result = EventResult::Consumed;
                break;
            }
        }

        if kind == EventKind::PointerUp {
            if let Some(capture) = routed_capture {
                release_capture(&self.inner, capture.token);
            }
        }
        result
    }

    fn cancel_stale_capture(&self) {
        let handlers: Vec<ListenerFn> = {
            let mut inner = self.write();
            let Some(stale) = inner.capture.take() else {
                return;
            };
            log::debug!("[dom] press while {} holds capture, cancelling", stale.element);
            inner
                .listeners
                .iter()
                .filter(|l| l.element == stale.element && l.kind == EventKind::PointerCancel)
                .map(|l| Arc::clone(&l.handler))
                .collect()
        };
        for handler in handlers {
            if handler(&Event::PointerCancel) == EventResult::Consumed {
                break;
            }
        }
    }

    /// Paint every attached element into `buf`.
    pub fn render(&self, buf: &mut Buffer) {
        let mut inner = self.write();
        inner.ensure_layout();
        crate::render::render_to_buffer(&inner.elements, &inner.layout, inner.root, buf);
    }
}

fn release_capture(doc: &RwLock<DocumentInner>, token: u64) {
    let mut inner = doc.write().unwrap_or_else(|poisoned| poisoned.into_inner());
    if inner.capture.is_some_and(|c| c.token == token) {
        log::trace!("[dom] pointer capture released");
        inner.capture = None;
    }
}

/// Scoped pointer capture returned by [`Document::capture_pointer`].
///
/// Dropping the handle releases the capture if it is still the active one.
#[derive(Debug)]
pub struct PointerCapture {
    doc: Weak<RwLock<DocumentInner>>,
    token: u64,
    element: ElementId,
}

impl PointerCapture {
    pub fn element(&self) -> ElementId {
        self.element
    }

    /// Whether this handle still owns the document's capture.
    pub fn is_active(&self) -> bool {
        self.doc.upgrade().is_some_and(|doc| {
            doc.read()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .capture
                .is_some_and(|c| c.token == self.token)
        })
    }

    pub fn release(&self) {
        if let Some(doc) = self.doc.upgrade() {
            release_capture(&doc, self.token);
        }
    }
}

impl Drop for PointerCapture {
    fn drop(&mut self) {
        self.release();
    }
}
