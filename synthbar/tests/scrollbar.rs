use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use synthbar::host::{PointerHandler, TuiListener};
use synthbar::{
    Bounds, HorizontalScrollbar, HostError, Orientation, Part, ScrollSignal, Scrollbar,
    ScrollbarConfig, ScrollbarError, ScrollbarHost, TuiHost, VerticalScrollbar,
};
use tuidom::{Document, ElementId, Event, Length, MouseButton, Placement, PointerCapture, Rect};

/// A document with a one-cell-thick container whose main extent is `track`
/// cells, laid along `orientation` at the origin.
fn surface(orientation: Orientation, track: u16) -> (Document, ElementId) {
    let viewport = match orientation {
        Orientation::Horizontal => Rect::from_size(track, 3),
        Orientation::Vertical => Rect::from_size(3, track),
    };
    let doc = Document::new(viewport);
    let container = doc.create_element("gutter");
    let placement = match orientation {
        Orientation::Horizontal => Placement::new().height(Length::Cells(1)),
        Orientation::Vertical => Placement::new().width(Length::Cells(1)),
    };
    doc.set_placement(container, placement).unwrap();
    doc.append_child(doc.root(), container).unwrap();
    (doc, container)
}

fn horizontal(content: f64, visible: f64) -> (Document, Scrollbar<TuiHost>) {
    let (doc, container) = surface(Orientation::Horizontal, 500);
    let bar = HorizontalScrollbar::new(
        TuiHost::new(doc.clone()),
        container,
        ScrollbarConfig::new(content, visible),
    )
    .unwrap()
    .into_inner();
    (doc, bar)
}

fn count_scrolls(signal: &ScrollSignal) -> Arc<AtomicUsize> {
    let count = Arc::new(AtomicUsize::new(0));
    let inner = Arc::clone(&count);
    signal.subscribe(move |_| {
        inner.fetch_add(1, Ordering::SeqCst);
    });
    count
}

fn down(x: u16, y: u16) -> Event {
    Event::PointerDown {
        x,
        y,
        button: MouseButton::Left,
    }
}

fn up(x: u16, y: u16) -> Event {
    Event::PointerUp {
        x,
        y,
        button: MouseButton::Left,
    }
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_creates_track_and_thumb_in_container() {
    let (doc, container) = surface(Orientation::Vertical, 40);
    let bar = VerticalScrollbar::new(
        TuiHost::new(doc.clone()),
        container,
        ScrollbarConfig::new(160.0, 40.0).min_thumb(1.0),
    )
    .unwrap();

    assert_eq!(bar.orientation(), Orientation::Vertical);
    assert_eq!(doc.children(container), vec![bar.track()]);
    assert_eq!(doc.children(bar.track()), vec![bar.thumb()]);
    assert_eq!(doc.element(bar.track()).unwrap().class, Part::Track.class());
    assert_eq!(doc.element(bar.thumb()).unwrap().class, Part::Thumb.class());

    // Track fills the container; thumb spans the cross axis.
    assert_eq!(doc.computed_rect(bar.track()), Some(Rect::new(0, 0, 1, 40)));
    assert_eq!(doc.computed_rect(bar.thumb()), Some(Rect::new(0, 0, 1, 10)));
    assert_eq!(bar.axis().track_size(), 40.0);
}

#[test]
fn test_initial_geometry_from_layout() {
    let (doc, bar) = horizontal(2000.0, 500.0);
    let axis = bar.axis();
    assert_eq!(axis.track_size(), 500.0);
    assert_eq!(axis.thumb_size(), 125.0);
    assert_eq!(axis.thumb_position(), 0.0);
    assert_eq!(bar.scroll_value(), 0.0);
    assert_eq!(doc.computed_rect(bar.thumb()), Some(Rect::new(0, 0, 125, 1)));
}

#[test]
fn test_invalid_config_creates_nothing() {
    let (doc, container) = surface(Orientation::Horizontal, 100);
    let err = Scrollbar::new(
        TuiHost::new(doc.clone()),
        container,
        Orientation::Horizontal,
        ScrollbarConfig::new(f64::NAN, 10.0),
    )
    .unwrap_err();

    assert!(matches!(
        err,
        ScrollbarError::InvalidDimension {
            name: "content_size",
            ..
        }
    ));
    assert!(doc.find_by_class(Part::Track.class()).is_empty());
    assert!(doc.children(container).is_empty());

    let err = Scrollbar::new(
        TuiHost::new(doc.clone()),
        container,
        Orientation::Horizontal,
        ScrollbarConfig::new(100.0, 10.0).wheel_step(-1.0),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        ScrollbarError::InvalidDimension {
            name: "wheel_step",
            ..
        }
    ));
}

#[test]
fn test_missing_container_is_detached_host() {
    let (doc, container) = surface(Orientation::Horizontal, 100);
    doc.remove(container).unwrap();
    let err = Scrollbar::new(
        TuiHost::new(doc),
        container,
        Orientation::Horizontal,
        ScrollbarConfig::new(100.0, 10.0),
    )
    .unwrap_err();
    assert_eq!(err, ScrollbarError::DetachedHost);
}

/// Terminal host that refuses to attach parts, and optionally to remove them.
#[derive(Clone)]
struct RefusingHost {
    inner: TuiHost,
    refuse_remove: bool,
}

impl ScrollbarHost for RefusingHost {
    type Node = ElementId;
    type Listener = TuiListener;
    type Capture = PointerCapture;

    fn create_part(&self, part: Part, orientation: Orientation) -> Result<ElementId, HostError> {
        self.inner.create_part(part, orientation)
    }

    fn append_child(&self, _parent: ElementId, _child: ElementId) -> Result<(), HostError> {
        Err(HostError::Other("append refused".into()))
    }

    fn remove(&self, node: ElementId) -> Result<(), HostError> {
        if self.refuse_remove {
            return Err(HostError::Other("remove refused".into()));
        }
        self.inner.remove(node)
    }

    fn contains(&self, node: ElementId) -> bool {
        self.inner.contains(node)
    }

    fn add_pointer_listener(
        &self,
        node: ElementId,
        handler: PointerHandler,
    ) -> Result<TuiListener, HostError> {
        self.inner.add_pointer_listener(node, handler)
    }

    fn remove_pointer_listener(&self, listener: TuiListener) {
        self.inner.remove_pointer_listener(listener)
    }

    fn bounds(&self, node: ElementId) -> Option<Bounds> {
        self.inner.bounds(node)
    }

    fn place(
        &self,
        node: ElementId,
        orientation: Orientation,
        offset: f64,
        length: f64,
    ) -> Result<(), HostError> {
        self.inner.place(node, orientation, offset, length)
    }

    fn capture_pointer(&self, node: ElementId) -> Result<PointerCapture, HostError> {
        self.inner.capture_pointer(node)
    }
}

#[test]
fn test_failed_attach_cleans_up_parts() {
    let (doc, container) = surface(Orientation::Horizontal, 100);
    let host = RefusingHost {
        inner: TuiHost::new(doc.clone()),
        refuse_remove: false,
    };
    let err = Scrollbar::new(
        host,
        container,
        Orientation::Horizontal,
        ScrollbarConfig::new(100.0, 10.0),
    )
    .unwrap_err();

    assert_eq!(err, ScrollbarError::Host(HostError::Other("append refused".into())));
    assert!(doc.find_by_class(Part::Track.class()).is_empty());
    assert!(doc.find_by_class(Part::Thumb.class()).is_empty());
}

#[test]
fn test_failed_cleanup_reports_attach_error() {
    let (doc, container) = surface(Orientation::Horizontal, 100);
    let host = RefusingHost {
        inner: TuiHost::new(doc.clone()),
        refuse_remove: true,
    };
    let err = Scrollbar::new(
        host,
        container,
        Orientation::Horizontal,
        ScrollbarConfig::new(100.0, 10.0),
    )
    .unwrap_err();

    // The removal failure is logged; the caller sees why construction failed.
    assert_eq!(err, ScrollbarError::Host(HostError::Other("append refused".into())));
    assert!(doc.children(container).is_empty());
}

// ============================================================================
// Programmatic scrolling
// ============================================================================

#[test]
fn test_scroll_to_clamps_and_places_thumb() {
    let (doc, bar) = horizontal(2000.0, 500.0);

    assert_eq!(bar.scroll_to(-100.0).unwrap(), 0.0);
    assert_eq!(bar.scroll_to(10_000.0).unwrap(), 1500.0);
    assert_eq!(bar.scroll_to(750.0).unwrap(), 750.0);

    assert_eq!(bar.axis().thumb_size(), 125.0);
    assert_eq!(bar.axis().thumb_position(), 187.5);
    assert_eq!(doc.computed_rect(bar.thumb()), Some(Rect::new(188, 0, 125, 1)));
}

#[test]
fn test_short_content_always_commits_zero() {
    let (_doc, bar) = horizontal(300.0, 500.0);
    for value in [-10.0, 0.0, 10.0, 1e9] {
        assert_eq!(bar.scroll_to(value).unwrap(), 0.0);
    }
    assert_eq!(bar.axis().thumb_position(), 0.0);
}

#[test]
fn test_scroll_by_is_relative() {
    let (_doc, bar) = horizontal(2000.0, 500.0);
    bar.scroll_to(100.0).unwrap();
    assert_eq!(bar.scroll_by(50.0).unwrap(), 150.0);
    assert_eq!(bar.scroll_by(-1000.0).unwrap(), 0.0);
}

#[test]
fn test_on_scroll_receives_each_commit() {
    let (doc, container) = surface(Orientation::Horizontal, 500);
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let bar = HorizontalScrollbar::new(
        TuiHost::new(doc),
        container,
        ScrollbarConfig::new(2000.0, 500.0).on_scroll(move |v| sink.lock().unwrap().push(v)),
    )
    .unwrap();

    bar.scroll_to(750.0).unwrap();
    bar.scroll_to(750.0).unwrap();
    bar.scroll_to(-1.0).unwrap();

    assert_eq!(*seen.lock().unwrap(), vec![750.0, 750.0, 0.0]);
}

#[test]
fn test_subscribers_see_placed_thumb() {
    let (doc, bar) = horizontal(2000.0, 500.0);
    let seen = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&seen);
    let thumb = bar.thumb();
    let host_doc = doc.clone();
    bar.scroll_signal().subscribe(move |_| {
        *sink.lock().unwrap() = host_doc.computed_rect(thumb).map(|r| r.x);
    });

    bar.scroll_to(750.0).unwrap();
    assert_eq!(*seen.lock().unwrap(), Some(188));
}

#[test]
fn test_subscribe_axis_gets_full_state() {
    let (_doc, bar) = horizontal(2000.0, 500.0);
    let seen = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&seen);
    bar.scroll_signal().subscribe_axis(move |axis| {
        *sink.lock().unwrap() = Some((axis.scroll_value(), axis.thumb_position()));
    });

    bar.scroll_to(1500.0).unwrap();
    assert_eq!(*seen.lock().unwrap(), Some((1500.0, 375.0)));
}

#[test]
fn test_subscription_cleanup() {
    let (_doc, bar) = horizontal(2000.0, 500.0);
    let signal = bar.scroll_signal();
    // The render step is always subscribed.
    assert_eq!(signal.subscriber_count(), 1);

    let count = Arc::new(AtomicUsize::new(0));
    let inner = Arc::clone(&count);
    let sub = signal.subscribe(move |_| {
        inner.fetch_add(1, Ordering::SeqCst);
    });
    assert_eq!(signal.subscriber_count(), 2);

    bar.scroll_to(10.0).unwrap();
    sub.cleanup();
    sub.cleanup();
    bar.scroll_to(20.0).unwrap();

    assert_eq!(count.load(Ordering::SeqCst), 1);
    assert_eq!(signal.subscriber_count(), 1);
}

#[test]
fn test_subscriber_may_drive_another_scrollbar() {
    let (doc, container) = surface(Orientation::Horizontal, 500);
    let vertical_gutter = doc.create_element("vgutter");
    doc.set_placement(
        vertical_gutter,
        Placement::new().top(1).width(Length::Cells(1)),
    )
    .unwrap();
    doc.append_child(doc.root(), vertical_gutter).unwrap();

    let host = TuiHost::new(doc.clone());
    let h = HorizontalScrollbar::new(host.clone(), container, ScrollbarConfig::new(2000.0, 500.0))
        .unwrap();
    let v = VerticalScrollbar::new(host, vertical_gutter, ScrollbarConfig::new(2000.0, 500.0))
        .unwrap();

    let follower = h.clone();
    v.scroll_signal().subscribe(move |value| {
        follower.scroll_to(value).unwrap();
    });

    v.scroll_to(400.0).unwrap();
    assert_eq!(h.scroll_value(), 400.0);
}

#[test]
fn test_subscriber_may_scroll_its_own_scrollbar() {
    let (_doc, bar) = horizontal(2000.0, 500.0);
    let handle = bar.clone();
    let sub = bar.scroll_signal().subscribe(move |value| {
        if value > 100.0 {
            handle.scroll_to(100.0).unwrap();
        }
    });

    bar.scroll_to(900.0).unwrap();
    assert_eq!(bar.scroll_value(), 100.0);
    sub.cleanup();
}

// ============================================================================
// Sizes and layout
// ============================================================================

#[test]
fn test_size_change_keeps_stale_value_by_default() {
    let (_doc, bar) = horizontal(2000.0, 500.0);
    let count = count_scrolls(&bar.scroll_signal());
    bar.scroll_to(1500.0).unwrap();

    bar.set_content_size(1000.0).unwrap();

    assert_eq!(bar.scroll_value(), 1500.0);
    assert_eq!(bar.axis().thumb_size(), 250.0);
    assert_eq!(bar.axis().thumb_position(), 250.0);
    assert_eq!(count.load(Ordering::SeqCst), 1);

    // The next commit clamps against the new range.
    assert_eq!(bar.scroll_by(0.0).unwrap(), 500.0);
}

#[test]
fn test_reclamp_on_resize() {
    let (doc, container) = surface(Orientation::Horizontal, 500);
    let bar = HorizontalScrollbar::new(
        TuiHost::new(doc),
        container,
        ScrollbarConfig::new(2000.0, 500.0).reclamp_on_resize(true),
    )
    .unwrap();
    let count = count_scrolls(&bar.scroll_signal());
    bar.scroll_to(1500.0).unwrap();

    bar.set_visible_size(1500.0).unwrap();

    assert_eq!(bar.scroll_value(), 500.0);
    assert_eq!(count.load(Ordering::SeqCst), 2);
}

#[test]
fn test_invalid_size_leaves_state_unchanged() {
    let (_doc, bar) = horizontal(2000.0, 500.0);
    bar.scroll_to(750.0).unwrap();
    let before = bar.axis();

    assert!(matches!(
        bar.set_content_size(-1.0),
        Err(ScrollbarError::InvalidDimension { .. })
    ));
    assert!(bar.set_visible_size(f64::NAN).is_err());
    assert_eq!(bar.axis(), before);
}

#[test]
fn test_update_remeasures_track() {
    let (doc, bar) = horizontal(2000.0, 500.0);
    doc.set_viewport(Rect::from_size(400, 3));

    bar.update(750.0).unwrap();

    let axis = bar.axis();
    assert_eq!(axis.track_size(), 400.0);
    assert_eq!(axis.thumb_size(), 100.0);
    assert_eq!(axis.thumb_position(), 150.0);
    assert_eq!(doc.computed_rect(bar.thumb()), Some(Rect::new(150, 0, 100, 1)));
}

#[test]
fn test_refresh_does_not_notify_scroll() {
    let (doc, bar) = horizontal(2000.0, 500.0);
    let count = count_scrolls(&bar.scroll_signal());
    doc.set_viewport(Rect::from_size(200, 3));

    bar.refresh().unwrap();

    assert_eq!(bar.axis().track_size(), 200.0);
    assert_eq!(bar.axis().thumb_size(), 50.0);
    assert_eq!(count.load(Ordering::SeqCst), 0);
}

#[test]
fn test_rounded_thumb_stays_inside_track() {
    let (doc, container) = surface(Orientation::Horizontal, 10);
    let bar = HorizontalScrollbar::new(
        TuiHost::new(doc.clone()),
        container,
        ScrollbarConfig::new(40.0, 10.0).min_thumb(1.0),
    )
    .unwrap();
    let placed = |doc: &Document| {
        let placement = doc.element(bar.thumb()).unwrap().placement;
        (placement.left, placement.width)
    };

    // Thumb 2.5 cells at 7.5: both edges round, the end lands on 10.
    bar.scroll_to(30.0).unwrap();
    assert_eq!(placed(&doc), (8, Length::Cells(2)));
    assert_eq!(doc.computed_rect(bar.thumb()), Some(Rect::new(8, 0, 2, 1)));

    // Thumb 2.5 cells at 2.5.
    bar.scroll_to(10.0).unwrap();
    assert_eq!(placed(&doc), (3, Length::Cells(2)));
}

// ============================================================================
// Pointer input
// ============================================================================

#[test]
fn test_thumb_drag() {
    let (doc, bar) = horizontal(2000.0, 500.0);
    let count = count_scrolls(&bar.scroll_signal());

    // Press consumed by the thumb: no track click.
    doc.dispatch(&down(10, 0));
    assert!(bar.is_dragging());
    assert_eq!(doc.captured(), Some(bar.thumb()));
    assert_eq!(bar.scroll_value(), 0.0);
    assert_eq!(count.load(Ordering::SeqCst), 0);

    // Captured: moves off the scrollbar still drive it.
    doc.dispatch(&Event::PointerMove { x: 197, y: 2 });
    assert_eq!(bar.scroll_value(), bar.axis().thumb_to_scroll(187.0));

    doc.dispatch(&Event::PointerMove { x: 499, y: 2 });
    assert_eq!(bar.scroll_value(), 1500.0);

    doc.dispatch(&up(499, 2));
    assert!(!bar.is_dragging());
    assert_eq!(doc.captured(), None);
    assert_eq!(count.load(Ordering::SeqCst), 2);

    // Released: further moves do nothing.
    doc.dispatch(&Event::PointerMove { x: 10, y: 0 });
    assert_eq!(bar.scroll_value(), 1500.0);
}

#[test]
fn test_vertical_drag_uses_y() {
    let (doc, container) = surface(Orientation::Vertical, 100);
    let bar = VerticalScrollbar::new(
        TuiHost::new(doc.clone()),
        container,
        ScrollbarConfig::new(400.0, 100.0),
    )
    .unwrap();
    // Thumb 25 cells, travel 75.
    doc.dispatch(&down(0, 5));
    doc.dispatch(&Event::PointerMove { x: 50, y: 20 });
    assert_close(bar.scroll_value(), 15.0 / 75.0 * 300.0);
    doc.dispatch(&up(50, 20));
}

#[test]
fn test_track_click_centres_thumb() {
    let (doc, bar) = horizontal(2000.0, 500.0);
    let count = count_scrolls(&bar.scroll_signal());

    doc.dispatch(&down(400, 0));

    assert_close(bar.scroll_value(), 1350.0);
    assert!(!bar.is_dragging());
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn test_track_click_offset_is_track_relative() {
    let doc = Document::new(Rect::from_size(120, 3));
    let container = doc.create_element("gutter");
    doc.set_placement(
        container,
        Placement::new()
            .left(20)
            .top(2)
            .width(Length::Cells(100))
            .height(Length::Cells(1)),
    )
    .unwrap();
    doc.append_child(doc.root(), container).unwrap();
    let bar = HorizontalScrollbar::new(
        TuiHost::new(doc.clone()),
        container,
        ScrollbarConfig::new(400.0, 100.0),
    )
    .unwrap();

    // Track offset 50, thumb 25: leading edge at 37.5 of 75.
    doc.dispatch(&down(70, 2));
    assert_close(bar.scroll_value(), 150.0);
}

#[test]
fn test_cancel_drag_releases_capture() {
    let (doc, bar) = horizontal(2000.0, 500.0);
    doc.dispatch(&down(10, 0));
    assert!(bar.is_dragging());

    assert!(bar.cancel_drag());
    assert!(!bar.cancel_drag());
    assert_eq!(doc.captured(), None);

    doc.dispatch(&Event::PointerMove { x: 300, y: 0 });
    assert_eq!(bar.scroll_value(), 0.0);
}

#[test]
fn test_lost_release_does_not_leak_into_sibling() {
    let doc = Document::new(Rect::from_size(30, 30));
    let right = doc.create_element("gutter-right");
    let bottom = doc.create_element("gutter-bottom");
    doc.set_placement(
        right,
        Placement::new()
            .left(29)
            .width(Length::Cells(1))
            .height(Length::Cells(20)),
    )
    .unwrap();
    doc.set_placement(
        bottom,
        Placement::new()
            .top(29)
            .width(Length::Cells(20))
            .height(Length::Cells(1)),
    )
    .unwrap();
    doc.append_child(doc.root(), right).unwrap();
    doc.append_child(doc.root(), bottom).unwrap();

    let host = TuiHost::new(doc.clone());
    // Both: track 20, thumb 5, travel 15, max scroll 60.
    let config = || ScrollbarConfig::new(80.0, 20.0).min_thumb(1.0);
    let vertical = VerticalScrollbar::new(host.clone(), right, config()).unwrap();
    let horizontal = HorizontalScrollbar::new(host, bottom, config()).unwrap();

    // Vertical drag whose release never arrives.
    doc.dispatch(&down(29, 1));
    assert!(vertical.is_dragging());
    assert_eq!(doc.captured(), Some(vertical.thumb()));

    doc.dispatch(&down(1, 29));
    assert!(!vertical.is_dragging());
    assert!(horizontal.is_dragging());
    assert_eq!(doc.captured(), Some(horizontal.thumb()));

    doc.dispatch(&Event::PointerMove { x: 16, y: 29 });
    assert_eq!(horizontal.scroll_value(), 60.0);
    assert_eq!(vertical.scroll_value(), 0.0);

    doc.dispatch(&up(16, 29));
    assert!(!horizontal.is_dragging());
    assert_eq!(doc.captured(), None);
}

#[test]
fn test_repress_after_lost_release_restarts_drag() {
    let (doc, container) = surface(Orientation::Vertical, 100);
    let bar = VerticalScrollbar::new(
        TuiHost::new(doc.clone()),
        container,
        ScrollbarConfig::new(400.0, 100.0),
    )
    .unwrap();

    doc.dispatch(&down(0, 2));
    doc.dispatch(&down(0, 10));
    assert!(bar.is_dragging());
    assert_eq!(doc.captured(), Some(bar.thumb()));

    // Anchored at the second press: 15 cells of 75 travel.
    doc.dispatch(&Event::PointerMove { x: 0, y: 25 });
    assert_close(bar.scroll_value(), 15.0 / 75.0 * 300.0);
    doc.dispatch(&up(0, 25));
    assert!(!bar.is_dragging());
}

#[test]
fn test_wheel_over_scrollbar() {
    let (doc, container) = surface(Orientation::Vertical, 100);
    let bar = VerticalScrollbar::new(
        TuiHost::new(doc.clone()),
        container,
        ScrollbarConfig::new(400.0, 100.0).wheel_step(3.0),
    )
    .unwrap();

    let wheel = |y: u16, delta_y: i16| Event::Wheel {
        x: 0,
        y,
        delta_x: 0,
        delta_y,
    };
    // Over the track, then over the thumb (bubbles to the track).
    doc.dispatch(&wheel(90, 2));
    assert_eq!(bar.scroll_value(), 6.0);
    doc.dispatch(&wheel(10, -1));
    assert_eq!(bar.scroll_value(), 3.0);

    // Horizontal wheel does nothing to a vertical bar.
    doc.dispatch(&Event::Wheel {
        x: 0,
        y: 90,
        delta_x: 4,
        delta_y: 0,
    });
    assert_eq!(bar.scroll_value(), 3.0);
}

// ============================================================================
// Detach
// ============================================================================

#[test]
fn test_detach_removes_parts() {
    let (doc, bar) = horizontal(2000.0, 500.0);
    let (track, thumb) = (bar.track(), bar.thumb());
    let listeners = doc.listener_count();
    assert!(listeners > 0);

    bar.detach();

    assert!(bar.is_detached());
    assert!(!doc.contains(track));
    assert!(!doc.contains(thumb));
    assert_eq!(doc.listener_count(), 0);
    assert_eq!(bar.scroll_to(10.0), Err(ScrollbarError::DetachedHost));
    assert_eq!(bar.update(10.0), Err(ScrollbarError::DetachedHost));
    assert_eq!(bar.set_content_size(10.0), Err(ScrollbarError::DetachedHost));

    // Idempotent.
    bar.detach();
}

#[test]
fn test_container_removed_by_host() {
    let (doc, container) = surface(Orientation::Horizontal, 100);
    let bar = HorizontalScrollbar::new(
        TuiHost::new(doc.clone()),
        container,
        ScrollbarConfig::new(400.0, 100.0),
    )
    .unwrap();

    doc.remove(container).unwrap();

    assert!(bar.is_detached());
    assert_eq!(bar.scroll_by(1.0), Err(ScrollbarError::DetachedHost));
    assert_eq!(bar.refresh(), Err(ScrollbarError::DetachedHost));
}

#[test]
fn test_dropping_last_handle_detaches() {
    let (doc, bar) = horizontal(2000.0, 500.0);
    let track = bar.track();
    let clone = bar.clone();

    drop(bar);
    assert!(doc.contains(track));

    drop(clone);
    assert!(!doc.contains(track));
    assert_eq!(doc.listener_count(), 0);
}

#[test]
fn test_detach_during_drag() {
    let (doc, bar) = horizontal(2000.0, 500.0);
    doc.dispatch(&down(10, 0));
    assert!(bar.is_dragging());

    bar.detach();

    assert!(!bar.is_dragging());
    assert_eq!(doc.captured(), None);
}
