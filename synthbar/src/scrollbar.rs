//! Scrollbar widgets bound to a host surface.

use std::fmt;
use std::ops::Deref;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::axis::{validate_dimension, ScrollAxis};
use crate::config::ScrollbarConfig;
use crate::error::{Result, ScrollbarError};
use crate::host::{Part, PointerHandler, PointerInput, ScrollbarHost};
use crate::interaction::{track_click_target, Interaction};
use crate::orientation::Orientation;
use crate::store::{Store, Subscription};

/// Store channels a scrollbar publishes on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// A scroll value was committed.
    Scroll,
    /// Sizes or track length changed without a scroll commit.
    Geometry,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

struct Shared<H: ScrollbarHost> {
    orientation: Orientation,
    host: H,
    track: H::Node,
    thumb: H::Node,
    store: Store<ScrollAxis, Channel>,
    interaction: Mutex<Interaction>,
    capture: Mutex<Option<H::Capture>>,
    listeners: Mutex<Vec<H::Listener>>,
    detached: AtomicBool,
    reclamp_on_resize: bool,
    wheel_step: f64,
}

impl<H: ScrollbarHost> Shared<H> {
    fn teardown(&self) {
        if self.detached.swap(true, Ordering::SeqCst) {
            return;
        }
        lock(&self.interaction).cancel();
        drop(lock(&self.capture).take());
        let listeners = std::mem::take(&mut *lock(&self.listeners));
        for listener in listeners {
            self.host.remove_pointer_listener(listener);
        }
        if self.host.contains(self.track) {
            if let Err(err) = self.host.remove(self.track) {
                log::warn!("[synthbar] failed to remove {} track: {}", self.orientation, err);
            }
        }
        log::debug!("[synthbar] {} scrollbar detached", self.orientation);
    }
}

impl<H: ScrollbarHost> Drop for Shared<H> {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// An orientation-parameterised scrollbar.
///
/// `Scrollbar` is a cheap-to-clone handle. All clones drive the same state;
/// when the last one is dropped the track and thumb are removed from the
/// host. Every commit runs in the same order: clamp and store the value,
/// re-derive the thumb, place the thumb on the host, then notify
/// subscribers. Subscribers may call back into this or any other scrollbar.
pub struct Scrollbar<H: ScrollbarHost> {
    shared: Arc<Shared<H>>,
}

impl<H: ScrollbarHost> Clone for Scrollbar<H> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<H: ScrollbarHost> fmt::Debug for Scrollbar<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scrollbar")
            .field("orientation", &self.shared.orientation)
            .field("track", &self.shared.track)
            .field("thumb", &self.shared.thumb)
            .field("axis", &self.axis())
            .field("dragging", &self.is_dragging())
            .field("detached", &self.is_detached())
            .finish()
    }
}

impl<H: ScrollbarHost> Scrollbar<H> {
    /// Build a track and thumb inside `container` and wire up pointer input.
    pub fn new(
        host: H,
        container: H::Node,
        orientation: Orientation,
        config: ScrollbarConfig,
    ) -> Result<Self> {
        let axis =
            ScrollAxis::with_min_thumb(config.content_size, config.visible_size, config.min_thumb)?;
        let wheel_step = validate_dimension("wheel_step", config.wheel_step)?;
        if !host.contains(container) {
            return Err(ScrollbarError::DetachedHost);
        }

        let track = host.create_part(Part::Track, orientation)?;
        let thumb = host.create_part(Part::Thumb, orientation)?;
        let attached = host
            .append_child(track, thumb)
            .and_then(|()| host.append_child(container, track));
        if let Err(err) = attached {
            for (part, node) in [(Part::Track, track), (Part::Thumb, thumb)] {
                if host.contains(node) {
                    if let Err(remove_err) = host.remove(node) {
                        log::warn!(
                            "[synthbar] failed to remove {} {}: {}",
                            orientation,
                            part,
                            remove_err
                        );
                    }
                }
            }
            return Err(err.into());
        }

        let store = Store::new(axis, [Channel::Scroll, Channel::Geometry]);

        // Render step, subscribed first so consumers see the placed thumb.
        for channel in [Channel::Scroll, Channel::Geometry] {
            let host = host.clone();
            store.subscribe(channel, move |axis: &ScrollAxis| {
                if let Err(err) =
                    host.place(thumb, orientation, axis.thumb_position(), axis.thumb_size())
                {
                    log::warn!("[synthbar] failed to place {} thumb: {}", orientation, err);
                }
            });
        }
        if let Some(on_scroll) = config.on_scroll {
            store.subscribe(Channel::Scroll, move |axis: &ScrollAxis| {
                on_scroll(axis.scroll_value())
            });
        }

        let scrollbar = Self {
            shared: Arc::new(Shared {
                orientation,
                host,
                track,
                thumb,
                store,
                interaction: Mutex::new(Interaction::new()),
                capture: Mutex::new(None),
                listeners: Mutex::new(Vec::new()),
                detached: AtomicBool::new(false),
                reclamp_on_resize: config.reclamp_on_resize,
                wheel_step,
            }),
        };
        scrollbar.bind_listeners()?;
        scrollbar.refresh()?;

        log::debug!(
            "[synthbar] {} scrollbar created (content {}, visible {}, track {})",
            orientation,
            config.content_size,
            config.visible_size,
            scrollbar.axis().track_size()
        );
        Ok(scrollbar)
    }

    fn bind_listeners(&self) -> Result<()> {
        let shared = &self.shared;

        let weak = Arc::downgrade(shared);
        let on_thumb: PointerHandler = Arc::new(move |input: &PointerInput| {
            weak.upgrade()
                .is_some_and(|shared| Scrollbar { shared }.thumb_input(input))
        });
        let weak = Arc::downgrade(shared);
        let on_track: PointerHandler = Arc::new(move |input: &PointerInput| {
            weak.upgrade()
                .is_some_and(|shared| Scrollbar { shared }.track_input(input))
        });

        let thumb = shared.host.add_pointer_listener(shared.thumb, on_thumb)?;
        lock(&shared.listeners).push(thumb);
        let track = shared.host.add_pointer_listener(shared.track, on_track)?;
        lock(&shared.listeners).push(track);
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Programmatic API
    // -------------------------------------------------------------------------

    /// Clamp and commit `value`, returning the committed value.
    ///
    /// Subscribers are notified even when the value did not change.
    pub fn scroll_to(&self, value: f64) -> Result<f64> {
        self.ensure_attached()?;
        let committed = self
            .shared
            .store
            .update(Channel::Scroll, |axis| axis.set_scroll(value));
        log::trace!(
            "[synthbar] {} scroll_to({}) -> {}",
            self.shared.orientation,
            value,
            committed
        );
        Ok(committed)
    }

    /// Scroll relative to the current value.
    pub fn scroll_by(&self, delta: f64) -> Result<f64> {
        self.ensure_attached()?;
        Ok(self.shared.store.update(Channel::Scroll, |axis| {
            axis.set_scroll(axis.scroll_value() + delta)
        }))
    }

    /// Re-read the track length from host layout, then commit `scroll_value`.
    ///
    /// Call this after the host's layout changes (resize, container moved).
    pub fn update(&self, scroll_value: f64) -> Result<()> {
        self.ensure_attached()?;
        let track = self.measure_track();
        self.shared.store.update(Channel::Scroll, |axis| {
            axis.recompute_geometry(track);
            axis.set_scroll(scroll_value)
        });
        Ok(())
    }

    /// Re-read the track length and re-place the thumb without a scroll
    /// notification.
    pub fn refresh(&self) -> Result<()> {
        self.ensure_attached()?;
        let track = self.measure_track();
        self.shared.store.update(Channel::Geometry, |axis| {
            axis.recompute_geometry(track);
        });
        Ok(())
    }

    pub fn set_content_size(&self, size: f64) -> Result<()> {
        self.resize(|axis| axis.set_content_size(size))
    }

    pub fn set_visible_size(&self, size: f64) -> Result<()> {
        self.resize(|axis| axis.set_visible_size(size))
    }

    fn resize(&self, f: impl FnOnce(&mut ScrollAxis) -> Result<()>) -> Result<()> {
        self.ensure_attached()?;
        let reclamp = self.shared.reclamp_on_resize;
        let moved = self.shared.store.try_update(Channel::Geometry, |axis| {
            f(axis)?;
            Ok::<_, ScrollbarError>(reclamp && axis.reclamp())
        })?;
        if moved {
            self.shared.store.notify(Channel::Scroll);
        }
        Ok(())
    }

    /// The scroll-changed channel.
    pub fn scroll_signal(&self) -> ScrollSignal {
        ScrollSignal {
            store: self.shared.store.clone(),
        }
    }

    /// End any drag in progress without a pointer release.
    pub fn cancel_drag(&self) -> bool {
        self.end_drag()
    }

    /// Remove the track and thumb from the host and stop listening. Every
    /// later operation fails with [`ScrollbarError::DetachedHost`].
    pub fn detach(&self) {
        self.shared.teardown();
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Current committed scroll value.
    pub fn scroll_value(&self) -> f64 {
        self.shared.store.read_with(ScrollAxis::scroll_value)
    }

    /// Snapshot of the full axis state.
    pub fn axis(&self) -> ScrollAxis {
        self.shared.store.get()
    }

    pub fn orientation(&self) -> Orientation {
        self.shared.orientation
    }

    pub fn is_dragging(&self) -> bool {
        lock(&self.shared.interaction).is_dragging()
    }

    pub fn is_detached(&self) -> bool {
        self.shared.detached.load(Ordering::SeqCst)
            || !self.shared.host.contains(self.shared.track)
            || !self.shared.host.contains(self.shared.thumb)
    }

    pub fn host(&self) -> &H {
        &self.shared.host
    }

    pub fn track(&self) -> H::Node {
        self.shared.track
    }

    pub fn thumb(&self) -> H::Node {
        self.shared.thumb
    }

    fn ensure_attached(&self) -> Result<()> {
        if self.is_detached() {
            return Err(ScrollbarError::DetachedHost);
        }
        Ok(())
    }

    fn measure_track(&self) -> f64 {
        let shared = &self.shared;
        shared
            .host
            .bounds(shared.track)
            .map_or(0.0, |b| shared.orientation.main_extent(b.width, b.height))
    }

    /// Pick up a track length change made by host layout since the last
    /// measurement.
    fn sync_track(&self) {
        let track = self.measure_track();
        if track != self.axis().track_size() {
            if let Err(err) = self.refresh() {
                log::warn!("[synthbar] track refresh failed: {}", err);
            }
        }
    }

    // -------------------------------------------------------------------------
    // Pointer input
    // -------------------------------------------------------------------------

    fn thumb_input(&self, input: &PointerInput) -> bool {
        let orientation = self.shared.orientation;
        match *input {
            PointerInput::Down { x, y } => {
                self.begin_drag(orientation.pick(x, y));
                true
            }
            PointerInput::Move { x, y } => self.drag_to(orientation.pick(x, y)),
            PointerInput::Up { .. } | PointerInput::Cancel => self.end_drag(),
            PointerInput::Wheel { .. } => false,
        }
    }

    fn track_input(&self, input: &PointerInput) -> bool {
        let orientation = self.shared.orientation;
        match *input {
            PointerInput::Down { x, y } => {
                self.click_track(x, y);
                true
            }
            PointerInput::Wheel { delta_x, delta_y } => {
                let delta = orientation.pick(delta_x, delta_y);
                if delta == 0.0 {
                    return false;
                }
                if let Err(err) = self.scroll_by(delta * self.shared.wheel_step) {
                    log::warn!("[synthbar] ignoring wheel: {}", err);
                }
                true
            }
            PointerInput::Move { .. } | PointerInput::Up { .. } | PointerInput::Cancel => false,
        }
    }

    fn begin_drag(&self, pointer: f64) {
        if let Err(err) = self.ensure_attached() {
            log::warn!("[synthbar] ignoring thumb press: {}", err);
            return;
        }
        self.sync_track();

        let axis = self.axis();
        let session = lock(&self.shared.interaction).press_thumb(pointer, &axis);
        match self.shared.host.capture_pointer(self.shared.thumb) {
            Ok(capture) => *lock(&self.shared.capture) = Some(capture),
            Err(err) => log::warn!("[synthbar] dragging without pointer capture: {}", err),
        }
        log::debug!(
            "[synthbar] {} drag start: pointer {}, thumb {}",
            self.shared.orientation,
            session.anchor_pointer,
            session.anchor_thumb
        );
    }

    fn drag_to(&self, pointer: f64) -> bool {
        let axis = self.axis();
        let candidate = lock(&self.shared.interaction).pointer_move(pointer, &axis);
        let Some(value) = candidate else {
            return false;
        };
        if let Err(err) = self.scroll_to(value) {
            log::warn!("[synthbar] dropping drag: {}", err);
            self.end_drag();
        }
        true
    }

    fn end_drag(&self) -> bool {
        let ended = lock(&self.shared.interaction).release();
        drop(lock(&self.shared.capture).take());
        if ended {
            log::debug!(
                "[synthbar] {} drag end at {}",
                self.shared.orientation,
                self.scroll_value()
            );
        }
        ended
    }

    fn click_track(&self, x: f64, y: f64) {
        if let Err(err) = self.ensure_attached() {
            log::warn!("[synthbar] ignoring track click: {}", err);
            return;
        }
        self.sync_track();

        let shared = &self.shared;
        let Some(bounds) = shared.host.bounds(shared.track) else {
            log::warn!("[synthbar] track click before layout");
            return;
        };
        let offset = shared.orientation.pick(x, y) - shared.orientation.pick(bounds.x, bounds.y);
        let target = track_click_target(&self.axis(), offset);
        log::debug!(
            "[synthbar] {} track click at offset {} -> {}",
            shared.orientation,
            offset,
            target
        );
        if let Err(err) = self.scroll_to(target) {
            log::warn!("[synthbar] ignoring track click: {}", err);
        }
    }
}

/// Subscribable handle to a scrollbar's scroll-changed channel.
#[derive(Clone, Debug)]
pub struct ScrollSignal {
    store: Store<ScrollAxis, Channel>,
}

impl ScrollSignal {
    /// Call `callback` with each committed scroll value.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(f64) + Send + Sync + 'static,
    {
        self.store
            .subscribe(Channel::Scroll, move |axis: &ScrollAxis| {
                callback(axis.scroll_value())
            })
    }

    /// Like [`subscribe`](Self::subscribe), with the whole axis state.
    pub fn subscribe_axis<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&ScrollAxis) + Send + Sync + 'static,
    {
        self.store.subscribe(Channel::Scroll, callback)
    }

    /// Live subscriptions, including the scrollbar's own render step.
    pub fn subscriber_count(&self) -> usize {
        self.store.subscriber_count(Channel::Scroll)
    }
}

/// A [`Scrollbar`] fixed to [`Orientation::Horizontal`].
#[derive(Clone, Debug)]
pub struct HorizontalScrollbar<H: ScrollbarHost>(Scrollbar<H>);

impl<H: ScrollbarHost> HorizontalScrollbar<H> {
    pub fn new(host: H, container: H::Node, config: ScrollbarConfig) -> Result<Self> {
        Scrollbar::new(host, container, Orientation::Horizontal, config).map(Self)
    }

    pub fn into_inner(self) -> Scrollbar<H> {
        self.0
    }
}

impl<H: ScrollbarHost> Deref for HorizontalScrollbar<H> {
    type Target = Scrollbar<H>;

    fn deref(&self) -> &Scrollbar<H> {
        &self.0
    }
}

/// A [`Scrollbar`] fixed to [`Orientation::Vertical`].
#[derive(Clone, Debug)]
pub struct VerticalScrollbar<H: ScrollbarHost>(Scrollbar<H>);

impl<H: ScrollbarHost> VerticalScrollbar<H> {
    pub fn new(host: H, container: H::Node, config: ScrollbarConfig) -> Result<Self> {
        Scrollbar::new(host, container, Orientation::Vertical, config).map(Self)
    }

    pub fn into_inner(self) -> Scrollbar<H> {
        self.0
    }
}

impl<H: ScrollbarHost> Deref for VerticalScrollbar<H> {
    type Target = Scrollbar<H>;

    fn deref(&self) -> &Scrollbar<H> {
        &self.0
    }
}
