//! Minimal reactive store with named notification channels.
//!
//! A [`Store`] owns a piece of state and a set of channels. Mutations go
//! through [`Store::update`], which commits the new state and then notifies
//! the subscribers of one channel with a snapshot of it. Subscribers are
//! snapshotted and the lock is released before any of them runs, so a
//! subscriber may mutate the store it is listening to.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::{Arc, Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};

type Callback<S> = Arc<dyn Fn(&S) + Send + Sync>;

struct Subscriber<S> {
    id: u64,
    callback: Callback<S>,
}

struct StoreInner<S, C> {
    state: S,
    channels: HashMap<C, Vec<Subscriber<S>>>,
    next_id: u64,
}

/// Shared state plus named publish/subscribe channels.
///
/// Cloning a `Store` yields another handle to the same state.
pub struct Store<S, C> {
    inner: Arc<RwLock<StoreInner<S, C>>>,
}

impl<S, C> Clone for Store<S, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: fmt::Debug, C: fmt::Debug> fmt::Debug for Store<S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self
            .inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f.debug_struct("Store")
            .field("state", &inner.state)
            .field("channels", &inner.channels.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<S, C> Store<S, C>
where
    S: Clone + Send + Sync + 'static,
    C: Copy + Eq + Hash + fmt::Debug + Send + Sync + 'static,
{
    /// Create a store holding `initial`, with the given channels registered.
    pub fn new(initial: S, channels: impl IntoIterator<Item = C>) -> Self {
        let channels = channels.into_iter().map(|c| (c, Vec::new())).collect();
        Self {
            inner: Arc::new(RwLock::new(StoreInner {
                state: initial,
                channels,
                next_id: 0,
            })),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreInner<S, C>> {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreInner<S, C>> {
        self.inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Get a clone of the current state.
    pub fn get(&self) -> S {
        self.read().state.clone()
    }

    /// Read the current state without cloning it.
    pub fn read_with<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.read().state)
    }

    /// Mutate the state, then notify `channel`.
    pub fn update<R>(&self, channel: C, f: impl FnOnce(&mut S) -> R) -> R {
        let (result, snapshot, subscribers) = {
            let mut inner = self.write();
            let result = f(&mut inner.state);
            let subscribers = Self::subscribers_of(&inner, channel);
            (result, inner.state.clone(), subscribers)
        };
        Self::deliver(&snapshot, &subscribers);
        result
    }

    /// Like [`update`](Self::update), but nothing is notified when `f` fails.
    ///
    /// `f` is responsible for leaving the state untouched on error.
    pub fn try_update<R, E>(
        &self,
        channel: C,
        f: impl FnOnce(&mut S) -> Result<R, E>,
    ) -> Result<R, E> {
        let (result, snapshot, subscribers) = {
            let mut inner = self.write();
            let result = f(&mut inner.state)?;
            let subscribers = Self::subscribers_of(&inner, channel);
            (result, inner.state.clone(), subscribers)
        };
        Self::deliver(&snapshot, &subscribers);
        Ok(result)
    }

    /// Notify `channel` with the current state without changing it.
    pub fn notify(&self, channel: C) {
        let (snapshot, subscribers) = {
            let inner = self.read();
            (inner.state.clone(), Self::subscribers_of(&inner, channel))
        };
        Self::deliver(&snapshot, &subscribers);
    }

    /// Register `callback` on `channel`. Channels not passed to
    /// [`new`](Self::new) are created on first subscription.
    pub fn subscribe<F>(&self, channel: C, callback: F) -> Subscription
    where
        F: Fn(&S) + Send + Sync + 'static,
    {
        let id = {
            let mut inner = self.write();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.channels.entry(channel).or_default().push(Subscriber {
                id,
                callback: Arc::new(callback),
            });
            id
        };

        let weak: Weak<RwLock<StoreInner<S, C>>> = Arc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                let mut inner = inner
                    .write()
                    .unwrap_or_else(|poisoned| poisoned.into_inner());
                if let Some(subs) = inner.channels.get_mut(&channel) {
                    subs.retain(|s| s.id != id);
                }
            }
        })
    }

    /// Number of live subscribers on `channel`.
    pub fn subscriber_count(&self, channel: C) -> usize {
        self.read().channels.get(&channel).map_or(0, Vec::len)
    }

    fn subscribers_of(inner: &StoreInner<S, C>, channel: C) -> Vec<Callback<S>> {
        match inner.channels.get(&channel) {
            Some(subs) => subs.iter().map(|s| Arc::clone(&s.callback)).collect(),
            None => {
                log::trace!("[store] notify on unregistered channel {:?}", channel);
                Vec::new()
            }
        }
    }

    fn deliver(snapshot: &S, subscribers: &[Callback<S>]) {
        for callback in subscribers {
            callback(snapshot);
        }
    }
}

/// Cleanup handle returned by [`Store::subscribe`].
///
/// Dropping the handle does not unsubscribe; call [`cleanup`](Self::cleanup).
pub struct Subscription {
    cleanup: Mutex<Option<Box<dyn FnOnce() + Send>>>,
}

impl Subscription {
    fn new(cleanup: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cleanup: Mutex::new(Some(Box::new(cleanup))),
        }
    }

    /// Remove exactly this subscription. Later calls do nothing.
    pub fn cleanup(&self) {
        let cleanup = self
            .cleanup
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
        if let Some(cleanup) = cleanup {
            cleanup();
        }
    }

    /// Whether [`cleanup`](Self::cleanup) has already run.
    pub fn is_cleaned_up(&self) -> bool {
        self.cleanup
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .is_none()
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &!self.is_cleaned_up())
            .finish()
    }
}
