//! Reactive store primitive shared by all domain stores.
//!
//! A [`Store`] holds one value, bumps a version counter on every commit and
//! notifies subscribers synchronously after the new value is in place.
//! Persistence is wired up as a subscriber, not an inline call, so stores
//! stay testable without a storage backend. [`Memo`] caches a derived view
//! until the versions it was computed from change.

use std::cell::RefCell;

type Subscriber<T> = Box<dyn Fn(&T)>;

/// An owned, observable unit of state.
///
/// Mutations take `&mut self` and run synchronously; there is no
/// interleaving within a single commit. Subscribers fire after the value
/// has been replaced, in registration order.
pub struct Store<T> {
    value: T,
    version: u64,
    subscribers: Vec<Subscriber<T>>,
}

impl<T> Store<T> {
    /// Creates a store with an initial value. No subscribers are notified;
    /// a value just loaded from storage is not written straight back.
    pub fn new(value: T) -> Self {
        Self {
            value,
            version: 0,
            subscribers: Vec::new(),
        }
    }

    /// Read-only snapshot of the current value.
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Monotonic commit counter, used as a cache key for derived views.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Replaces the value and notifies subscribers.
    pub fn set(&mut self, value: T) {
        self.value = value;
        self.commit();
    }

    /// Mutates the value in place and notifies subscribers.
    pub fn update(&mut self, f: impl FnOnce(&mut T)) {
        f(&mut self.value);
        self.commit();
    }

    /// Registers an on-commit hook. Fires on every subsequent `set`/`update`.
    pub fn subscribe(&mut self, f: impl Fn(&T) + 'static) {
        self.subscribers.push(Box::new(f));
    }

    fn commit(&mut self) {
        self.version += 1;
        for subscriber in &self.subscribers {
            subscriber(&self.value);
        }
    }
}

/// Single-slot cache for a derived view.
///
/// The key is whatever identifies the view's inputs — typically one store
/// version, or a tuple of versions for multi-store views. The view is
/// recomputed only when the key differs from the cached one.
pub struct Memo<K, V> {
    slot: RefCell<Option<(K, V)>>,
}

impl<K: PartialEq, V: Clone> Memo<K, V> {
    pub fn new() -> Self {
        Self {
            slot: RefCell::new(None),
        }
    }

    /// Returns the cached value if `key` matches, otherwise recomputes,
    /// caches and returns it.
    pub fn get_or(&self, key: K, compute: impl FnOnce() -> V) -> V {
        let mut slot = self.slot.borrow_mut();
        match &*slot {
            Some((cached_key, value)) if *cached_key == key => value.clone(),
            _ => {
                let value = compute();
                *slot = Some((key, value.clone()));
                value
            }
        }
    }
}

impl<K: PartialEq, V: Clone> Default for Memo<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
