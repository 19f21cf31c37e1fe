use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock, Weak};

use log::debug;

type Listener<T> = Arc<dyn Fn(Arc<T>) + Send + Sync>;
type Listeners<T> = Mutex<HashMap<u64, Listener<T>>>;

/// Holds the current snapshot of some options and tells subscribers when it is replaced.
///
/// Snapshots are immutable `Arc`s. [`OptionsMonitor::update`] swaps the whole
/// value under a short write lock, so readers see either the old or the new
/// snapshot and never a mix of both.
pub struct OptionsMonitor<T> {
    current: RwLock<Arc<T>>,
    listeners: Arc<Listeners<T>>,
    next_id: AtomicU64,
}

impl<T: Send + Sync + 'static> OptionsMonitor<T> {
    pub fn new(initial: T) -> Self {
        Self {
            current: RwLock::new(Arc::new(initial)),
            listeners: Arc::new(Mutex::new(HashMap::new())),
            next_id: AtomicU64::new(0),
        }
    }

    pub fn current_value(&self) -> Arc<T> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the snapshot and notify every subscriber with the new value.
    pub fn update(&self, value: T) {
        let snapshot = Arc::new(value);
        *self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner) = snapshot.clone();

        // Call listeners outside the lock; a listener may subscribe or dispose.
        let listeners: Vec<Listener<T>> = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect();

        debug!("Options changed, notifying {} listener(s)", listeners.len());
        for listener in listeners {
            listener(snapshot.clone());
        }
    }

    /// Register a change callback. It stays registered until the returned
    /// subscription is disposed or dropped.
    pub fn on_change<F>(&self, listener: F) -> ChangeSubscription
    where
        F: Fn(Arc<T>) + Send + Sync + 'static,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, Arc::new(listener));

        let listeners: Weak<Listeners<T>> = Arc::downgrade(&self.listeners);
        ChangeSubscription::new(move || {
            if let Some(listeners) = listeners.upgrade() {
                listeners
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .remove(&id);
            }
        })
    }

    pub fn listener_count(&self) -> usize {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl<T: fmt::Debug> fmt::Debug for OptionsMonitor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionsMonitor")
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

/// Handle for a change callback registration. Released once, on the first
/// [`ChangeSubscription::dispose`] or on drop.
pub struct ChangeSubscription {
    release: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl ChangeSubscription {
    pub fn new<F>(release: F) -> Self
    where
        F: FnOnce() + Send + Sync + 'static,
    {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Returns `true` only for the call that actually released the registration.
    pub fn dispose(&mut self) -> bool {
        match self.release.take() {
            Some(release) => {
                release();
                true
            }
            None => false,
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.release.is_none()
    }
}

impl Drop for ChangeSubscription {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl fmt::Debug for ChangeSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeSubscription")
            .field("disposed", &self.is_disposed())
            .finish()
    }
}
