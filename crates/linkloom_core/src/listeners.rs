//! Change listeners
//!
//! A small registry of callbacks keyed by [`ListenerId`]. Used by the token
//! store and the bundle synchronizer to notify readers after a write.

use slotmap::{new_key_type, SlotMap};
use std::sync::{Arc, Mutex};

new_key_type! {
    /// Handle returned by [`Listeners::subscribe`]
    pub struct ListenerId;
}

/// Callback invoked with the new value after each change
pub type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Registry of change callbacks for values of type `T`
pub struct Listeners<T> {
    handlers: Mutex<SlotMap<ListenerId, Listener<T>>>,
}

impl<T> Listeners<T> {
    pub fn new() -> Self {
        Self {
            handlers: Mutex::new(SlotMap::with_key()),
        }
    }

    /// Register a callback
    pub fn subscribe<F>(&self, handler: F) -> ListenerId
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.handlers.lock().unwrap().insert(Arc::new(handler))
    }

    /// Remove a callback. Returns false if the id was already removed.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.handlers.lock().unwrap().remove(id).is_some()
    }

    /// Number of registered callbacks
    pub fn len(&self) -> usize {
        self.handlers.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Invoke every callback with `value`
    ///
    /// Callbacks are snapshotted before the call so a handler may subscribe or
    /// unsubscribe without deadlocking.
    pub fn notify(&self, value: &T) {
        let handlers: Vec<Listener<T>> = self.handlers.lock().unwrap().values().cloned().collect();
        for handler in handlers {
            handler(value);
        }
    }
}

impl<T> Default for Listeners<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_notify_reaches_all_subscribers() {
        let listeners = Listeners::<u32>::new();
        let total = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let total = total.clone();
            listeners.subscribe(move |v| {
                total.fetch_add(*v as usize, Ordering::SeqCst);
            });
        }

        listeners.notify(&2);
        assert_eq!(total.load(Ordering::SeqCst), 6);
    }

    #[test]
    fn test_unsubscribe() {
        let listeners = Listeners::<()>::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_clone = hits.clone();

        let id = listeners.subscribe(move |_| {
            hits_clone.fetch_add(1, Ordering::SeqCst);
        });
        assert!(listeners.unsubscribe(id));
        assert!(!listeners.unsubscribe(id));

        listeners.notify(&());
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert!(listeners.is_empty());
    }

    #[test]
    fn test_handler_may_unsubscribe_itself() {
        let listeners = Arc::new(Listeners::<()>::new());
        let slot: Arc<Mutex<Option<ListenerId>>> = Arc::new(Mutex::new(None));

        let registry = listeners.clone();
        let slot_clone = slot.clone();
        let id = listeners.subscribe(move |_| {
            if let Some(id) = slot_clone.lock().unwrap().take() {
                registry.unsubscribe(id);
            }
        });
        *slot.lock().unwrap() = Some(id);

        listeners.notify(&());
        assert_eq!(listeners.len(), 0);
    }
}
