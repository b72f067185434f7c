//! Publish/subscribe registry for "rectangle finished" notifications.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use funkybrot_core::{PixelRect, ValueBuffer};

/// Callback invoked with a completed (sub-)rectangle and the buffer it was
/// written into. Callbacks run on worker threads and should return quickly.
pub type CalculationListener = dyn Fn(PixelRect, &Arc<ValueBuffer>) + Send + Sync;

/// Handle identifying a registered listener, returned by
/// [`ListenerRegistry::add`] and used to remove it again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Thread-safe listener collection behind one coarse lock.
///
/// Notification snapshots the registered callbacks under the lock and invokes
/// them after releasing it, so a callback may re-enter the registry (or the
/// engine) without deadlocking. A panicking callback is caught and logged;
/// it never aborts delivery to the remaining listeners.
#[derive(Default)]
pub struct ListenerRegistry {
    next_id: AtomicU64,
    entries: Mutex<Vec<(ListenerId, Arc<CalculationListener>)>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, listener: Arc<CalculationListener>) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.entries
            .lock()
            .expect("listener registry poisoned")
            .push((id, listener));
        id
    }

    /// Remove a listener by identity. Returns false when the id was never
    /// registered or already removed.
    pub fn remove(&self, id: ListenerId) -> bool {
        let mut entries = self.entries.lock().expect("listener registry poisoned");
        let before = entries.len();
        entries.retain(|(entry_id, _)| *entry_id != id);
        entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.entries.lock().expect("listener registry poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Notify every registered listener that `area` of `buffer` is ready.
    pub fn notify(&self, area: PixelRect, buffer: &Arc<ValueBuffer>) {
        let snapshot: Vec<Arc<CalculationListener>> = {
            let entries = self.entries.lock().expect("listener registry poisoned");
            entries.iter().map(|(_, listener)| listener.clone()).collect()
        };

        for listener in snapshot {
            if catch_unwind(AssertUnwindSafe(|| listener(area, buffer))).is_err() {
                log::warn!(
                    "calculation listener panicked while handling {}x{} area at ({}, {})",
                    area.width,
                    area.height,
                    area.x,
                    area.y
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn test_buffer() -> Arc<ValueBuffer> {
        Arc::new(ValueBuffer::new(4, 4))
    }

    #[test]
    fn notify_reaches_all_registered_listeners() {
        let registry = ListenerRegistry::new();
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));

        let count = first.clone();
        registry.add(Arc::new(move |_, _: &Arc<ValueBuffer>| {
            count.fetch_add(1, Ordering::SeqCst);
        }));
        let count = second.clone();
        registry.add(Arc::new(move |_, _: &Arc<ValueBuffer>| {
            count.fetch_add(1, Ordering::SeqCst);
        }));

        registry.notify(PixelRect::new(0, 0, 4, 4), &test_buffer());

        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn listener_receives_the_reported_area() {
        let registry = ListenerRegistry::new();
        let seen = Arc::new(Mutex::new(None));

        let slot = seen.clone();
        registry.add(Arc::new(move |area, _: &Arc<ValueBuffer>| {
            *slot.lock().unwrap() = Some(area);
        }));

        let area = PixelRect::new(2, 0, 3, 4);
        registry.notify(area, &test_buffer());

        assert_eq!(*seen.lock().unwrap(), Some(area));
    }

    #[test]
    fn removed_listener_is_no_longer_notified() {
        let registry = ListenerRegistry::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let count = calls.clone();
        let id = registry.add(Arc::new(move |_, _: &Arc<ValueBuffer>| {
            count.fetch_add(1, Ordering::SeqCst);
        }));

        registry.notify(PixelRect::new(0, 0, 1, 1), &test_buffer());
        assert!(registry.remove(id));
        registry.notify(PixelRect::new(0, 0, 1, 1), &test_buffer());

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(registry.is_empty());
    }

    #[test]
    fn remove_of_unknown_id_returns_false() {
        let registry = ListenerRegistry::new();
        let id = registry.add(Arc::new(|_, _: &Arc<ValueBuffer>| {}));
        assert!(registry.remove(id));
        assert!(!registry.remove(id));
    }

    #[test]
    fn panicking_listener_does_not_block_the_others() {
        let registry = ListenerRegistry::new();
        let calls = Arc::new(AtomicUsize::new(0));

        registry.add(Arc::new(|_, _: &Arc<ValueBuffer>| {
            panic!("listener failure");
        }));
        let count = calls.clone();
        registry.add(Arc::new(move |_, _: &Arc<ValueBuffer>| {
            count.fetch_add(1, Ordering::SeqCst);
        }));

        registry.notify(PixelRect::new(0, 0, 1, 1), &test_buffer());

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn listener_may_register_another_listener_during_notify() {
        // The snapshot-then-invoke discipline means re-entrant mutation must
        // not deadlock.
        let registry = Arc::new(ListenerRegistry::new());

        let reentrant = registry.clone();
        registry.add(Arc::new(move |_, _: &Arc<ValueBuffer>| {
            reentrant.add(Arc::new(|_, _: &Arc<ValueBuffer>| {}));
        }));

        registry.notify(PixelRect::new(0, 0, 1, 1), &test_buffer());

        assert_eq!(registry.len(), 2);
    }
}
