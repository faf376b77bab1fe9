use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

type ChangeListener = Box<dyn Fn(bool) + Send + Sync>;

/// Reference-counted "something is in progress" tracker.
///
/// Overlapping operations each acquire a scope; the coordinator reports busy
/// while at least one scope is open and notifies listeners only on the
/// idle→busy and busy→idle edges, never on intermediate acquires or releases.
pub struct BusyCoordinator {
    count: AtomicUsize,
    listeners: Mutex<Vec<ChangeListener>>,
}

impl BusyCoordinator {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            count: AtomicUsize::new(0),
            listeners: Mutex::new(Vec::new()),
        })
    }

    /// Register a listener invoked synchronously at each busy/idle transition.
    pub fn on_change(&self, listener: impl Fn(bool) + Send + Sync + 'static) {
        if let Ok(mut listeners) = self.listeners.lock() {
            listeners.push(Box::new(listener));
        }
    }

    /// True while at least one scope is open.
    pub fn is_active(&self) -> bool {
        self.count.load(Ordering::Acquire) > 0
    }

    /// Open a scope. The 0→1 transition fires the change listeners with `true`.
    pub fn acquire(self: &Arc<Self>) -> BusyScope {
        let previous = self.count.fetch_add(1, Ordering::AcqRel);
        if previous == 0 {
            self.notify(true);
        }
        BusyScope {
            coordinator: Arc::clone(self),
            released: AtomicBool::new(false),
        }
    }

    fn release_one(&self) {
        let mut current = self.count.load(Ordering::Acquire);
        loop {
            // The count must never go below zero, even if a release races a
            // stale observation.
            if current == 0 {
                return;
            }
            match self.count.compare_exchange_weak(
                current,
                current - 1,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => {
                    if current == 1 {
                        self.notify(false);
                    }
                    return;
                }
                Err(observed) => current = observed,
            }
        }
    }

    fn notify(&self, active: bool) {
        if let Ok(listeners) = self.listeners.lock() {
            for listener in listeners.iter() {
                listener(active);
            }
        }
    }
}

/// Scope handle returned by [`BusyCoordinator::acquire`].
///
/// Dropping the scope releases it; an explicit `release` after the first is a
/// guaranteed no-op.
pub struct BusyScope {
    coordinator: Arc<BusyCoordinator>,
    released: AtomicBool,
}

impl BusyScope {
    pub fn release(&self) {
        if !self.released.swap(true, Ordering::AcqRel) {
            self.coordinator.release_one();
        }
    }
}

impl Drop for BusyScope {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recording_coordinator() -> (Arc<BusyCoordinator>, Arc<Mutex<Vec<bool>>>) {
        let coordinator = BusyCoordinator::new();
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        coordinator.on_change(move |active| sink.lock().unwrap().push(active));
        (coordinator, events)
    }

    #[test]
    fn fires_only_on_transition_edges() {
        let (coordinator, events) = recording_coordinator();

        let first = coordinator.acquire();
        let second = coordinator.acquire();
        assert!(coordinator.is_active());

        first.release();
        assert!(coordinator.is_active());
        second.release();
        assert!(!coordinator.is_active());

        assert_eq!(*events.lock().unwrap(), vec![true, false]);
    }

    #[test]
    fn double_release_is_a_no_op() {
        let (coordinator, events) = recording_coordinator();

        let scope = coordinator.acquire();
        scope.release();
        scope.release();
        scope.release();

        assert!(!coordinator.is_active());
        assert_eq!(*events.lock().unwrap(), vec![true, false]);
    }

    #[test]
    fn drop_releases_the_scope() {
        let (coordinator, events) = recording_coordinator();

        {
            let _scope = coordinator.acquire();
            assert!(coordinator.is_active());
        }

        assert!(!coordinator.is_active());
        assert_eq!(*events.lock().unwrap(), vec![true, false]);
    }

    #[test]
    fn explicit_release_then_drop_fires_once() {
        let (coordinator, events) = recording_coordinator();

        let scope = coordinator.acquire();
        scope.release();
        drop(scope);

        assert!(!coordinator.is_active());
        assert_eq!(*events.lock().unwrap(), vec![true, false]);
    }

    #[test]
    fn concurrent_acquire_release_keeps_the_count_consistent() {
        let coordinator = BusyCoordinator::new();

        let mut handles = Vec::new();
        for _ in 0..8 {
            let coordinator = Arc::clone(&coordinator);
            handles.push(std::thread::spawn(move || {
                for _ in 0..1000 {
                    let scope = coordinator.acquire();
                    scope.release();
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        assert!(!coordinator.is_active());
    }
}
