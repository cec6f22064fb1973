//! Process-wide shutdown notification.
//!
//! Sessions subscribe the first time they launch and unsubscribe when torn
//! down. The host calls [`ShutdownRegistry::notify_shutdown`] once when the
//! application is exiting.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

use tracing::debug;

type Listener = Arc<dyn Fn() + Send + Sync>;

/// Token returned by [`ShutdownRegistry::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Listeners to run when the application exits.
pub struct ShutdownRegistry {
    next_id: AtomicU64,
    listeners: Mutex<Vec<(SubscriptionId, Listener)>>,
}

impl ShutdownRegistry {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// The registry shared by every session in this process.
    pub fn global() -> Arc<ShutdownRegistry> {
        static GLOBAL: OnceLock<Arc<ShutdownRegistry>> = OnceLock::new();
        Arc::clone(GLOBAL.get_or_init(|| Arc::new(ShutdownRegistry::new())))
    }

    pub fn subscribe(&self, listener: impl Fn() + Send + Sync + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners().push((id, Arc::new(listener)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    /// Run every listener in subscription order, returning how many ran.
    ///
    /// Listeners run without the registry lock held, so they may
    /// unsubscribe themselves.
    pub fn notify_shutdown(&self) -> usize {
        let snapshot: Vec<Listener> = self
            .listeners()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        debug!(listeners = snapshot.len(), "notifying shutdown listeners");
        for listener in &snapshot {
            listener();
        }
        snapshot.len()
    }

    pub fn len(&self) -> usize {
        self.listeners().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn listeners(&self) -> MutexGuard<'_, Vec<(SubscriptionId, Listener)>> {
        self.listeners.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for ShutdownRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn notify_runs_every_listener() {
        let registry = ShutdownRegistry::new();
        let hits = Arc::new(AtomicUsize::new(0));
        for _ in 0..3 {
            let hits = Arc::clone(&hits);
            registry.subscribe(move || {
                hits.fetch_add(1, Ordering::SeqCst);
            });
        }

        assert_eq!(registry.notify_shutdown(), 3);
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn unsubscribed_listener_is_skipped() {
        let registry = ShutdownRegistry::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let id = registry.subscribe(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert!(registry.unsubscribe(id));
        assert!(!registry.unsubscribe(id));
        assert_eq!(registry.notify_shutdown(), 0);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert!(registry.is_empty());
    }

    #[test]
    fn listener_may_unsubscribe_itself() {
        let registry = Arc::new(ShutdownRegistry::new());
        let slot: Arc<Mutex<Option<SubscriptionId>>> = Arc::new(Mutex::new(None));

        let inner_registry = Arc::clone(&registry);
        let inner_slot = Arc::clone(&slot);
        let id = registry.subscribe(move || {
            if let Some(id) = inner_slot.lock().unwrap().take() {
                inner_registry.unsubscribe(id);
            }
        });
        *slot.lock().unwrap() = Some(id);

        assert_eq!(registry.notify_shutdown(), 1);
        assert!(registry.is_empty());
    }

    #[test]
    fn ids_are_unique() {
        let registry = ShutdownRegistry::new();
        let a = registry.subscribe(|| {});
        let b = registry.subscribe(|| {});
        assert_ne!(a, b);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn global_is_shared() {
        assert!(Arc::ptr_eq(&ShutdownRegistry::global(), &ShutdownRegistry::global()));
    }
}
