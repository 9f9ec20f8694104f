use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::core::UpdateType;

/// Handle returned by [`Observable::subscribe`]; pass it back to
/// `unsubscribe` to remove the listener. Ids are monotonically increasing,
/// so iteration order is subscription order.
pub type ListenerId = u64;

type Listener<P> = Arc<dyn Fn(UpdateType, Option<&P>) + Send + Sync>;

/// Synchronous publish/subscribe primitive.
///
/// Listeners run on the notifying thread, in subscription order, and have
/// fully completed by the time `notify` returns. The bus does not catch
/// listener panics; propagation policy belongs to the subscriber.
pub struct Observable<P> {
    listeners: Mutex<Vec<(ListenerId, Listener<P>)>>,
    next_id: AtomicU64,
}

impl<P> Observable<P> {
    pub fn new() -> Self {
        Self {
            listeners: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(0),
        }
    }

    /// Register a listener for every future notification.
    pub fn subscribe(
        &self,
        listener: impl Fn(UpdateType, Option<&P>) + Send + Sync + 'static,
    ) -> ListenerId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.listeners
            .lock()
            .expect("observable mutex poisoned")
            .push((id, Arc::new(listener)));
        id
    }

    /// Remove a previously registered listener. Returns false if the id is
    /// unknown (already unsubscribed). Safe to call from inside a
    /// notification; the in-flight notify keeps iterating its own snapshot.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.lock().expect("observable mutex poisoned");
        let before = listeners.len();
        listeners.retain(|(listener_id, _)| *listener_id != id);
        listeners.len() != before
    }

    /// Invoke every listener with `(update_type, payload)`, in subscription
    /// order. Iterates a snapshot of the listener list so listeners may
    /// subscribe or unsubscribe without affecting the in-flight delivery.
    pub fn notify(&self, update_type: UpdateType, payload: Option<&P>) {
        let snapshot: Vec<Listener<P>> = self
            .listeners
            .lock()
            .expect("observable mutex poisoned")
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        if snapshot.is_empty() {
            tracing::debug!(?update_type, "notify with no listeners");
        }
        for listener in snapshot {
            listener(update_type, payload);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners
            .lock()
            .expect("observable mutex poisoned")
            .len()
    }
}

impl<P> Default for Observable<P> {
    fn default() -> Self {
        Self::new()
    }
}
