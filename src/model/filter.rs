use std::sync::Mutex;

use crate::bus::{ListenerId, Observable};
use crate::core::{EventPoint, FilterKind, UpdateType};

/// Observable holder of the single active filter selector.
pub struct FilterModel {
    filter: Mutex<FilterKind>,
    observable: Observable<EventPoint>,
}

impl FilterModel {
    pub fn new() -> Self {
        Self {
            filter: Mutex::new(FilterKind::default()),
            observable: Observable::new(),
        }
    }

    pub fn filter(&self) -> FilterKind {
        *self.filter.lock().expect("filter mutex poisoned")
    }

    /// Overwrite the selector and notify with no payload. No validation
    /// beyond selector membership, which the type already enforces.
    pub fn set_filter(&self, update_type: UpdateType, kind: FilterKind) {
        *self.filter.lock().expect("filter mutex poisoned") = kind;
        self.observable.notify(update_type, None);
    }

    pub fn subscribe(
        &self,
        listener: impl Fn(UpdateType, Option<&EventPoint>) + Send + Sync + 'static,
    ) -> ListenerId {
        self.observable.subscribe(listener)
    }

    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.observable.unsubscribe(id)
    }
}

impl Default for FilterModel {
    fn default() -> Self {
        Self::new()
    }
}
