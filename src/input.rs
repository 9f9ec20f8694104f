//! Scoped escape-key binding.
//!
//! An edit form listens for escape only while it is open. Rather than an
//! ambient document-level listener, a presenter acquires an [`EscapeGuard`]
//! on entering edit mode; every exit path (cancel, collapse, forced close,
//! presenter teardown) releases it, and the guard's `Drop` backstops any
//! path that forgets.

use std::sync::Arc;

pub type BindingId = u64;

pub type EscapeHandler = Arc<dyn Fn() + Send + Sync>;

/// Key-input collaborator. `bind_escape` registers a handler invoked on
/// every escape press until `unbind` is called with the returned id.
pub trait Keyboard: Send + Sync {
    fn bind_escape(&self, handler: EscapeHandler) -> BindingId;
    fn unbind(&self, id: BindingId);
}

/// RAII handle over one escape binding.
pub struct EscapeGuard {
    keyboard: Arc<dyn Keyboard>,
    binding: Option<BindingId>,
}

impl EscapeGuard {
    pub fn bind(keyboard: Arc<dyn Keyboard>, handler: EscapeHandler) -> Self {
        let binding = keyboard.bind_escape(handler);
        Self {
            keyboard,
            binding: Some(binding),
        }
    }

    /// Revoke the binding now instead of at drop time.
    pub fn release(mut self) {
        self.unbind();
    }

    fn unbind(&mut self) {
        if let Some(id) = self.binding.take() {
            self.keyboard.unbind(id);
        }
    }
}

impl Drop for EscapeGuard {
    fn drop(&mut self) {
        self.unbind();
    }
}
