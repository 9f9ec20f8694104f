//! Bounded busy-window throttle around user mutations.
//!
//! A mutation against a slow backend should neither flash the busy overlay
//! for a few milliseconds nor look hung without a trace. [`UiBlocker`] wraps
//! one user-triggered operation at a time: the overlay stays up for at least
//! the lower limit however fast the remote call resolves, and an operation
//! still pending past the upper limit is logged as slow but never truncated.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::time::{sleep, timeout, Instant};

/// Busy-state floor: the overlay is never shown shorter than this.
pub const LOWER_LIMIT: Duration = Duration::from_millis(350);
/// Slow-operation threshold: pending operations are logged past this.
pub const UPPER_LIMIT: Duration = Duration::from_millis(1000);

/// Busy-overlay collaborator toggled around each throttle window.
pub trait BlockOverlay: Send + Sync {
    fn block(&self);
    fn unblock(&self);
}

pub struct UiBlocker {
    lower_limit: Duration,
    upper_limit: Duration,
    overlay: Arc<dyn BlockOverlay>,
    window_open: AtomicBool,
}

impl UiBlocker {
    pub fn new(lower_limit: Duration, upper_limit: Duration, overlay: Arc<dyn BlockOverlay>) -> Self {
        Self {
            lower_limit,
            upper_limit,
            overlay,
            window_open: AtomicBool::new(false),
        }
    }

    /// Run `operation` inside one busy window.
    ///
    /// Only one window may be open at a time system-wide; overlap is
    /// expected to be prevented upstream by disabled controls and is logged
    /// if it happens anyway. The overlay is released on every path.
    pub async fn wrap<T>(&self, operation: impl Future<Output = T>) -> T {
        if self.window_open.swap(true, Ordering::SeqCst) {
            tracing::warn!("overlapping busy windows; controls should be disabled while one is open");
        }
        self.overlay.block();
        let started = Instant::now();

        tokio::pin!(operation);
        let output = match timeout(self.upper_limit, &mut operation).await {
            Ok(output) => output,
            Err(_) => {
                tracing::warn!(
                    upper_limit_ms = self.upper_limit.as_millis() as u64,
                    "mutation still pending past the upper limit"
                );
                operation.await
            }
        };

        let elapsed = started.elapsed();
        if elapsed < self.lower_limit {
            sleep(self.lower_limit - elapsed).await;
        }

        self.overlay.unblock();
        self.window_open.store(false, Ordering::SeqCst);
        output
    }
}
