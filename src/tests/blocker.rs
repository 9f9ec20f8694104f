use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

use crate::blocker::{UiBlocker, LOWER_LIMIT, UPPER_LIMIT};
use crate::testing::StubOverlay;

fn blocker(overlay: &Arc<StubOverlay>) -> UiBlocker {
    UiBlocker::new(LOWER_LIMIT, UPPER_LIMIT, overlay.clone())
}

#[tokio::test(start_paused = true)]
async fn fast_operation_still_shows_busy_for_the_floor() {
    let overlay = Arc::new(StubOverlay::default());
    let blocker = blocker(&overlay);

    let started = Instant::now();
    let output = blocker.wrap(async { 7 }).await;

    assert_eq!(output, 7);
    assert!(started.elapsed() >= LOWER_LIMIT);
    assert_eq!(overlay.blocks.load(Ordering::SeqCst), 1);
    assert_eq!(overlay.unblocks.load(Ordering::SeqCst), 1);
    assert!(!overlay.active.load(Ordering::SeqCst));
}

#[tokio::test(start_paused = true)]
async fn slow_operation_is_never_truncated() {
    let overlay = Arc::new(StubOverlay::default());
    let blocker = blocker(&overlay);
    let slow = UPPER_LIMIT + Duration::from_millis(500);

    let started = Instant::now();
    let output = blocker
        .wrap(async {
            tokio::time::sleep(slow).await;
            "done"
        })
        .await;

    assert_eq!(output, "done");
    assert!(started.elapsed() >= slow);
    assert_eq!(overlay.unblocks.load(Ordering::SeqCst), 1);
    assert!(!overlay.active.load(Ordering::SeqCst));
}

#[tokio::test(start_paused = true)]
async fn operation_longer_than_the_floor_adds_no_extra_wait() {
    let overlay = Arc::new(StubOverlay::default());
    let blocker = blocker(&overlay);
    let work = LOWER_LIMIT + Duration::from_millis(100);

    let started = Instant::now();
    blocker
        .wrap(async {
            tokio::time::sleep(work).await;
        })
        .await;

    let elapsed = started.elapsed();
    assert!(elapsed >= work);
    assert!(elapsed < work + Duration::from_millis(50));
}

#[tokio::test(start_paused = true)]
async fn overlay_is_active_while_the_operation_runs() {
    let overlay = Arc::new(StubOverlay::default());
    let blocker = blocker(&overlay);

    let probe = overlay.clone();
    blocker
        .wrap(async move {
            assert!(probe.active.load(Ordering::SeqCst));
        })
        .await;

    assert!(!overlay.active.load(Ordering::SeqCst));
}

#[tokio::test(start_paused = true)]
async fn sequential_windows_reuse_the_blocker() {
    let overlay = Arc::new(StubOverlay::default());
    let blocker = blocker(&overlay);

    blocker.wrap(async {}).await;
    blocker.wrap(async {}).await;

    assert_eq!(overlay.blocks.load(Ordering::SeqCst), 2);
    assert_eq!(overlay.unblocks.load(Ordering::SeqCst), 2);
}
