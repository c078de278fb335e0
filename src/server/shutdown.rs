// Shutdown module
// Waits for in-flight connections to finish once the listener is closed

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

const DRAIN_POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Wait until the active connection count reaches zero or `grace` elapses.
///
/// Returns the number of connections still open when it gave up. Those are
/// dropped together with the runtime.
pub async fn drain_connections(active: &AtomicUsize, grace: Duration) -> usize {
    let deadline = tokio::time::Instant::now() + grace;

    loop {
        let remaining = active.load(Ordering::SeqCst);
        if remaining == 0 {
            return 0;
        }

        tokio::select! {
            () = tokio::time::sleep(DRAIN_POLL_INTERVAL) => {}
            () = tokio::time::sleep_until(deadline) => {
                return active.load(Ordering::SeqCst);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_drain_returns_immediately_when_idle() {
        let active = AtomicUsize::new(0);
        assert_eq!(drain_connections(&active, Duration::from_secs(5)).await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drain_gives_up_after_grace() {
        let active = AtomicUsize::new(2);
        let remaining = drain_connections(&active, Duration::from_millis(100)).await;
        assert_eq!(remaining, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drain_waits_for_connections() {
        let active = Arc::new(AtomicUsize::new(1));
        let closer = Arc::clone(&active);
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            closer.store(0, Ordering::SeqCst);
        });

        let remaining = drain_connections(&active, Duration::from_secs(10)).await;
        assert_eq!(remaining, 0);
    }
}
