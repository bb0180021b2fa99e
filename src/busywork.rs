//! Busy-work demo
//!
//! Blocks the calling thread for a given time and reports how long it
//! actually took, logging the process id on the way in and out.
//! Unrelated to the brewery counter.

use std::time::{Duration, Instant};
use tracing::info;

/// Block the current thread for `duration` and return the measured elapsed time
///
/// This blocks; from async code call it through `tokio::task::spawn_blocking`.
pub fn do_busy_work(duration: Duration) -> Duration {
    let pid = std::process::id();
    info!(pid, requested_ms = duration.as_millis(), "Busy work starting");

    let start = Instant::now();
    std::thread::sleep(duration);
    let elapsed = start.elapsed();

    info!(pid, elapsed_secs = %format!("{:.2}", elapsed.as_secs_f64()), "Busy work done");
    elapsed
}

/// `do_busy_work` for a whole number of seconds
pub fn do_busy_work_secs(seconds: u64) -> Duration {
    do_busy_work(Duration::from_secs(seconds))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_covers_requested() {
        let requested = Duration::from_millis(150);
        let elapsed = do_busy_work(requested);
        assert!(elapsed >= requested);
        assert!(elapsed < requested + Duration::from_secs(1));
    }

    #[test]
    fn test_zero_seconds() {
        let elapsed = do_busy_work_secs(0);
        assert!(elapsed < Duration::from_millis(500));
    }

    #[tokio::test]
    async fn test_from_blocking_task() {
        let elapsed = tokio::task::spawn_blocking(|| do_busy_work(Duration::from_millis(50)))
            .await
            .unwrap();
        assert!(elapsed >= Duration::from_millis(50));
    }
}
