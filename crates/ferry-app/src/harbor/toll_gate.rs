//! Toll gates

use std::time::Duration;

use tokio::sync::Mutex;

/// A gate one vehicle at a time passes through
#[derive(Debug, Default)]
pub struct TollGate {
    lock: Mutex<()>,
}

impl TollGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hold the gate for `service`, then release it.
    ///
    /// The guard is dropped on every exit path, including when the calling
    /// task is cancelled mid-service.
    pub async fn pass(&self, service: Duration) {
        let _guard = self.lock.lock().await;
        tokio::time::sleep(service).await;
    }
}

#[cfg(test)]
impl TollGate {
    fn is_busy(&self) -> bool {
        self.lock.try_lock().is_err()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_pass_is_exclusive() {
        let gate = Arc::new(TollGate::new());
        let start = Instant::now();

        let a = tokio::spawn({
            let gate = Arc::clone(&gate);
            async move { gate.pass(Duration::from_secs(1)).await }
        });
        let b = tokio::spawn({
            let gate = Arc::clone(&gate);
            async move { gate.pass(Duration::from_secs(1)).await }
        });
        a.await.unwrap();
        b.await.unwrap();

        // serialized: the second vehicle waits for the first
        assert!(start.elapsed() >= Duration::from_secs(2));
        assert!(!gate.is_busy());
    }

    #[tokio::test(start_paused = true)]
    async fn test_separate_gates_run_in_parallel() {
        let g0 = Arc::new(TollGate::new());
        let g1 = Arc::new(TollGate::new());
        let start = Instant::now();

        let a = tokio::spawn({
            let g0 = Arc::clone(&g0);
            async move { g0.pass(Duration::from_secs(1)).await }
        });
        let b = tokio::spawn({
            let g1 = Arc::clone(&g1);
            async move { g1.pass(Duration::from_secs(1)).await }
        });
        a.await.unwrap();
        b.await.unwrap();

        assert!(start.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_pass_releases_gate() {
        let gate = Arc::new(TollGate::new());
        let holder = tokio::spawn({
            let gate = Arc::clone(&gate);
            async move { gate.pass(Duration::from_secs(60)).await }
        });
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(gate.is_busy());

        holder.abort();
        let _ = holder.await;
        assert!(!gate.is_busy());
    }
}
