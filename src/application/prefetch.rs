//! Fire-and-forget cache warming against the RPC backend.

use std::sync::Arc;

use async_trait::async_trait;
use metrics::counter;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Query key of the "latest post" procedure, shared with the hydration payload.
pub const LATEST_POST_QUERY: &str = "post.getLatest";

#[derive(Debug, Error)]
pub enum PrefetchError {
    #[error("prefetch request failed: {0}")]
    Transport(String),
    #[error("prefetch endpoint responded with status {status}")]
    Status { status: u16 },
    #[error("prefetch timed out after {elapsed_ms} ms")]
    Timeout { elapsed_ms: u128 },
}

#[async_trait]
pub trait LatestPostPrefetcher: Send + Sync {
    async fn prefetch_latest_post(&self) -> Result<(), PrefetchError>;
}

/// Submits prefetches on detached tasks. Outcomes are logged and counted,
/// never returned to the caller.
#[derive(Clone)]
pub struct PrefetchDispatcher {
    prefetcher: Arc<dyn LatestPostPrefetcher>,
}

impl PrefetchDispatcher {
    pub fn new(prefetcher: Arc<dyn LatestPostPrefetcher>) -> Self {
        Self { prefetcher }
    }

    /// Must be called from within a tokio runtime. Dropping the handle detaches the task.
    pub fn dispatch_latest_post(&self) -> JoinHandle<()> {
        counter!("rentapp_prefetch_issued_total").increment(1);
        let prefetcher = self.prefetcher.clone();

        tokio::spawn(async move {
            match prefetcher.prefetch_latest_post().await {
                Ok(()) => debug!(
                    target = "rentapp::prefetch",
                    query = LATEST_POST_QUERY,
                    "prefetch completed"
                ),
                Err(err) => {
                    counter!("rentapp_prefetch_failed_total").increment(1);
                    warn!(
                        target = "rentapp::prefetch",
                        query = LATEST_POST_QUERY,
                        error = %err,
                        "prefetch failed"
                    );
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[derive(Default)]
    struct Counting {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl LatestPostPrefetcher for Counting {
        async fn prefetch_latest_post(&self) -> Result<(), PrefetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(PrefetchError::Status { status: 503 })
            } else {
                Ok(())
            }
        }
    }

    #[tokio::test]
    async fn dispatch_runs_prefetch_once() {
        let prefetcher = Arc::new(Counting::default());
        let dispatcher = PrefetchDispatcher::new(prefetcher.clone());

        dispatcher
            .dispatch_latest_post()
            .await
            .expect("task completes");

        assert_eq!(prefetcher.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_prefetch_does_not_panic_the_task() {
        let prefetcher = Arc::new(Counting {
            fail: true,
            ..Default::default()
        });
        let dispatcher = PrefetchDispatcher::new(prefetcher.clone());

        let outcome = dispatcher.dispatch_latest_post().await;

        assert!(outcome.is_ok());
        assert_eq!(prefetcher.calls.load(Ordering::SeqCst), 1);
    }
}
