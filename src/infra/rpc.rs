//! Adapters for the RPC backend's "latest post" prefetch.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::debug;

use crate::application::prefetch::{LATEST_POST_QUERY, LatestPostPrefetcher, PrefetchError};

use super::error::InfraError;

const RPC_PATH_PREFIX: &str = "api/trpc/";

/// Issues `GET {base}/api/trpc/post.getLatest` and discards the body; the
/// backend's own cache is what gets warmed.
#[derive(Debug, Clone)]
pub struct HttpRpcPrefetcher {
    client: Client,
    endpoint: Url,
}

impl HttpRpcPrefetcher {
    pub fn new(base_url: &Url, timeout: Duration) -> Result<Self, InfraError> {
        let endpoint = procedure_url(base_url, LATEST_POST_QUERY)?;
        let client = Client::builder()
            .user_agent(concat!("rentapp/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|err| InfraError::http_client(err.to_string()))?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl LatestPostPrefetcher for HttpRpcPrefetcher {
    async fn prefetch_latest_post(&self) -> Result<(), PrefetchError> {
        let started = Instant::now();
        let response = self
            .client
            .get(self.endpoint.clone())
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    PrefetchError::Timeout {
                        elapsed_ms: started.elapsed().as_millis(),
                    }
                } else {
                    PrefetchError::Transport(err.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(PrefetchError::Status {
                status: status.as_u16(),
            });
        }

        debug!(
            target = "rentapp::rpc",
            endpoint = %self.endpoint,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "latest post prefetched"
        );
        Ok(())
    }
}

/// Stands in when no RPC backend is configured.
#[derive(Debug, Clone, Default)]
pub struct NoopPrefetcher;

#[async_trait]
impl LatestPostPrefetcher for NoopPrefetcher {
    async fn prefetch_latest_post(&self) -> Result<(), PrefetchError> {
        debug!(
            target = "rentapp::rpc",
            query = LATEST_POST_QUERY,
            "rpc backend not configured; skipping prefetch"
        );
        Ok(())
    }
}

fn procedure_url(base_url: &Url, procedure: &str) -> Result<Url, InfraError> {
    let mut base = base_url.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }

    base.join(&format!("{RPC_PATH_PREFIX}{procedure}"))
        .map_err(|err| InfraError::configuration(format!("invalid rpc url: {err}")))
}
