//! Session lookup contract of the authentication provider.

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::HeaderMap;
use metrics::counter;
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::session::Session;

#[derive(Debug, Error)]
pub enum SessionLookupError {
    #[error("session endpoint unreachable: {0}")]
    Transport(String),
    #[error("session endpoint responded with status {status}")]
    Status { status: u16 },
    #[error("malformed session payload: {0}")]
    Payload(String),
    #[error("invalid session header `{header}`: {reason}")]
    Header {
        header: &'static str,
        reason: String,
    },
}

/// Resolves the authenticated session for one incoming request.
///
/// `Ok(None)` is the normal signed-out case. Errors are reserved for a
/// provider that could not answer at all.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn lookup(&self, headers: &HeaderMap) -> Result<Option<Session>, SessionLookupError>;
}

/// Wraps a provider so that lookup failures degrade to "no session".
#[derive(Clone)]
pub struct SessionResolver {
    provider: Arc<dyn SessionProvider>,
}

impl SessionResolver {
    pub fn new(provider: Arc<dyn SessionProvider>) -> Self {
        Self { provider }
    }

    pub async fn resolve(&self, headers: &HeaderMap) -> Option<Session> {
        match self.provider.lookup(headers).await {
            Ok(session) => {
                debug!(
                    target = "rentapp::session",
                    authenticated = session.is_some(),
                    "session resolved"
                );
                session
            }
            Err(err) => {
                counter!("rentapp_session_lookup_failed_total").increment(1);
                warn!(
                    target = "rentapp::session",
                    error = %err,
                    "session lookup failed; rendering as signed out"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Result<Option<Session>, &'static str>);

    #[async_trait]
    impl SessionProvider for Fixed {
        async fn lookup(
            &self,
            _headers: &HeaderMap,
        ) -> Result<Option<Session>, SessionLookupError> {
            self.0
                .clone()
                .map_err(|reason| SessionLookupError::Transport(reason.to_string()))
        }
    }

    #[tokio::test]
    async fn resolver_passes_sessions_through() {
        let session = Session::new("u1", Some("Anna".to_string()));
        let resolver = SessionResolver::new(Arc::new(Fixed(Ok(Some(session.clone())))));
        assert_eq!(resolver.resolve(&HeaderMap::new()).await, Some(session));
    }

    #[tokio::test]
    async fn resolver_treats_failures_as_signed_out() {
        let resolver = SessionResolver::new(Arc::new(Fixed(Err("connection refused"))));
        assert_eq!(resolver.resolve(&HeaderMap::new()).await, None);
    }
}
