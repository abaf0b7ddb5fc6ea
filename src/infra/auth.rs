//! Adapters for the authentication provider's session lookup.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::http::{HeaderMap, header::COOKIE};
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::{info, warn};

use crate::application::session::{SessionLookupError, SessionProvider};
use crate::config::AuthSettings;
use crate::domain::session::Session;

use super::error::InfraError;

pub const USER_ID_HEADER: &str = "x-auth-user-id";
pub const USER_NAME_HEADER: &str = "x-auth-user-name";

/// Picks the session source for `settings`.
///
/// The session endpoint wins when configured. Proxy headers are only read
/// when explicitly trusted; otherwise every request is signed out.
pub fn session_provider(settings: &AuthSettings) -> Result<Arc<dyn SessionProvider>, InfraError> {
    if let Some(url) = &settings.session_url {
        info!(
            target = "rentapp::auth",
            session_url = %url,
            "resolving sessions through the remote session endpoint"
        );
        return Ok(Arc::new(RemoteSessionProvider::new(
            url.clone(),
            settings.timeout,
        )?));
    }

    if settings.trust_proxy_headers {
        warn!(
            target = "rentapp::auth",
            header = USER_ID_HEADER,
            "trusting identity headers; the service must only be reachable through the authenticating proxy"
        );
        return Ok(Arc::new(HeaderSessionProvider::new()));
    }

    warn!(
        target = "rentapp::auth",
        "neither auth.session_url nor auth.trust_proxy_headers is set; every visitor is signed out"
    );
    Ok(Arc::new(SignedOutSessionProvider))
}

/// Used when no session source is configured.
#[derive(Debug, Clone, Default)]
pub struct SignedOutSessionProvider;

#[async_trait]
impl SessionProvider for SignedOutSessionProvider {
    async fn lookup(&self, _headers: &HeaderMap) -> Result<Option<Session>, SessionLookupError> {
        Ok(None)
    }
}

/// Reads the identity injected by a trusted authenticating proxy.
///
/// A missing or blank `x-auth-user-id` means the request is signed out.
#[derive(Debug, Clone, Default)]
pub struct HeaderSessionProvider;

impl HeaderSessionProvider {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SessionProvider for HeaderSessionProvider {
    async fn lookup(&self, headers: &HeaderMap) -> Result<Option<Session>, SessionLookupError> {
        let Some(id) = header_text(headers, USER_ID_HEADER)? else {
            return Ok(None);
        };
        let name = header_text(headers, USER_NAME_HEADER)?;

        Ok(Some(Session::new(id, name)))
    }
}

fn header_text(
    headers: &HeaderMap,
    name: &'static str,
) -> Result<Option<String>, SessionLookupError> {
    let Some(value) = headers.get(name) else {
        return Ok(None);
    };

    // Display names may be UTF-8; `to_str` only accepts visible ASCII.
    let text = std::str::from_utf8(value.as_bytes()).map_err(|err| SessionLookupError::Header {
        header: name,
        reason: err.to_string(),
    })?;
    let trimmed = text.trim();

    Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
}

/// Asks the provider's session endpoint (`GET /api/auth/session` shape) on
/// behalf of the caller by forwarding its cookies.
#[derive(Debug, Clone)]
pub struct RemoteSessionProvider {
    client: Client,
    endpoint: Url,
}

impl RemoteSessionProvider {
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, InfraError> {
        let client = Client::builder()
            .user_agent(user_agent())
            .timeout(timeout)
            .build()
            .map_err(|err| InfraError::http_client(err.to_string()))?;

        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl SessionProvider for RemoteSessionProvider {
    async fn lookup(&self, headers: &HeaderMap) -> Result<Option<Session>, SessionLookupError> {
        let Some(cookie) = headers.get(COOKIE) else {
            return Ok(None);
        };

        let response = self
            .client
            .get(self.endpoint.clone())
            .header(COOKIE, cookie.clone())
            .send()
            .await
            .map_err(|err| SessionLookupError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SessionLookupError::Status {
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| SessionLookupError::Transport(err.to_string()))?;

        parse_session_payload(&body)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RemoteSessionPayload {
    user: Option<RemoteUser>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RemoteUser {
    id: Option<String>,
    name: Option<String>,
    email: Option<String>,
}

/// `{}` and `null` are the provider's "no session" answers.
pub fn parse_session_payload(body: &[u8]) -> Result<Option<Session>, SessionLookupError> {
    let payload: Option<RemoteSessionPayload> = serde_json::from_slice(body)
        .map_err(|err| SessionLookupError::Payload(err.to_string()))?;

    let Some(user) = payload.and_then(|payload| payload.user) else {
        return Ok(None);
    };

    let identity = user
        .id
        .or(user.email)
        .or_else(|| user.name.clone())
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| {
            SessionLookupError::Payload("session user carries no identity".to_string())
        })?;

    Ok(Some(Session::new(identity, user.name)))
}

fn user_agent() -> &'static str {
    concat!("rentapp/", env!("CARGO_PKG_VERSION"))
}
