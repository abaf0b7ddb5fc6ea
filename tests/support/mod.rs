#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use axum::{Router, body::Body};
use http_body_util::BodyExt;

use rentapp::application::chrome::ChromeService;
use rentapp::application::home::HomePageService;
use rentapp::application::listings::ListingService;
use rentapp::application::prefetch::{LatestPostPrefetcher, PrefetchDispatcher, PrefetchError};
use rentapp::application::session::{SessionProvider, SessionResolver};
use rentapp::config::SiteSettings;
use rentapp::domain::listings::ListingSet;
use rentapp::infra::auth::HeaderSessionProvider;
use rentapp::infra::http::{HttpState, build_router};

/// Counts prefetch calls; optionally fails every one of them.
#[derive(Default)]
pub struct RecordingPrefetcher {
    calls: AtomicUsize,
    fail: bool,
}

impl RecordingPrefetcher {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    /// Lets detached prefetch tasks run before reading the counter.
    pub async fn settled_calls(&self) -> usize {
        tokio::time::sleep(Duration::from_millis(20)).await;
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LatestPostPrefetcher for RecordingPrefetcher {
    async fn prefetch_latest_post(&self) -> Result<(), PrefetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err(PrefetchError::Status { status: 503 })
        } else {
            Ok(())
        }
    }
}

pub fn site() -> SiteSettings {
    SiteSettings {
        title: "RentApp".to_string(),
        description: "Mieszkania na wynajem".to_string(),
    }
}

pub fn router_with(
    sessions: Arc<dyn SessionProvider>,
    prefetcher: Arc<RecordingPrefetcher>,
) -> Router {
    let listings = Arc::new(ListingSet::featured().expect("featured listings"));
    let home = HomePageService::new(listings.clone(), PrefetchDispatcher::new(prefetcher));

    build_router(HttpState {
        home: Arc::new(home),
        listings: Arc::new(ListingService::new(listings)),
        chrome: Arc::new(ChromeService::new(&site())),
        sessions: SessionResolver::new(sessions),
    })
}

pub fn router(prefetcher: Arc<RecordingPrefetcher>) -> Router {
    router_with(Arc::new(HeaderSessionProvider::new()), prefetcher)
}

pub async fn body_to_string(body: Body) -> String {
    let bytes = body.collect().await.expect("collect body").to_bytes();
    String::from_utf8(bytes.to_vec()).expect("utf8 body")
}
