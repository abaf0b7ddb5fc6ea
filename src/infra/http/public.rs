use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::{HeaderMap, StatusCode},
    middleware,
    response::Response,
    routing::get,
};
use tracing::debug;

use crate::{
    application::{
        chrome::ChromeService, home::HomePageService, listings::ListingService,
        session::SessionResolver,
    },
    domain::{listings::ListingId, search::SearchCriteria},
    presentation::views::{
        HomeTemplate, LayoutContext, ListingTemplate, render_not_found_response,
        render_template_response,
    },
};

use super::middleware::{log_responses, set_request_context};

#[derive(Clone)]
pub struct HttpState {
    pub home: Arc<HomePageService>,
    pub listings: Arc<ListingService>,
    pub chrome: Arc<ChromeService>,
    pub sessions: SessionResolver,
}

pub fn build_router(state: HttpState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/listings/{id}", get(listing_detail))
        .route("/_health", get(health))
        .fallback(fallback_router)
        .with_state(state)
        .layer(middleware::from_fn(log_responses))
        .layer(middleware::from_fn(set_request_context))
}

async fn index(
    State(state): State<HttpState>,
    headers: HeaderMap,
    criteria: Result<Query<SearchCriteria>, QueryRejection>,
) -> Response {
    let criteria = match criteria {
        Ok(Query(criteria)) => criteria,
        Err(rejection) => {
            debug!(
                target = "rentapp::http::public",
                error = %rejection,
                "ignoring unparsable search query"
            );
            SearchCriteria::default()
        }
    };

    if !criteria.is_empty() {
        debug!(
            target = "rentapp::http::public",
            min_price = criteria.min_price.as_deref().unwrap_or(""),
            max_price = criteria.max_price.as_deref().unwrap_or(""),
            rooms = criteria.rooms.as_deref().unwrap_or(""),
            "search criteria submitted; execution is handled elsewhere"
        );
    }

    let session = state.sessions.resolve(&headers).await;
    let document = state.home.render(session.as_ref());

    let view = LayoutContext::new(state.chrome.load(), document);
    render_template_response(HomeTemplate { view }, StatusCode::OK)
}

async fn listing_detail(State(state): State<HttpState>, Path(id): Path<String>) -> Response {
    let chrome = state.chrome.load();

    let Ok(id) = id.parse::<u32>() else {
        return render_not_found_response(chrome);
    };

    match state.listings.detail(ListingId::new(id)) {
        Some(detail) => {
            let chrome = chrome.with_title(detail.title.clone());
            let view = LayoutContext::new(chrome, detail);
            render_template_response(ListingTemplate { view }, StatusCode::OK)
        }
        None => render_not_found_response(chrome),
    }
}

async fn health() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn fallback_router(State(state): State<HttpState>) -> Response {
    render_not_found_response(state.chrome.load())
}
