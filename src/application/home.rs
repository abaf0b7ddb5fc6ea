//! Landing page assembly.
//!
//! The document depends only on the session handed in by the caller and the
//! static listing set. A present session additionally schedules a detached
//! "latest post" prefetch; its outcome never reaches the document.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::application::prefetch::{LATEST_POST_QUERY, PrefetchDispatcher};
use crate::domain::listings::ListingSet;
use crate::domain::search::{MAX_PRICE_FIELD, MIN_PRICE_FIELD, ROOM_OPTIONS, ROOMS_FIELD};
use crate::domain::session::Session;
use crate::presentation::views::{
    AccountControlView, ActionLinkView, AuthControlsView, HeaderView, HomeDocument, HydrationView,
    ListingCardView, ListingsSectionView, SearchFormView, SelectOptionView, SelectView,
    SessionStatusView, SignedOutControls, TextInputView, monthly_price_label,
};

pub const SIGN_IN_PATH: &str = "/api/auth/signin";
pub const SIGN_OUT_PATH: &str = "/api/auth/signout";
pub const SIGN_UP_PATH: &str = "/api/auth/signup";

const SIGN_IN_LABEL: &str = "Zaloguj";
const SIGN_UP_LABEL: &str = "Zarejestruj";
const SIGN_OUT_LABEL: &str = "Wyloguj";

#[derive(Clone)]
pub struct HomePageService {
    listings: Arc<ListingSet>,
    prefetch: PrefetchDispatcher,
}

impl HomePageService {
    pub fn new(listings: Arc<ListingSet>, prefetch: PrefetchDispatcher) -> Self {
        Self { listings, prefetch }
    }

    pub fn render(&self, session: Option<&Session>) -> HomeDocument {
        let mut prefetched = Vec::new();
        if let Some(session) = session {
            debug!(
                target = "rentapp::home",
                user_id = %session.user.id,
                "scheduling latest post prefetch"
            );
            let _detached = self.prefetch.dispatch_latest_post();
            prefetched.push(LATEST_POST_QUERY.to_string());
        }

        HomeDocument {
            header: header_view(session),
            listings: self.listings_section(),
            search: search_form(),
            status: status_view(session),
            hydration: hydration_view(prefetched),
        }
    }

    fn listings_section(&self) -> ListingsSectionView {
        let entries = self
            .listings
            .iter()
            .map(|listing| ListingCardView {
                id: listing.id.get(),
                title: listing.title.clone(),
                price_label: monthly_price_label(listing.monthly_price),
                image: listing.image.clone(),
                href: listing.path(),
                details_label: "Zobacz szczegóły".to_string(),
            })
            .collect();

        ListingsSectionView {
            heading: "Polecane oferty".to_string(),
            entries,
        }
    }
}

fn link(label: &str, href: &str) -> ActionLinkView {
    ActionLinkView {
        label: label.to_string(),
        href: href.to_string(),
    }
}

fn header_view(session: Option<&Session>) -> HeaderView {
    let auth = match session {
        Some(session) => {
            let name = session.display_name();
            AuthControlsView::SignedIn(AccountControlView {
                label: format!("Konto: {name}"),
                initial: name
                    .chars()
                    .next()
                    .map(|ch| ch.to_uppercase().collect())
                    .unwrap_or_default(),
            })
        }
        None => AuthControlsView::SignedOut(SignedOutControls {
            sign_in: link(SIGN_IN_LABEL, SIGN_IN_PATH),
            sign_up: link(SIGN_UP_LABEL, SIGN_UP_PATH),
        }),
    };

    HeaderView { auth }
}

fn search_form() -> SearchFormView {
    SearchFormView {
        heading: "Znajdź mieszkanie".to_string(),
        action: "/".to_string(),
        min_price: TextInputView {
            name: MIN_PRICE_FIELD.to_string(),
            placeholder: "Cena min (zł)".to_string(),
        },
        max_price: TextInputView {
            name: MAX_PRICE_FIELD.to_string(),
            placeholder: "Cena max (zł)".to_string(),
        },
        rooms: SelectView {
            name: ROOMS_FIELD.to_string(),
            options: ROOM_OPTIONS
                .iter()
                .map(|option| SelectOptionView {
                    value: option.value.to_string(),
                    label: option.label.to_string(),
                })
                .collect(),
        },
        submit_label: "Szukaj".to_string(),
    }
}

fn status_view(session: Option<&Session>) -> SessionStatusView {
    match session {
        Some(session) => SessionStatusView {
            signed_in_as: Some(session.display_name().to_string()),
            toggle: link(SIGN_OUT_LABEL, SIGN_OUT_PATH),
        },
        None => SessionStatusView {
            signed_in_as: None,
            toggle: link(SIGN_IN_LABEL, SIGN_IN_PATH),
        },
    }
}

#[derive(Serialize)]
struct HydrationState<'a> {
    queries: &'a [String],
}

fn hydration_view(prefetched: Vec<String>) -> HydrationView {
    let json = match serde_json::to_string(&HydrationState {
        queries: &prefetched,
    }) {
        // `<` would let the payload close the surrounding script element.
        Ok(json) => json.replace('<', "\\u003c"),
        Err(err) => {
            warn!(
                target = "rentapp::home",
                error = %err,
                "failed to serialize hydration state"
            );
            r#"{"queries":[]}"#.to_string()
        }
    };

    HydrationView { prefetched, json }
}
