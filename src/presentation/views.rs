use crate::application::error::{ErrorReport, HttpError};
use askama::{Error as AskamaError, Template};
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("{public_message}")]
pub struct TemplateRenderError {
    pub(crate) source: &'static str,
    pub(crate) public_message: &'static str,
    #[source]
    pub(crate) error: AskamaError,
}

impl TemplateRenderError {
    pub fn new(source: &'static str, public_message: &'static str, error: AskamaError) -> Self {
        Self {
            source,
            public_message,
            error,
        }
    }
}

impl From<TemplateRenderError> for HttpError {
    fn from(err: TemplateRenderError) -> Self {
        let TemplateRenderError {
            source,
            public_message,
            error,
        } = err;

        HttpError::from_error(
            source,
            StatusCode::INTERNAL_SERVER_ERROR,
            public_message,
            &error,
        )
    }
}

pub fn render_template<T: Template>(template: T) -> Result<Html<String>, HttpError> {
    template.render().map(Html).map_err(|err| {
        TemplateRenderError::new(
            "presentation::views::render_template",
            "Template rendering failed",
            err,
        )
        .into()
    })
}

pub fn render_template_response<T: Template>(template: T, status: StatusCode) -> Response {
    match render_template(template) {
        Ok(html) => (status, html).into_response(),
        Err(err) => err.into_response(),
    }
}

pub fn render_not_found_response(chrome: LayoutChrome) -> Response {
    let content = ErrorPageView::not_found();
    let view = LayoutContext::new(chrome, content);
    let mut response = render_template_response(ErrorTemplate { view }, StatusCode::NOT_FOUND);
    ErrorReport::from_message(
        "presentation::views::render_not_found_response",
        StatusCode::NOT_FOUND,
        "Resource not found",
    )
    .attach(&mut response);
    response
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandView {
    pub title: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMetaView {
    pub title: String,
    pub description: String,
    pub lang: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutChrome {
    pub brand: BrandView,
    pub meta: PageMetaView,
}

impl LayoutChrome {
    pub fn with_title(self, title: impl Into<String>) -> Self {
        Self {
            meta: PageMetaView {
                title: title.into(),
                ..self.meta
            },
            ..self
        }
    }
}

#[derive(Debug, Clone)]
pub struct LayoutContext<T> {
    pub brand: BrandView,
    pub meta: PageMetaView,
    pub content: T,
}

impl<T> LayoutContext<T> {
    pub fn new(chrome: LayoutChrome, content: T) -> Self {
        Self {
            brand: chrome.brand,
            meta: chrome.meta,
            content,
        }
    }
}

/// A labelled navigation target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionLinkView {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountControlView {
    pub label: String,
    pub initial: String,
}

/// Header controls; which variant is shown depends only on session presence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthControlsView {
    SignedOut(SignedOutControls),
    SignedIn(AccountControlView),
}

impl AuthControlsView {
    pub fn is_signed_in(&self) -> bool {
        matches!(self, Self::SignedIn(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedOutControls {
    pub sign_in: ActionLinkView,
    pub sign_up: ActionLinkView,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderView {
    pub auth: AuthControlsView,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingCardView {
    pub id: u32,
    pub title: String,
    pub price_label: String,
    pub image: String,
    pub href: String,
    pub details_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingsSectionView {
    pub heading: String,
    pub entries: Vec<ListingCardView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextInputView {
    pub name: String,
    pub placeholder: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOptionView {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectView {
    pub name: String,
    pub options: Vec<SelectOptionView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFormView {
    pub heading: String,
    pub action: String,
    pub min_price: TextInputView,
    pub max_price: TextInputView,
    pub rooms: SelectView,
    pub submit_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStatusView {
    pub signed_in_as: Option<String>,
    pub toggle: ActionLinkView,
}

/// Server state handed to client-side resumption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HydrationView {
    pub prefetched: Vec<String>,
    pub json: String,
}

/// Everything the landing page shows, independent of markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeDocument {
    pub header: HeaderView,
    pub listings: ListingsSectionView,
    pub search: SearchFormView,
    pub status: SessionStatusView,
    pub hydration: HydrationView,
}

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub view: LayoutContext<HomeDocument>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingDetailView {
    pub title: String,
    pub price_label: String,
    pub image: String,
    pub back: ActionLinkView,
}

#[derive(Template)]
#[template(path = "listing.html")]
pub struct ListingTemplate {
    pub view: LayoutContext<ListingDetailView>,
}

pub struct ErrorPageView {
    pub title: String,
    pub message: String,
    pub primary_action: Option<ErrorAction>,
}

impl ErrorPageView {
    pub fn not_found() -> Self {
        Self {
            title: "Nie znaleziono strony".to_string(),
            message: "Strona, której szukasz, nie istnieje. Wróć na stronę główną, aby przeglądać oferty.".to_string(),
            primary_action: Some(ErrorAction::home()),
        }
    }
}

pub struct ErrorAction {
    pub href: String,
    pub label: String,
}

impl ErrorAction {
    pub fn home() -> Self {
        Self {
            href: "/".to_string(),
            label: "Wróć na stronę główną".to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub view: LayoutContext<ErrorPageView>,
}

/// Price shown on listing cards, e.g. `800 zł / miesiąc`.
pub fn monthly_price_label(amount: u32) -> String {
    format!("{amount} zł / miesiąc")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_label_uses_monthly_suffix() {
        assert_eq!(monthly_price_label(1200), "1200 zł / miesiąc");
    }

    #[test]
    fn with_title_keeps_other_meta() {
        let chrome = LayoutChrome {
            brand: BrandView {
                title: "RentApp".to_string(),
                href: "/".to_string(),
            },
            meta: PageMetaView {
                title: "RentApp".to_string(),
                description: "desc".to_string(),
                lang: "pl".to_string(),
            },
        };

        let chrome = chrome.with_title("Luksusowy penthouse");
        assert_eq!(chrome.meta.title, "Luksusowy penthouse");
        assert_eq!(chrome.meta.description, "desc");
        assert_eq!(chrome.brand.title, "RentApp");
    }
}
