use std::sync::Arc;

use crate::domain::listings::{ListingId, ListingSet};
use crate::presentation::views::{ActionLinkView, ListingDetailView, monthly_price_label};

/// Read access to the displayed listings for `/listings/{id}`.
#[derive(Clone)]
pub struct ListingService {
    listings: Arc<ListingSet>,
}

impl ListingService {
    pub fn new(listings: Arc<ListingSet>) -> Self {
        Self { listings }
    }

    pub fn detail(&self, id: ListingId) -> Option<ListingDetailView> {
        let listing = self.listings.get(id)?;

        Some(ListingDetailView {
            title: listing.title.clone(),
            price_label: monthly_price_label(listing.monthly_price),
            image: listing.image.clone(),
            back: ActionLinkView {
                label: "Wróć do ofert".to_string(),
                href: "/".to_string(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> ListingService {
        ListingService::new(Arc::new(ListingSet::featured().expect("featured listings")))
    }

    #[test]
    fn known_listing_has_detail() {
        let detail = service().detail(ListingId::new(2)).expect("listing 2");
        assert_eq!(detail.title, "Przestronne 2 pokoje na przedmieściach");
        assert_eq!(detail.price_label, "1200 zł / miesiąc");
        assert_eq!(detail.image, "/apartment2.jpg");
    }

    #[test]
    fn unknown_listing_has_no_detail() {
        assert!(service().detail(ListingId::new(99)).is_none());
    }
}
