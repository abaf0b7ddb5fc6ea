//! Featured rental listings shown on the landing page.
//!
//! The set is static sample data. Identifiers must stay unique inside a set
//! because they double as navigation targets (`/listings/{id}`).

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use super::error::DomainError;

/// Identifier of a listing, unique within the displayed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ListingId(u32);

impl ListingId {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Listing {
    pub id: ListingId,
    pub title: String,
    /// Monthly rent in whole złoty.
    pub monthly_price: u32,
    pub image: String,
}

impl Listing {
    pub fn path(&self) -> String {
        listing_path(self.id)
    }
}

pub fn listing_path(id: ListingId) -> String {
    format!("/listings/{id}")
}

struct ListingSeed {
    id: u32,
    title: &'static str,
    monthly_price: u32,
    image: &'static str,
}

const FEATURED: [ListingSeed; 3] = [
    ListingSeed {
        id: 1,
        title: "Przytulna kawalerka w centrum",
        monthly_price: 800,
        image: "/apartment1.jpg",
    },
    ListingSeed {
        id: 2,
        title: "Przestronne 2 pokoje na przedmieściach",
        monthly_price: 1200,
        image: "/apartment2.jpg",
    },
    ListingSeed {
        id: 3,
        title: "Luksusowy penthouse",
        monthly_price: 2500,
        image: "/apartment3.jpg",
    },
];

/// Ordered collection of listings with unique identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingSet {
    entries: Vec<Listing>,
}

impl ListingSet {
    pub fn new(entries: Vec<Listing>) -> Result<Self, DomainError> {
        let mut seen = HashSet::with_capacity(entries.len());
        for listing in &entries {
            if !seen.insert(listing.id) {
                return Err(DomainError::invariant(format!(
                    "listing id `{}` appears more than once",
                    listing.id
                )));
            }
            if listing.title.trim().is_empty() {
                return Err(DomainError::validation(format!(
                    "listing `{}` has an empty title",
                    listing.id
                )));
            }
            if listing.image.trim().is_empty() {
                return Err(DomainError::validation(format!(
                    "listing `{}` has no image reference",
                    listing.id
                )));
            }
        }

        Ok(Self { entries })
    }

    /// The fixed sample set shown in the "Polecane oferty" section.
    pub fn featured() -> Result<Self, DomainError> {
        let entries = FEATURED
            .iter()
            .map(|seed| Listing {
                id: ListingId::new(seed.id),
                title: seed.title.to_string(),
                monthly_price: seed.monthly_price,
                image: seed.image.to_string(),
            })
            .collect();

        Self::new(entries)
    }

    pub fn get(&self, id: ListingId) -> Option<&Listing> {
        self.entries.iter().find(|listing| listing.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Listing> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(id: u32, title: &str) -> Listing {
        Listing {
            id: ListingId::new(id),
            title: title.to_string(),
            monthly_price: 1000,
            image: "/img.jpg".to_string(),
        }
    }

    #[test]
    fn featured_set_matches_sample_offers() {
        let set = ListingSet::featured().expect("featured set is valid");
        let summary: Vec<_> = set
            .iter()
            .map(|listing| (listing.id.get(), listing.title.as_str(), listing.monthly_price))
            .collect();

        assert_eq!(
            summary,
            vec![
                (1, "Przytulna kawalerka w centrum", 800),
                (2, "Przestronne 2 pokoje na przedmieściach", 1200),
                (3, "Luksusowy penthouse", 2500),
            ]
        );
    }

    #[test]
    fn listing_paths_use_identifier() {
        let set = ListingSet::featured().expect("featured set is valid");
        let paths: Vec<_> = set.iter().map(Listing::path).collect();
        assert_eq!(paths, ["/listings/1", "/listings/2", "/listings/3"]);
    }

    #[test]
    fn duplicate_identifiers_are_rejected() {
        let err = ListingSet::new(vec![listing(7, "A"), listing(7, "B")])
            .expect_err("duplicate ids must fail");
        assert!(matches!(err, DomainError::Invariant { .. }));
    }

    #[test]
    fn blank_title_is_rejected() {
        let err = ListingSet::new(vec![listing(1, "  ")]).expect_err("blank title must fail");
        assert!(matches!(err, DomainError::Validation { .. }));
    }

    #[test]
    fn lookup_by_identifier() {
        let set = ListingSet::featured().expect("featured set is valid");
        assert_eq!(
            set.get(ListingId::new(3)).map(|l| l.title.as_str()),
            Some("Luksusowy penthouse")
        );
        assert!(set.get(ListingId::new(42)).is_none());
    }
}
