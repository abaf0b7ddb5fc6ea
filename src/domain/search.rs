//! Search form submission. Values are carried verbatim; nothing here
//! validates or executes a search.

use serde::Deserialize;

pub const MIN_PRICE_FIELD: &str = "minPrice";
pub const MAX_PRICE_FIELD: &str = "maxPrice";
pub const ROOMS_FIELD: &str = "rooms";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SearchCriteria {
    #[serde(rename = "minPrice")]
    pub min_price: Option<String>,
    #[serde(rename = "maxPrice")]
    pub max_price: Option<String>,
    pub rooms: Option<String>,
}

impl SearchCriteria {
    pub fn is_empty(&self) -> bool {
        [&self.min_price, &self.max_price, &self.rooms]
            .into_iter()
            .all(|value| value.as_deref().is_none_or(|v| v.trim().is_empty()))
    }
}

/// Choice offered by the room-count select.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomOption {
    pub value: &'static str,
    pub label: &'static str,
}

pub const ROOM_OPTIONS: [RoomOption; 5] = [
    RoomOption {
        value: "",
        label: "Dowolna liczba pokoi",
    },
    RoomOption {
        value: "1",
        label: "1+",
    },
    RoomOption {
        value: "2",
        label: "2+",
    },
    RoomOption {
        value: "3",
        label: "3+",
    },
    RoomOption {
        value: "4",
        label: "4+",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_submission_is_empty() {
        let criteria = SearchCriteria {
            min_price: Some(String::new()),
            max_price: None,
            rooms: Some(" ".to_string()),
        };
        assert!(criteria.is_empty());
    }

    #[test]
    fn any_value_makes_criteria_non_empty() {
        let criteria = SearchCriteria {
            rooms: Some("2".to_string()),
            ..Default::default()
        };
        assert!(!criteria.is_empty());
    }

    #[test]
    fn values_are_kept_as_text() {
        let criteria: SearchCriteria = serde_json::from_value(serde_json::json!({
            "minPrice": "abc",
            "maxPrice": "1500",
        }))
        .expect("deserialize criteria");
        assert_eq!(criteria.min_price.as_deref(), Some("abc"));
        assert_eq!(criteria.max_price.as_deref(), Some("1500"));
        assert_eq!(criteria.rooms, None);
    }
}
