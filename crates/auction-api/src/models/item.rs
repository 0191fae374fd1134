//! Auction item model.
//!
//! An item carries an ordered, schema-less list of options. Options are not
//! unique per type: an item may hold zero, one, or several options sharing
//! the same type (up to three reforge lines, up to three set-effect lines).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One auction listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuctionItem {
    /// The unique identifier for the listing.
    pub id: String,

    /// The display name of the item (may differ from the base item name,
    /// e.g. enchanted items carry their enchant prefixes).
    pub display_name: String,

    /// Asking price in gold.
    pub price: i64,

    /// Ordered option list. Order is as served by the backend.
    #[serde(default)]
    pub options: Vec<ItemOption>,

    /// When the listing expires.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl AuctionItem {
    /// Returns all options of the given type, in listing order.
    pub fn options_of_type<'a>(&'a self, option_type: &'a str) -> impl Iterator<Item = &'a ItemOption> {
        self.options
            .iter()
            .filter(move |o| o.option_type == option_type)
    }

    /// Returns the first option of the given type, if any.
    pub fn first_option(&self, option_type: &str) -> Option<&ItemOption> {
        self.options.iter().find(|o| o.option_type == option_type)
    }
}

/// One attribute entry on an item.
///
/// The payload fields are loosely typed on the wire: `value` is usually a
/// number rendered as text ("150") but may be free text for enchants,
/// reforge lines, and set effects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemOption {
    /// Option type key, e.g. "공격", "인챈트", "세공 옵션".
    #[serde(rename = "type")]
    pub option_type: String,

    /// Primary payload (numeric-as-text or free text).
    pub value: String,

    /// Secondary payload, often the upper bound of a range or a numeric
    /// magnitude.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value2: Option<String>,

    /// Sub-classification, e.g. enchant position ("접두"/"접미"), erg grade,
    /// special-remodel type letter.
    #[serde(default, rename = "subType", skip_serializing_if = "Option::is_none")]
    pub sub_type: Option<String>,

    /// Free-text annotation; used only for enchant effect lists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
}

impl ItemOption {
    /// Creates an option with only a type and a value.
    pub fn new(option_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            option_type: option_type.into(),
            value: value.into(),
            value2: None,
            sub_type: None,
            desc: None,
        }
    }
}

/// A page of search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    /// Listings on this page.
    #[serde(default)]
    pub items: Vec<AuctionItem>,

    /// Cursor for the next page, absent on the last page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_deserialize_wire_format() {
        let json = r#"{
            "id": "a-1",
            "displayName": "충돌의 롱 소드",
            "price": 1500000,
            "options": [
                { "type": "공격", "value": "30", "value2": "150" },
                { "type": "인챈트", "value": "충돌의 (랭크 4)", "subType": "접두",
                  "desc": "최대대미지 4 증가" }
            ]
        }"#;

        let item: AuctionItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, "a-1");
        assert_eq!(item.price, 1_500_000);
        assert_eq!(item.options.len(), 2);
        assert_eq!(item.options[0].option_type, "공격");
        assert_eq!(item.options[0].value2.as_deref(), Some("150"));
        assert_eq!(item.options[1].sub_type.as_deref(), Some("접두"));
        assert!(item.expires_at.is_none());
    }

    #[test]
    fn test_item_deserialize_minimal() {
        let json = r#"{ "id": "a-2", "displayName": "나무 막대기", "price": 10 }"#;
        let item: AuctionItem = serde_json::from_str(json).unwrap();
        assert!(item.options.is_empty());
    }

    #[test]
    fn test_item_serde_roundtrip() {
        let item = AuctionItem {
            id: "a-3".to_string(),
            display_name: "글라스기브넨 팔 보호대".to_string(),
            price: 99_000_000,
            options: vec![
                ItemOption::new("방어력", "12"),
                ItemOption {
                    option_type: "세공 옵션".to_string(),
                    value: "스매시 대미지(18레벨:180 % 증가)".to_string(),
                    value2: None,
                    sub_type: None,
                    desc: None,
                },
            ],
            expires_at: None,
        };

        let json = serde_json::to_string(&item).unwrap();
        let deserialized: AuctionItem = serde_json::from_str(&json).unwrap();
        assert_eq!(item, deserialized);
    }

    #[test]
    fn test_options_of_type_preserves_order() {
        let item = AuctionItem {
            id: "a-4".to_string(),
            display_name: "세공된 무기".to_string(),
            price: 1,
            options: vec![
                ItemOption::new("세공 옵션", "첫 번째"),
                ItemOption::new("밸런스", "45"),
                ItemOption::new("세공 옵션", "두 번째"),
            ],
            expires_at: None,
        };

        let values: Vec<&str> = item
            .options_of_type("세공 옵션")
            .map(|o| o.value.as_str())
            .collect();
        assert_eq!(values, vec!["첫 번째", "두 번째"]);
    }

    #[test]
    fn test_first_option_absent() {
        let item = AuctionItem {
            id: "a-5".to_string(),
            display_name: "빈 아이템".to_string(),
            price: 1,
            options: vec![],
            expires_at: None,
        };
        assert!(item.first_option("공격").is_none());
    }

    #[test]
    fn test_search_response_deserialize() {
        let json = r#"{ "items": [], "nextCursor": "page-2" }"#;
        let response: SearchResponse = serde_json::from_str(json).unwrap();
        assert!(response.items.is_empty());
        assert_eq!(response.next_cursor.as_deref(), Some("page-2"));
    }
}
