//! Core data models for the lunch bot
//!
//! This module contains the data types used throughout the application
//! for representing menu items and the outcome of a menu fetch.

pub mod fetcher;
pub mod icons;

pub use fetcher::{FetchError, MenuClient, MenuSource};
pub use icons::attribute_code;

use serde::{Deserialize, Serialize};

/// A single item on the cafeteria menu
///
/// Immutable once constructed. `price` carries the currency text exactly as
/// the extraction service provides it (e.g. "$3.50"); it is never parsed to
/// a numeric value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Display name of the dish
    pub name: String,
    /// Price text as provided upstream
    pub price: String,
    /// One-line description of the dish
    pub description: String,
    /// Attribute codes (e.g. "V", "↓G") in upstream order
    pub attributes: Vec<String>,
}

/// Terminal classification of a completed fetch
///
/// Both variants are successes from the cache's point of view: the fetch
/// reached the extraction service and got a well-formed answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchReason {
    /// The service returned a (possibly empty) menu
    Success,
    /// The service reported its monthly request quota as exhausted
    QuotaExceeded,
}

/// Result of a completed menu fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResult {
    /// Menu items in upstream order; empty on quota exhaustion or an
    /// empty upstream menu
    pub items: Vec<MenuItem>,
    /// Why the fetch terminated
    pub reason: FetchReason,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_item_creation() {
        let item = MenuItem {
            name: "Soup".to_string(),
            price: "$3".to_string(),
            description: "Tomato basil".to_string(),
            attributes: vec![],
        };

        assert_eq!(item.name, "Soup");
        assert_eq!(item.price, "$3");
        assert_eq!(item.description, "Tomato basil");
        assert!(item.attributes.is_empty());
    }

    #[test]
    fn test_menu_item_serialization_roundtrip() {
        let item = MenuItem {
            name: "Salad".to_string(),
            price: "$5".to_string(),
            description: "Caesar".to_string(),
            attributes: vec!["V".to_string(), "S".to_string()],
        };

        let json = serde_json::to_string(&item).expect("Failed to serialize MenuItem");
        let deserialized: MenuItem =
            serde_json::from_str(&json).expect("Failed to deserialize MenuItem");

        assert_eq!(deserialized, item);
    }

    #[test]
    fn test_menu_item_attributes_preserve_order() {
        let item = MenuItem {
            name: "Bowl".to_string(),
            price: "$7".to_string(),
            description: "Grain bowl".to_string(),
            attributes: vec!["V".to_string(), "↓G".to_string(), "FF".to_string()],
        };

        assert_eq!(item.attributes, vec!["V", "↓G", "FF"]);
    }

    #[test]
    fn test_fetch_reason_variants_distinct() {
        assert_ne!(FetchReason::Success, FetchReason::QuotaExceeded);
    }

    #[test]
    fn test_fetch_result_empty_success_is_not_quota() {
        let result = FetchResult {
            items: vec![],
            reason: FetchReason::Success,
        };

        assert!(result.items.is_empty());
        assert_eq!(result.reason, FetchReason::Success);
    }
}
