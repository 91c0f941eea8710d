//! # Canonicalization
//!
//! The fixed rewrite every issuance applies to caller input.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  caller OutletInfo                 canonical OutletInfo                 │
//! │  ─────────────────                 ────────────────────                 │
//! │  name            ─────────────────► name            (kept)              │
//! │  address         ─────────────────► address         (kept)              │
//! │  distance        ──── dropped ────► "1km"                               │
//! │  isOpen          ──── dropped ────► true                                │
//! │  operatingHours  ──── dropped ────► "00:00-23:59"                       │
//! │  totalOutlets    ──── dropped ────► 99                                  │
//! │                                                                         │
//! │  caller FoodItem                   canonical FoodItem                   │
//! │  ───────────────                   ──────────────────                   │
//! │  code, name, price ───────────────► kept                                │
//! │  description     ──── dropped ────► "Tersedia selama jam buka"          │
//! │  image           ──── if absent ──► "/unnamed.png"                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! This is an intentional simplification, not a bug. Both functions are
//! idempotent, so a refresh that feeds an issued record back in produces the
//! same item and outlet.

use crate::types::{FoodItem, OutletInfo};
use crate::{
    DEFAULT_DISTANCE, DEFAULT_IS_OPEN, DEFAULT_OPERATING_HOURS, DEFAULT_TOTAL_OUTLETS,
    FORCED_DESCRIPTION, PLACEHOLDER_IMAGE,
};

/// Returns the outlet with every display field overwritten.
pub fn canonical_outlet(outlet: &OutletInfo) -> OutletInfo {
    OutletInfo {
        name: outlet.name.clone(),
        address: outlet.address.clone(),
        distance: DEFAULT_DISTANCE.to_string(),
        is_open: DEFAULT_IS_OPEN,
        operating_hours: DEFAULT_OPERATING_HOURS.to_string(),
        total_outlets: DEFAULT_TOTAL_OUTLETS,
    }
}

/// Returns the item with the forced description and a guaranteed image.
///
/// An empty image string counts as absent.
pub fn canonical_food_item(item: &FoodItem) -> FoodItem {
    let image = item
        .image
        .as_deref()
        .filter(|image| !image.is_empty())
        .unwrap_or(PLACEHOLDER_IMAGE)
        .to_string();

    FoodItem {
        code: item.code.clone(),
        name: item.name.clone(),
        price: item.price,
        description: Some(FORCED_DESCRIPTION.to_string()),
        image: Some(image),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outlet_fields_are_overwritten() {
        let outlet = OutletInfo {
            name: "Outlet A".to_string(),
            address: "Jl. Mawar 1".to_string(),
            distance: "12km".to_string(),
            is_open: false,
            operating_hours: "00:00-22:00".to_string(),
            total_outlets: 3,
        };

        let canonical = canonical_outlet(&outlet);
        assert_eq!(canonical.name, "Outlet A");
        assert_eq!(canonical.address, "Jl. Mawar 1");
        assert_eq!(canonical.distance, "1km");
        assert!(canonical.is_open);
        assert_eq!(canonical.operating_hours, "00:00-23:59");
        assert_eq!(canonical.total_outlets, 99);
    }

    #[test]
    fn test_description_is_forced() {
        let mut item = FoodItem::new("ABC123", "Kopi Susu", 15000);
        item.description = Some("Kopi dengan susu segar".to_string());

        let canonical = canonical_food_item(&item);
        assert_eq!(canonical.description.as_deref(), Some(FORCED_DESCRIPTION));
        assert_eq!(canonical.code, "ABC123");
        assert_eq!(canonical.price, 15000);
    }

    #[test]
    fn test_image_defaults_only_when_absent() {
        let item = FoodItem::new("A", "B", 1);
        assert_eq!(
            canonical_food_item(&item).image.as_deref(),
            Some(PLACEHOLDER_IMAGE)
        );

        let mut with_blank = item.clone();
        with_blank.image = Some(String::new());
        assert_eq!(
            canonical_food_item(&with_blank).image.as_deref(),
            Some(PLACEHOLDER_IMAGE)
        );

        let mut with_image = item;
        with_image.image = Some("data:image/png;base64,AAAA".to_string());
        assert_eq!(
            canonical_food_item(&with_image).image.as_deref(),
            Some("data:image/png;base64,AAAA")
        );
    }

    #[test]
    fn test_canonicalization_is_idempotent() {
        let outlet = OutletInfo::new("Outlet A", "Jl. Mawar 1");
        let once = canonical_outlet(&outlet);
        assert_eq!(canonical_outlet(&once), once);

        let item = FoodItem::new("A", "B", 1);
        let once = canonical_food_item(&item);
        assert_eq!(canonical_food_item(&once), once);
    }
}
