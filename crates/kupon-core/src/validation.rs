//! # Validation Module
//!
//! Input boundary checks for the kiosk form.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Input form / CLI                                             │
//! │  ├── Type validation (price parses as a non-negative integer)          │
//! │  └── THIS MODULE: required fields, lengths, barcode-safe code          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Issuance (kupon-session)                                     │
//! │  └── Trusts its caller, never re-validates                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Renderers (kupon-render)                                     │
//! │  └── EncodingError when a symbology cannot hold the text               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use kupon_core::validation::{validate_food_item, validate_outlet};
//! use kupon_core::{FoodItem, OutletInfo};
//!
//! assert!(validate_food_item(&FoodItem::new("ABC123", "Kopi Susu", 15000)).is_ok());
//! assert!(validate_outlet(&OutletInfo::new("", "Jl. Mawar 1")).is_err());
//! ```

use crate::error::ValidationError;
use crate::types::{FoodItem, OutletInfo};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest product code the barcode strip can display legibly.
pub const MAX_CODE_LEN: usize = 50;

/// Longest item or outlet name.
pub const MAX_NAME_LEN: usize = 200;

/// Longest outlet address.
pub const MAX_ADDRESS_LEN: usize = 300;

// =============================================================================
// Record Validators
// =============================================================================

/// Validates a food item before issuance.
///
/// ## Rules
/// - `code`: see [`validate_product_code`]
/// - `name`: required, at most 200 characters
/// - `price`: non-negative by type, zero allowed (free items)
/// - `image`: optional, see [`validate_image_ref`]
pub fn validate_food_item(item: &FoodItem) -> ValidationResult<()> {
    validate_product_code(&item.code)?;
    validate_required("name", &item.name, MAX_NAME_LEN)?;

    if let Some(image) = &item.image {
        validate_image_ref(image)?;
    }

    Ok(())
}

/// Validates an outlet before issuance.
///
/// Only `name` and `address` are checked; every other field is replaced
/// during issuance anyway.
pub fn validate_outlet(outlet: &OutletInfo) -> ValidationResult<()> {
    validate_required("outlet name", &outlet.name, MAX_NAME_LEN)?;
    validate_required("outlet address", &outlet.address, MAX_ADDRESS_LEN)?;
    Ok(())
}

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a product code.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - At most 50 characters
/// - Printable ASCII only, so the linear barcode can carry it
///
/// ## Example
/// ```rust
/// use kupon_core::validation::validate_product_code;
///
/// assert!(validate_product_code("ABC-123").is_ok());
/// assert!(validate_product_code("").is_err());
/// assert!(validate_product_code("KOPI☕").is_err());
/// ```
pub fn validate_product_code(code: &str) -> ValidationResult<()> {
    validate_required("code", code, MAX_CODE_LEN)?;

    if !code.chars().all(|c| c.is_ascii_graphic() || c == ' ') {
        return Err(ValidationError::InvalidFormat {
            field: "code".to_string(),
            reason: "must contain only printable ASCII characters".to_string(),
        });
    }

    Ok(())
}

/// Validates an item image reference.
///
/// ## Rules
/// Either an inline `data:image/...` URI, an absolute path (`/unnamed.png`)
/// or an http(s) URL.
pub fn validate_image_ref(image: &str) -> ValidationResult<()> {
    let image = image.trim();

    let accepted = image.starts_with("data:image/")
        || image.starts_with('/')
        || image.starts_with("https://")
        || image.starts_with("http://");

    if !accepted {
        return Err(ValidationError::InvalidFormat {
            field: "image".to_string(),
            reason: "must be a data:image URI, an absolute path or an http(s) URL".to_string(),
        });
    }

    Ok(())
}

fn validate_required(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_code() {
        assert!(validate_product_code("ABC123").is_ok());
        assert!(validate_product_code("KS-01 L").is_ok());

        assert!(validate_product_code("").is_err());
        assert!(validate_product_code("   ").is_err());
        assert!(validate_product_code(&"A".repeat(51)).is_err());
        assert!(validate_product_code("tab\there").is_err());
    }

    #[test]
    fn test_validate_food_item() {
        let item = FoodItem::new("ABC123", "Kopi Susu", 0);
        assert!(validate_food_item(&item).is_ok());

        let nameless = FoodItem::new("ABC123", " ", 15000);
        assert!(matches!(
            validate_food_item(&nameless),
            Err(ValidationError::Required { field }) if field == "name"
        ));

        let mut bad_image = item.clone();
        bad_image.image = Some("ftp://example.com/a.png".to_string());
        assert!(validate_food_item(&bad_image).is_err());

        let mut good_image = item;
        good_image.image = Some("data:image/jpeg;base64,/9j/4AAQ".to_string());
        assert!(validate_food_item(&good_image).is_ok());
    }

    #[test]
    fn test_validate_outlet() {
        assert!(validate_outlet(&OutletInfo::new("Outlet A", "Jl. Mawar 1")).is_ok());
        assert!(validate_outlet(&OutletInfo::new("Outlet A", "")).is_err());
        assert!(validate_outlet(&OutletInfo::new("", "Jl. Mawar 1")).is_err());
        assert!(validate_outlet(&OutletInfo::new("A".repeat(201), "Jl. Mawar 1")).is_err());
    }

    #[test]
    fn test_validate_image_ref() {
        assert!(validate_image_ref("/unnamed.png").is_ok());
        assert!(validate_image_ref("https://cdn.example.com/kopi.png").is_ok());
        assert!(validate_image_ref("kopi.png").is_err());
    }
}
