//! # Validation Module
//!
//! Input validation for catalog entries, settings and quantities.
//!
//! ## When Validation Runs
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Points                                  │
//! │                                                                         │
//! │  Startup (once)                                                        │
//! │  ├── Catalog::new        → product id, name, price, duplicate ids      │
//! │  └── BundleSettings::new → thresholds, discount percentage             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Every interaction                                                     │
//! │  └── BundleEngine::add   → quantity ≥ 1                                │
//! │                                                                         │
//! │  Catalog and settings never change after startup, so nothing here      │
//! │  needs to run again during the session.                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bundle_core::validation::{validate_product_name, validate_quantity};
//!
//! assert!(validate_product_name("Sunburst Tracksuit").is_ok());
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::types::ProductId;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest product name a catalog card can show.
pub const MAX_PRODUCT_NAME_LEN: usize = 200;

/// Largest quantity one selected product can reach.
pub const MAX_QUANTITY: u32 = u32::MAX;

// =============================================================================
// Product Validators
// =============================================================================

/// Validates a product id. Ids start at 1.
pub fn validate_product_id(id: ProductId) -> ValidationResult<()> {
    if id.get() == 0 {
        return Err(ValidationError::MustBePositive {
            field: "product id".to_string(),
        });
    }

    Ok(())
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - At most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_PRODUCT_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
///
/// ```rust
/// use bundle_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(15000).is_ok());
/// assert!(validate_price_cents(0).is_ok());
/// assert!(validate_price_cents(-100).is_err());
/// ```
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity passed to `add`.
///
/// Any positive amount is accepted; the resulting total is checked by
/// [`validate_quantity_limit`].
pub fn validate_quantity(qty: u32) -> ValidationResult<()> {
    if qty == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Checks a computed per-product quantity against [`MAX_QUANTITY`].
///
/// ```rust
/// use bundle_core::validation::{validate_quantity_limit, MAX_QUANTITY};
///
/// assert_eq!(validate_quantity_limit(5), Ok(5));
/// assert_eq!(validate_quantity_limit(i64::from(MAX_QUANTITY)), Ok(MAX_QUANTITY));
/// assert!(validate_quantity_limit(i64::from(MAX_QUANTITY) + 1).is_err());
/// ```
pub fn validate_quantity_limit(quantity: i64) -> ValidationResult<u32> {
    u32::try_from(quantity).map_err(|_| ValidationError::OutOfRange {
        field: "quantity".to_string(),
        min: 0,
        max: i64::from(MAX_QUANTITY),
    })
}

/// Validates an item-count threshold (`minimum_items`, `discount_threshold`).
pub fn validate_threshold(field: &str, value: u32) -> ValidationResult<()> {
    if value == 0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a whole discount percentage (0 to 100 inclusive).
pub fn validate_discount_percentage(percent: u32) -> ValidationResult<()> {
    if percent > 100 {
        return Err(ValidationError::OutOfRange {
            field: "discount_percentage".to_string(),
            min: 0,
            max: 100,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
