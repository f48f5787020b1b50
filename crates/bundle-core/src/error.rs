//! # Error Types
//!
//! Domain-specific error types for bundle-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  bundle-core errors (this file)                                        │
//! │  ├── BundleError      - Engine operation failures                      │
//! │  └── ValidationError  - Catalog / settings / quantity input failures   │
//! │                                                                         │
//! │  bundle-cli errors (separate crate)                                    │
//! │  └── AppError         - Config, command parsing, wrapped BundleError   │
//! │                                                                         │
//! │  Flow: ValidationError → BundleError → AppError → stderr               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Is NOT an Error
//! Quantity arithmetic is clamped at zero. Decreasing a quantity below one
//! removes the entry instead of failing, and removing an unselected product
//! is a no-op.

use thiserror::Error;

use crate::types::ProductId;

// =============================================================================
// Bundle Error
// =============================================================================

/// Errors raised by [`crate::engine::BundleEngine`] operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BundleError {
    /// The product id is not part of the catalog.
    ///
    /// ## When This Occurs
    /// A caller produced an id that no catalog card could have emitted.
    /// This is a caller-side bug, so it is surfaced instead of ignored.
    #[error("Invalid product: {0} is not in the catalog")]
    InvalidProduct(ProductId),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised while building a catalog or settings, before any engine exists.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Duplicate value (e.g., two catalog entries with one id).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with BundleError.
pub type BundleResult<T> = Result<T, BundleError>;

// =============================================================================
// Unit Tests
// =============================================================================
