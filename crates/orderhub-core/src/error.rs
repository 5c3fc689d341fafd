//! # Error Types
//!
//! Domain-specific error types for orderhub-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  orderhub-core errors (this file)                                      │
//! │  ├── AllocationError  - planner cannot cover the request               │
//! │  └── ValidationError  - input validation failures                      │
//! │                                                                         │
//! │  orderhub-db errors (separate crate)                                   │
//! │  ├── DbError          - database operation failures                    │
//! │  └── CheckoutError    - the coordinator's full rejection taxonomy      │
//! │                                                                         │
//! │  Flow: ValidationError / AllocationError → CheckoutError → caller      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product, color, size, ...)
//! 3. Errors are enum variants, never String

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// Allocation Error
// =============================================================================

/// A requested line no store can satisfy in full quantity.
///
/// Identified for the caller by the human-readable product attributes
/// rather than internal variant ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnmetItem {
    pub product_name: String,
    pub size: String,
    pub color: String,
}

impl fmt::Display for UnmetItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} - {}", self.product_name, self.size, self.color)
    }
}

/// Errors from the store allocation planner.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AllocationError {
    /// No combination of stores covers every requested line in full.
    ///
    /// Carries the list of lines that could not be covered; the whole
    /// order is rejected, never partially fulfilled.
    #[error("insufficient inventory for: {}", format_unmet(.unmet))]
    InsufficientInventory { unmet: Vec<UnmetItem> },
}

fn format_unmet(unmet: &[UnmetItem]) -> String {
    unmet
        .iter()
        .map(|u| u.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when a request doesn't meet basic requirements, before any
/// business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., invalid UUID).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unmet_item_display() {
        let item = UnmetItem {
            product_name: "Basic Tee".to_string(),
            size: "M".to_string(),
            color: "black".to_string(),
        };
        assert_eq!(item.to_string(), "Basic Tee - M - black");
    }

    #[test]
    fn test_insufficient_inventory_message() {
        let err = AllocationError::InsufficientInventory {
            unmet: vec![
                UnmetItem {
                    product_name: "Basic Tee".to_string(),
                    size: "M".to_string(),
                    color: "black".to_string(),
                },
                UnmetItem {
                    product_name: "Hoodie".to_string(),
                    size: "L".to_string(),
                    color: "gray".to_string(),
                },
            ],
        };
        assert_eq!(
            err.to_string(),
            "insufficient inventory for: Basic Tee - M - black, Hoodie - L - gray"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "payment_method".to_string(),
        };
        assert_eq!(err.to_string(), "payment_method is required");

        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be positive");
    }
}
