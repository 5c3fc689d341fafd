//! # Validation Module
//!
//! Business rule validation for order input.
//!
//! These checks run before any database work: cheap rejections first, so a
//! malformed request never opens a transaction.

use crate::error::ValidationError;
use crate::{MAX_LINE_QUANTITY, MAX_ORDER_LINES};

/// Validates a line quantity: positive and within the per-line cap.
pub fn validate_quantity(quantity: i64) -> Result<(), ValidationError> {
    if quantity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }
    if quantity > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }
    Ok(())
}

/// Validates the number of lines in a request: at least one, at most
/// [`MAX_ORDER_LINES`].
pub fn validate_line_count(count: usize) -> Result<(), ValidationError> {
    if count == 0 {
        return Err(ValidationError::Required {
            field: "items".to_string(),
        });
    }
    if count > MAX_ORDER_LINES {
        return Err(ValidationError::OutOfRange {
            field: "items".to_string(),
            min: 1,
            max: MAX_ORDER_LINES as i64,
        });
    }
    Ok(())
}

/// Validates the payment method string: present and non-blank.
pub fn validate_payment_method(method: &str) -> Result<(), ValidationError> {
    if method.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "payment_method".to_string(),
        });
    }
    Ok(())
}

/// Validates that an id field is present and non-blank.
pub fn validate_id(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_bounds() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(MAX_LINE_QUANTITY).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-5).is_err());
        assert!(validate_quantity(MAX_LINE_QUANTITY + 1).is_err());
    }

    #[test]
    fn test_line_count_bounds() {
        assert!(validate_line_count(1).is_ok());
        assert!(validate_line_count(MAX_ORDER_LINES).is_ok());

        assert!(validate_line_count(0).is_err());
        assert!(validate_line_count(MAX_ORDER_LINES + 1).is_err());
    }

    #[test]
    fn test_payment_method() {
        assert!(validate_payment_method("cod").is_ok());
        assert!(validate_payment_method("").is_err());
        assert!(validate_payment_method("   ").is_err());
    }

    #[test]
    fn test_id_required() {
        assert!(validate_id("address_id", "addr-1").is_ok());
        assert!(validate_id("address_id", "").is_err());
    }
}
