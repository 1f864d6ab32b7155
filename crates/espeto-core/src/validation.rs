//! # Validation Module
//!
//! Input validation rules for Espeto POS.
//!
//! Every mutating operation validates its inputs with these checks before
//! issuing any storage write, so a rejection never leaves partial state
//! behind.

use crate::error::{ValidationError, ValidationResult};
use crate::{MAX_CUSTOMER_LEN, MAX_ITEM_QUANTITY, MAX_PRODUCT_NAME_LEN};

// =============================================================================
// String Validators
// =============================================================================

/// Validates a customer label for a new tab.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most 100 characters
///
/// ## Example
/// ```rust
/// use espeto_core::validation::validate_customer;
///
/// assert!(validate_customer("Ana").is_ok());
/// assert!(validate_customer("   ").is_err());
/// ```
pub fn validate_customer(label: &str) -> ValidationResult<()> {
    let label = label.trim();

    if label.is_empty() {
        return Err(ValidationError::Required {
            field: "customer".to_string(),
        });
    }

    if label.chars().count() > MAX_CUSTOMER_LEN {
        return Err(ValidationError::TooLong {
            field: "customer".to_string(),
            max: MAX_CUSTOMER_LEN,
        });
    }

    Ok(())
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 200 characters
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

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity value (line items, losses, restocks).
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a price or cost in centavos.
///
/// Zero is allowed (giveaway items); negative is not.
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

/// Validates an initial stock quantity (zero allowed at configure time).
pub fn validate_stock_quantity(qty: i64) -> ValidationResult<()> {
    if qty < 0 {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a fee rate in basis points (0% to 100%).
pub fn validate_fee_bps(bps: u32) -> ValidationResult<()> {
    if bps > 10000 {
        return Err(ValidationError::OutOfRange {
            field: "fee rate".to_string(),
            min: 0,
            max: 10000,
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
    fn test_validate_customer() {
        assert!(validate_customer("Ana").is_ok());
        assert!(validate_customer("Mesa 4 - João").is_ok());

        assert!(validate_customer("").is_err());
        assert!(validate_customer("   ").is_err());
        assert!(validate_customer(&"a".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Queijo coalho").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name(&"a".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-3).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(1100).is_ok());
        assert!(validate_price_cents(-1).is_err());
    }

    #[test]
    fn test_validate_stock_quantity() {
        assert!(validate_stock_quantity(0).is_ok());
        assert!(validate_stock_quantity(40).is_ok());
        assert!(validate_stock_quantity(-1).is_err());
    }

    #[test]
    fn test_validate_fee_bps() {
        assert!(validate_fee_bps(0).is_ok());
        assert!(validate_fee_bps(300).is_ok());
        assert!(validate_fee_bps(10000).is_ok());
        assert!(validate_fee_bps(10001).is_err());
    }
}
