//! # Validation Module
//!
//! Input validation for data that enters the storefront from outside:
//! delivery addresses typed at checkout and catalog records loaded from files.
//!
//! ## Address Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Field          Rule                                                    │
//! │  ─────          ────                                                    │
//! │  label          1-20 characters                                         │
//! │  addressLine1   5-100 characters                                        │
//! │  addressLine2   optional, at most 100 characters                        │
//! │  city, state    2-50 characters                                         │
//! │  pincode        exactly 6 digits                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lengths are counted in characters after trimming, so "Bengaluru " and
//! "ಬೆಂಗಳೂರು" are measured the way a person would count them.
//!
//! ## Usage
//! ```rust
//! use foodie_core::validation::{validate_pincode, validate_price};
//! use foodie_core::Money;
//!
//! assert!(validate_pincode("560001").is_ok());
//! assert!(validate_pincode("56OO01").is_err());
//! assert!(validate_price(Money::from_major(-1)).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{Address, MenuItem};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Required length of an Indian postal code.
pub const PINCODE_LENGTH: usize = 6;

// =============================================================================
// Helpers
// =============================================================================

fn check_length(field: &str, value: &str, min: usize, max: usize) -> ValidationResult<()> {
    let len = value.trim().chars().count();

    if len == 0 && min > 0 {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if len < min {
        return Err(ValidationError::TooShort {
            field: field.to_string(),
            min,
        });
    }

    if len > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

// =============================================================================
// Address Validators
// =============================================================================

/// Validates a postal code: exactly six ASCII digits.
pub fn validate_pincode(pincode: &str) -> ValidationResult<()> {
    let pincode = pincode.trim();

    if pincode.is_empty() {
        return Err(ValidationError::Required {
            field: "pincode".to_string(),
        });
    }

    if pincode.chars().count() != PINCODE_LENGTH {
        return Err(ValidationError::WrongLength {
            field: "pincode".to_string(),
            len: PINCODE_LENGTH,
        });
    }

    if !pincode.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "pincode".to_string(),
            reason: "must contain only digits".to_string(),
        });
    }

    Ok(())
}

/// Validates a delivery address, reporting the first failing field.
pub fn validate_address(address: &Address) -> ValidationResult<()> {
    check_length("label", &address.label, 1, 20)?;
    check_length("addressLine1", &address.address_line1, 5, 100)?;
    if let Some(line2) = &address.address_line2 {
        check_length("addressLine2", line2, 0, 100)?;
    }
    check_length("city", &address.city, 2, 50)?;
    check_length("state", &address.state, 2, 50)?;
    validate_pincode(&address.pincode)
}

// =============================================================================
// Catalog Validators
// =============================================================================

/// Validates a price. Zero is allowed (free add-ons).
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates a menu item loaded from a catalog file.
pub fn validate_menu_item(item: &MenuItem) -> ValidationResult<()> {
    check_length("id", &item.id, 1, 64)?;
    check_length("restaurantId", &item.restaurant_id, 1, 64)?;
    check_length("name", &item.name, 1, 200)?;
    validate_price(item.price)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn home() -> Address {
        Address {
            id: "a1".to_string(),
            user_id: "u1".to_string(),
            label: "Home".to_string(),
            address_line1: "12 MG Road".to_string(),
            address_line2: Some("Near Trinity Metro".to_string()),
            city: "Bengaluru".to_string(),
            state: "Karnataka".to_string(),
            pincode: "560001".to_string(),
            is_default: true,
        }
    }

    #[test]
    fn test_valid_address() {
        assert!(validate_address(&home()).is_ok());

        let mut no_line2 = home();
        no_line2.address_line2 = None;
        assert!(validate_address(&no_line2).is_ok());
    }

    #[test]
    fn test_pincode_rules() {
        assert!(validate_pincode("560001").is_ok());
        assert!(validate_pincode(" 560001 ").is_ok());
        assert!(matches!(
            validate_pincode(""),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_pincode("56000"),
            Err(ValidationError::WrongLength { len: 6, .. })
        ));
        assert!(matches!(
            validate_pincode("5600011"),
            Err(ValidationError::WrongLength { .. })
        ));
        assert!(matches!(
            validate_pincode("56000A"),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_address_line1_too_short() {
        let mut address = home();
        address.address_line1 = "12".to_string();

        assert_eq!(
            validate_address(&address),
            Err(ValidationError::TooShort {
                field: "addressLine1".to_string(),
                min: 5,
            })
        );
    }

    #[test]
    fn test_label_required_and_bounded() {
        let mut address = home();
        address.label = "   ".to_string();
        assert!(matches!(
            validate_address(&address),
            Err(ValidationError::Required { .. })
        ));

        address.label = "x".repeat(21);
        assert!(matches!(
            validate_address(&address),
            Err(ValidationError::TooLong { max: 20, .. })
        ));
    }

    #[test]
    fn test_city_and_state_bounds() {
        let mut address = home();
        address.city = "B".to_string();
        assert!(matches!(
            validate_address(&address),
            Err(ValidationError::TooShort { .. })
        ));

        let mut address = home();
        address.state = "K".repeat(51);
        assert!(matches!(
            validate_address(&address),
            Err(ValidationError::TooLong { .. })
        ));
    }

    #[test]
    fn test_lengths_count_characters_not_bytes() {
        let mut address = home();
        address.city = "ಬೆಂಗಳೂರು".to_string();
        assert!(validate_address(&address).is_ok());
    }

    #[test]
    fn test_address_line2_too_long() {
        let mut address = home();
        address.address_line2 = Some("x".repeat(101));
        assert!(validate_address(&address).is_err());
    }

    #[test]
    fn test_menu_item() {
        let item = MenuItem::new("m1", "r1", "Butter Chicken", Money::from_major(320));
        assert!(validate_menu_item(&item).is_ok());

        let free = MenuItem::new("m0", "r1", "Mint Chutney", Money::zero());
        assert!(validate_menu_item(&free).is_ok());

        let negative = MenuItem::new("m1", "r1", "Butter Chicken", Money::from_minor(-1));
        assert!(matches!(
            validate_menu_item(&negative),
            Err(ValidationError::MustNotBeNegative { .. })
        ));

        let nameless = MenuItem::new("m1", "r1", "", Money::from_major(10));
        assert!(validate_menu_item(&nameless).is_err());
    }
}
