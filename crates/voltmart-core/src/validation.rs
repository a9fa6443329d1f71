//! # Validation Module
//!
//! Form-level business rules for VoltMart.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Presentation layer                                           │
//! │  ├── Inline field errors as the customer types                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Storefront command (Rust)                                    │
//! │  └── THIS MODULE: same rules, enforced before a store mutates          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Stores                                                       │
//! │  └── Structural invariants only (one line per product id, ...)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use voltmart_core::validation::{validate_email, validate_pincode};
//!
//! assert!(validate_email("demo@example.com").is_ok());
//! assert!(validate_pincode("41100").is_err());
//! ```

use crate::error::ValidationError;
use crate::types::NewAddress;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

pub const MIN_NAME_LEN: usize = 2;
pub const MIN_PASSWORD_LEN: usize = 6;
pub const MIN_PHONE_LEN: usize = 10;
pub const MIN_ADDRESS_LINE_LEN: usize = 5;
pub const PINCODE_LEN: usize = 6;
pub const MAX_EMAIL_LEN: usize = 254;
pub const MAX_SEARCH_LEN: usize = 100;

// =============================================================================
// String Validators
// =============================================================================

fn min_len(field: &str, value: &str, min: usize) -> ValidationResult<()> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    if value.chars().count() < min {
        return Err(ValidationError::TooShort {
            field: field.to_string(),
            min,
        });
    }
    Ok(())
}

/// Validates a person's display name (at least 2 characters).
pub fn validate_name(name: &str) -> ValidationResult<()> {
    min_len("name", name, MIN_NAME_LEN)
}

/// Validates an email address.
///
/// ## Rules
/// - Not empty, at most 254 characters
/// - Exactly one `@` with a non-empty local part
/// - Domain contains a dot that is neither first nor last
///
/// ## Example
/// ```rust
/// use voltmart_core::validation::validate_email;
///
/// assert!(validate_email("user.name+tag@domain.co.in").is_ok());
/// assert!(validate_email("no-at-symbol").is_err());
/// assert!(validate_email("user@localhost").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    if email.len() > MAX_EMAIL_LEN {
        return Err(ValidationError::TooLong {
            field: "email".to_string(),
            max: MAX_EMAIL_LEN,
        });
    }

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: reason.to_string(),
    };

    let (local, domain) = email
        .split_once('@')
        .ok_or_else(|| invalid("must contain an @ symbol"))?;

    if local.is_empty() {
        return Err(invalid("local part cannot be empty"));
    }
    if domain.contains('@') {
        return Err(invalid("must contain exactly one @ symbol"));
    }
    if email.chars().any(char::is_whitespace) {
        return Err(invalid("cannot contain spaces"));
    }
    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err(invalid("domain must look like example.com"));
    }

    Ok(())
}

/// Validates a password (at least 6 characters, whitespace counts).
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::Required {
            field: "password".to_string(),
        });
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::TooShort {
            field: "password".to_string(),
            min: MIN_PASSWORD_LEN,
        });
    }
    Ok(())
}

/// Validates a phone number (at least 10 characters).
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    min_len("phone", phone, MIN_PHONE_LEN)
}

/// Validates an Indian postal code: exactly six ASCII digits.
pub fn validate_pincode(pincode: &str) -> ValidationResult<()> {
    let pincode = pincode.trim();

    if pincode.len() != PINCODE_LEN {
        return Err(ValidationError::WrongLength {
            field: "pincode".to_string(),
            len: PINCODE_LEN,
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

/// Validates a search query and returns it trimmed.
///
/// An empty query is valid here; the query engine answers it with no
/// results.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_SEARCH_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_SEARCH_LEN,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity being added to the cart (must be at least 1).
///
/// The store itself accepts any quantity; the upper bound (product stock)
/// is the presentation layer's job.
pub fn validate_quantity(qty: u32) -> ValidationResult<()> {
    if qty == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Composite Validators
// =============================================================================

/// Validates the registration form.
pub fn validate_registration(
    name: &str,
    email: &str,
    password: &str,
    phone: Option<&str>,
) -> ValidationResult<()> {
    validate_name(name)?;
    validate_email(email)?;
    validate_password(password)?;
    if let Some(phone) = phone.filter(|p| !p.trim().is_empty()) {
        validate_phone(phone)?;
    }
    Ok(())
}

/// Validates the address form used by checkout and the address book.
pub fn validate_address(address: &NewAddress) -> ValidationResult<()> {
    validate_name(&address.name)?;
    validate_phone(&address.phone)?;
    min_len("addressLine1", &address.address_line1, MIN_ADDRESS_LINE_LEN)?;
    min_len("city", &address.city, 2)?;
    min_len("state", &address.state, 2)?;
    validate_pincode(&address.pincode)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn address() -> NewAddress {
        NewAddress {
            name: "Ravi Kumar".to_string(),
            phone: "9876543210".to_string(),
            address_line1: "42 Residency Road".to_string(),
            address_line2: None,
            city: "Bengaluru".to_string(),
            state: "Karnataka".to_string(),
            pincode: "560025".to_string(),
            is_default: true,
        }
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("demo@example.com").is_ok());
        assert!(validate_email("  a@x.com  ").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("a@b@c.com").is_err());
        assert!(validate_email("a b@example.com").is_err());
        assert!(validate_email("user@.com").is_err());
        assert!(validate_email(&format!("{}@x.com", "a".repeat(260))).is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("pw123456").is_ok());
        assert!(validate_password("123456").is_ok());
        assert_eq!(
            validate_password("pw2"),
            Err(ValidationError::TooShort {
                field: "password".to_string(),
                min: 6
            })
        );
        assert!(validate_password("").is_err());
    }

    #[test]
    fn test_validate_pincode() {
        assert!(validate_pincode("560025").is_ok());
        assert!(validate_pincode("56002").is_err());
        assert!(validate_pincode("56002a").is_err());
        assert!(validate_pincode("5600251").is_err());
    }

    #[test]
    fn test_validate_registration_phone_optional() {
        assert!(validate_registration("Ann", "ann@x.com", "secret1", None).is_ok());
        assert!(validate_registration("Ann", "ann@x.com", "secret1", Some("")).is_ok());
        assert!(validate_registration("Ann", "ann@x.com", "secret1", Some("123")).is_err());
        assert!(validate_registration("A", "ann@x.com", "secret1", None).is_err());
    }

    #[test]
    fn test_validate_address() {
        assert!(validate_address(&address()).is_ok());

        let mut short_line = address();
        short_line.address_line1 = "12".to_string();
        assert!(validate_address(&short_line).is_err());

        let mut bad_pin = address();
        bad_pin.pincode = "ABC123".to_string();
        assert!(validate_address(&bad_pin).is_err());
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query("  arduino ").unwrap(), "arduino");
        assert_eq!(validate_search_query("   ").unwrap(), "");
        assert!(validate_search_query(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(0).is_err());
    }
}
