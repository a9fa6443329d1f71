//! # API Error Type
//!
//! Unified error type for storefront commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in VoltMart                               │
//! │                                                                         │
//! │  Command Function ── Result<T, ApiError>                                │
//! │         │                                                               │
//! │         ├── ValidationError ──────────► VALIDATION_ERROR (inline form)  │
//! │         ├── CoreError::*NotFound ─────► NOT_FOUND (empty-state page)    │
//! │         ├── CoreError::EmptyCart ─────► CART_ERROR                      │
//! │         ├── CoreError::NotAuthenticated► UNAUTHENTICATED                │
//! │         └── StoreError ───────────────► STORAGE_ERROR (logged, generic) │
//! │                                                                         │
//! │  Bad credentials / duplicate email are NOT errors: the account         │
//! │  commands return `false` inside `Ok`.                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Serialization
//! ```json
//! { "code": "NOT_FOUND", "message": "Product not found: flux-capacitor" }
//! ```

use serde::Serialize;
use voltmart_core::{CoreError, ValidationError};
use voltmart_store::StoreError;

/// Error returned from storefront commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product, category or order does not exist
    NotFound,

    /// Form input failed validation
    ValidationError,

    /// The action needs a signed-in user
    Unauthenticated,

    /// Cart operation failed (e.g. checkout with an empty cart)
    CartError,

    /// Coupon code not recognised
    InvalidCoupon,

    /// Persisted state could not be read or written
    StorageError,

    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts storage errors to API errors.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        // Log the actual error but return a generic message
        tracing::error!("Storage operation failed: {}", err);
        match err {
            StoreError::PasswordHash(_) => ApiError::internal("Could not secure password"),
            _ => ApiError::new(ErrorCode::StorageError, "Could not save your changes"),
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", &id),
            CoreError::CategoryNotFound(slug) => ApiError::not_found("Category", &slug),
            CoreError::OrderNotFound(id) => ApiError::not_found("Order", &id),
            CoreError::EmptyCart => ApiError::new(ErrorCode::CartError, "Your cart is empty"),
            CoreError::NotAuthenticated => {
                ApiError::new(ErrorCode::Unauthenticated, "Please sign in to continue")
            }
            CoreError::InvalidCoupon(code) => ApiError::new(
                ErrorCode::InvalidCoupon,
                format!("Invalid coupon code: {}", code),
            ),
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Result type for storefront commands.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_mapping() {
        let err: ApiError = CoreError::ProductNotFound("esp-99".to_string()).into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Product not found: esp-99");

        let err: ApiError = CoreError::EmptyCart.into();
        assert_eq!(err.code, ErrorCode::CartError);
    }

    #[test]
    fn test_validation_error_mapping() {
        let err: ApiError = ValidationError::WrongLength {
            field: "pincode".to_string(),
            len: 6,
        }
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "pincode must be exactly 6 characters");
    }

    #[test]
    fn test_storage_errors_are_generic() {
        let err: ApiError = StoreError::backend("disk on fire").into();
        assert_eq!(err.code, ErrorCode::StorageError);
        assert!(!err.message.contains("disk"));
    }

    #[test]
    fn test_serializes_screaming_code() {
        let json = serde_json::to_string(&ApiError::not_found("Order", "ORD1")).unwrap();
        assert_eq!(json, r#"{"code":"NOT_FOUND","message":"Order not found: ORD1"}"#);
    }
}
