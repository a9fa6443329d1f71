//! # Account Commands
//!
//! Sign in, registration and the profile/address book pages.
//!
//! ## Auth Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  login(email, password)                                                 │
//! │        │                                                                │
//! │        ├── validate email format ───────► VALIDATION_ERROR              │
//! │        ├── simulated latency (auth.simulated_delay_ms)                  │
//! │        ▼                                                                │
//! │  SessionStore::login                                                    │
//! │        ├── demo credentials (if enabled) ─► { success: true,  user }    │
//! │        ├── registered + password verifies ► { success: true,  user }    │
//! │        └── anything else ────────────────► { success: false, null }     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The session lock is never held across the simulated wait.

use serde::{Deserialize, Serialize};
use tracing::debug;
use voltmart_core::validation::{
    validate_address, validate_email, validate_name, validate_password, validate_phone,
    validate_pincode, validate_registration,
};
use voltmart_core::{
    Address, AddressPatch, CoreError, NewAddress, ProfilePatch, User, ValidationError,
};
use voltmart_store::SessionStore;

use crate::error::{ApiError, ApiResult};
use crate::state::{ConfigState, SessionState};

/// Outcome of a login or registration attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub success: bool,
    pub user: Option<User>,
}

/// Registration form payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub phone: Option<String>,
}

fn require_user(session: &SessionStore) -> ApiResult<&User> {
    session
        .user()
        .ok_or_else(|| CoreError::NotAuthenticated.into())
}

async fn simulate_latency(config: &ConfigState) {
    let delay = config.auth_delay();
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

// =============================================================================
// Authentication
// =============================================================================

/// Signs in. Wrong credentials are `success: false`, not an error.
pub async fn login(
    config: &ConfigState,
    session: &SessionState,
    email: &str,
    password: &str,
) -> ApiResult<AuthResponse> {
    debug!(email = %email, "login command");
    validate_email(email)?;

    simulate_latency(config).await;

    session.with_mut(|s| -> ApiResult<AuthResponse> {
        let success = s.login(email.trim(), password)?;
        Ok(AuthResponse {
            success,
            user: s.user().cloned(),
        })
    })
}

/// Creates an account and signs in as it.
///
/// A taken email is `success: false`; malformed fields are validation
/// errors.
pub async fn register(
    config: &ConfigState,
    session: &SessionState,
    request: RegisterRequest,
) -> ApiResult<AuthResponse> {
    debug!(email = %request.email, "register command");
    validate_registration(
        &request.name,
        &request.email,
        &request.password,
        request.phone.as_deref(),
    )?;

    simulate_latency(config).await;

    session.with_mut(|s| -> ApiResult<AuthResponse> {
        let success = s.register(
            &request.name,
            &request.email,
            &request.password,
            request.phone.as_deref(),
        )?;
        Ok(AuthResponse {
            success,
            user: success.then(|| s.user().cloned()).flatten(),
        })
    })
}

pub fn logout(session: &SessionState) -> ApiResult<()> {
    debug!("logout command");
    session.with_mut(|s| s.logout())?;
    Ok(())
}

pub fn current_user(session: &SessionState) -> Option<User> {
    session.with(|s| s.user().cloned())
}

/// Returns `false` if `current` is wrong or the account is the demo one.
pub fn change_password(session: &SessionState, current: &str, new: &str) -> ApiResult<bool> {
    debug!("change_password command");
    validate_password(new)?;

    session.with_mut(|s| -> ApiResult<bool> {
        require_user(s)?;
        Ok(s.change_password(current, new)?)
    })
}

// =============================================================================
// Profile
// =============================================================================

pub fn update_profile(session: &SessionState, patch: ProfilePatch) -> ApiResult<User> {
    debug!(?patch, "update_profile command");

    if let Some(name) = &patch.name {
        validate_name(name)?;
    }
    if let Some(email) = &patch.email {
        validate_email(email)?;
    }
    if let Some(Some(phone)) = &patch.phone {
        validate_phone(phone)?;
    }

    session.with_mut(|s| -> ApiResult<User> {
        require_user(s)?;
        if !s.update_profile(&patch)? {
            return Err(ValidationError::AlreadyInUse {
                field: "email".to_string(),
            }
            .into());
        }
        Ok(require_user(s)?.clone())
    })
}

// =============================================================================
// Address Book
// =============================================================================

pub fn list_addresses(session: &SessionState) -> ApiResult<Vec<Address>> {
    session.with(|s| -> ApiResult<Vec<Address>> { Ok(require_user(s)?.addresses.clone()) })
}

pub fn add_address(session: &SessionState, address: NewAddress) -> ApiResult<Address> {
    debug!(city = %address.city, "add_address command");
    validate_address(&address)?;

    session.with_mut(|s| -> ApiResult<Address> {
        s.add_address(address)?
            .ok_or_else(|| CoreError::NotAuthenticated.into())
    })
}

pub fn update_address(
    session: &SessionState,
    address_id: &str,
    patch: AddressPatch,
) -> ApiResult<Address> {
    debug!(address_id = %address_id, "update_address command");

    if let Some(name) = &patch.name {
        validate_name(name)?;
    }
    if let Some(phone) = &patch.phone {
        validate_phone(phone)?;
    }
    if let Some(pincode) = &patch.pincode {
        validate_pincode(pincode)?;
    }

    session.with_mut(|s| -> ApiResult<Address> {
        require_user(s)?;
        if !s.update_address(address_id, patch)? {
            return Err(ApiError::not_found("Address", address_id));
        }
        require_user(s)?
            .addresses
            .iter()
            .find(|a| a.id == address_id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("Address", address_id))
    })
}

/// Deletes an address and returns the remaining book.
pub fn delete_address(session: &SessionState, address_id: &str) -> ApiResult<Vec<Address>> {
    debug!(address_id = %address_id, "delete_address command");

    session.with_mut(|s| -> ApiResult<Vec<Address>> {
        require_user(s)?;
        if !s.delete_address(address_id)? {
            return Err(ApiError::not_found("Address", address_id));
        }
        Ok(require_user(s)?.addresses.clone())
    })
}

/// Makes one address the default and returns the updated book.
pub fn set_default_address(session: &SessionState, address_id: &str) -> ApiResult<Vec<Address>> {
    debug!(address_id = %address_id, "set_default_address command");

    session.with_mut(|s| -> ApiResult<Vec<Address>> {
        require_user(s)?;
        if !s.set_default_address(address_id)? {
            return Err(ApiError::not_found("Address", address_id));
        }
        Ok(require_user(s)?.addresses.clone())
    })
}
