//! # Session Store
//!
//! Simulated authentication plus the signed-in user's profile, address
//! book and order history.
//!
//! ## Two Slots
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  `user`   ── the session ─────────── User (no password)                 │
//! │              removed on logout                                          │
//! │                                                                         │
//! │  `users`  ── the registry ────────── [User + passwordHash, ...]         │
//! │              survives logout, so "log out, log back in" works           │
//! │                                                                         │
//! │  Every profile/address/order mutation rewrites the session slot AND     │
//! │  the registry entry with the same user id.                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Login Contract
//! Bad credentials and duplicate emails are `Ok(false)`, never errors.
//! `Err` is reserved for the storage backend failing.
//!
//! The demo account (`demo@example.com` / `demo123`) lives outside the
//! registry, so its edits survive only in the session slot.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, info, warn};
use uuid::Uuid;
use voltmart_core::validation::validate_password;
use voltmart_core::{Address, AddressPatch, NewAddress, Order, ProfilePatch, User};

use crate::credentials::{hash_password, verify_password};
use crate::error::StoreResult;
use crate::storage::{keys, load_json, save_json, KeyValueStorage};

pub const DEMO_EMAIL: &str = "demo@example.com";
pub const DEMO_PASSWORD: &str = "demo123";
pub const DEMO_USER_ID: &str = "demo-user";

/// Number of orders on the profile and tracking pages.
pub const RECENT_ORDERS_LEN: usize = 3;

/// A registry entry: the user plus their password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegisteredUser {
    #[serde(flatten)]
    user: User,
    password_hash: String,
}

fn demo_user() -> User {
    User {
        id: DEMO_USER_ID.to_string(),
        email: DEMO_EMAIL.to_string(),
        name: "Demo User".to_string(),
        phone: Some("9876543210".to_string()),
        addresses: Vec::new(),
        orders: Vec::new(),
    }
}

fn same_email(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

// =============================================================================
// Session Store
// =============================================================================

pub struct SessionStore {
    storage: Arc<dyn KeyValueStorage>,
    user: Option<User>,
    demo_account_enabled: bool,
    snapshot_tx: watch::Sender<Option<User>>,
}

impl SessionStore {
    /// Restores the session from the `user` slot, if any.
    pub fn open(storage: Arc<dyn KeyValueStorage>) -> StoreResult<Self> {
        let user: Option<User> = load_json(storage.as_ref(), keys::USER)?;
        match &user {
            Some(u) => debug!(user_id = %u.id, "Session restored"),
            None => debug!("No saved session"),
        }

        let (snapshot_tx, _) = watch::channel(user.clone());
        Ok(SessionStore {
            storage,
            user,
            demo_account_enabled: true,
            snapshot_tx,
        })
    }

    /// Enables or disables the built-in demo credentials.
    pub fn with_demo_account(mut self, enabled: bool) -> Self {
        self.demo_account_enabled = enabled;
        self
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<User>> {
        self.snapshot_tx.subscribe()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Signs in with the demo credentials or a registered account.
    pub fn login(&mut self, email: &str, password: &str) -> StoreResult<bool> {
        if self.demo_account_enabled && email == DEMO_EMAIL && password == DEMO_PASSWORD {
            info!(email = %email, "Demo login");
            self.set_session(Some(demo_user()))?;
            return Ok(true);
        }

        let registry = self.registry()?;
        let found = registry
            .into_iter()
            .find(|r| same_email(&r.user.email, email) && verify_password(password, &r.password_hash));

        match found {
            Some(entry) => {
                info!(email = %entry.user.email, user_id = %entry.user.id, "Login succeeded");
                self.set_session(Some(entry.user))?;
                Ok(true)
            }
            None => {
                info!(email = %email, "Login failed");
                Ok(false)
            }
        }
    }

    /// Creates an account and signs in as it.
    ///
    /// Returns `Ok(false)` if the email (compared case-insensitively) is
    /// already registered.
    pub fn register(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
        phone: Option<&str>,
    ) -> StoreResult<bool> {
        let mut registry = self.registry()?;
        if registry.iter().any(|r| same_email(&r.user.email, email)) {
            info!(email = %email, "Registration rejected: email taken");
            return Ok(false);
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            email: email.trim().to_string(),
            name: name.trim().to_string(),
            phone: phone
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string),
            addresses: Vec::new(),
            orders: Vec::new(),
        };

        registry.push(RegisteredUser {
            user: user.clone(),
            password_hash: hash_password(password)?,
        });
        save_json(self.storage.as_ref(), keys::USERS, &registry)?;

        info!(email = %user.email, user_id = %user.id, "User registered");
        self.set_session(Some(user))?;
        Ok(true)
    }

    /// Ends the session. The registry is untouched.
    pub fn logout(&mut self) -> StoreResult<()> {
        if let Some(user) = &self.user {
            info!(user_id = %user.id, "Logout");
        }
        self.set_session(None)
    }

    /// Replaces the password of the signed-in account.
    ///
    /// `Ok(false)` when there is no session, the account is the demo
    /// account, `current` does not verify, or `new` is too short.
    pub fn change_password(&mut self, current: &str, new: &str) -> StoreResult<bool> {
        let Some(user_id) = self.user.as_ref().map(|u| u.id.clone()) else {
            return Ok(false);
        };
        if validate_password(new).is_err() {
            return Ok(false);
        }

        let mut registry = self.registry()?;
        let Some(entry) = registry.iter_mut().find(|r| r.user.id == user_id) else {
            debug!(user_id = %user_id, "Password change for unregistered account");
            return Ok(false);
        };
        if !verify_password(current, &entry.password_hash) {
            info!(user_id = %user_id, "Password change rejected");
            return Ok(false);
        }

        entry.password_hash = hash_password(new)?;
        save_json(self.storage.as_ref(), keys::USERS, &registry)?;
        info!(user_id = %user_id, "Password changed");
        Ok(true)
    }

    // =========================================================================
    // Profile, Addresses, Orders
    // =========================================================================

    /// Applies a partial profile update.
    ///
    /// `Ok(false)` without a session, or when the new email (compared
    /// case-insensitively) belongs to another registered account.
    pub fn update_profile(&mut self, patch: &ProfilePatch) -> StoreResult<bool> {
        let Some(user_id) = self.user.as_ref().map(|u| u.id.clone()) else {
            return Ok(false);
        };
        if patch.is_empty() {
            return Ok(true);
        }

        let mut patch = patch.clone();
        patch.email = patch.email.map(|e| e.trim().to_string());
        if let Some(email) = &patch.email {
            let taken = self
                .registry()?
                .iter()
                .any(|r| r.user.id != user_id && same_email(&r.user.email, email));
            if taken {
                info!(user_id = %user_id, email = %email, "Profile update rejected: email taken");
                return Ok(false);
            }
        }

        self.mutate_user(|user| patch.apply_to(user))
    }

    /// Appends an address with a fresh id. `None` without a session.
    ///
    /// Other addresses keep their `is_default` flag; see
    /// [`SessionStore::set_default_address`].
    pub fn add_address(&mut self, address: NewAddress) -> StoreResult<Option<Address>> {
        let address = address.into_address();
        let added = address.clone();
        let applied = self.mutate_user(move |user| user.addresses.push(address))?;
        Ok(applied.then_some(added))
    }

    /// Patches an address by id. Returns whether it was found.
    pub fn update_address(&mut self, address_id: &str, patch: AddressPatch) -> StoreResult<bool> {
        if !self.has_address(address_id) {
            return Ok(false);
        }
        self.mutate_user(|user| {
            if let Some(address) = user.addresses.iter_mut().find(|a| a.id == address_id) {
                patch.apply_to(address);
            }
        })
    }

    /// Deletes an address by id. Returns whether it was found.
    pub fn delete_address(&mut self, address_id: &str) -> StoreResult<bool> {
        if !self.has_address(address_id) {
            return Ok(false);
        }
        self.mutate_user(|user| user.addresses.retain(|a| a.id != address_id))
    }

    /// Makes `address_id` the only default address.
    pub fn set_default_address(&mut self, address_id: &str) -> StoreResult<bool> {
        if !self.has_address(address_id) {
            return Ok(false);
        }
        self.mutate_user(|user| {
            for address in &mut user.addresses {
                address.is_default = address.id == address_id;
            }
        })
    }

    /// Appends a placed order. Returns `false` without a session.
    pub fn add_order(&mut self, order: Order) -> StoreResult<bool> {
        let order_id = order.order_id.clone();
        let applied = self.mutate_user(move |user| user.orders.push(order))?;
        if applied {
            debug!(order_id = %order_id, "Order recorded");
        }
        Ok(applied)
    }

    // =========================================================================
    // Order Lookups
    // =========================================================================

    pub fn find_order(&self, order_id: &str) -> Option<&Order> {
        self.user.as_ref()?.find_order(order_id)
    }

    /// Matches the trimmed query against tracking ids and order ids.
    pub fn track(&self, query: &str) -> Option<&Order> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        self.user.as_ref()?.orders.iter().find(|o| {
            o.tracking_id.as_deref() == Some(query) || o.order_id == query
        })
    }

    /// The first `limit` orders in placement order.
    pub fn recent_orders(&self, limit: usize) -> &[Order] {
        match &self.user {
            Some(user) => &user.orders[..user.orders.len().min(limit)],
            None => &[],
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn has_address(&self, address_id: &str) -> bool {
        self.user
            .as_ref()
            .is_some_and(|u| u.addresses.iter().any(|a| a.id == address_id))
    }

    fn registry(&self) -> StoreResult<Vec<RegisteredUser>> {
        load_json(self.storage.as_ref(), keys::USERS)
    }

    /// Runs `f` on the session user, then rewrites both slots.
    /// Returns `false` (and does nothing) without a session.
    fn mutate_user<F>(&mut self, f: F) -> StoreResult<bool>
    where
        F: FnOnce(&mut User),
    {
        let Some(user) = self.user.as_mut() else {
            debug!("Profile mutation without a session ignored");
            return Ok(false);
        };
        f(user);
        let updated = user.clone();

        let mut registry = self.registry()?;
        match registry.iter_mut().find(|r| r.user.id == updated.id) {
            Some(entry) => {
                entry.user = updated.clone();
                save_json(self.storage.as_ref(), keys::USERS, &registry)?;
            }
            None if updated.id != DEMO_USER_ID => {
                warn!(user_id = %updated.id, "Session user missing from registry");
            }
            None => {}
        }

        self.set_session(Some(updated))?;
        Ok(true)
    }

    fn set_session(&mut self, user: Option<User>) -> StoreResult<()> {
        match &user {
            Some(u) => save_json(self.storage.as_ref(), keys::USER, u)?,
            None => self.storage.remove(keys::USER)?,
        }
        self.user = user;
        self.snapshot_tx.send_replace(self.user.clone());
        Ok(())
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("user", &self.user.as_ref().map(|u| &u.id))
            .field("demo_account_enabled", &self.demo_account_enabled)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use voltmart_core::checkout::{build_order, PricingRules};
    use voltmart_core::{CartItem, Catalog, OrderStatus, PaymentMethod};

    fn setup() -> (Arc<MemoryStorage>, SessionStore) {
        let storage = Arc::new(MemoryStorage::new());
        let session = SessionStore::open(storage.clone()).unwrap();
        (storage, session)
    }

    fn new_address(name: &str, is_default: bool) -> NewAddress {
        NewAddress {
            name: name.to_string(),
            phone: "9876543210".to_string(),
            address_line1: "42 Residency Road".to_string(),
            address_line2: None,
            city: "Bengaluru".to_string(),
            state: "Karnataka".to_string(),
            pincode: "560025".to_string(),
            is_default,
        }
    }

    fn order(address: Address) -> Order {
        let catalog = Catalog::seeded();
        let items = vec![CartItem::new(catalog.product_by_id("1").unwrap().clone(), 1)];
        build_order(&items, address, PaymentMethod::Card, &PricingRules::default()).unwrap()
    }

    #[test]
    fn test_register_then_duplicate_then_login() {
        let (_, mut session) = setup();

        assert!(session.register("A", "a@x.com", "pw123456", None).unwrap());
        assert!(!session.register("B", "a@x.com", "pw2", None).unwrap());
        assert!(!session.register("B", "A@X.COM", "pw2", None).unwrap());

        session.logout().unwrap();
        assert!(!session.is_authenticated());

        assert!(session.login("a@x.com", "pw123456").unwrap());
        assert_eq!(session.user().unwrap().email, "a@x.com");
        assert_eq!(session.user().unwrap().name, "A");
    }

    #[test]
    fn test_login_rejects_bad_credentials() {
        let (_, mut session) = setup();
        session.register("Ann", "ann@x.com", "secret1", None).unwrap();
        session.logout().unwrap();

        assert!(!session.login("ann@x.com", "secret2").unwrap());
        assert!(!session.login("nobody@x.com", "secret1").unwrap());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_registry_never_holds_plain_passwords() {
        let (storage, mut session) = setup();
        session.register("Ann", "ann@x.com", "secret1", Some("9876543210")).unwrap();

        let users = storage.get(keys::USERS).unwrap().unwrap();
        assert!(!users.contains("secret1"));
        assert!(users.contains("passwordHash"));

        let current = storage.get(keys::USER).unwrap().unwrap();
        assert!(!current.contains("passwordHash"));
    }

    #[test]
    fn test_demo_login() {
        let (_, mut session) = setup();
        assert!(session.login(DEMO_EMAIL, DEMO_PASSWORD).unwrap());
        let user = session.user().unwrap();
        assert_eq!(user.id, DEMO_USER_ID);
        assert_eq!(user.name, "Demo User");
        assert_eq!(user.phone.as_deref(), Some("9876543210"));
    }

    #[test]
    fn test_demo_login_can_be_disabled() {
        let storage = Arc::new(MemoryStorage::new());
        let mut session = SessionStore::open(storage).unwrap().with_demo_account(false);
        assert!(!session.login(DEMO_EMAIL, DEMO_PASSWORD).unwrap());
    }

    #[test]
    fn test_logout_removes_session_slot_only() {
        let (storage, mut session) = setup();
        session.register("Ann", "ann@x.com", "secret1", None).unwrap();
        assert!(storage.get(keys::USER).unwrap().is_some());

        session.logout().unwrap();
        assert!(storage.get(keys::USER).unwrap().is_none());
        assert!(storage.get(keys::USERS).unwrap().is_some());
    }

    #[test]
    fn test_session_restored_on_open() {
        let (storage, mut session) = setup();
        session.register("Ann", "ann@x.com", "secret1", None).unwrap();

        let restored = SessionStore::open(storage).unwrap();
        assert_eq!(restored.user(), session.user());
    }

    #[test]
    fn test_mutations_without_session_are_noops() {
        let (storage, mut session) = setup();
        assert!(session.add_address(new_address("Home", true)).unwrap().is_none());
        assert!(!session.delete_address("x").unwrap());
        assert!(!session
            .update_profile(&ProfilePatch {
                name: Some("Ghost".to_string()),
                ..ProfilePatch::default()
            })
            .unwrap());
        assert!(!session.change_password("a", "bbbbbb").unwrap());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_profile_update_reaches_registry() {
        let (_, mut session) = setup();
        session.register("Ann", "ann@x.com", "secret1", None).unwrap();
        session
            .update_profile(&ProfilePatch {
                name: Some("Ann Lee".to_string()),
                phone: Some(Some("9123456780".to_string())),
                ..ProfilePatch::default()
            })
            .unwrap();
        assert_eq!(session.user().unwrap().name, "Ann Lee");
        assert!(session.update_profile(&ProfilePatch::default()).unwrap());

        session.logout().unwrap();
        assert!(session.login("ann@x.com", "secret1").unwrap());
        assert_eq!(session.user().unwrap().name, "Ann Lee");
        assert_eq!(session.user().unwrap().phone.as_deref(), Some("9123456780"));
    }

    #[test]
    fn test_profile_email_must_stay_unique() {
        let (storage, mut session) = setup();
        session.register("A", "a@x.com", "secret-a", None).unwrap();
        session.register("B", "b@x.com", "secret-b", None).unwrap();

        let steal = ProfilePatch {
            email: Some("A@X.com".to_string()),
            ..ProfilePatch::default()
        };
        assert!(!session.update_profile(&steal).unwrap());
        assert_eq!(session.user().unwrap().email, "b@x.com");

        let registry: Vec<RegisteredUser> = load_json(storage.as_ref(), keys::USERS).unwrap();
        let owners = registry
            .iter()
            .filter(|r| same_email(&r.user.email, "a@x.com"))
            .count();
        assert_eq!(owners, 1);

        session.logout().unwrap();
        assert!(!session.login("a@x.com", "secret-b").unwrap());
        assert!(session.login("a@x.com", "secret-a").unwrap());
        assert_eq!(session.user().unwrap().name, "A");

        // Re-casing your own address is not a conflict
        let recase = ProfilePatch {
            email: Some(" A@x.com ".to_string()),
            ..ProfilePatch::default()
        };
        assert!(session.update_profile(&recase).unwrap());
        assert_eq!(session.user().unwrap().email, "A@x.com");
    }

    #[test]
    fn test_address_book() {
        let (_, mut session) = setup();
        session.register("Ann", "ann@x.com", "secret1", None).unwrap();

        let home = session.add_address(new_address("Home", true)).unwrap().unwrap();
        let work = session.add_address(new_address("Work", true)).unwrap().unwrap();

        // add_address leaves both flagged
        let defaults = session.user().unwrap().addresses.iter().filter(|a| a.is_default).count();
        assert_eq!(defaults, 2);

        assert!(session.set_default_address(&work.id).unwrap());
        let user = session.user().unwrap();
        assert_eq!(user.default_address().map(|a| &a.id), Some(&work.id));
        assert_eq!(user.addresses.iter().filter(|a| a.is_default).count(), 1);

        assert!(session
            .update_address(
                &home.id,
                AddressPatch {
                    city: Some("Mysuru".to_string()),
                    ..AddressPatch::default()
                }
            )
            .unwrap());
        assert_eq!(session.user().unwrap().addresses[0].city, "Mysuru");
        assert!(!session.update_address("missing", AddressPatch::default()).unwrap());

        assert!(session.delete_address(&home.id).unwrap());
        assert_eq!(session.user().unwrap().addresses.len(), 1);
    }

    #[test]
    fn test_orders_and_tracking() {
        let (_, mut session) = setup();
        session.register("Ann", "ann@x.com", "secret1", None).unwrap();
        let address = session.add_address(new_address("Home", true)).unwrap().unwrap();

        let placed: Vec<Order> = (0..4).map(|_| order(address.clone())).collect();
        for o in &placed {
            assert!(session.add_order(o.clone()).unwrap());
        }

        let first = &placed[0];
        assert_eq!(session.find_order(&first.order_id), Some(first));
        assert!(session.find_order("ORDNOPE").is_none());

        let tracking = first.tracking_id.clone().unwrap();
        assert_eq!(session.track(&format!("  {} ", tracking)), Some(first));
        assert_eq!(session.track(&first.order_id), Some(first));
        assert!(session.track("   ").is_none());

        let recent = session.recent_orders(RECENT_ORDERS_LEN);
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].order_id, first.order_id);
        assert_eq!(recent[0].status, OrderStatus::Processing);

        // Orders survive logout via the registry
        session.logout().unwrap();
        assert!(session.recent_orders(3).is_empty());
        session.login("ann@x.com", "secret1").unwrap();
        assert_eq!(session.user().unwrap().orders.len(), 4);
    }

    #[test]
    fn test_change_password() {
        let (_, mut session) = setup();
        session.register("Ann", "ann@x.com", "secret1", None).unwrap();

        assert!(!session.change_password("wrong", "secret2").unwrap());
        assert!(!session.change_password("secret1", "short").unwrap());
        assert!(session.change_password("secret1", "secret2").unwrap());

        session.logout().unwrap();
        assert!(!session.login("ann@x.com", "secret1").unwrap());
        assert!(session.login("ann@x.com", "secret2").unwrap());
    }

    #[test]
    fn test_demo_account_cannot_change_password() {
        let (_, mut session) = setup();
        session.login(DEMO_EMAIL, DEMO_PASSWORD).unwrap();
        assert!(!session.change_password(DEMO_PASSWORD, "newpass1").unwrap());
    }

    #[test]
    fn test_subscribe_sees_login_and_logout() {
        let (_, mut session) = setup();
        let rx = session.subscribe();
        assert!(rx.borrow().is_none());

        session.login(DEMO_EMAIL, DEMO_PASSWORD).unwrap();
        assert_eq!(rx.borrow().as_ref().map(|u| u.id.clone()).as_deref(), Some(DEMO_USER_ID));

        session.logout().unwrap();
        assert!(rx.borrow().is_none());
    }
}
