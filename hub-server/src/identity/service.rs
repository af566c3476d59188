//! Identity Service
//!
//! Maps the storefront's phone + password UX onto the email-shaped
//! credential layer, owns the customer profile documents and the local
//! session cache, and issues session tokens.

use std::collections::BTreeMap;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::common::{AppError, AppResult};
use crate::db::models::CustomerProfile;
use crate::db::repository::CustomerRepository;
use crate::identity::{CredentialService, JwtService};
use crate::local::{LocalStore, SessionCache};
use shared::models::{Address, SessionUser};

/// Result of a successful register/login: the profile plus a session token.
#[derive(Debug, Clone)]
pub struct AuthenticatedCustomer {
    pub profile: CustomerProfile,
    pub token: String,
}

#[derive(Clone)]
pub struct IdentityService {
    credentials: CredentialService,
    customers: CustomerRepository,
    session: SessionCache,
    jwt: JwtService,
    email_domain: String,
}

impl IdentityService {
    pub fn new(
        db: Surreal<Db>,
        local: LocalStore,
        jwt: JwtService,
        email_domain: impl Into<String>,
    ) -> Self {
        Self {
            credentials: CredentialService::new(db.clone()),
            customers: CustomerRepository::new(db),
            session: SessionCache::new(local),
            jwt,
            email_domain: email_domain.into(),
        }
    }

    /// The credential layer wants an email-shaped identifier; the login UX
    /// is phone + password.
    pub fn credential_email(&self, phone: &str) -> String {
        format!("{phone}@{}", self.email_domain)
    }

    /// Register a new customer: credential record first, then the matching
    /// profile document keyed by the new identity, then the session cache.
    pub async fn register(
        &self,
        phone: &str,
        password: &str,
        name: &str,
    ) -> AppResult<AuthenticatedCustomer> {
        if phone.is_empty() || !phone.chars().all(|c| c.is_ascii_digit()) {
            return Err(AppError::validation("phone number must contain only digits"));
        }
        if name.trim().is_empty() {
            return Err(AppError::validation("name is required"));
        }
        // Re-checked here before the credential layer sees it.
        if password.len() < 6 {
            return Err(AppError::validation("password must be at least 6 characters"));
        }

        let email = self.credential_email(phone);
        let identity_key = self.credentials.create_identity(&email, password).await?;

        let profile = CustomerProfile {
            id: None,
            phone: phone.to_string(),
            name: name.trim().to_string(),
            email,
            is_admin: false,
            addresses: BTreeMap::new(),
            created_at: shared::util::now_millis(),
        };
        let profile = self.customers.create(&identity_key, profile).await?;

        self.finish_session(profile)
    }

    /// Authenticate and load the profile. A valid credential without a
    /// profile document is an inconsistent state surfaced as its own error.
    pub async fn login(&self, phone: &str, password: &str) -> AppResult<AuthenticatedCustomer> {
        let email = self.credential_email(phone);
        let identity_key = self.credentials.authenticate(&email, password).await?;

        let profile = self
            .customers
            .find_by_id(&identity_key)
            .await?
            .ok_or_else(|| AppError::profile_missing(&email))?;

        self.finish_session(profile)
    }

    fn finish_session(&self, profile: CustomerProfile) -> AppResult<AuthenticatedCustomer> {
        let user = profile.session_user();
        self.session.set(Some(&user))?;
        let token = self
            .jwt
            .generate_token(&user.id, &user.name, user.is_admin)
            .map_err(|e| AppError::remote(format!("token generation failed: {e}")))?;
        Ok(AuthenticatedCustomer { profile, token })
    }

    /// End the session and drop the cached user.
    pub fn logout(&self) -> AppResult<()> {
        self.session.clear()
    }

    /// Session-cached user, if any. May lag the store copy; it is rewritten
    /// on login and after every profile mutation.
    pub fn current_user(&self) -> AppResult<Option<SessionUser>> {
        self.session.get()
    }

    pub fn set_current_user(&self, user: Option<&SessionUser>) -> AppResult<()> {
        self.session.set(user)
    }

    /// Authoritative profile from the store.
    pub async fn profile(&self, customer_id: &str) -> AppResult<CustomerProfile> {
        self.customers
            .find_by_id(customer_id)
            .await?
            .ok_or_else(|| AppError::profile_missing(customer_id))
    }

    /// Add an address under a fresh millis-derived id. Store write first,
    /// then the session cache refresh, keeping drift bounded.
    pub async fn add_address(
        &self,
        customer_id: &str,
        address: Address,
    ) -> AppResult<CustomerProfile> {
        let profile = self.profile(customer_id).await?;
        let mut addresses = profile.addresses;
        addresses.insert(shared::util::address_id(), address);
        self.write_addresses(customer_id, addresses).await
    }

    /// Replace an existing address in place.
    pub async fn update_address(
        &self,
        customer_id: &str,
        address_id: &str,
        address: Address,
    ) -> AppResult<CustomerProfile> {
        let profile = self.profile(customer_id).await?;
        let mut addresses = profile.addresses;
        if !addresses.contains_key(address_id) {
            return Err(AppError::not_found(format!("Address {address_id}")));
        }
        addresses.insert(address_id.to_string(), address);
        self.write_addresses(customer_id, addresses).await
    }

    pub async fn remove_address(
        &self,
        customer_id: &str,
        address_id: &str,
    ) -> AppResult<CustomerProfile> {
        let profile = self.profile(customer_id).await?;
        let mut addresses = profile.addresses;
        if addresses.remove(address_id).is_none() {
            return Err(AppError::not_found(format!("Address {address_id}")));
        }
        self.write_addresses(customer_id, addresses).await
    }

    async fn write_addresses(
        &self,
        customer_id: &str,
        addresses: BTreeMap<String, Address>,
    ) -> AppResult<CustomerProfile> {
        let profile = self.customers.update_addresses(customer_id, addresses).await?;
        self.session.set(Some(&profile.session_user()))?;
        Ok(profile)
    }
}
