//! Customer Models

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use shared::models::{Address, SessionUser};
use surrealdb::RecordId;

use super::serde_helpers;

/// Customer profile document, keyed by the credential identity id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerProfile {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    pub phone: String,
    pub name: String,
    /// Derived credential email, `<phone>@<domain>`
    pub email: String,
    #[serde(default)]
    pub is_admin: bool,
    /// Address book keyed by millis-derived id
    #[serde(default)]
    pub addresses: BTreeMap<String, Address>,
    pub created_at: i64,
}

impl CustomerProfile {
    pub fn id_string(&self) -> String {
        self.id.as_ref().map(|id| id.to_string()).unwrap_or_default()
    }

    /// The shape cached locally for fast rendering.
    pub fn session_user(&self) -> SessionUser {
        SessionUser {
            id: self.id_string(),
            phone: self.phone.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            is_admin: self.is_admin,
        }
    }
}

/// Credential record held by the credential service.
///
/// Identity is email-shaped because the credential layer requires it; the
/// storefront's login UX is phone + password and derives the email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialRecord {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    pub email: String,
    pub hash_pass: String,
    pub created_at: i64,
}

impl CredentialRecord {
    /// Verify password using argon2
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHash, PasswordVerifier},
        };

        let parsed_hash = PasswordHash::new(&self.hash_pass)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash password using argon2
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
        };

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(password_hash.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_round_trip() {
        let hash = CredentialRecord::hash_password("shirt123").expect("hash");
        let record = CredentialRecord {
            id: None,
            email: "9876543210@rvfashion.local".into(),
            hash_pass: hash,
            created_at: 0,
        };
        assert!(record.verify_password("shirt123").unwrap());
        assert!(!record.verify_password("wrong").unwrap());
    }
}
