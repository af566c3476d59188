//! Credential Service
//!
//! Email-keyed credential records with argon2 password hashes. The
//! storefront never shows emails to users; they are derived from phone
//! numbers by the identity service.

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::common::{AppError, AppResult};
use crate::db::models::CredentialRecord;
use crate::db::repository::BaseRepository;

const CREDENTIAL_TABLE: &str = "credential";

/// Minimum password length enforced by the credential layer itself.
const MIN_PASSWORD_LEN: usize = 6;

#[derive(Clone)]
pub struct CredentialService {
    base: BaseRepository,
}

impl CredentialService {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<CredentialRecord>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM credential WHERE email = $email LIMIT 1")
            .bind(("email", email.to_string()))
            .await?;
        let records: Vec<CredentialRecord> = result.take(0)?;
        Ok(records.into_iter().next())
    }

    /// Create a new identity. Returns the identity key used to link the
    /// profile document.
    pub async fn create_identity(&self, email: &str, password: &str) -> AppResult<String> {
        if password.len() < MIN_PASSWORD_LEN {
            return Err(AppError::auth("password must be at least 6 characters"));
        }
        if self.find_by_email(email).await?.is_some() {
            return Err(AppError::auth("an account with this phone number already exists"));
        }

        let hash_pass = CredentialRecord::hash_password(password)
            .map_err(|e| AppError::remote(format!("password hashing failed: {e}")))?;

        let record = CredentialRecord {
            id: None,
            email: email.to_string(),
            hash_pass,
            created_at: shared::util::now_millis(),
        };

        let created: Option<CredentialRecord> = self
            .base
            .db()
            .create(CREDENTIAL_TABLE)
            .content(record)
            .await?;
        let created = created.ok_or_else(|| AppError::remote("failed to create credential"))?;

        Ok(created
            .id
            .map(|id| id.key().to_string())
            .unwrap_or_default())
    }

    /// Verify email + password. Unknown email and wrong password fail the
    /// same way, so callers cannot probe for registered phone numbers.
    pub async fn authenticate(&self, email: &str, password: &str) -> AppResult<String> {
        let record = self
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::auth("invalid phone number or password"))?;

        let verified = record
            .verify_password(password)
            .map_err(|e| AppError::remote(format!("password verification failed: {e}")))?;
        if !verified {
            return Err(AppError::auth("invalid phone number or password"));
        }

        Ok(record
            .id
            .map(|id| id.key().to_string())
            .unwrap_or_default())
    }
}
