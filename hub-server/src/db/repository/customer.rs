//! Customer Repository

use std::collections::BTreeMap;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, record_id};
use crate::common::{AppError, AppResult};
use crate::db::models::CustomerProfile;
use shared::models::Address;

const USER_TABLE: &str = "user";

#[derive(Clone)]
pub struct CustomerRepository {
    base: BaseRepository,
}

impl CustomerRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Create the profile document keyed by the credential identity id.
    pub async fn create(&self, identity_key: &str, profile: CustomerProfile) -> AppResult<CustomerProfile> {
        let created: Option<CustomerProfile> = self
            .base
            .db()
            .create((USER_TABLE, identity_key))
            .content(profile)
            .await?;
        created.ok_or_else(|| AppError::remote("failed to create customer profile"))
    }

    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<CustomerProfile>> {
        let profile: Option<CustomerProfile> =
            self.base.db().select(record_id(USER_TABLE, id)).await?;
        Ok(profile)
    }

    /// Replace the whole address book. Callers mutate a copy and write it
    /// back, matching how the profile document is maintained.
    pub async fn update_addresses(
        &self,
        id: &str,
        addresses: BTreeMap<String, Address>,
    ) -> AppResult<CustomerProfile> {
        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET addresses = $addresses RETURN AFTER")
            .bind(("thing", record_id(USER_TABLE, id)))
            .bind(("addresses", addresses))
            .await?;
        let profiles: Vec<CustomerProfile> = result.take(0)?;
        profiles
            .into_iter()
            .next()
            .ok_or_else(|| AppError::not_found(format!("Customer {id}")))
    }

    /// Flip the admin flag. Operational tool, the counterpart of granting
    /// an admin claim in the credential backend.
    pub async fn set_admin(&self, id: &str, is_admin: bool) -> AppResult<CustomerProfile> {
        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET is_admin = $flag RETURN AFTER")
            .bind(("thing", record_id(USER_TABLE, id)))
            .bind(("flag", is_admin))
            .await?;
        let profiles: Vec<CustomerProfile> = result.take(0)?;
        profiles
            .into_iter()
            .next()
            .ok_or_else(|| AppError::not_found(format!("Customer {id}")))
    }
}
