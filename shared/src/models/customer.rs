//! Customer Types
//!
//! Shipping addresses and the session-cached user shape. The full profile
//! entity (with its record id) lives in `hub-server/src/db/models`.

use serde::{Deserialize, Serialize};

/// One entry in a customer's address book.
///
/// Keyed in the profile's address map by a millis-derived id. Orders carry a
/// denormalized copy, not a reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Recipient name
    pub name: String,
    pub phone: String,
    pub line1: String,
    #[serde(default)]
    pub line2: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
}

/// The logged-in user as cached locally for fast rendering.
///
/// A copy of the remote profile, rewritten on login and after profile
/// mutations; it can drift from the source of truth between those writes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub phone: String,
    pub name: String,
    pub email: String,
    pub is_admin: bool,
}
