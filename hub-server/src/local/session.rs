//! Session Cache
//!
//! Local copy of the logged-in user, kept so the UI can render without a
//! store round-trip. Distinct from the authoritative profile document and
//! rewritten on login and after profile mutations.

use crate::common::AppResult;
use crate::local::LocalStore;
use crate::local::kv::SESSION_USER_KEY;
use shared::models::SessionUser;

#[derive(Clone)]
pub struct SessionCache {
    store: LocalStore,
}

impl SessionCache {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    pub fn get(&self) -> AppResult<Option<SessionUser>> {
        self.store.get_json(SESSION_USER_KEY)
    }

    /// `Some` writes the cache, `None` clears it.
    pub fn set(&self, user: Option<&SessionUser>) -> AppResult<()> {
        match user {
            Some(user) => self.store.put_json(SESSION_USER_KEY, user),
            None => self.store.remove(SESSION_USER_KEY),
        }
    }

    pub fn clear(&self) -> AppResult<()> {
        self.store.remove(SESSION_USER_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn set_get_clear() {
        let dir = TempDir::new().unwrap();
        let cache = SessionCache::new(LocalStore::open(dir.path().join("local.redb")).unwrap());

        assert!(cache.get().unwrap().is_none());

        let user = SessionUser {
            id: "user:abc".into(),
            phone: "9876543210".into(),
            name: "Ramesh".into(),
            email: "9876543210@rvfashion.local".into(),
            is_admin: false,
        };
        cache.set(Some(&user)).unwrap();
        assert_eq!(cache.get().unwrap().unwrap().id, "user:abc");

        cache.clear().unwrap();
        assert!(cache.get().unwrap().is_none());
    }
}
