//! Repository Module
//!
//! CRUD operations over the document store, one repository per table.
//! Repositories are stateless handles: cheap to clone, no caching, no
//! side effects beyond the store calls themselves.

pub mod customer;
pub mod order;
pub mod product;
pub mod review;

// Re-exports
pub use customer::CustomerRepository;
pub use order::OrderRepository;
pub use product::ProductRepository;
pub use review::ReviewRepository;

use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

/// Ids are handled in "table:key" form throughout; bare keys are accepted
/// from callers and normalized here.
pub(crate) fn record_id(table: &str, id: &str) -> RecordId {
    let key = id
        .strip_prefix(table)
        .and_then(|rest| rest.strip_prefix(':'))
        .unwrap_or(id);
    RecordId::from_table_key(table, key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_id_normalization() {
        assert_eq!(
            record_id("product", "product:abc"),
            RecordId::from_table_key("product", "abc")
        );
        assert_eq!(
            record_id("product", "abc"),
            RecordId::from_table_key("product", "abc")
        );
    }
}
