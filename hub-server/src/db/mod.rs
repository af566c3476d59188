//! Database Module
//!
//! Embedded SurrealDB document store. RocksDB-backed on disk in normal
//! operation, in-memory for tests.

pub mod models;
pub mod repository;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

use crate::common::AppResult;

const NAMESPACE: &str = "hub";
const DATABASE: &str = "storefront";

/// Open the on-disk document store under the given path.
pub async fn open(path: &str) -> AppResult<Surreal<Db>> {
    let db = Surreal::new::<RocksDb>(path).await?;
    db.use_ns(NAMESPACE).use_db(DATABASE).await?;
    tracing::info!(path, "document store opened");
    Ok(db)
}

/// Open an in-memory document store (tests, ephemeral runs).
pub async fn open_memory() -> AppResult<Surreal<Db>> {
    let db = Surreal::new::<Mem>(()).await?;
    db.use_ns(NAMESPACE).use_db(DATABASE).await?;
    Ok(db)
}
