//! Application state
//!
//! Holds the store handles and services behind cheap clones. This is the
//! explicit context object: repositories and stores stay stateless, all
//! session-scoped state (cart, wishlist, session cache) lives in the local
//! store, and nothing hides in module-level globals.

use std::path::Path;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::common::{AppError, AppResult};
use crate::core::Config;
use crate::db;
use crate::db::repository::{OrderRepository, ProductRepository, ReviewRepository};
use crate::identity::{IdentityService, JwtService};
use crate::local::{CartStore, LocalStore, WishlistStore};
use crate::orders::{OrderEvents, OrderService};

#[derive(Clone)]
pub struct AppState {
    config: Config,
    db: Surreal<Db>,
    jwt: JwtService,
    pub products: ProductRepository,
    pub reviews: ReviewRepository,
    pub orders: OrderService,
    pub identity: IdentityService,
    pub cart: CartStore,
    pub wishlist: WishlistStore,
}

impl AppState {
    /// Open the stores under the configured working directory and wire up
    /// all services.
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        let work_dir = Path::new(&config.work_dir);
        std::fs::create_dir_all(work_dir)
            .map_err(|e| AppError::remote(format!("cannot create work dir: {e}")))?;

        let store_path = work_dir.join("store");
        let store_path = store_path
            .to_str()
            .ok_or_else(|| AppError::remote("work dir path is not valid UTF-8"))?;
        let db = db::open(store_path).await?;
        let local = LocalStore::open(work_dir.join("local.redb"))?;

        Ok(Self::assemble(config.clone(), db, local))
    }

    /// Wire services over already-open stores (tests, ephemeral runs).
    pub fn assemble(config: Config, db: Surreal<Db>, local: LocalStore) -> Self {
        let jwt = JwtService::with_config(config.jwt.clone());
        let events = OrderEvents::new();

        let products = ProductRepository::new(db.clone());
        let reviews = ReviewRepository::new(db.clone());
        let orders = OrderService::new(OrderRepository::new(db.clone()), products.clone(), events);
        let identity =
            IdentityService::new(db.clone(), local.clone(), jwt.clone(), &config.email_domain);
        let cart = CartStore::new(local.clone());
        let wishlist = WishlistStore::new(local);

        Self {
            config,
            db,
            jwt,
            products,
            reviews,
            orders,
            identity,
            cart,
            wishlist,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }

    pub fn jwt(&self) -> &JwtService {
        &self.jwt
    }
}
