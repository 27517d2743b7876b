//! # Rolegate DB
//!
//! Storage for Rolegate users.
//!
//! The rest of the application talks to storage only through the
//! [`UserStore`] trait. Two backends implement it:
//!
//! - [`PgUserStore`]: durable, backed by PostgreSQL through SQLx
//! - [`MemoryUserStore`]: process-local, used for tests and local runs
//!
//! [`connect_store`] picks one from [`DatabaseConfig`].
//!
//! # Example
//!
//! ```ignore
//! use rolegate_db::{DatabaseConfig, connect_store};
//!
//! let store = connect_store(&DatabaseConfig::from_env()).await?;
//! let admins = store.list_by_role(Role::Admin).await?;
//! ```

pub mod config;
pub mod memory;
pub mod postgres;
pub mod store;

use std::sync::Arc;

use tracing::info;

pub use config::{DatabaseConfig, StoreBackend};
pub use memory::MemoryUserStore;
pub use postgres::{PgUserStore, init_db_pool, run_migrations};
pub use sqlx::PgPool;
pub use store::{StoreError, StoreResult, UserStore};

/// Builds the configured store. Postgres pools are migrated before they are
/// handed out.
pub async fn connect_store(config: &DatabaseConfig) -> anyhow::Result<Arc<dyn UserStore>> {
    match config.backend {
        StoreBackend::Memory => {
            info!("Using in-memory user store; data is lost on restart");
            Ok(Arc::new(MemoryUserStore::new()))
        }
        StoreBackend::Postgres => {
            let pool = init_db_pool(config).await?;
            run_migrations(&pool).await?;
            info!("Connected to PostgreSQL user store");
            Ok(Arc::new(PgUserStore::new(pool)))
        }
    }
}
