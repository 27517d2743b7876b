use std::env;
use std::str::FromStr;

/// Which [`UserStore`](crate::UserStore) implementation to run with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum StoreBackend {
    #[default]
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            "memory" | "in-memory" => Ok(StoreBackend::Memory),
            other => Err(anyhow::anyhow!("unknown store backend: {}", other)),
        }
    }
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub backend: StoreBackend,
    pub url: Option<String>,
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// Reads `STORE_BACKEND`, `DATABASE_URL` and `DATABASE_MAX_CONNECTIONS`.
    ///
    /// An unrecognised `STORE_BACKEND` falls back to Postgres.
    pub fn from_env() -> Self {
        Self {
            backend: env::var("STORE_BACKEND")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or_default(),
            url: env::var("DATABASE_URL").ok(),
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
        }
    }
}
