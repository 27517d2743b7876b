//! Application configuration, re-exported from the workspace crates.

pub use rolegate_config::{CorsConfig, JwtConfig, ServerConfig};
pub use rolegate_db::{DatabaseConfig, StoreBackend};
