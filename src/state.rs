use std::fmt;
use std::sync::Arc;

use rolegate_db::{DatabaseConfig, UserStore, connect_store};

use crate::config::{CorsConfig, JwtConfig};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(store: Arc<dyn UserStore>, jwt_config: JwtConfig, cors_config: CorsConfig) -> Self {
        Self {
            store,
            jwt_config,
            cors_config,
        }
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("store", &self.store.backend_name())
            .field("cors_config", &self.cors_config)
            .finish_non_exhaustive()
    }
}

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let store = connect_store(&DatabaseConfig::from_env()).await?;

    Ok(AppState::new(
        store,
        JwtConfig::from_env(),
        CorsConfig::from_env(),
    ))
}
