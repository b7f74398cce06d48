use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use authgate_auth::JwtKeys;
use authgate_config::{CorsConfig, JwtConfig, PasswordConfig, ServerConfig};
use authgate_db::{PgUserStore, UserStore, init_db_pool, run_migrations};

/// Shared, immutable request state built once at startup.
#[derive(Clone, Debug)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub jwt_keys: Arc<JwtKeys>,
    pub password_config: PasswordConfig,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserStore>,
        jwt_keys: JwtKeys,
        password_config: PasswordConfig,
        cors_config: CorsConfig,
    ) -> Self {
        Self {
            users,
            jwt_keys: Arc::new(jwt_keys),
            password_config,
            cors_config,
        }
    }
}

/// Loads configuration, connects the database and applies migrations when
/// `RUN_MIGRATIONS` is set.
pub async fn init_app_state(server_config: &ServerConfig) -> Result<AppState> {
    let jwt_config = JwtConfig::from_env()?;
    let password_config = PasswordConfig::from_env()?;
    let cors_config = CorsConfig::from_env();

    let jwt_keys = JwtKeys::new(&jwt_config).map_err(|e| e.error)?;

    let pool = init_db_pool(server_config).await?;
    if server_config.run_migrations {
        run_migrations(&pool).await?;
    } else {
        info!("Skipping migrations (RUN_MIGRATIONS=false)");
    }

    Ok(AppState::new(
        Arc::new(PgUserStore::new(pool)),
        jwt_keys,
        password_config,
        cors_config,
    ))
}
