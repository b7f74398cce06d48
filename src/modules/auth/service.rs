use anyhow::anyhow;
use std::sync::OnceLock;
use tracing::{info, instrument, warn};

use authgate_auth::JwtKeys;
use authgate_config::PasswordConfig;
use authgate_core::{AppError, hash_password, verify_password};
use authgate_db::UserStore;
use authgate_models::{LoginRequest, NewUser, RegisterRequest, User};

use crate::metrics::{
    track_jwt_issued, track_user_login_failure, track_user_login_success, track_user_registered,
};

const INVALID_CREDENTIALS: &str = "Invalid credentials";

fn invalid_credentials() -> AppError {
    AppError::unauthorized(anyhow!(INVALID_CREDENTIALS))
}

static DUMMY_HASH: OnceLock<String> = OnceLock::new();

/// A real bcrypt hash at the configured cost. Unknown identifiers are checked
/// against it so they cost as much as a wrong password.
fn dummy_hash(cost: u32) -> Result<&'static str, AppError> {
    if let Some(hash) = DUMMY_HASH.get() {
        return Ok(hash);
    }

    let hash = hash_password("authgate-unknown-user", cost)?;
    Ok(DUMMY_HASH.get_or_init(|| hash))
}

/// bcrypt is CPU-bound; run it off the async workers.
async fn blocking<T, F>(task: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, AppError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(AppError::internal)?
}

pub struct AuthService;

impl AuthService {
    /// Creates an account. The username is trimmed; email and full name are
    /// stored as given.
    #[instrument(skip(users, password_config))]
    pub async fn register(
        users: &dyn UserStore,
        password_config: &PasswordConfig,
        dto: RegisterRequest,
    ) -> Result<User, AppError> {
        let username = dto.username.trim().to_string();
        if username.is_empty() {
            return Err(AppError::bad_request(anyhow!("username is required")));
        }

        let cost = password_config.bcrypt_cost;
        let password = dto.password;
        let password_hash = blocking(move || hash_password(&password, cost)).await?;

        let user = users
            .insert(NewUser {
                username,
                email: dto.email,
                full_name: dto.full_name,
                password_hash,
            })
            .await?;

        info!(user_id = user.id, "User registered");
        track_user_registered();

        Ok(user)
    }

    /// Verifies credentials and issues an access token.
    ///
    /// An unknown identifier and a wrong password fail identically.
    #[instrument(skip(users, jwt_keys, password_config))]
    pub async fn login(
        users: &dyn UserStore,
        jwt_keys: &JwtKeys,
        password_config: &PasswordConfig,
        dto: LoginRequest,
    ) -> Result<String, AppError> {
        let identifier = dto.username_or_email.trim();

        let Some(user) = users.find_by_login(identifier).await? else {
            let cost = password_config.bcrypt_cost;
            let password = dto.password;
            blocking(move || verify_password(&password, dummy_hash(cost)?)).await?;

            warn!("Login failed: unknown identifier");
            track_user_login_failure("unknown_user");
            return Err(invalid_credentials());
        };

        let password = dto.password;
        let hash = user.password_hash.clone();
        let matches = blocking(move || verify_password(&password, &hash)).await?;

        if !matches {
            warn!(user_id = user.id, "Login failed: wrong password");
            track_user_login_failure("wrong_password");
            return Err(invalid_credentials());
        }

        let token = jwt_keys.issue(user.id)?;

        track_user_login_success();
        track_jwt_issued();

        Ok(token)
    }
}
