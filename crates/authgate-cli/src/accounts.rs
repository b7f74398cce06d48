//! Creating accounts from the terminal.
//!
//! Accounts made here go through the same checks as `POST /api/register`:
//! the request is validated, the username is trimmed, and the password is
//! hashed with the configured bcrypt cost before it reaches the store.

use anyhow::anyhow;
use validator::Validate;

use authgate_core::{AppError, hash_password};
use authgate_db::UserStore;
use authgate_models::{NewUser, RegisterRequest, User};

pub async fn create_user(
    users: &dyn UserStore,
    bcrypt_cost: u32,
    request: RegisterRequest,
) -> Result<User, AppError> {
    request.validate().map_err(AppError::bad_request)?;

    let username = request.username.trim();
    if username.is_empty() {
        return Err(AppError::bad_request(anyhow!("username is required")));
    }

    let password_hash = hash_password(&request.password, bcrypt_cost)?;

    users
        .insert(NewUser {
            username: username.to_string(),
            email: request.email,
            full_name: request.full_name,
            password_hash,
        })
        .await
}
