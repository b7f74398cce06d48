//! User persistence.
//!
//! [`UserStore`] is the seam between the services and storage. Production
//! uses [`PgUserStore`]; the `test-utils` feature adds [`MemoryUserStore`] so
//! the HTTP layer can be exercised without a database.
//!
//! Both implementations enforce the same rules:
//!
//! - username and email are unique among non-deleted users
//! - a uniqueness violation is a `409 Conflict`, never a crash
//! - soft-deleted users are invisible to every lookup

use anyhow::{Context, anyhow};
use async_trait::async_trait;
use sqlx::PgPool;
use std::fmt;
use tracing::instrument;

use authgate_core::AppError;
use authgate_models::{NewUser, User};

const USERNAME_INDEX: &str = "users_username_key";
const EMAIL_INDEX: &str = "users_email_key";

const USER_COLUMNS: &str =
    "id, username, email, full_name, password_hash, created_at, updated_at, deleted_at";

#[async_trait]
pub trait UserStore: Send + Sync + fmt::Debug {
    /// Persists a new user and returns the stored row.
    async fn insert(&self, user: NewUser) -> Result<User, AppError>;

    /// Finds the live user whose username or email equals `identifier`.
    /// A username match wins over an email match.
    async fn find_by_login(&self, identifier: &str) -> Result<Option<User>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;
}

fn username_taken() -> AppError {
    AppError::conflict(anyhow!("Username already taken"))
}

fn email_taken() -> AppError {
    AppError::conflict(anyhow!("Email already registered"))
}

#[derive(Clone, Debug)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub fn pool(&self) -> &PgPool {
        &self.db
    }
}

fn map_insert_error(err: sqlx::Error) -> AppError {
    if let Some(db_err) = err.as_database_error() {
        if db_err.is_unique_violation() {
            return match db_err.constraint() {
                Some(EMAIL_INDEX) => email_taken(),
                Some(USERNAME_INDEX) => username_taken(),
                _ => AppError::conflict(anyhow!("Username or email already exists")),
            };
        }
    }

    AppError::database(anyhow::Error::new(err).context("Failed to insert user"))
}

#[async_trait]
impl UserStore for PgUserStore {
    #[instrument(skip(self))]
    async fn insert(&self, user: NewUser) -> Result<User, AppError> {
        let query = format!(
            "INSERT INTO users (username, email, full_name, password_hash)
             VALUES ($1, $2, $3, $4)
             RETURNING {}",
            USER_COLUMNS
        );

        sqlx::query_as::<_, User>(&query)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.full_name)
            .bind(&user.password_hash)
            .fetch_one(&self.db)
            .await
            .map_err(map_insert_error)
    }

    #[instrument(skip(self))]
    async fn find_by_login(&self, identifier: &str) -> Result<Option<User>, AppError> {
        let query = format!(
            "SELECT {}
             FROM users
             WHERE (username = $1 OR email = $1) AND deleted_at IS NULL
             ORDER BY (username = $1) DESC, id
             LIMIT 1",
            USER_COLUMNS
        );

        let user = sqlx::query_as::<_, User>(&query)
            .bind(identifier)
            .fetch_optional(&self.db)
            .await
            .context("Failed to fetch user")
            .map_err(AppError::database)?;

        Ok(user)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let query = format!(
            "SELECT {} FROM users WHERE id = $1 AND deleted_at IS NULL",
            USER_COLUMNS
        );

        let user = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .context("Failed to fetch user by ID")
            .map_err(AppError::database)?;

        Ok(user)
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub use memory::MemoryUserStore;

#[cfg(any(test, feature = "test-utils"))]
mod memory {
    use super::*;
    use chrono::Utc;
    use std::sync::{Mutex, MutexGuard};

    /// In-process store with the same uniqueness and visibility rules as
    /// [`PgUserStore`].
    #[derive(Debug, Default)]
    pub struct MemoryUserStore {
        users: Mutex<Vec<User>>,
    }

    impl MemoryUserStore {
        pub fn new() -> Self {
            Self::default()
        }

        fn lock(&self) -> Result<MutexGuard<'_, Vec<User>>, AppError> {
            self.users
                .lock()
                .map_err(|_| AppError::internal(anyhow!("User store lock poisoned")))
        }

        /// Marks a user as deleted. Only tests need this; the service never
        /// deletes.
        pub fn soft_delete(&self, id: i64) -> Result<bool, AppError> {
            let mut users = self.lock()?;
            match users.iter_mut().find(|u| u.id == id && u.deleted_at.is_none()) {
                Some(user) => {
                    user.deleted_at = Some(Utc::now());
                    Ok(true)
                }
                None => Ok(false),
            }
        }

        pub fn len(&self) -> usize {
            self.lock().map(|users| users.len()).unwrap_or(0)
        }

        pub fn is_empty(&self) -> bool {
            self.len() == 0
        }
    }

    #[async_trait]
    impl UserStore for MemoryUserStore {
        async fn insert(&self, user: NewUser) -> Result<User, AppError> {
            let mut users = self.lock()?;
            let live = || users.iter().filter(|u| u.deleted_at.is_none());

            if live().any(|u| u.username == user.username) {
                return Err(username_taken());
            }

            if user.email.is_some() && live().any(|u| u.email == user.email) {
                return Err(email_taken());
            }

            let now = Utc::now();
            let stored = User {
                id: users.len() as i64 + 1,
                username: user.username,
                email: user.email,
                full_name: user.full_name,
                password_hash: user.password_hash,
                created_at: now,
                updated_at: now,
                deleted_at: None,
            };
            users.push(stored.clone());

            Ok(stored)
        }

        async fn find_by_login(&self, identifier: &str) -> Result<Option<User>, AppError> {
            let users = self.lock()?;
            let live = || users.iter().filter(|u| u.deleted_at.is_none());

            let found = live()
                .find(|u| u.username == identifier)
                .or_else(|| live().find(|u| u.email.as_deref() == Some(identifier)));

            Ok(found.cloned())
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
            let users = self.lock()?;
            Ok(users
                .iter()
                .find(|u| u.id == id && u.deleted_at.is_none())
                .cloned())
        }
    }
}
