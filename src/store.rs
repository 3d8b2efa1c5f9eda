//! Storage seams consumed by the password reset service.
//!
//! The Postgres implementations delegate to the query modules in [`crate::db`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db;
use crate::models::{PasswordResetToken, User};

#[derive(Debug, Clone)]
pub struct StoreError {
    pub message: String,
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for StoreError {}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError {
            message: format!("database error: {err}"),
        }
    }
}

impl From<String> for StoreError {
    fn from(message: String) -> Self {
        StoreError { message }
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    async fn get_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;
    /// Persist a new password hash. Existing login sessions are revoked.
    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<(), StoreError>;
}

#[async_trait]
pub trait ResetTokenStore: Send + Sync {
    async fn create(
        &self,
        user_id: Uuid,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<PasswordResetToken, StoreError>;

    /// Unused and unexpired token with this digest, if any.
    async fn find_valid(&self, token_hash: &str) -> Result<Option<PasswordResetToken>, StoreError>;

    /// Returns true when this call moved the token from unused to used.
    async fn mark_used(&self, token_id: Uuid) -> Result<bool, StoreError>;

    async fn invalidate_all_for_user(&self, user_id: Uuid) -> Result<(), StoreError>;

    /// `invalidate_all_for_user` followed by `create`, as one atomic step.
    async fn replace_active(
        &self,
        user_id: Uuid,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<PasswordResetToken, StoreError>;
}

#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(db::users::find_by_email(&self.pool, email).await?)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(db::users::find_by_id(&self.pool, id).await?)
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;
        db::users::update_password(&mut *tx, id, password_hash).await?;
        db::refresh_tokens::delete_all_for_user(&mut *tx, id).await?;
        tx.commit().await?;
        Ok(())
    }
}

#[derive(Clone)]
pub struct PgResetTokenStore {
    pool: PgPool,
}

impl PgResetTokenStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResetTokenStore for PgResetTokenStore {
    async fn create(
        &self,
        user_id: Uuid,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<PasswordResetToken, StoreError> {
        Ok(db::password_reset_tokens::create(&self.pool, user_id, token_hash, expires_at).await?)
    }

    async fn find_valid(&self, token_hash: &str) -> Result<Option<PasswordResetToken>, StoreError> {
        Ok(db::password_reset_tokens::find_valid_by_hash(&self.pool, token_hash).await?)
    }

    async fn mark_used(&self, token_id: Uuid) -> Result<bool, StoreError> {
        Ok(db::password_reset_tokens::mark_used(&self.pool, token_id).await?)
    }

    async fn invalidate_all_for_user(&self, user_id: Uuid) -> Result<(), StoreError> {
        db::password_reset_tokens::invalidate_all_for_user(&self.pool, user_id).await?;
        Ok(())
    }

    async fn replace_active(
        &self,
        user_id: Uuid,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<PasswordResetToken, StoreError> {
        Ok(
            db::password_reset_tokens::replace_active(&self.pool, user_id, token_hash, expires_at)
                .await?,
        )
    }
}
