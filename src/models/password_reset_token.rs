use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Issued reset credential. Only the SHA-256 digest of the secret is kept.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct PasswordResetToken {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(skip_serializing)]
    pub token_hash: String,
    pub used: bool,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl PasswordResetToken {
    pub fn is_redeemable_at(&self, now: DateTime<Utc>) -> bool {
        !self.used && self.expires_at > now
    }
}
