//! Password reset token issuance and redemption.
//!
//! Every public operation returns a [`ResetOutcome`]; store and transport
//! failures are logged here and never reach the caller as errors.

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde::Serialize;

use crate::auth::{password, token};
use crate::email::{templates, Mailer};
use crate::store::{ResetTokenStore, StoreError, UserStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetOutcome {
    /// Returned for known and unknown addresses alike.
    EmailSent,
    PasswordChanged,
    /// Unknown, expired and already used tokens all land here.
    InvalidToken,
    WeakPassword,
    UserNotFound,
    EmailFailed,
    Internal,
}

impl ResetOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ResetOutcome::EmailSent | ResetOutcome::PasswordChanged)
    }

    pub fn message(&self) -> &'static str {
        match self {
            ResetOutcome::EmailSent => {
                "If that email is registered, a password reset link has been sent."
            }
            ResetOutcome::PasswordChanged => "Password has been reset successfully.",
            ResetOutcome::InvalidToken => "Invalid or expired reset token.",
            ResetOutcome::WeakPassword => "Password must be at least 8 characters.",
            ResetOutcome::UserNotFound => "The account for this reset token no longer exists.",
            ResetOutcome::EmailFailed => {
                "Could not send the password reset email. Please try again later."
            }
            ResetOutcome::Internal => "Something went wrong. Please try again later.",
        }
    }
}

/// Wire form of a [`ResetOutcome`].
#[derive(Debug, Clone, Serialize)]
pub struct ResetResponse {
    pub success: bool,
    pub message: String,
}

impl From<ResetOutcome> for ResetResponse {
    fn from(outcome: ResetOutcome) -> Self {
        ResetResponse {
            success: outcome.is_success(),
            message: outcome.message().to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResetSettings {
    /// Public base URL the reset link is built on, without a trailing slash.
    pub base_url: String,
    pub ttl_minutes: i64,
}

pub struct PasswordResetService {
    users: Arc<dyn UserStore>,
    tokens: Arc<dyn ResetTokenStore>,
    mailer: Arc<dyn Mailer>,
    settings: ResetSettings,
}

impl PasswordResetService {
    pub fn new(
        users: Arc<dyn UserStore>,
        tokens: Arc<dyn ResetTokenStore>,
        mailer: Arc<dyn Mailer>,
        settings: ResetSettings,
    ) -> Self {
        Self {
            users,
            tokens,
            mailer,
            settings,
        }
    }

    pub fn reset_link(&self, secret: &str) -> String {
        format!("{}/reset-password?token={secret}", self.settings.base_url)
    }

    pub async fn request_reset(&self, email: &str) -> ResetOutcome {
        match self.issue(email.trim()).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!("Password reset request failed: {e}");
                ResetOutcome::Internal
            }
        }
    }

    pub async fn redeem_reset(&self, raw_token: &str, new_password: &str) -> ResetOutcome {
        match self.redeem(raw_token.trim(), new_password).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!("Password reset redemption failed: {e}");
                ResetOutcome::Internal
            }
        }
    }

    async fn issue(&self, email: &str) -> Result<ResetOutcome, StoreError> {
        let Some(user) = self.users.get_by_email(email).await? else {
            tracing::debug!("Password reset requested for an unregistered address");
            return Ok(ResetOutcome::EmailSent);
        };

        let secret = token::generate_secret();
        let expires_at = Utc::now() + Duration::minutes(self.settings.ttl_minutes);
        let record = self
            .tokens
            .replace_active(user.id, &token::hash_token(&secret), expires_at)
            .await?;

        let html = templates::render_password_reset(
            &user.name,
            &self.reset_link(&secret),
            self.settings.ttl_minutes,
        );
        if let Err(e) = self
            .mailer
            .send(&user.email, "Reset your Shotlog password", &html)
            .await
        {
            tracing::error!("Failed to send password reset email for user {}: {e}", user.id);
            return Ok(ResetOutcome::EmailFailed);
        }

        tracing::info!("Issued password reset token {} for user {}", record.id, user.id);
        Ok(ResetOutcome::EmailSent)
    }

    async fn redeem(&self, raw_token: &str, new_password: &str) -> Result<ResetOutcome, StoreError> {
        if password::check_strength(new_password).is_err() {
            return Ok(ResetOutcome::WeakPassword);
        }

        let Some(record) = self.tokens.find_valid(&token::hash_token(raw_token)).await? else {
            return Ok(ResetOutcome::InvalidToken);
        };

        let Some(user) = self.users.get_by_id(record.user_id).await? else {
            tracing::warn!("Reset token {} points at missing user {}", record.id, record.user_id);
            return Ok(ResetOutcome::UserNotFound);
        };

        let password_hash = password::hash(new_password)?;

        // Claim before writing so a concurrent redemption of the same token loses.
        if !self.tokens.mark_used(record.id).await? {
            return Ok(ResetOutcome::InvalidToken);
        }
        self.users.update_password(user.id, &password_hash).await?;
        tracing::info!("Password reset completed for user {}", user.id);

        let html = templates::render_password_changed(&user.name);
        if let Err(e) = self
            .mailer
            .send(&user.email, "Your Shotlog password was changed", &html)
            .await
        {
            tracing::warn!("Failed to send password change notice to user {}: {e}", user.id);
        }

        Ok(ResetOutcome::PasswordChanged)
    }
}
