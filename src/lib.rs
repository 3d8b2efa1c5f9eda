pub mod auth;
pub mod config;
pub mod db;
pub mod email;
pub mod error;
pub mod extract;
pub mod models;
pub mod rate_limit;
pub mod routes;
pub mod scoring;
pub mod services;
pub mod state;
pub mod store;

use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue};
use axum::Router;
use sqlx::PgPool;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::email::{DisabledMailer, Mailer, SmtpMailer};
use crate::rate_limit::LoginRateLimiter;
use crate::services::password_reset::{PasswordResetService, ResetSettings};
use crate::state::{AppState, SharedState};
use crate::store::{PgResetTokenStore, PgUserStore};

const MAX_BODY_SIZE: usize = 64 * 1024;

/// SMTP transport when configured, otherwise a mailer that refuses to send.
pub fn mailer_from_config(config: &Config) -> Arc<dyn Mailer> {
    match config.smtp.as_ref().map(SmtpMailer::new) {
        Some(Ok(mailer)) => {
            tracing::info!("SMTP configured");
            Arc::new(mailer)
        }
        Some(Err(e)) => {
            tracing::warn!("SMTP not available: {e}");
            Arc::new(DisabledMailer)
        }
        None => {
            tracing::warn!("SMTP not configured, outgoing email is disabled");
            Arc::new(DisabledMailer)
        }
    }
}

pub fn build_app(pool: PgPool, config: Config, mailer: Arc<dyn Mailer>) -> Router {
    let password_reset = PasswordResetService::new(
        Arc::new(PgUserStore::new(pool.clone())),
        Arc::new(PgResetTokenStore::new(pool.clone())),
        mailer.clone(),
        ResetSettings {
            base_url: config.base_url.clone(),
            ttl_minutes: config.reset_token_ttl_minutes,
        },
    );

    let state: SharedState = Arc::new(AppState {
        pool,
        config,
        mailer,
        password_reset,
        login_limiter: LoginRateLimiter::new(),
    });

    Router::new()
        .merge(routes::api_routes())
        .route("/health", axum::routing::get(health))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-frame-options"),
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("referrer-policy"),
            HeaderValue::from_static("no-referrer"),
        ))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
