pub mod auth;
pub mod catalog;
pub mod exercises;
pub mod sessions;
pub mod stats;
pub mod users;

use axum::routing::{get, post, put};
use axum::Router;

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        // Auth
        .route("/api/v1/auth/register", post(auth::register))
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/refresh", post(auth::refresh))
        .route("/api/v1/auth/logout", post(auth::logout))
        .route("/api/v1/auth/forgot-password", post(auth::forgot_password))
        .route("/api/v1/auth/reset-password", post(auth::reset_password))
        // Profile
        .route("/api/v1/users/me", get(users::me).put(users::update_me))
        .route("/api/v1/users/me/password", post(users::change_password))
        // Sessions
        .route("/api/v1/sessions", get(sessions::list).post(sessions::create))
        .route(
            "/api/v1/sessions/{id}",
            get(sessions::get)
                .put(sessions::update)
                .delete(sessions::delete),
        )
        // Exercises
        .route(
            "/api/v1/sessions/{id}/exercises",
            get(exercises::list_by_session).post(exercises::create),
        )
        .route(
            "/api/v1/exercises/{id}",
            put(exercises::update).delete(exercises::delete),
        )
        // Statistics
        .route("/api/v1/stats/summary", get(stats::summary))
        .route("/api/v1/stats/trend", get(stats::trend))
        .route("/api/v1/stats/progress", get(stats::progress))
        // Catalog
        .route("/api/v1/catalog", get(catalog::list))
}
