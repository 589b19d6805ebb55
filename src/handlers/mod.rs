//! HTTP Request Handlers
//!
//! This module contains all HTTP request handlers organized by domain.

pub mod config;
pub mod contests;
pub mod discussions;
pub mod health;
pub mod home;
pub mod problems;
pub mod submissions;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Create all API routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/submissions", submissions::routes())
        .nest("/contests", contests::routes())
        .nest("/problems", problems::routes())
        .nest("/users", users::routes())
        .nest("/discussions", discussions::routes())
        .nest("/articles", discussions::article_routes())
        .nest("/home", home::routes())
        .nest("/config", config::routes())
}
