//! User handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{Router, routing::get};

use crate::state::AppState;

/// User routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/ranklist", get(handler::ranklist))
        .route("/{id}", get(handler::get_user))
        .route("/{id}/statistics", get(handler::get_statistics))
        .route("/{id}/rating-history", get(handler::get_rating_history))
        .route("/{id}/ac-problems", get(handler::get_ac_problems))
        .route("/{id}/articles", get(handler::get_articles))
}
