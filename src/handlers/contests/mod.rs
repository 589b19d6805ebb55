//! Contest handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Contest routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_contests))
        .route("/{id}", get(handler::get_contest))
        .route("/{id}/problems", get(handler::get_problems))
        .route("/{id}/ranklist", get(handler::get_ranklist))
        .route("/{id}/submissions", get(handler::get_submissions))
}
