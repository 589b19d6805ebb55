//! Submission handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Submission routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_submissions))
        .route("/config", get(handler::get_display_config))
        .route("/{id}", get(handler::get_submission))
}
