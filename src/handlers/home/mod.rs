//! Home dashboard handlers

mod handler;
pub mod response;

pub use handler::*;
pub use response::*;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Home routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(handler::get_dashboard))
        .route("/notices", get(handler::get_notices))
        .route("/ranklist", get(handler::get_ranklist))
        .route("/recent-problems", get(handler::get_recent_problems))
        .route("/recent-contests", get(handler::get_recent_contests))
        .route("/links", get(handler::get_links))
}
