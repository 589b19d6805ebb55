//! Site configuration handlers

mod handler;
pub mod response;

pub use handler::*;
pub use response::*;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Config routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/languages", get(handler::get_languages))
        .route("/judge-status", get(handler::get_judge_status))
        .route("/site-info", get(handler::get_site_info))
        .route("/statistics", get(handler::get_statistics))
}
