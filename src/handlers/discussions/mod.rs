//! Discussion and article handlers
//!
//! Two route trees share this module: `/discussions` for board listings
//! and `/articles` for individual articles and comments.

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Discussion board routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_discussions))
        .route("/problems/{id}", get(handler::list_problem_discussions))
}

/// Article routes
pub fn article_routes() -> Router<AppState> {
    Router::new()
        .route("/recent", get(handler::recent_articles))
        .route("/{id}", get(handler::get_article))
        .route("/{id}/comments", get(handler::get_comments))
}
