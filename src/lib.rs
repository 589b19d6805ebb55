//! OpenJudge API - Read-oriented REST interface for an online judge
//!
//! This library exposes the query side of the OpenJudge platform:
//! contests, problems, submissions, users, discussions, the home
//! dashboard and site configuration.
//!
//! # Architecture
//!
//! The application follows a layered architecture:
//! - **Handlers**: HTTP request handlers (thin layer)
//! - **Services**: Business logic and view-model shaping
//! - **Repositories**: Database access
//! - **Models**: Domain models and DTOs
//!
//! Submissions are never returned raw: every row passes through the
//! [`visibility`] module, which decides what a given viewer may see and
//! produces the redacted projections.

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;
pub mod visibility;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
