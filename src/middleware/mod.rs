//! HTTP middleware

pub mod auth;
pub mod logging;
pub mod rate_limit;
