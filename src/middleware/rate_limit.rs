//! Rate limiting middleware

use axum::{
    body::Body,
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use redis::AsyncCommands;
use std::net::SocketAddr;

use crate::{constants, error::AppError, state::AppState};

/// Fixed-window rate limit keyed by client IP and path bucket
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let ip = addr.ip().to_string();
    let path = request.uri().path().to_string();

    let (limit, window) = get_rate_limit(&path);

    let key = format!("rate_limit:{}:{}", ip, path_bucket(&path));
    let mut redis = state.redis();

    // A Redis hiccup must not take the read API down with it
    let count: i64 = redis.incr(&key, 1).await.unwrap_or(0);

    if count == 1 {
        let _: () = redis.expire(&key, window).await.unwrap_or(());
    }

    if count > limit {
        return Err(AppError::TooManyRequests);
    }

    Ok(next.run(request).await)
}

/// Get rate limit for a path
fn get_rate_limit(path: &str) -> (i64, i64) {
    if path_bucket(path) == "submissions" {
        (
            constants::rate_limits::SUBMISSION_MAX_REQUESTS,
            constants::rate_limits::SUBMISSION_WINDOW_SECS,
        )
    } else {
        (
            constants::rate_limits::GENERAL_MAX_REQUESTS,
            constants::rate_limits::GENERAL_WINDOW_SECS,
        )
    }
}

/// Get bucket for path (for grouping similar endpoints)
fn path_bucket(path: &str) -> &str {
    if path.starts_with("/api/v2/submissions") {
        "submissions"
    } else if path.starts_with("/api/v2/contests") {
        "contests"
    } else if path.starts_with("/api/v2/problems") {
        "problems"
    } else {
        "general"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_buckets() {
        assert_eq!(path_bucket("/api/v2/submissions/5"), "submissions");
        assert_eq!(path_bucket("/api/v2/contests/1/ranklist"), "contests");
        assert_eq!(path_bucket("/api/v2/home/dashboard"), "general");
    }

    #[test]
    fn test_submission_bucket_is_tighter() {
        let (sub_limit, _) = get_rate_limit("/api/v2/submissions");
        let (gen_limit, _) = get_rate_limit("/api/v2/home/dashboard");
        assert!(sub_limit < gen_limit);
    }
}
