//! User request DTOs

use serde::Deserialize;

/// Ranklist query parameters
#[derive(Debug, Deserialize)]
pub struct RanklistQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    /// One of `ac_num`, `rating`, `id`, `username`
    pub sort: Option<String>,
    /// `asc` or `desc`
    pub order: Option<String>,
}

/// Query parameters for a user's article list
#[derive(Debug, Deserialize)]
pub struct UserArticlesQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}
