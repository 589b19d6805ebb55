//! Discussion request DTOs

use serde::Deserialize;

/// Discussion list query parameters
#[derive(Debug, Deserialize)]
pub struct ListDiscussionsQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    /// `all`, `global` or `problems`
    pub scope: Option<String>,
}

/// Paginated comment query parameters
#[derive(Debug, Deserialize)]
pub struct CommentsQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// Recent articles query parameters
#[derive(Debug, Deserialize)]
pub struct RecentArticlesQuery {
    /// `all`, `notice` or `normal`
    pub filter: Option<String>,
    pub count: Option<u32>,
}
