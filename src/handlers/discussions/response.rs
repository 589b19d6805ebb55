//! Discussion response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{handlers::users::response::UserSummary, utils::Pagination};

/// Problem reference attached to a problem-board article
#[derive(Debug, Clone, Serialize)]
pub struct ProblemRef {
    pub id: i32,
    pub url: String,
    pub title: String,
}

/// One discussion list row
#[derive(Debug, Serialize)]
pub struct ArticleRow {
    pub id: i32,
    pub url: String,
    pub title: String,
    pub user: UserSummary,
    pub problem: Option<ProblemRef>,
    pub public_time: DateTime<Utc>,
    pub sort_time: DateTime<Utc>,
    pub is_notice: bool,
    pub comment_count: i64,
}

/// Discussion list response
#[derive(Debug, Serialize)]
pub struct DiscussionsListResponse {
    pub articles: Vec<ArticleRow>,
    pub pagination: Pagination,
}

/// One comment, shaped for the viewer
#[derive(Debug, Serialize)]
pub struct CommentRow {
    pub id: i32,
    pub content: String,
    pub user: UserSummary,
    pub public_time: DateTime<Utc>,
    pub allowed_edit: bool,
}

/// Full article with its first page of comments
#[derive(Debug, Serialize)]
pub struct ArticleResponse {
    pub id: i32,
    pub url: String,
    pub title: String,
    pub content: String,
    pub user: UserSummary,
    pub problem: Option<ProblemRef>,
    pub public_time: DateTime<Utc>,
    pub sort_time: DateTime<Utc>,
    pub is_notice: bool,
    pub allow_comment: bool,
    pub allowed_edit: bool,
    pub allowed_comment: bool,
    pub comments: Vec<CommentRow>,
    pub comments_pagination: Pagination,
}

/// Paginated comments for one article
#[derive(Debug, Serialize)]
pub struct CommentsResponse {
    pub article_id: i32,
    pub comments: Vec<CommentRow>,
    pub pagination: Pagination,
}

/// Recent articles response
#[derive(Debug, Serialize)]
pub struct RecentArticlesResponse {
    pub articles: Vec<ArticleRow>,
}
