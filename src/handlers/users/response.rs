//! User response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    models::User,
    utils::{Pagination, url},
};

/// Compact user reference embedded in other responses
#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    pub id: i32,
    pub url: String,
    pub username: String,
    pub rating: i32,
    pub nameplate: Option<String>,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            url: url::user_url(user.id),
            username: user.username.clone(),
            rating: user.rating,
            nameplate: user.nameplate.clone(),
        }
    }
}

/// Submission count for one judge status
#[derive(Debug, Clone, Serialize)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

/// One step of a user's rating history
///
/// The first entry is a synthetic seed at the site's default rating and
/// carries no contest reference.
#[derive(Debug, Clone, Serialize)]
pub struct RatingHistoryEntry {
    pub contest_id: Option<i32>,
    pub contest_title: String,
    pub rating_after: i32,
    /// Change relative to the previous entry
    pub delta: i32,
    pub rank: Option<i32>,
    pub participants: Option<i64>,
}

/// Article stub shown on a profile page
#[derive(Debug, Clone, Serialize)]
pub struct UserArticleRow {
    pub id: i32,
    pub title: String,
    pub public_time: DateTime<Utc>,
}

/// Full user profile
#[derive(Debug, Serialize)]
pub struct UserProfileResponse {
    pub id: i32,
    pub username: String,
    /// Withheld unless public or the viewer may edit the profile
    pub email: Option<String>,
    pub information: Option<String>,
    pub sex: Option<i16>,
    pub nameplate: Option<String>,
    pub is_admin: bool,
    pub rating: i32,
    pub ac_num: i32,
    pub register_time: DateTime<Utc>,
    pub statistics: Vec<StatusCount>,
    pub ac_problem_ids: Vec<i32>,
    pub rating_history: Vec<RatingHistoryEntry>,
    pub recent_articles: Vec<UserArticleRow>,
    pub allowed_edit: bool,
}

/// Per-status submission counts for one user
#[derive(Debug, Serialize)]
pub struct UserStatisticsResponse {
    pub user_id: i32,
    pub counts: Vec<StatusCount>,
    pub total: i64,
}

/// Reconstructed rating history
#[derive(Debug, Serialize)]
pub struct RatingHistoryResponse {
    pub user_id: i32,
    pub history: Vec<RatingHistoryEntry>,
}

/// Problems a user has solved
#[derive(Debug, Serialize)]
pub struct AcProblemsResponse {
    pub user_id: i32,
    pub problem_ids: Vec<i32>,
}

/// One ranklist row
#[derive(Debug, Serialize)]
pub struct RanklistRow {
    pub id: i32,
    pub username: String,
    pub nameplate: Option<String>,
    pub information: Option<String>,
    pub rating: i32,
    pub ac_num: i32,
}

/// Paginated ranklist
#[derive(Debug, Serialize)]
pub struct RanklistResponse {
    pub users: Vec<RanklistRow>,
    pub pagination: Pagination,
}

/// Paginated article list for one user
#[derive(Debug, Serialize)]
pub struct UserArticlesResponse {
    pub articles: Vec<UserArticleRow>,
    pub pagination: Pagination,
}
