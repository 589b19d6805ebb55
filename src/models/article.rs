//! Discussion article and comment models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::middleware::auth::AuthenticatedUser;

/// Discussion article database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Article {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub user_id: i32,
    /// Present when the article belongs to a problem's discussion board
    pub problem_id: Option<i32>,
    pub public_time: DateTime<Utc>,
    /// Bumped on new comments; discussion lists sort by it
    pub sort_time: DateTime<Utc>,
    pub is_notice: bool,
    pub allow_comment: bool,
}

impl Article {
    pub fn is_allowed_edit_by(&self, viewer: Option<&AuthenticatedUser>) -> bool {
        match viewer {
            Some(v) => v.id == self.user_id || v.is_admin,
            None => false,
        }
    }

    pub fn is_allowed_comment_by(&self, viewer: Option<&AuthenticatedUser>) -> bool {
        match viewer {
            Some(v) => self.allow_comment || v.id == self.user_id || v.is_admin,
            None => false,
        }
    }
}

/// Comment on an article
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ArticleComment {
    pub id: i32,
    pub article_id: i32,
    pub user_id: i32,
    pub content: String,
    pub public_time: DateTime<Utc>,
}

impl ArticleComment {
    pub fn is_allowed_edit_by(&self, viewer: Option<&AuthenticatedUser>) -> bool {
        match viewer {
            Some(v) => v.id == self.user_id || v.is_admin,
            None => false,
        }
    }
}
