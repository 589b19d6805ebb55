//! Home dashboard response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    handlers::users::response::UserSummary,
    models::{Article, Contest, ContestStatus, Problem},
    utils::url,
};

/// Notice stub on the dashboard
#[derive(Debug, Serialize)]
pub struct NoticeRow {
    pub id: i32,
    pub url: String,
    pub title: String,
    pub public_time: DateTime<Utc>,
}

impl From<&Article> for NoticeRow {
    fn from(article: &Article) -> Self {
        Self {
            id: article.id,
            url: url::article_url(article.id),
            title: article.title.clone(),
            public_time: article.public_time,
        }
    }
}

/// Contest stub on the dashboard
#[derive(Debug, Serialize)]
pub struct HomeContestRow {
    pub id: i32,
    pub url: String,
    pub title: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: ContestStatus,
}

impl From<&Contest> for HomeContestRow {
    fn from(contest: &Contest) -> Self {
        Self {
            id: contest.id,
            url: url::contest_url(contest.id),
            title: contest.title.clone(),
            start_time: contest.start_time,
            end_time: contest.end_time,
            status: contest.status(),
        }
    }
}

/// Problem stub on the dashboard
#[derive(Debug, Serialize)]
pub struct HomeProblemRow {
    pub id: i32,
    pub url: String,
    pub title: String,
    pub ac_num: i32,
    pub submit_num: i32,
}

impl From<&Problem> for HomeProblemRow {
    fn from(problem: &Problem) -> Self {
        Self {
            id: problem.id,
            url: url::problem_url(problem.id),
            title: problem.title.clone(),
            ac_num: problem.ac_num,
            submit_num: problem.submit_num,
        }
    }
}

/// Aggregated home dashboard
#[derive(Debug, Serialize)]
pub struct HomeDashboardResponse {
    pub notices: Vec<NoticeRow>,
    pub ranklist: Vec<UserSummary>,
    pub recent_contests: Vec<HomeContestRow>,
    pub recent_problems: Vec<HomeProblemRow>,
    pub links: serde_json::Value,
}

/// Notices only
#[derive(Debug, Serialize)]
pub struct NoticesResponse {
    pub notices: Vec<NoticeRow>,
}

/// Ranklist head only
#[derive(Debug, Serialize)]
pub struct HomeRanklistResponse {
    pub ranklist: Vec<UserSummary>,
}

/// Recent problems only
#[derive(Debug, Serialize)]
pub struct RecentProblemsResponse {
    pub problems: Vec<HomeProblemRow>,
}

/// Recent contests only
#[derive(Debug, Serialize)]
pub struct RecentContestsResponse {
    pub contests: Vec<HomeContestRow>,
}

/// Footer links only
#[derive(Debug, Serialize)]
pub struct LinksResponse {
    pub links: serde_json::Value,
}
