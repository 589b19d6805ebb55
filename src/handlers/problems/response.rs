//! Problem response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    db::repositories::JudgeStateSummary,
    handlers::users::response::UserSummary,
    models::ProblemTag,
    utils::Pagination,
};

/// One problem list row
#[derive(Debug, Serialize)]
pub struct ProblemRow {
    pub id: i32,
    pub url: String,
    pub title: String,
    pub is_public: bool,
    pub ac_num: i32,
    pub submit_num: i32,
    /// Acceptance percentage
    pub ac_rate: f64,
    pub tags: Vec<ProblemTag>,
    /// The viewer's best/latest standing on this problem
    pub judge_state: Option<JudgeStateSummary>,
    pub allowed_edit: bool,
}

/// Problem list response
#[derive(Debug, Serialize)]
pub struct ProblemsListResponse {
    pub problems: Vec<ProblemRow>,
    pub pagination: Pagination,
}

/// Full problem statement and metadata
#[derive(Debug, Serialize)]
pub struct ProblemDetailResponse {
    pub id: i32,
    pub url: String,
    pub title: String,
    pub description: Option<String>,
    pub input_format: Option<String>,
    pub output_format: Option<String>,
    pub example: Option<String>,
    pub limit_and_hint: Option<String>,
    pub time_limit: i32,
    pub memory_limit: i32,
    pub kind: String,
    pub file_io: bool,
    pub file_io_input_name: Option<String>,
    pub file_io_output_name: Option<String>,
    pub is_public: bool,
    pub publicize_time: Option<DateTime<Utc>>,
    pub ac_num: i32,
    pub submit_num: i32,
    pub ac_rate: f64,
    pub tags: Vec<ProblemTag>,
    /// Withheld for anonymous problems unless the viewer may edit
    pub owner: Option<UserSummary>,
    pub discussion_count: i64,
    pub judge_state: Option<JudgeStateSummary>,
    pub allowed_edit: bool,
}

/// One statistics table row
#[derive(Debug, Serialize)]
pub struct StatisticsEntry {
    pub submission_id: i32,
    pub url: String,
    pub user: UserSummary,
    pub language: Option<String>,
    pub total_time: Option<i32>,
    pub max_memory: Option<i32>,
    pub code_length: i32,
    pub submit_time: DateTime<Utc>,
}

/// Problem statistics response
#[derive(Debug, Serialize)]
pub struct ProblemStatisticsResponse {
    pub problem_id: i32,
    pub order: String,
    pub submissions: Vec<StatisticsEntry>,
}

/// All tags
#[derive(Debug, Serialize)]
pub struct TagsResponse {
    pub tags: Vec<ProblemTag>,
}
