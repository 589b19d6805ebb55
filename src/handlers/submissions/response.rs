//! Submission response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    utils::Pagination,
    visibility::{ContestGate, OverallResult, RoughResult},
};

/// What the client should render for submissions in the current context
///
/// Derived from the contest gate; outside a contest everything is shown
/// and the visibility flags of each row take over from there.
#[derive(Debug, Clone, Serialize)]
pub struct DisplayConfig {
    pub in_contest: bool,
    pub show_score: bool,
    pub show_usage: bool,
    pub show_code: bool,
    pub show_result: bool,
    pub show_detail_result: bool,
}

impl DisplayConfig {
    pub fn for_context(gate: Option<&ContestGate>) -> Self {
        match gate {
            Some(gate) => {
                let suppressed = gate.suppresses_detail();
                Self {
                    in_contest: true,
                    show_score: !suppressed,
                    show_usage: !suppressed,
                    show_code: true,
                    show_result: true,
                    show_detail_result: !suppressed,
                }
            }
            None => Self {
                in_contest: false,
                show_score: true,
                show_usage: true,
                show_code: true,
                show_result: true,
                show_detail_result: true,
            },
        }
    }
}

/// Contest reference attached to contest-scoped submission payloads
#[derive(Debug, Clone, Serialize)]
pub struct ContestSummary {
    pub id: i32,
    pub title: String,
    pub ended: bool,
}

/// One submission list row, already shaped for the viewer
#[derive(Debug, Serialize)]
pub struct SubmissionRow {
    pub id: i32,
    pub url: String,
    pub problem_id: i32,
    pub problem_title: String,
    pub user_id: i32,
    pub username: String,
    /// `answer` for submit-answer submissions
    pub language: Option<String>,
    pub code_length: i32,
    pub result: RoughResult,
    /// Null when usage is withheld for this viewer
    pub total_time: Option<i32>,
    pub max_memory: Option<i32>,
    pub submit_time: DateTime<Utc>,
    pub running: bool,
    /// Poll token, present while judging is in progress
    pub token: Option<String>,
}

/// Submission list response
#[derive(Debug, Serialize)]
pub struct SubmissionsListResponse {
    pub submissions: Vec<SubmissionRow>,
    pub pagination: Pagination,
    pub display_config: DisplayConfig,
    pub contest: Option<ContestSummary>,
    pub is_filtered: bool,
}

/// Full submission detail for one viewer
#[derive(Debug, Serialize)]
pub struct SubmissionDetailResponse {
    pub id: i32,
    pub url: String,
    pub problem_id: i32,
    pub problem_title: String,
    pub user_id: i32,
    pub username: String,
    pub language: Option<String>,
    /// Present only when the viewer may see code; absent for
    /// submit-answer submissions
    pub code: Option<String>,
    pub code_length: i32,
    pub submit_time: DateTime<Utc>,
    pub result: RoughResult,
    pub overall_result: OverallResult,
    pub allowed_see_code: bool,
    pub allowed_see_data: bool,
    pub allowed_see_detail: bool,
    pub allowed_rejudge: bool,
    pub token: String,
}

/// Display config response
#[derive(Debug, Serialize)]
pub struct DisplayConfigResponse {
    pub display_config: DisplayConfig,
    pub contest: Option<ContestSummary>,
}
