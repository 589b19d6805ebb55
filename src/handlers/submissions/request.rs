//! Submission request DTOs

use serde::Deserialize;
use validator::Validate;

/// List submissions query parameters
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ListSubmissionsQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,

    /// Submitter username; an unknown name yields an empty page
    #[validate(length(max = 80))]
    pub submitter: Option<String>,

    pub problem_id: Option<i32>,
    pub contest_id: Option<i32>,

    #[validate(range(min = 0, max = 100))]
    pub min_score: Option<i32>,
    #[validate(range(min = 0, max = 100))]
    pub max_score: Option<i32>,

    /// Language id, or the `submit-answer` / `non-submit-answer`
    /// pseudo-languages
    #[validate(length(max = 40))]
    pub language: Option<String>,

    #[validate(length(max = 40))]
    pub status: Option<String>,
}

impl ListSubmissionsQuery {
    /// Whether any filter beyond pagination was requested
    pub fn is_filtered(&self) -> bool {
        self.submitter.is_some()
            || self.problem_id.is_some()
            || self.min_score.is_some()
            || self.max_score.is_some()
            || self.language.is_some()
            || self.status.is_some()
    }
}

/// Display config query parameters
#[derive(Debug, Deserialize)]
pub struct DisplayConfigQuery {
    pub contest_id: Option<i32>,
}
