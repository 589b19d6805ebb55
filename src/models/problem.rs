//! Problem model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::middleware::auth::AuthenticatedUser;
use crate::models::user::Privilege;

/// Problem database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Problem {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub input_format: Option<String>,
    pub output_format: Option<String>,
    pub example: Option<String>,
    pub limit_and_hint: Option<String>,
    /// Time limit in milliseconds
    pub time_limit: i32,
    /// Memory limit in MiB
    pub memory_limit: i32,
    /// "traditional", "submit-answer" or "interaction"
    pub kind: String,
    pub file_io: bool,
    pub file_io_input_name: Option<String>,
    pub file_io_output_name: Option<String>,
    pub user_id: i32,
    pub publicizer_id: Option<i32>,
    pub is_public: bool,
    /// Anonymous problems do not disclose their author
    pub is_anonymous: bool,
    pub ac_num: i32,
    pub submit_num: i32,
    pub publicize_time: Option<DateTime<Utc>>,
}

impl Problem {
    /// Whether the viewer may read and submit to this problem
    pub fn is_allowed_use_by(&self, viewer: Option<&AuthenticatedUser>) -> bool {
        if self.is_public {
            return true;
        }
        match viewer {
            Some(v) => {
                v.id == self.user_id || v.is_admin || v.has_privilege(Privilege::ManageProblem)
            }
            None => false,
        }
    }

    /// Whether the viewer may edit this problem
    pub fn is_allowed_edit_by(&self, viewer: Option<&AuthenticatedUser>) -> bool {
        match viewer {
            Some(v) => {
                v.id == self.user_id || v.is_admin || v.has_privilege(Privilege::ManageProblem)
            }
            None => false,
        }
    }

    /// Acceptance rate as a percentage, 0 when nothing was submitted
    pub fn ac_rate(&self) -> f64 {
        if self.submit_num == 0 {
            0.0
        } else {
            self.ac_num as f64 / self.submit_num as f64 * 100.0
        }
    }
}

/// Problem tag
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ProblemTag {
    pub id: i32,
    pub name: String,
    pub color: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn problem(is_public: bool, owner: i32) -> Problem {
        Problem {
            id: 1000,
            title: "A + B".to_string(),
            description: None,
            input_format: None,
            output_format: None,
            example: None,
            limit_and_hint: None,
            time_limit: 1000,
            memory_limit: 256,
            kind: "traditional".to_string(),
            file_io: false,
            file_io_input_name: None,
            file_io_output_name: None,
            user_id: owner,
            publicizer_id: None,
            is_public,
            is_anonymous: false,
            ac_num: 5,
            submit_num: 20,
            publicize_time: None,
        }
    }

    fn viewer(id: i32, privileges: Vec<Privilege>) -> AuthenticatedUser {
        AuthenticatedUser {
            id,
            username: format!("user{id}"),
            is_admin: false,
            privileges,
        }
    }

    #[test]
    fn test_private_problem_gating() {
        let p = problem(false, 3);
        assert!(!p.is_allowed_use_by(None));
        assert!(!p.is_allowed_use_by(Some(&viewer(9, vec![]))));
        assert!(p.is_allowed_use_by(Some(&viewer(3, vec![]))));
        assert!(p.is_allowed_use_by(Some(&viewer(9, vec![Privilege::ManageProblem]))));
    }

    #[test]
    fn test_public_problem_open_to_anonymous() {
        assert!(problem(true, 3).is_allowed_use_by(None));
    }

    #[test]
    fn test_ac_rate() {
        assert_eq!(problem(true, 1).ac_rate(), 25.0);
        let mut empty = problem(true, 1);
        empty.submit_num = 0;
        assert_eq!(empty.ac_rate(), 0.0);
    }
}
