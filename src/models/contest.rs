//! Contest model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::middleware::auth::AuthenticatedUser;
use crate::models::user::Privilege;

/// Contest database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Contest {
    pub id: i32,
    pub title: String,
    pub subtitle: Option<String>,
    pub information: Option<String>,
    /// Scoring mode: "noi", "ioi" or "acm"
    pub kind: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub is_public: bool,
    /// While set and the contest is running, statistics and per-testcase
    /// detail stay hidden from non-supervisors
    pub hide_statistics: bool,
    /// User ids allowed to administer this contest
    pub admin_ids: Vec<i32>,
    /// Problem ids in contest order
    pub problem_ids: Vec<i32>,
}

impl Contest {
    /// Whether the contest is currently running
    pub fn is_running(&self) -> bool {
        let now = Utc::now();
        now >= self.start_time && now < self.end_time
    }

    /// Whether the contest has ended
    pub fn is_ended(&self) -> bool {
        Utc::now() >= self.end_time
    }

    /// Current status of the contest
    pub fn status(&self) -> ContestStatus {
        let now = Utc::now();
        if now < self.start_time {
            ContestStatus::Upcoming
        } else if now < self.end_time {
            ContestStatus::Running
        } else {
            ContestStatus::Ended
        }
    }

    /// Whether the viewer supervises this contest (contest admin, site
    /// admin or a holder of the manage privilege)
    pub fn is_supervisor(&self, viewer: Option<&AuthenticatedUser>) -> bool {
        match viewer {
            Some(user) => {
                user.is_admin
                    || user.has_privilege(Privilege::Manage)
                    || self.admin_ids.contains(&user.id)
            }
            None => false,
        }
    }

    /// Whether the viewer may see this contest at all
    pub fn is_visible_to(&self, viewer: Option<&AuthenticatedUser>) -> bool {
        self.is_public || self.is_supervisor(viewer)
    }

    /// Per-problem statistics are published for ioi/noi contests and for
    /// every ended contest
    pub fn statistics_published(&self) -> bool {
        self.kind == "ioi" || self.kind == "noi" || self.is_ended()
    }
}

/// Contest status enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContestStatus {
    Upcoming,
    Running,
    Ended,
}

impl std::fmt::Display for ContestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Upcoming => write!(f, "upcoming"),
            Self::Running => write!(f, "running"),
            Self::Ended => write!(f, "ended"),
        }
    }
}

/// Contest participation record
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ContestPlayer {
    pub id: i32,
    pub contest_id: i32,
    pub user_id: i32,
    pub score: i32,
    /// Per-problem breakdown plus the final rank, stored as JSON
    pub score_details: serde_json::Value,
}

impl ContestPlayer {
    /// Final rank extracted from the stored details, if present
    pub fn rank(&self) -> Option<i64> {
        self.score_details.get("rank").and_then(|v| v.as_i64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn contest(start_offset_min: i64, end_offset_min: i64) -> Contest {
        let now = Utc::now();
        Contest {
            id: 1,
            title: "Test Round".to_string(),
            subtitle: None,
            information: None,
            kind: "noi".to_string(),
            start_time: now + Duration::minutes(start_offset_min),
            end_time: now + Duration::minutes(end_offset_min),
            is_public: true,
            hide_statistics: false,
            admin_ids: vec![42],
            problem_ids: vec![],
        }
    }

    #[test]
    fn test_status_transitions() {
        assert_eq!(contest(10, 20).status(), ContestStatus::Upcoming);
        assert_eq!(contest(-10, 20).status(), ContestStatus::Running);
        assert_eq!(contest(-20, -10).status(), ContestStatus::Ended);
    }

    #[test]
    fn test_supervisor_requires_membership_or_privilege() {
        let c = contest(-10, 20);
        let admin_of_contest = AuthenticatedUser {
            id: 42,
            username: "alice".to_string(),
            is_admin: false,
            privileges: vec![],
        };
        let stranger = AuthenticatedUser {
            id: 7,
            username: "bob".to_string(),
            is_admin: false,
            privileges: vec![],
        };
        assert!(c.is_supervisor(Some(&admin_of_contest)));
        assert!(!c.is_supervisor(Some(&stranger)));
        assert!(!c.is_supervisor(None));
    }

    #[test]
    fn test_player_rank_is_defensive() {
        let player = ContestPlayer {
            id: 1,
            contest_id: 1,
            user_id: 1,
            score: 300,
            score_details: serde_json::json!({"rank": 4}),
        };
        assert_eq!(player.rank(), Some(4));

        let no_rank = ContestPlayer {
            score_details: serde_json::json!({"problems": []}),
            ..player
        };
        assert_eq!(no_rank.rank(), None);
    }
}
