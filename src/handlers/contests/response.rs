//! Contest response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    handlers::users::response::UserSummary,
    models::{Contest, ContestStatus},
    utils::{Pagination, url},
};

/// One contest list row
#[derive(Debug, Serialize)]
pub struct ContestRow {
    pub id: i32,
    pub url: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub kind: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub is_public: bool,
    pub status: ContestStatus,
}

impl From<&Contest> for ContestRow {
    fn from(contest: &Contest) -> Self {
        Self {
            id: contest.id,
            url: url::contest_url(contest.id),
            title: contest.title.clone(),
            subtitle: contest.subtitle.clone(),
            kind: contest.kind.clone(),
            start_time: contest.start_time,
            end_time: contest.end_time,
            is_public: contest.is_public,
            status: contest.status(),
        }
    }
}

/// Contest list response
#[derive(Debug, Serialize)]
pub struct ContestsListResponse {
    pub contests: Vec<ContestRow>,
    pub pagination: Pagination,
}

/// One problem slot inside a contest
#[derive(Debug, Serialize)]
pub struct ContestProblemEntry {
    /// Letter index: A, B, ... Z, AA, ...
    pub letter: String,
    pub id: i32,
    pub url: String,
    pub title: String,
    /// Published for ioi/noi contests and once any contest has ended
    pub submit_count: Option<i64>,
    pub ac_count: Option<i64>,
}

/// The viewer's own standing in a contest
#[derive(Debug, Serialize)]
pub struct PlayerStanding {
    pub score: i32,
    pub rank: Option<i64>,
}

/// Contest detail response
#[derive(Debug, Serialize)]
pub struct ContestDetailResponse {
    pub id: i32,
    pub title: String,
    pub subtitle: Option<String>,
    pub information: Option<String>,
    pub kind: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub is_public: bool,
    pub hide_statistics: bool,
    pub status: ContestStatus,
    pub problems: Vec<ContestProblemEntry>,
    pub admins: Vec<UserSummary>,
    pub participant_count: i64,
    pub player: Option<PlayerStanding>,
}

/// Letter-indexed problem list
#[derive(Debug, Serialize)]
pub struct ContestProblemsResponse {
    pub contest_id: i32,
    pub problems: Vec<ContestProblemEntry>,
}

/// One ranklist row
#[derive(Debug, Serialize)]
pub struct ContestRanklistRow {
    pub rank: i64,
    pub user: UserSummary,
    pub score: i32,
    pub score_details: serde_json::Value,
}

/// Contest ranklist response
#[derive(Debug, Serialize)]
pub struct ContestRanklistResponse {
    pub contest_id: i32,
    pub players: Vec<ContestRanklistRow>,
}

/// Letter index for a 0-based problem slot: A..Z, then AA, AB, ...
pub fn letter_index(mut index: usize) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push(b'A' + (index % 26) as u8);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_index() {
        assert_eq!(letter_index(0), "A");
        assert_eq!(letter_index(25), "Z");
        assert_eq!(letter_index(26), "AA");
        assert_eq!(letter_index(27), "AB");
        assert_eq!(letter_index(51), "AZ");
        assert_eq!(letter_index(52), "BA");
    }
}
