//! Site configuration response DTOs

use serde::Serialize;

use crate::models::{JudgeStatus, Privilege};

/// Supported and enabled language identifiers
#[derive(Debug, Serialize)]
pub struct LanguagesResponse {
    pub languages: Vec<String>,
    pub enabled: Vec<String>,
}

/// Presentation hints for one judge status
#[derive(Debug, Serialize)]
pub struct JudgeStatusEntry {
    pub name: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
}

/// All judge statuses with presentation hints
#[derive(Debug, Serialize)]
pub struct JudgeStatusResponse {
    pub statuses: Vec<JudgeStatusEntry>,
}

/// Frontend presentation hints; the judging subsystem owns the statuses
/// themselves
pub fn status_entry(status: JudgeStatus) -> JudgeStatusEntry {
    let (icon, color) = match status {
        JudgeStatus::Accepted => ("checkmark", "green"),
        JudgeStatus::WrongAnswer => ("remove", "red"),
        JudgeStatus::TimeLimitExceeded => ("clock", "orange"),
        JudgeStatus::MemoryLimitExceeded => ("disk outline", "orange"),
        JudgeStatus::RuntimeError => ("bomb", "orange"),
        JudgeStatus::CompileError => ("code", "yellow"),
        JudgeStatus::SystemError => ("server", "grey"),
        JudgeStatus::PartiallyCorrect => ("minus", "blue"),
        JudgeStatus::Canceled | JudgeStatus::Ignored => ("ban", "grey"),
        JudgeStatus::Waiting
        | JudgeStatus::Pending
        | JudgeStatus::Compiling
        | JudgeStatus::Running
        | JudgeStatus::Unknown => ("spinner", "grey"),
    };

    JudgeStatusEntry {
        name: status.as_str(),
        icon,
        color,
    }
}

/// The current viewer as decoded from the session token
#[derive(Debug, Serialize)]
pub struct ViewerInfo {
    pub id: i32,
    pub username: String,
    pub is_admin: bool,
    pub privileges: Vec<Privilege>,
}

/// Site title plus the current viewer
#[derive(Debug, Serialize)]
pub struct SiteInfoResponse {
    pub title: String,
    pub viewer: Option<ViewerInfo>,
}

/// Site-wide counters
#[derive(Debug, Serialize)]
pub struct SiteStatisticsResponse {
    pub user_count: i64,
    pub problem_count: i64,
    pub submission_count: i64,
}
