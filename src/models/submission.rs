//! Submission model
//!
//! A submission is one evaluation record of a user's code against a
//! problem. Rows are created and mutated by the external judging
//! subsystem; this API only reads them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Submission database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Submission {
    pub id: i32,
    pub user_id: i32,
    pub problem_id: i32,
    /// Empty or null for submit-answer problems (no executable code)
    pub language: Option<String>,
    #[serde(skip_serializing)]
    pub code: String,
    pub code_length: i32,
    pub status: String,
    /// Null exactly while judging has not completed
    pub score: Option<i32>,
    /// Total running time in milliseconds
    pub total_time: Option<i32>,
    /// Peak memory in KiB
    pub max_memory: Option<i32>,
    pub is_public: bool,
    pub kind: SubmissionKind,
    /// Contest id; non-null exactly when `kind` is `Contest`
    pub contest_id: Option<i32>,
    /// Structured per-subtask/per-testcase breakdown, possibly absent or
    /// corrupt; treated as opaque and reshaped at read time
    pub result: Option<serde_json::Value>,
    pub submit_time: DateTime<Utc>,
}

impl Submission {
    /// Whether this submission was made inside a contest
    pub fn in_contest(&self) -> bool {
        self.kind == SubmissionKind::Contest
    }

    /// Whether this is an answer-file submission (no code panel)
    pub fn is_submit_answer(&self) -> bool {
        self.language.as_deref().unwrap_or("").is_empty()
    }

    /// Parsed judge status
    pub fn judge_status(&self) -> JudgeStatus {
        JudgeStatus::parse(&self.status)
    }

    /// Whether judging is still in progress
    pub fn running(&self) -> bool {
        !self.judge_status().is_terminal()
    }
}

/// Submission context type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[repr(i16)]
pub enum SubmissionKind {
    Standalone = 0,
    Contest = 1,
}

/// Judge status of a submission
///
/// State machine (owned by the judging subsystem, read-only here):
/// `Waiting -> Compiling -> Running -> outcome`; any state may move to
/// `Canceled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JudgeStatus {
    Waiting,
    Pending,
    Compiling,
    Running,
    Accepted,
    WrongAnswer,
    TimeLimitExceeded,
    MemoryLimitExceeded,
    RuntimeError,
    CompileError,
    SystemError,
    PartiallyCorrect,
    Canceled,
    Ignored,
    Unknown,
}

impl JudgeStatus {
    /// Every status in wire order, for the config endpoints
    pub const ALL: &'static [JudgeStatus] = &[
        Self::Waiting,
        Self::Pending,
        Self::Compiling,
        Self::Running,
        Self::Accepted,
        Self::WrongAnswer,
        Self::TimeLimitExceeded,
        Self::MemoryLimitExceeded,
        Self::RuntimeError,
        Self::CompileError,
        Self::SystemError,
        Self::PartiallyCorrect,
        Self::Canceled,
        Self::Ignored,
    ];

    /// Get status as its wire string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Waiting => "Waiting",
            Self::Pending => "Pending",
            Self::Compiling => "Compiling",
            Self::Running => "Running",
            Self::Accepted => "Accepted",
            Self::WrongAnswer => "Wrong Answer",
            Self::TimeLimitExceeded => "Time Limit Exceeded",
            Self::MemoryLimitExceeded => "Memory Limit Exceeded",
            Self::RuntimeError => "Runtime Error",
            Self::CompileError => "Compile Error",
            Self::SystemError => "System Error",
            Self::PartiallyCorrect => "Partially Correct",
            Self::Canceled => "Canceled",
            Self::Ignored => "Ignored",
            Self::Unknown => "Unknown",
        }
    }

    /// Parse a stored status string; anything unrecognized maps to
    /// `Unknown` rather than failing
    pub fn parse(s: &str) -> Self {
        match s {
            "Waiting" => Self::Waiting,
            "Pending" => Self::Pending,
            "Compiling" => Self::Compiling,
            "Running" => Self::Running,
            "Accepted" => Self::Accepted,
            "Wrong Answer" => Self::WrongAnswer,
            "Time Limit Exceeded" => Self::TimeLimitExceeded,
            "Memory Limit Exceeded" => Self::MemoryLimitExceeded,
            "Runtime Error" => Self::RuntimeError,
            "Compile Error" => Self::CompileError,
            "System Error" => Self::SystemError,
            "Partially Correct" => Self::PartiallyCorrect,
            "Canceled" => Self::Canceled,
            "Ignored" => Self::Ignored,
            _ => Self::Unknown,
        }
    }

    /// Check if judging has reached a final outcome
    pub fn is_terminal(&self) -> bool {
        !matches!(
            self,
            Self::Waiting | Self::Pending | Self::Compiling | Self::Running
        )
    }

    /// Collapse to the coarse bucket a viewer without detail access may
    /// see. Idempotent: coarsening a coarse status is a no-op.
    pub fn coarsen(&self) -> RoughStatus {
        match self {
            Self::Accepted => RoughStatus::Accepted,
            Self::Waiting | Self::Pending | Self::Compiling | Self::Running => RoughStatus::Pending,
            _ => RoughStatus::Failed,
        }
    }
}

impl std::fmt::Display for JudgeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Coarse status bucket shown when per-testcase detail is withheld
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoughStatus {
    Accepted,
    Failed,
    Pending,
}

impl RoughStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accepted => "Accepted",
            Self::Failed => "Failed",
            Self::Pending => "Pending",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for s in [
            "Accepted",
            "Wrong Answer",
            "Partially Correct",
            "System Error",
        ] {
            assert_eq!(JudgeStatus::parse(s).as_str(), s);
        }
    }

    #[test]
    fn test_unknown_status_is_not_terminal_noise() {
        assert_eq!(JudgeStatus::parse("garbage"), JudgeStatus::Unknown);
        assert!(JudgeStatus::Unknown.is_terminal());
        assert_eq!(JudgeStatus::Unknown.coarsen(), RoughStatus::Failed);
    }

    #[test]
    fn test_coarsen_buckets() {
        assert_eq!(JudgeStatus::Accepted.coarsen(), RoughStatus::Accepted);
        assert_eq!(JudgeStatus::Waiting.coarsen(), RoughStatus::Pending);
        assert_eq!(JudgeStatus::Compiling.coarsen(), RoughStatus::Pending);
        assert_eq!(JudgeStatus::WrongAnswer.coarsen(), RoughStatus::Failed);
        assert_eq!(JudgeStatus::Canceled.coarsen(), RoughStatus::Failed);
    }

    #[test]
    fn test_coarsen_idempotent() {
        // A coarse bucket re-parsed as a status must coarsen to itself.
        for status in [
            JudgeStatus::Accepted,
            JudgeStatus::WrongAnswer,
            JudgeStatus::Waiting,
            JudgeStatus::SystemError,
        ] {
            let once = status.coarsen();
            let twice = JudgeStatus::parse(once.as_str()).coarsen();
            assert_eq!(once, twice);
        }
    }
}
