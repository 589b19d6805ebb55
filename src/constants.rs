//! Application-wide constants
//!
//! Constant values used throughout the application, grouped by purpose.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

// =============================================================================
// DATABASE DEFAULTS
// =============================================================================

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 20;

// =============================================================================
// SITE DEFAULTS
// =============================================================================

/// Default site title
pub const DEFAULT_SITE_TITLE: &str = "OpenJudge";

/// Rating assigned to every user before their first rated contest
pub const DEFAULT_USER_RATING: i32 = 1500;

/// Label for the seed entry of a rating history
pub const INITIAL_RATING_LABEL: &str = "Initial rating";

// =============================================================================
// PAGINATION
// =============================================================================

/// Default page size for paginated results
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Maximum page size for paginated results
pub const MAX_PAGE_SIZE: u32 = 100;

/// Number of ranklist rows shown on the home dashboard
pub const HOME_RANKLIST_SIZE: u32 = 10;

/// Number of recent contests/problems shown on the home dashboard
pub const HOME_RECENT_SIZE: u32 = 5;

/// Number of rows returned by problem statistics endpoints
pub const PROBLEM_STATISTICS_SIZE: i64 = 10;

// =============================================================================
// SUPPORTED LANGUAGES
// =============================================================================

/// Language identifiers
pub mod languages {
    pub const C: &str = "c";
    pub const CPP: &str = "cpp";
    pub const RUST: &str = "rust";
    pub const PYTHON: &str = "python";
    pub const JAVA: &str = "java";
    pub const PASCAL: &str = "pascal";

    /// All supported language identifiers
    pub const ALL: &[&str] = &[C, CPP, RUST, PYTHON, JAVA, PASCAL];

    /// Pseudo-language filter matching answer-file submissions
    pub const SUBMIT_ANSWER: &str = "submit-answer";

    /// Pseudo-language filter excluding answer-file submissions
    pub const NON_SUBMIT_ANSWER: &str = "non-submit-answer";
}

// =============================================================================
// PRIVILEGES
// =============================================================================

/// Claim names for user privileges carried in session tokens
pub mod privileges {
    pub const MANAGE: &str = "manage";
    pub const MANAGE_PROBLEM: &str = "manage_problem";
}

// =============================================================================
// RATE LIMITING
// =============================================================================

/// Rate limiting configuration
pub mod rate_limits {
    /// Submission endpoints - max requests
    pub const SUBMISSION_MAX_REQUESTS: i64 = 30;
    /// Submission endpoints - window in seconds
    pub const SUBMISSION_WINDOW_SECS: i64 = 60;

    /// General API - max requests
    pub const GENERAL_MAX_REQUESTS: i64 = 100;
    /// General API - window in seconds
    pub const GENERAL_WINDOW_SECS: i64 = 60;
}

// =============================================================================
// API VERSIONING
// =============================================================================

/// API base path
pub const API_BASE_PATH: &str = "/api/v2";
