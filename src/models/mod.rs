//! Domain models
//!
//! Database row models and the enums derived from them.

pub mod article;
pub mod contest;
pub mod problem;
pub mod rating;
pub mod submission;
pub mod user;

pub use article::{Article, ArticleComment};
pub use contest::{Contest, ContestPlayer, ContestStatus};
pub use problem::{Problem, ProblemTag};
pub use rating::{RatingCalculation, RatingHistory};
pub use submission::{JudgeStatus, RoughStatus, Submission, SubmissionKind};
pub use user::{Privilege, User};
