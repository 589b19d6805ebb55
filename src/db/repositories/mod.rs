//! Database repositories
//!
//! Repositories own the SQL; services compose them into view models.

mod article_repo;
mod contest_repo;
mod problem_repo;
mod rating_repo;
mod submission_repo;
mod user_repo;

pub use article_repo::{ArticleRepository, ArticleScope, NoticeFilter};
pub use contest_repo::ContestRepository;
pub use problem_repo::{ProblemListFilter, ProblemRepository, ProblemSort};
pub use rating_repo::RatingRepository;
pub use submission_repo::{
    JudgeStateSummary, StatisticsOrder, SubmissionListFilter, SubmissionRepository,
};
pub use user_repo::{RanklistSort, UserRepository};
